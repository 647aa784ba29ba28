pub mod api_client;
pub mod approvals;
pub mod auth;
pub mod clients;
pub mod drafts;
pub mod notification_feed;
pub mod notifications;

pub use api_client::ApiClient;
pub use approvals::ApprovalsApi;
pub use auth::AuthApi;
pub use clients::ClientsApi;
pub use drafts::DraftsApi;
pub use notification_feed::{FeedSnapshot, NotificationFeed, DEFAULT_POLL_INTERVAL};
pub use notifications::{NotificationsApi, DEFAULT_NOTIFICATION_LIMIT};
