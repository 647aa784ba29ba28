pub mod approval;
pub mod client;
pub mod draft;
pub mod envelope;
pub mod notification;
pub mod user;

pub use approval::{
    ApprovalAction, ApprovalActionKind, ApprovalDecision, ApprovalQueue, ApproveRequest,
    CommentReceipt, CommentRequest, QueueEntry, QueuePayload, ReviewStatus,
};
pub use client::{ClientApprovals, ClientSchedule, ReviewItem, ScheduledPost};
pub use draft::{
    Draft, DraftInput, DraftStatus, ScheduleRequest, ScheduleResult, StatusChange,
    TransitionError,
};
pub use envelope::ApiResponse;
pub use notification::{
    Notification, NotificationPage, NotificationRead, NotificationType, NotificationsPayload,
    SubscribeRequest, Subscription,
};
pub use user::{Credentials, LoginResult, SignupResult, User};
