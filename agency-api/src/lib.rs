pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod services;
pub mod session;

pub use config::{get_configuration, ApiSettings, ConfigSnapshot, Settings};
pub use error::{ApiError, ErrorKind};
pub use gateway::{ApiMode, ApiRequest, Backend};
pub use models::ApiResponse;
pub use services::{ApiClient, NotificationFeed};
pub use session::Session;
