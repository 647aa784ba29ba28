use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    ApprovalRequested,
    PostApproved,
    PostPublished,
    PostFailed,
    CommentAdded,
}

impl NotificationType {
    /// Icon shown next to the toast for this kind of notification.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::ApprovalRequested => "📝",
            NotificationType::PostApproved => "✅",
            NotificationType::PostPublished => "🚀",
            NotificationType::PostFailed => "❌",
            NotificationType::CommentAdded => "💬",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub related_id: String,
    /// Only ever flips from false to true.
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub unread_count: u32,
}

/// `data` of `GET /notifications`: a bare list with `unreadCount` beside it
/// on the envelope, or an already assembled page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NotificationsPayload {
    List(Vec<Notification>),
    Page(NotificationPage),
}

impl NotificationsPayload {
    /// `unread_count` is the envelope's total. Without it, unread items in
    /// the list are counted.
    pub fn into_page(self, unread_count: Option<u64>) -> NotificationPage {
        match self {
            NotificationsPayload::Page(page) => page,
            NotificationsPayload::List(notifications) => {
                let unread_count = unread_count
                    .map(|c| u32::try_from(c).unwrap_or(u32::MAX))
                    .unwrap_or_else(|| notifications.iter().filter(|n| !n.read).count() as u32);
                NotificationPage {
                    notifications,
                    unread_count,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRead {
    pub id: String,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscription_id: String,
}
