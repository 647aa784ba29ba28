use super::draft::DraftStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalActionKind {
    Requested,
    Approved,
    Rejected,
    Comment,
}

/// Append-only review log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalAction {
    pub id: String,
    pub post_draft_id: String,
    pub user_id: String,
    pub action: ApprovalActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: String,
    pub post_draft_id: String,
    pub title: String,
    pub client: String,
    pub platform: String,
    pub status: DraftStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalQueue {
    pub items: Vec<QueueEntry>,
    pub count: usize,
}

/// `data` of `GET /approvals`: a bare list with `count` beside it on the
/// envelope, or an already assembled `{items, count}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QueuePayload {
    List(Vec<QueueEntry>),
    Queue(ApprovalQueue),
}

impl QueuePayload {
    /// `count` is the envelope's total. Falls back to the list length.
    pub fn into_queue(self, count: Option<u64>) -> ApprovalQueue {
        match self {
            QueuePayload::Queue(queue) => queue,
            QueuePayload::List(items) => ApprovalQueue {
                count: count.map(|c| c as usize).unwrap_or(items.len()),
                items,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDecision {
    pub post_id: String,
    pub status: ReviewStatus,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApproveRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentReceipt {
    pub post_id: String,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}
