use super::draft::DraftStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPost {
    pub id: String,
    pub title: String,
    pub platform: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: DraftStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSchedule {
    pub client_id: String,
    pub scheduled_posts: Vec<ScheduledPost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: String,
    pub title: String,
    pub platform: String,
    pub submitted_at: DateTime<Utc>,
}

/// Client portal view of everything awaiting or past review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientApprovals {
    pub client_id: String,
    pub pending: Vec<ReviewItem>,
    pub approved: Vec<ReviewItem>,
    pub rejected: Vec<ReviewItem>,
}
