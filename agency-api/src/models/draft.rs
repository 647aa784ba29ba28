use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftStatus {
    Draft,
    PendingApproval,
    Scheduled,
    Published,
}

impl DraftStatus {
    /// Publishing (SCHEDULED -> PUBLISHED) is done by an external process but
    /// is still a legal move.
    pub fn can_transition_to(self, next: DraftStatus) -> bool {
        matches!(
            (self, next),
            (DraftStatus::Draft, DraftStatus::PendingApproval)
                | (DraftStatus::Draft, DraftStatus::Scheduled)
                | (DraftStatus::PendingApproval, DraftStatus::Scheduled)
                | (DraftStatus::PendingApproval, DraftStatus::Draft)
                | (DraftStatus::Scheduled, DraftStatus::Published)
        )
    }
}

impl std::fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftStatus::Draft => write!(f, "DRAFT"),
            DraftStatus::PendingApproval => write!(f, "PENDING_APPROVAL"),
            DraftStatus::Scheduled => write!(f, "SCHEDULED"),
            DraftStatus::Published => write!(f, "PUBLISHED"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot move draft from {from} to {to}")]
    Invalid { from: DraftStatus, to: DraftStatus },

    #[error("Scheduled time {0} is not in the future")]
    NotInFuture(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub platform: String,
    pub status: DraftStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    pub fn submit_for_approval(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.transition(DraftStatus::PendingApproval, now)
    }

    /// Schedule straight from DRAFT, or as the outcome of an approval.
    pub fn schedule(
        &mut self,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        if at <= now {
            return Err(TransitionError::NotInFuture(at));
        }
        self.set_schedule(at, now)
    }

    /// Status half of [`Draft::schedule`] without the future-time check.
    /// Backends store whatever timestamp they are given.
    pub fn set_schedule(
        &mut self,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.transition(DraftStatus::Scheduled, now)?;
        self.scheduled_at = Some(at);
        Ok(())
    }

    pub fn approve(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        if self.status != DraftStatus::PendingApproval {
            return Err(TransitionError::Invalid {
                from: self.status,
                to: DraftStatus::Scheduled,
            });
        }
        self.transition(DraftStatus::Scheduled, now)
    }

    pub fn reject(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.transition(DraftStatus::Draft, now)
    }

    pub fn mark_published(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.transition(DraftStatus::Published, now)
    }

    fn transition(&mut self, next: DraftStatus, now: DateTime<Utc>) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionError::Invalid {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

/// Partial draft accepted by `saveDraft`. Absent fields keep their defaults
/// (or existing values on the backend).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DraftStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    pub id: String,
    pub status: DraftStatus,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub id: String,
    pub status: DraftStatus,
}
