//! Catalogue of logical operations.
//!
//! Each operation knows its HTTP route and the latency the mock backend
//! simulates for it. [`Operation::resolve`] maps a `(method, path)` pair back
//! to the operation, so a raw `invoke` reaches the same canned response in
//! mock mode as the typed facade does.

use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_NOTIFICATION_LIMIT: usize = 10;

/// How a 2xx body is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{success, data, message, error}`
    Envelope,
    /// The payload itself, as the auth routes answer.
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Login,
    Signup,
    SaveDraft,
    GetDraft { id: String },
    ScheduleDraft { id: String },
    SubmitForApproval { id: String },
    GetApprovalQueue,
    ApprovePost { id: String },
    RejectPost { id: String },
    AddComment { id: String },
    GetNotifications { limit: usize },
    MarkNotificationRead { id: String },
    SubscribeToUpdates,
    GetClientSchedule { client_id: String },
    GetClientApprovals { client_id: String },
}

#[derive(Deserialize)]
struct NotificationQuery {
    limit: Option<usize>,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Signup => "signup",
            Operation::SaveDraft => "saveDraft",
            Operation::GetDraft { .. } => "getDraft",
            Operation::ScheduleDraft { .. } => "scheduleDraft",
            Operation::SubmitForApproval { .. } => "submitForApproval",
            Operation::GetApprovalQueue => "getApprovalQueue",
            Operation::ApprovePost { .. } => "approvePost",
            Operation::RejectPost { .. } => "rejectPost",
            Operation::AddComment { .. } => "addComment",
            Operation::GetNotifications { .. } => "getNotifications",
            Operation::MarkNotificationRead { .. } => "markNotificationRead",
            Operation::SubscribeToUpdates => "subscribeToUpdates",
            Operation::GetClientSchedule { .. } => "getClientSchedule",
            Operation::GetClientApprovals { .. } => "getClientApprovals",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Operation::GetDraft { .. }
            | Operation::GetApprovalQueue
            | Operation::GetNotifications { .. }
            | Operation::GetClientSchedule { .. }
            | Operation::GetClientApprovals { .. } => Method::GET,
            _ => Method::POST,
        }
    }

    /// Route relative to the API base. Ids are percent-encoded, so any id
    /// stays a single path segment.
    pub fn path(&self) -> String {
        match self {
            Operation::Login => "/auth/login".to_string(),
            Operation::Signup => "/auth/signup".to_string(),
            Operation::SaveDraft => "/drafts".to_string(),
            Operation::GetDraft { id } => format!("/drafts/{}", encode(id)),
            Operation::ScheduleDraft { id } => format!("/drafts/{}/schedule", encode(id)),
            Operation::SubmitForApproval { id } => format!("/drafts/{}/approve", encode(id)),
            Operation::GetApprovalQueue => "/approvals".to_string(),
            Operation::ApprovePost { id } => format!("/approvals/{}/approve", encode(id)),
            Operation::RejectPost { id } => format!("/approvals/{}/reject", encode(id)),
            Operation::AddComment { id } => format!("/approvals/{}/comment", encode(id)),
            Operation::GetNotifications { limit } => format!("/notifications?limit={}", limit),
            Operation::MarkNotificationRead { id } => {
                format!("/notifications/{}/read", encode(id))
            }
            Operation::SubscribeToUpdates => "/notifications/subscribe".to_string(),
            Operation::GetClientSchedule { client_id } => {
                format!("/clients/{}/schedule", encode(client_id))
            }
            Operation::GetClientApprovals { client_id } => {
                format!("/clients/{}/approvals", encode(client_id))
            }
        }
    }

    pub fn response_shape(&self) -> ResponseShape {
        match self {
            Operation::Login | Operation::Signup => ResponseShape::Bare,
            _ => ResponseShape::Envelope,
        }
    }

    /// Simulated round trip in mock mode.
    pub fn mock_latency(&self) -> Duration {
        let ms = match self {
            Operation::MarkNotificationRead { .. } | Operation::SubscribeToUpdates => 200,
            Operation::GetDraft { .. }
            | Operation::GetApprovalQueue
            | Operation::GetNotifications { .. }
            | Operation::GetClientApprovals { .. } => 300,
            Operation::ScheduleDraft { .. }
            | Operation::SubmitForApproval { .. }
            | Operation::AddComment { .. }
            | Operation::GetClientSchedule { .. } => 400,
            Operation::Login
            | Operation::Signup
            | Operation::SaveDraft
            | Operation::ApprovePost { .. }
            | Operation::RejectPost { .. } => 500,
        };
        Duration::from_millis(ms)
    }

    /// Map a route back to its operation. Returns `None` for routes outside
    /// the catalogue.
    pub fn resolve(method: &Method, path: &str) -> Option<Self> {
        let (route, query) = match path.split_once('?') {
            Some((route, query)) => (route, query),
            None => (path, ""),
        };
        let decoded = route
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::decode(s).ok())
            .collect::<Option<Vec<_>>>()?;
        let segments: Vec<&str> = decoded.iter().map(|s| s.as_ref()).collect();

        let op = match (method.as_str(), segments.as_slice()) {
            ("POST", ["auth", "login"]) => Operation::Login,
            ("POST", ["auth", "signup"]) => Operation::Signup,
            ("POST", ["drafts"]) => Operation::SaveDraft,
            ("GET", ["drafts", id]) => Operation::GetDraft { id: id.to_string() },
            ("POST", ["drafts", id, "schedule"]) => Operation::ScheduleDraft { id: id.to_string() },
            ("POST", ["drafts", id, "approve"]) => Operation::SubmitForApproval { id: id.to_string() },
            ("GET", ["approvals"]) => Operation::GetApprovalQueue,
            ("POST", ["approvals", id, "approve"]) => Operation::ApprovePost { id: id.to_string() },
            ("POST", ["approvals", id, "reject"]) => Operation::RejectPost { id: id.to_string() },
            ("POST", ["approvals", id, "comment"]) => Operation::AddComment { id: id.to_string() },
            ("GET", ["notifications"]) => {
                let limit = serde_urlencoded::from_str::<NotificationQuery>(query)
                    .ok()
                    .and_then(|q| q.limit)
                    .unwrap_or(DEFAULT_NOTIFICATION_LIMIT);
                Operation::GetNotifications { limit }
            }
            ("POST", ["notifications", "subscribe"]) => Operation::SubscribeToUpdates,
            ("POST", ["notifications", id, "read"]) => {
                Operation::MarkNotificationRead { id: id.to_string() }
            }
            ("GET", ["clients", id, "schedule"]) => Operation::GetClientSchedule {
                client_id: id.to_string(),
            },
            ("GET", ["clients", id, "approvals"]) => Operation::GetClientApprovals {
                client_id: id.to_string(),
            },
            _ => return None,
        };
        Some(op)
    }
}

fn encode(segment: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(segment)
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
