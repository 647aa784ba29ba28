//! Offline/demo backend.
//!
//! Answers every catalogued operation with a canned envelope after the
//! operation's simulated latency. Drafts saved through it, notification read
//! flags and review actions are remembered, so a demo session stays coherent.

use super::operation::Operation;
use super::{ApiMode, ApiRequest, Backend};
use crate::error::ApiError;
use crate::models::{
    ApiResponse, ApprovalAction, ApprovalActionKind, ApprovalDecision, ApprovalQueue,
    ApproveRequest, ClientApprovals, ClientSchedule, CommentReceipt, CommentRequest, Credentials,
    Draft, DraftInput, DraftStatus, LoginResult, Notification, NotificationRead,
    NotificationType, QueueEntry, ReviewItem, ReviewStatus, ScheduleRequest, ScheduleResult,
    ScheduledPost, SignupResult, StatusChange, SubscribeRequest, Subscription, TransitionError,
    User,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Reviewer recorded on mock approval actions.
pub const MOCK_REVIEWER_ID: &str = "user_mock_reviewer";

pub struct MockBackend {
    simulate_latency: bool,
    drafts: DashMap<String, Draft>,
    notifications: DashMap<String, Notification>,
    approval_log: DashMap<String, Vec<ApprovalAction>>,
    /// username -> password for accounts created through signup
    accounts: DashMap<String, String>,
    sequence: AtomicU64,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        let backend = Self {
            simulate_latency: true,
            drafts: DashMap::new(),
            notifications: DashMap::new(),
            approval_log: DashMap::new(),
            accounts: DashMap::new(),
            sequence: AtomicU64::new(Utc::now().timestamp_millis().max(0) as u64),
        };
        let seed = Notification {
            id: "notif_1".to_string(),
            kind: NotificationType::ApprovalRequested,
            title: "New approval request".to_string(),
            message: "AI Breakthrough Post needs review".to_string(),
            related_id: "post_2".to_string(),
            read: false,
            created_at: Utc::now(),
        };
        backend.notifications.insert(seed.id.clone(), seed);
        backend
    }

    /// Respond immediately instead of sleeping.
    pub fn without_latency(mut self) -> Self {
        self.simulate_latency = false;
        self
    }

    pub fn insert_notification(&self, notification: Notification) {
        self.notifications
            .insert(notification.id.clone(), notification);
    }

    /// Review actions recorded for a post, oldest first.
    pub fn approval_history(&self, post_id: &str) -> Vec<ApprovalAction> {
        self.approval_log
            .get(post_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.sequence.fetch_add(1, Ordering::Relaxed))
    }

    fn record_action(&self, post_id: &str, action: ApprovalActionKind, comment: Option<String>) {
        let entry = ApprovalAction {
            id: self.next_id("approval_action"),
            post_draft_id: post_id.to_string(),
            user_id: MOCK_REVIEWER_ID.to_string(),
            action,
            comment,
            created_at: Utc::now(),
        };
        self.approval_log
            .entry(post_id.to_string())
            .or_default()
            .push(entry);
    }

    /// Apply `change` to a draft saved earlier. Drafts this backend never saw
    /// are left to the canned response.
    fn update_stored<F>(&self, id: &str, change: F) -> Result<Option<Draft>, ApiError>
    where
        F: FnOnce(&mut Draft) -> Result<(), TransitionError>,
    {
        match self.drafts.get_mut(id) {
            Some(mut draft) => {
                change(draft.value_mut()).map_err(conflict)?;
                Ok(Some(draft.value().clone()))
            }
            None => Ok(None),
        }
    }

    fn respond(&self, op: Operation, body: Option<Value>) -> Result<ApiResponse<Value>, ApiError> {
        let now = Utc::now();

        match op {
            Operation::Login => {
                let request: Credentials = required_body(body, "login")?;
                let known_password = self
                    .accounts
                    .get(&request.username)
                    .map(|p| p.value().clone());
                let rejected = request.username.trim().is_empty()
                    || request.password.is_empty()
                    || known_password.is_some_and(|p| p != request.password);
                if rejected {
                    return Err(ApiError::http(
                        401,
                        "Invalid credentials",
                        json!({ "message": "Invalid credentials" }),
                    ));
                }
                let user = User {
                    id: "user_1".to_string(),
                    email: Some(format!("{}@agency.local", request.username)),
                    username: request.username.clone(),
                    role: Some("ACCOUNT_MANAGER".to_string()),
                    organization_id: Some("org_1".to_string()),
                };
                envelope(
                    &LoginResult {
                        token: format!("mock_token_{}", request.username),
                        user,
                    },
                    "Logged in",
                )
            }

            Operation::Signup => {
                let request: Credentials = required_body(body, "signup")?;
                if request.username.trim().is_empty() || request.password.is_empty() {
                    return Err(bad_request("Username and password are required"));
                }
                if self.accounts.contains_key(&request.username) {
                    let message = "Username already exists";
                    return Err(ApiError::http(409, message, json!({ "message": message })));
                }
                self.accounts
                    .insert(request.username.clone(), request.password);
                let result = SignupResult {
                    message: Some("Account created".to_string()),
                    user: Some(User {
                        id: self.next_id("user"),
                        username: request.username,
                        email: None,
                        role: None,
                        organization_id: None,
                    }),
                };
                envelope(&result, "Account created")
            }

            Operation::SaveDraft => {
                let input: DraftInput = match body {
                    Some(value) => parse_body(value, "saveDraft")?,
                    None => DraftInput::default(),
                };
                let draft = self.save_draft(input, now)?;
                envelope(&draft, "Draft saved successfully")
            }

            Operation::GetDraft { id } => {
                let draft = match self.drafts.get(&id) {
                    Some(stored) => stored.value().clone(),
                    None => canned_draft(id, now),
                };
                envelope_silent(&draft)
            }

            Operation::ScheduleDraft { id } => {
                let request: ScheduleRequest = required_body(body, "scheduleDraft")?;
                let at = request.scheduled_at;
                self.update_stored(&id, |draft| draft.set_schedule(at, now))?;
                envelope(
                    &ScheduleResult {
                        id,
                        status: DraftStatus::Scheduled,
                        scheduled_at: at,
                    },
                    "Post scheduled successfully",
                )
            }

            Operation::SubmitForApproval { id } => {
                self.update_stored(&id, |draft| draft.submit_for_approval(now))?;
                self.record_action(&id, ApprovalActionKind::Requested, None);
                envelope(
                    &StatusChange {
                        id,
                        status: DraftStatus::PendingApproval,
                    },
                    "Post sent for approval",
                )
            }

            Operation::GetApprovalQueue => {
                let queue = self.approval_queue(now);
                Ok(envelope_silent(&queue.items)?.with_meta("count", json!(queue.count)))
            }

            Operation::ApprovePost { id } => {
                let request: ApproveRequest = match body {
                    Some(value) => parse_body(value, "approvePost")?,
                    None => ApproveRequest::default(),
                };
                self.update_stored(&id, |draft| draft.approve(now))?;
                self.record_action(&id, ApprovalActionKind::Approved, request.comment.clone());
                envelope(
                    &ApprovalDecision {
                        post_id: id,
                        status: ReviewStatus::Approved,
                        comment: request.comment,
                    },
                    "Post approved!",
                )
            }

            Operation::RejectPost { id } => {
                let request: CommentRequest = required_body(body, "rejectPost")?;
                self.update_stored(&id, |draft| draft.reject(now))?;
                self.record_action(
                    &id,
                    ApprovalActionKind::Rejected,
                    Some(request.comment.clone()),
                );
                envelope(
                    &ApprovalDecision {
                        post_id: id,
                        status: ReviewStatus::Rejected,
                        comment: Some(request.comment),
                    },
                    "Post rejected with feedback",
                )
            }

            Operation::AddComment { id } => {
                let request: CommentRequest = required_body(body, "addComment")?;
                self.record_action(&id, ApprovalActionKind::Comment, Some(request.comment.clone()));
                envelope(
                    &CommentReceipt {
                        post_id: id,
                        comment: request.comment,
                        timestamp: now,
                    },
                    "Comment added",
                )
            }

            Operation::GetNotifications { limit } => {
                let (notifications, unread_count) = self.notification_page(limit);
                Ok(envelope_silent(&notifications)?.with_meta("unreadCount", json!(unread_count)))
            }

            Operation::MarkNotificationRead { id } => {
                if let Some(mut notification) = self.notifications.get_mut(&id) {
                    notification.read = true;
                }
                envelope_silent(&NotificationRead { id, read: true })
            }

            Operation::SubscribeToUpdates => {
                let request: SubscribeRequest = required_body(body, "subscribeToUpdates")?;
                tracing::debug!(client_id = %request.client_id, "Mock subscription opened");
                envelope_silent(&Subscription {
                    subscription_id: self.next_id("sub"),
                })
            }

            Operation::GetClientSchedule { client_id } => envelope_silent(&ClientSchedule {
                client_id,
                scheduled_posts: vec![ScheduledPost {
                    id: "post_1".to_string(),
                    title: "Summer Collection Launch".to_string(),
                    platform: "INSTAGRAM".to_string(),
                    scheduled_at: now + Duration::days(2),
                    status: DraftStatus::Scheduled,
                }],
            }),

            Operation::GetClientApprovals { client_id } => envelope_silent(&ClientApprovals {
                client_id,
                pending: vec![ReviewItem {
                    id: "post_2".to_string(),
                    title: "AI Breakthrough Post".to_string(),
                    platform: "LINKEDIN".to_string(),
                    submitted_at: now - Duration::hours(3),
                }],
                approved: Vec::new(),
                rejected: Vec::new(),
            }),
        }
    }

    fn save_draft(&self, input: DraftInput, now: DateTime<Utc>) -> Result<Draft, ApiError> {
        let id = input.id.unwrap_or_else(|| self.next_id("draft"));

        if let Some(mut existing) = self.drafts.get_mut(&id) {
            let draft = existing.value_mut();
            if let Some(status) = input.status {
                if status != draft.status && !draft.status.can_transition_to(status) {
                    return Err(conflict(TransitionError::Invalid {
                        from: draft.status,
                        to: status,
                    }));
                }
                draft.status = status;
            }
            if let Some(title) = input.title {
                draft.title = title;
            }
            if let Some(caption) = input.caption {
                draft.caption = caption;
            }
            if let Some(platform) = input.platform {
                draft.platform = platform;
            }
            if input.scheduled_at.is_some() {
                draft.scheduled_at = input.scheduled_at;
            }
            draft.updated_at = now;
            return Ok(draft.clone());
        }

        let draft = Draft {
            id: id.clone(),
            title: input.title.unwrap_or_default(),
            caption: input.caption.unwrap_or_default(),
            platform: input.platform.unwrap_or_default(),
            status: input.status.unwrap_or(DraftStatus::Draft),
            scheduled_at: input.scheduled_at,
            created_at: now,
            updated_at: now,
        };
        self.drafts.insert(id, draft.clone());
        Ok(draft)
    }

    fn approval_queue(&self, now: DateTime<Utc>) -> ApprovalQueue {
        let mut items = vec![QueueEntry {
            id: "approval_1".to_string(),
            post_draft_id: "post_2".to_string(),
            title: "AI Breakthrough Post".to_string(),
            client: "TechStart Inc".to_string(),
            platform: "LINKEDIN".to_string(),
            status: DraftStatus::PendingApproval,
            submitted_at: now,
        }];

        let mut pending: Vec<QueueEntry> = self
            .drafts
            .iter()
            .filter(|d| d.status == DraftStatus::PendingApproval)
            .map(|d| QueueEntry {
                id: format!("approval_{}", d.id),
                post_draft_id: d.id.clone(),
                title: d.title.clone(),
                client: "Unassigned".to_string(),
                platform: d.platform.to_uppercase(),
                status: d.status,
                submitted_at: d.updated_at,
            })
            .collect();
        pending.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        items.extend(pending);

        ApprovalQueue {
            count: items.len(),
            items,
        }
    }

    /// Newest first, truncated to `limit`, plus the unread total.
    fn notification_page(&self, limit: usize) -> (Vec<Notification>, u32) {
        let mut notifications: Vec<Notification> = self
            .notifications
            .iter()
            .map(|n| n.value().clone())
            .collect();
        notifications.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        let unread_count = notifications.iter().filter(|n| !n.read).count() as u32;
        notifications.truncate(limit);
        (notifications, unread_count)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn invoke(&self, request: ApiRequest) -> Result<ApiResponse<Value>, ApiError> {
        let op = Operation::resolve(&request.method, &request.path).ok_or_else(|| {
            ApiError::http(
                404,
                format!("No mock response for {} {}", request.method, request.path),
                json!({}),
            )
        })?;

        if self.simulate_latency {
            tokio::time::sleep(op.mock_latency()).await;
        }

        self.respond(op, request.body)
    }

    fn mode(&self) -> ApiMode {
        ApiMode::Mock
    }
}

fn canned_draft(id: String, now: DateTime<Utc>) -> Draft {
    Draft {
        id,
        title: "Summer Collection Launch".to_string(),
        caption: "Excited to announce our new summer collection...".to_string(),
        platform: "instagram".to_string(),
        status: DraftStatus::Draft,
        scheduled_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn conflict(err: TransitionError) -> ApiError {
    let message = err.to_string();
    ApiError::http(409, message.clone(), json!({ "message": message }))
}

fn bad_request(message: &str) -> ApiError {
    ApiError::http(400, message, json!({ "message": message }))
}

fn parse_body<T: DeserializeOwned>(body: Value, operation: &str) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| {
        let message = format!("Invalid request body for {}: {}", operation, e);
        ApiError::http(400, message.clone(), json!({ "message": message }))
    })
}

fn required_body<T: DeserializeOwned>(body: Option<Value>, operation: &str) -> Result<T, ApiError> {
    match body {
        Some(value) => parse_body(value, operation),
        None => {
            let message = format!("Request body is required for {}", operation);
            Err(ApiError::http(400, message.clone(), json!({ "message": message })))
        }
    }
}

fn envelope<T: Serialize>(data: &T, message: &str) -> Result<ApiResponse<Value>, ApiError> {
    Ok(ApiResponse::ok_with_message(serde_json::to_value(data)?, message))
}

fn envelope_silent<T: Serialize>(data: &T) -> Result<ApiResponse<Value>, ApiError> {
    Ok(ApiResponse::ok(serde_json::to_value(data)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn request(method: Method, path: &str, body: Option<Value>) -> ApiRequest {
        ApiRequest::new(method, path, body)
    }

    #[tokio::test]
    async fn unknown_route_is_a_404() {
        let backend = MockBackend::new().without_latency();
        let err = backend
            .invoke(request(Method::GET, "/analytics/overview", None))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "No mock response for GET /analytics/overview");
    }

    #[tokio::test]
    async fn saved_draft_is_returned_by_get() {
        let backend = MockBackend::new().without_latency();
        backend
            .invoke(request(
                Method::POST,
                "/drafts",
                Some(json!({"id": "draft_7", "title": "Holiday teaser", "platform": "tiktok"})),
            ))
            .await
            .unwrap();

        let fetched = backend
            .invoke(request(Method::GET, "/drafts/draft_7", None))
            .await
            .unwrap();
        let draft: Draft = serde_json::from_value(fetched.data.unwrap()).unwrap();
        assert_eq!(draft.title, "Holiday teaser");
        assert_eq!(draft.platform, "tiktok");
        assert_eq!(draft.status, DraftStatus::Draft);
    }

    #[tokio::test]
    async fn stored_draft_refuses_illegal_transition() {
        let backend = MockBackend::new().without_latency();
        backend
            .invoke(request(Method::POST, "/drafts", Some(json!({"id": "draft_8"}))))
            .await
            .unwrap();

        let err = backend
            .invoke(request(Method::POST, "/approvals/draft_8/approve", None))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn missing_reject_comment_is_a_400() {
        let backend = MockBackend::new().without_latency();
        let err = backend
            .invoke(request(Method::POST, "/approvals/post_2/reject", None))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn review_actions_are_logged_in_order() {
        let backend = MockBackend::new().without_latency();
        backend
            .invoke(request(
                Method::POST,
                "/approvals/post_2/comment",
                Some(json!({"comment": "Tighten the hook"})),
            ))
            .await
            .unwrap();
        backend
            .invoke(request(Method::POST, "/approvals/post_2/approve", None))
            .await
            .unwrap();

        let history = backend.approval_history("post_2");
        let kinds: Vec<ApprovalActionKind> = history.iter().map(|a| a.action).collect();
        assert_eq!(
            kinds,
            vec![ApprovalActionKind::Comment, ApprovalActionKind::Approved]
        );
        assert_eq!(history[0].comment.as_deref(), Some("Tighten the hook"));
        assert_eq!(history[1].user_id, MOCK_REVIEWER_ID);
    }

    #[tokio::test]
    async fn list_routes_put_totals_beside_data() {
        let backend = MockBackend::new().without_latency();

        let queue = backend
            .invoke(request(Method::GET, "/approvals", None))
            .await
            .unwrap();
        let entries = queue.data.as_ref().and_then(Value::as_array).unwrap().len();
        assert_eq!(queue.meta_u64("count"), Some(entries as u64));

        let feed = backend
            .invoke(request(Method::GET, "/notifications?limit=20", None))
            .await
            .unwrap();
        assert!(feed.data.as_ref().is_some_and(Value::is_array));
        assert_eq!(feed.meta_u64("unreadCount"), Some(1));
    }

    #[tokio::test]
    async fn signup_registers_an_account_once() {
        let backend = MockBackend::new().without_latency();
        let body = json!({"username": "newbie", "password": "secret1"});

        let created = backend
            .invoke(request(Method::POST, "/auth/signup", Some(body.clone())))
            .await
            .unwrap();
        let result: SignupResult = serde_json::from_value(created.data.unwrap()).unwrap();
        assert_eq!(result.user.unwrap().username, "newbie");

        let err = backend
            .invoke(request(Method::POST, "/auth/signup", Some(body)))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);

        let err = backend
            .invoke(request(
                Method::POST,
                "/auth/login",
                Some(json!({"username": "newbie", "password": "wrong!"})),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
