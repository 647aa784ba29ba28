mod common;

use agency_api::models::{DraftInput, DraftStatus, ReviewStatus};
use agency_api::ApiResponse;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use common::mock_client;
use reqwest::Method;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn get_draft_resolves_within_latency_window() {
    let client = mock_client();

    let start = Instant::now();
    let response = client.drafts().get_draft("draft_42").await.unwrap();
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(200), "{:?}", elapsed);
    assert!(elapsed <= Duration::from_millis(500), "{:?}", elapsed);
    assert!(response.success);
    let draft = response.data.unwrap();
    assert_eq!(draft.id, "draft_42");
    assert_eq!(draft.status, DraftStatus::Draft);
    assert_eq!(draft.title, "Summer Collection Launch");
}

#[tokio::test(start_paused = true)]
async fn approve_post_echoes_comment() {
    let client = mock_client();

    let response = client
        .approvals()
        .approve_post("post_2", Some("looks good"))
        .await
        .unwrap();

    assert_eq!(response.message.as_deref(), Some("Post approved!"));
    let decision = response.data.unwrap();
    assert_eq!(decision.post_id, "post_2");
    assert_eq!(decision.status, ReviewStatus::Approved);
    assert_eq!(decision.comment.as_deref(), Some("looks good"));
}

#[tokio::test(start_paused = true)]
async fn submit_for_approval_reports_pending() {
    let client = mock_client();

    let change = client
        .drafts()
        .submit_for_approval("draft_1")
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(change.id, "draft_1");
    assert_eq!(change.status, DraftStatus::PendingApproval);
}

#[tokio::test(start_paused = true)]
async fn schedule_returns_the_exact_timestamp() {
    let client = mock_client();
    let at = Utc.with_ymd_and_hms(2031, 6, 1, 9, 30, 0).unwrap();

    let result = client
        .drafts()
        .schedule_draft("draft_5", at)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(result.id, "draft_5");
    assert_eq!(result.status, DraftStatus::Scheduled);
    assert_eq!(result.scheduled_at, at);
}

#[tokio::test(start_paused = true)]
async fn saved_draft_flows_through_review() {
    let client = mock_client();
    let input = DraftInput {
        title: Some("Black Friday teaser".to_string()),
        caption: Some("Something big is coming".to_string()),
        platform: Some("instagram".to_string()),
        ..Default::default()
    };

    let saved = client.drafts().save_draft(&input).await.unwrap();
    assert_eq!(saved.message.as_deref(), Some("Draft saved successfully"));
    let draft = saved.data.unwrap();
    assert!(draft.id.starts_with("draft_"));

    client.drafts().submit_for_approval(&draft.id).await.unwrap();
    let queue = client.approvals().get_queue().await.unwrap().into_data().unwrap();
    assert_eq!(queue.count, queue.items.len());
    assert!(queue.items.iter().any(|e| e.post_draft_id == draft.id));

    client.approvals().approve_post(&draft.id, None).await.unwrap();
    let stored = client.drafts().get_draft(&draft.id).await.unwrap().into_data().unwrap();
    assert_eq!(stored.status, DraftStatus::Scheduled);

    // Approving again is not a legal move any more
    let err = client.approvals().approve_post(&draft.id, None).await.unwrap_err();
    assert_eq!(err.status_code(), 409);
}

#[tokio::test(start_paused = true)]
async fn mark_read_is_idempotent() {
    let client = mock_client();

    let page = client.notifications().get_notifications(10).await.unwrap().into_data().unwrap();
    assert_eq!(page.unread_count, 1);
    let id = page.notifications[0].id.clone();

    for _ in 0..2 {
        let read = client.notifications().mark_as_read(&id).await.unwrap().into_data().unwrap();
        assert_eq!(read.id, id);
        assert!(read.read);
    }

    let page = client.notifications().get_notifications(10).await.unwrap().into_data().unwrap();
    assert_eq!(page.unread_count, 0);
    assert!(page.notifications.iter().all(|n| n.read));
}

#[tokio::test(start_paused = true)]
async fn notification_limit_is_honoured() {
    let client = mock_client();

    let page = client.notifications().get_notifications(0).await.unwrap().into_data().unwrap();
    assert!(page.notifications.is_empty());
    assert_eq!(page.unread_count, 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_route_is_a_404_without_delay() {
    let client = mock_client();

    let start = Instant::now();
    let err = client.invoke(Method::GET, "/analytics/overview", None).await.unwrap_err();

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.message(), "No mock response for GET /analytics/overview");
    let envelope: ApiResponse<serde_json::Value> = ApiResponse::failure(&err);
    assert!(!envelope.success);
    assert_eq!(envelope.error.as_deref(), Some(err.message()));
}

#[tokio::test(start_paused = true)]
async fn subscribe_requires_a_client_id() {
    let client = mock_client();

    let err = client
        .invoke(Method::POST, "/notifications/subscribe", None)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let sub = client
        .notifications()
        .subscribe_to_updates("client_1")
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert!(sub.subscription_id.starts_with("sub_"));
}

#[tokio::test(start_paused = true)]
async fn client_portal_views() {
    let client = mock_client();

    let schedule = client
        .clients()
        .get_client_schedule("client_1")
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(schedule.client_id, "client_1");
    assert!(schedule.scheduled_posts.iter().all(|p| p.scheduled_at > Utc::now() - ChronoDuration::minutes(1)));

    let approvals = client
        .clients()
        .get_client_approvals("client_1")
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(approvals.pending.len(), 1);
    assert!(approvals.approved.is_empty());
}

#[tokio::test(start_paused = true)]
async fn login_starts_a_session() {
    let client = mock_client();
    assert!(!client.get_config().await.has_auth_token);

    let err = client.auth().login("demo", "").await.unwrap_err();
    assert_eq!(err.status_code(), 401);
    assert!(!client.session().has_token().await);

    let user = client.auth().login("demo", "secret").await.unwrap();
    assert_eq!(user.username, "demo");
    assert!(client.get_config().await.has_auth_token);
    assert_eq!(client.auth().current_user().await, Some(user));

    client.auth().logout().await.unwrap();
    assert!(!client.session().is_authenticated().await);
}

#[tokio::test(start_paused = true)]
async fn signup_validates_then_registers() {
    let client = mock_client();
    let auth = client.auth();

    for (username, password, confirm, message) in [
        ("", "secret", "secret", "All fields are required"),
        ("newbie", "secret", "", "All fields are required"),
        ("newbie", "secret", "secret1", "Passwords do not match"),
        ("newbie", "abc", "abc", "Password must be at least 6 characters"),
    ] {
        let err = auth.signup(username, password, confirm).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), message);
    }

    let start = Instant::now();
    let created = auth.signup("newbie", "secret", "secret").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(500));
    assert_eq!(created.user.unwrap().username, "newbie");
    assert!(!client.session().has_token().await);

    let err = auth.signup("newbie", "secret", "secret").await.unwrap_err();
    assert_eq!(err.status_code(), 409);

    assert_eq!(auth.login("newbie", "nope!!").await.unwrap_err().status_code(), 401);
    let user = auth.login("newbie", "secret").await.unwrap();
    assert_eq!(user.username, "newbie");
}

#[tokio::test(start_paused = true)]
async fn ids_with_reserved_characters_round_trip() {
    let client = mock_client();

    let draft = client
        .drafts()
        .get_draft("a/b")
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(draft.id, "a/b");
}

#[tokio::test(start_paused = true)]
async fn queue_and_feed_totals_survive_the_list_shape() {
    let client = mock_client();

    let queue = client.approvals().get_queue().await.unwrap().into_data().unwrap();
    assert_eq!(queue.count, queue.items.len());
    assert!(!queue.items.is_empty());

    let page = client
        .notifications()
        .get_notifications(20)
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(page.unread_count, 1);
    assert_eq!(page.notifications.len(), 1);
}
