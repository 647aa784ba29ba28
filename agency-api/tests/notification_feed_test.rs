mod common;

use agency_api::gateway::MockBackend;
use agency_api::models::{Notification, NotificationType};
use agency_api::session::Session;
use agency_api::{ApiClient, ApiSettings, NotificationFeed};
use chrono::Utc;
use common::{unreachable_base_url, StubServer};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn feed_with(backend: MockBackend) -> NotificationFeed {
    agency_core::observability::init_test_tracing();
    let client = ApiClient::with_backend(
        Arc::new(backend),
        ApiSettings::default(),
        Arc::new(Session::in_memory()),
    );
    NotificationFeed::new(client, 10)
}

fn notification(id: &str, read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        kind: NotificationType::CommentAdded,
        title: "New comment".to_string(),
        message: "Client left feedback".to_string(),
        related_id: "post_1".to_string(),
        read,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn refresh_loads_the_latest_page() {
    let feed = feed_with(MockBackend::new().without_latency());
    assert_eq!(feed.unread_count().await, 0);

    feed.refresh().await.unwrap();

    let snapshot = feed.snapshot().await;
    assert_eq!(snapshot.unread_count, 1);
    assert_eq!(snapshot.notifications[0].id, "notif_1");
}

#[tokio::test]
async fn marking_twice_decrements_once() {
    let backend = MockBackend::new().without_latency();
    backend.insert_notification(notification("notif_2", false));
    backend.insert_notification(notification("notif_3", true));
    let feed = feed_with(backend);
    feed.refresh().await.unwrap();
    assert_eq!(feed.unread_count().await, 2);

    feed.mark_as_read("notif_2").await.unwrap();
    feed.mark_as_read("notif_2").await.unwrap();
    assert_eq!(feed.unread_count().await, 1);

    // Already read, count must not move
    feed.mark_as_read("notif_3").await.unwrap();
    assert_eq!(feed.unread_count().await, 1);
}

#[tokio::test]
async fn concurrent_marks_both_succeed() {
    let backend = MockBackend::new().without_latency();
    backend.insert_notification(notification("notif_2", false));
    let feed = Arc::new(feed_with(backend));
    feed.refresh().await.unwrap();

    let (a, b) = tokio::join!(feed.mark_as_read("notif_1"), feed.mark_as_read("notif_2"));
    a.unwrap();
    b.unwrap();

    assert_eq!(feed.unread_count().await, 0);
}

#[tokio::test]
async fn unread_count_never_underflows() {
    let server = StubServer::respond_with(
        200,
        r#"{"success":true,"data":{"notifications":[{"id":"n1","type":"POST_PUBLISHED","title":"Live","message":"Post is live","relatedId":"p1","read":false,"createdAt":"2025-11-23T14:30:00Z"}],"unreadCount":0,"id":"n1","read":true}}"#,
    )
    .await;
    agency_core::observability::init_test_tracing();
    let settings = common::http_settings(&server.base_url, 2_000);
    let client = ApiClient::new(settings, Arc::new(Session::in_memory())).unwrap();
    let feed = NotificationFeed::new(client, 10);
    feed.refresh().await.unwrap();

    // Server already reported zero unread while the item itself is unread.
    feed.mark_as_read("n1").await.unwrap();
    assert_eq!(feed.unread_count().await, 0);
}

#[tokio::test]
async fn polling_stops_on_cancel_and_survives_failures() {
    agency_core::observability::init_test_tracing();
    let base_url = unreachable_base_url().await;
    let client = ApiClient::new(
        common::http_settings(&base_url, 500),
        Arc::new(Session::in_memory()),
    )
    .unwrap();
    let feed = Arc::new(NotificationFeed::new(client, 10));
    let cancel = CancellationToken::new();

    let handle = feed.spawn_polling(Duration::from_millis(20), cancel.clone());
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!handle.is_finished());

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("poller did not stop")
        .unwrap();
    assert_eq!(feed.unread_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn polling_refreshes_immediately() {
    let feed = Arc::new(feed_with(MockBackend::new()));
    let cancel = CancellationToken::new();

    let handle = feed.spawn_polling(Duration::from_secs(30), cancel.clone());
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(feed.unread_count().await, 1);

    cancel.cancel();
    handle.await.unwrap();
}
