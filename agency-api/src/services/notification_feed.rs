//! Local notification state behind the dashboard bell.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::Notification;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    pub notifications: Vec<Notification>,
    pub unread_count: u32,
}

pub struct NotificationFeed {
    client: ApiClient,
    limit: usize,
    state: RwLock<FeedSnapshot>,
}

impl NotificationFeed {
    pub fn new(client: ApiClient, limit: usize) -> Self {
        Self {
            client,
            limit,
            state: RwLock::new(FeedSnapshot::default()),
        }
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        self.state.read().await.clone()
    }

    pub async fn unread_count(&self) -> u32 {
        self.state.read().await.unread_count
    }

    /// Replace local state with the latest page from the gateway.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let page = self
            .client
            .notifications()
            .get_notifications(self.limit)
            .await?
            .into_data()?;

        let mut state = self.state.write().await;
        state.notifications = page.notifications;
        state.unread_count = page.unread_count;
        Ok(())
    }

    pub async fn mark_as_read(&self, id: &str) -> Result<(), ApiError> {
        self.client.notifications().mark_as_read(id).await?;

        let mut state = self.state.write().await;
        let mut was_unread = false;
        if let Some(item) = state.notifications.iter_mut().find(|n| n.id == id) {
            was_unread = !item.read;
            item.read = true;
        }
        if was_unread {
            state.unread_count = state.unread_count.saturating_sub(1);
        }
        Ok(())
    }

    /// Refresh now and then every `interval` until `cancel` fires.
    pub fn spawn_polling(
        self: &Arc<Self>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let feed = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!("Notification polling stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = feed.refresh().await {
                            tracing::warn!(
                                status_code = e.status_code(),
                                error = %e,
                                "Notification refresh failed"
                            );
                        }
                    }
                }
            }
        })
    }
}
