use super::ApiClient;
use crate::error::ApiError;
use crate::gateway::Operation;
use crate::models::{
    ApiResponse, NotificationPage, NotificationRead, NotificationsPayload, SubscribeRequest,
    Subscription,
};

pub use crate::gateway::operation::DEFAULT_NOTIFICATION_LIMIT;

pub struct NotificationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_notifications(
        &self,
        limit: usize,
    ) -> Result<ApiResponse<NotificationPage>, ApiError> {
        let response = self
            .client
            .execute::<NotificationsPayload>(Operation::GetNotifications { limit }, None)
            .await?;
        let unread_count = response.meta_u64("unreadCount");
        Ok(response.map(|payload| payload.into_page(unread_count)))
    }

    pub async fn mark_as_read(&self, id: &str) -> Result<ApiResponse<NotificationRead>, ApiError> {
        self.client
            .execute(Operation::MarkNotificationRead { id: id.to_string() }, None)
            .await
    }

    pub async fn subscribe_to_updates(
        &self,
        client_id: &str,
    ) -> Result<ApiResponse<Subscription>, ApiError> {
        let body = serde_json::to_value(SubscribeRequest {
            client_id: client_id.to_string(),
        })?;
        self.client
            .execute(Operation::SubscribeToUpdates, Some(body))
            .await
    }
}
