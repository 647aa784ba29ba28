use super::ApiClient;
use crate::error::ApiError;
use crate::gateway::Operation;
use crate::models::{ApiResponse, Draft, DraftInput, ScheduleRequest, ScheduleResult, StatusChange};
use chrono::{DateTime, Utc};

/// Draft lifecycle calls.
pub struct DraftsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DraftsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn save_draft(&self, draft: &DraftInput) -> Result<ApiResponse<Draft>, ApiError> {
        let body = serde_json::to_value(draft)?;
        self.client.execute(Operation::SaveDraft, Some(body)).await
    }

    pub async fn get_draft(&self, id: &str) -> Result<ApiResponse<Draft>, ApiError> {
        self.client
            .execute(Operation::GetDraft { id: id.to_string() }, None)
            .await
    }

    /// The timestamp is sent as given. Use [`Draft::schedule`] first to check
    /// it is in the future.
    pub async fn schedule_draft(
        &self,
        id: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Result<ApiResponse<ScheduleResult>, ApiError> {
        let body = serde_json::to_value(ScheduleRequest { scheduled_at })?;
        self.client
            .execute(Operation::ScheduleDraft { id: id.to_string() }, Some(body))
            .await
    }

    pub async fn submit_for_approval(&self, id: &str) -> Result<ApiResponse<StatusChange>, ApiError> {
        self.client
            .execute(Operation::SubmitForApproval { id: id.to_string() }, None)
            .await
    }
}
