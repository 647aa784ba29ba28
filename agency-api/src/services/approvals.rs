use super::ApiClient;
use crate::error::ApiError;
use crate::gateway::Operation;
use crate::models::{
    ApiResponse, ApprovalDecision, ApprovalQueue, ApproveRequest, CommentReceipt, CommentRequest,
    QueuePayload,
};

/// Reviewer actions on pending posts.
pub struct ApprovalsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ApprovalsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Entries arrive as the `data` list with `count` beside it. An
    /// assembled `{items, count}` object is accepted as well.
    pub async fn get_queue(&self) -> Result<ApiResponse<ApprovalQueue>, ApiError> {
        let response = self
            .client
            .execute::<QueuePayload>(Operation::GetApprovalQueue, None)
            .await?;
        let count = response.meta_u64("count");
        Ok(response.map(|payload| payload.into_queue(count)))
    }

    pub async fn approve_post(
        &self,
        id: &str,
        comment: Option<&str>,
    ) -> Result<ApiResponse<ApprovalDecision>, ApiError> {
        let body = serde_json::to_value(ApproveRequest {
            comment: comment.map(str::to_string),
        })?;
        self.client
            .execute(Operation::ApprovePost { id: id.to_string() }, Some(body))
            .await
    }

    pub async fn reject_post(
        &self,
        id: &str,
        comment: &str,
    ) -> Result<ApiResponse<ApprovalDecision>, ApiError> {
        let body = comment_body(comment)?;
        self.client
            .execute(Operation::RejectPost { id: id.to_string() }, Some(body))
            .await
    }

    pub async fn add_comment(
        &self,
        id: &str,
        comment: &str,
    ) -> Result<ApiResponse<CommentReceipt>, ApiError> {
        let body = comment_body(comment)?;
        self.client
            .execute(Operation::AddComment { id: id.to_string() }, Some(body))
            .await
    }
}

fn comment_body(comment: &str) -> Result<serde_json::Value, ApiError> {
    Ok(serde_json::to_value(CommentRequest {
        comment: comment.to_string(),
    })?)
}
