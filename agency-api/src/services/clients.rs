use super::ApiClient;
use crate::error::ApiError;
use crate::gateway::Operation;
use crate::models::{ApiResponse, ClientApprovals, ClientSchedule};

/// Read-only client portal views.
pub struct ClientsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ClientsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_client_schedule(
        &self,
        client_id: &str,
    ) -> Result<ApiResponse<ClientSchedule>, ApiError> {
        let op = Operation::GetClientSchedule {
            client_id: client_id.to_string(),
        };
        self.client.execute(op, None).await
    }

    pub async fn get_client_approvals(
        &self,
        client_id: &str,
    ) -> Result<ApiResponse<ClientApprovals>, ApiError> {
        let op = Operation::GetClientApprovals {
            client_id: client_id.to_string(),
        };
        self.client.execute(op, None).await
    }
}
