use crate::config::{ApiSettings, ConfigSnapshot};
use crate::error::ApiError;
use crate::gateway::{ApiMode, ApiRequest, Backend, HttpBackend, MockBackend, Operation};
use crate::models::ApiResponse;
use crate::session::Session;
use metrics::{counter, histogram};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use super::approvals::ApprovalsApi;
use super::auth::AuthApi;
use super::clients::ClientsApi;
use super::drafts::DraftsApi;
use super::notifications::NotificationsApi;

/// Entry point for the dashboard and client portal.
///
/// Picks the backend once from [`ApiSettings::use_mock`] and hands out typed
/// facades that share it. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    backend: Arc<dyn Backend>,
    settings: ApiSettings,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(settings: ApiSettings, session: Arc<Session>) -> Result<Self, ApiError> {
        let backend: Arc<dyn Backend> = if settings.use_mock {
            Arc::new(MockBackend::new())
        } else {
            Arc::new(HttpBackend::new(&settings, session.clone())?)
        };

        tracing::info!(
            mode = backend.mode().as_str(),
            base_url = %settings.base_url,
            timeout_ms = settings.timeout_ms,
            "API client initialized"
        );

        Ok(Self::with_backend(backend, settings, session))
    }

    pub fn with_backend(
        backend: Arc<dyn Backend>,
        settings: ApiSettings,
        session: Arc<Session>,
    ) -> Self {
        Self {
            backend,
            settings,
            session,
        }
    }

    pub fn mode(&self) -> ApiMode {
        self.backend.mode()
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Raw gateway call. In mock mode the route must be one the catalogue
    /// knows, otherwise the call fails with 404.
    pub async fn invoke(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let op = Operation::resolve(&method, path);
        let mut request = ApiRequest::new(method, path, body);
        if let Some(op) = &op {
            request = request.with_shape(op.response_shape());
        }
        let label = op.as_ref().map(Operation::name).unwrap_or("raw");
        self.dispatch(label, request).await
    }

    pub async fn get_config(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            api_url: self.settings.base_url.clone(),
            ws_url: self.settings.ws_url.clone(),
            timeout_ms: self.settings.timeout_ms,
            use_mocks: self.settings.use_mock,
            has_auth_token: self.session.has_token().await,
            environment: self.settings.environment.clone(),
        }
    }

    pub fn drafts(&self) -> DraftsApi<'_> {
        DraftsApi::new(self)
    }

    pub fn approvals(&self) -> ApprovalsApi<'_> {
        ApprovalsApi::new(self)
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi::new(self)
    }

    pub fn clients(&self) -> ClientsApi<'_> {
        ClientsApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Invoke `op` and decode its payload.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        op: Operation,
        body: Option<Value>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let request = ApiRequest::for_operation(&op, body);
        self.dispatch(op.name(), request).await?.decode()
    }

    async fn dispatch(
        &self,
        operation: &'static str,
        request: ApiRequest,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let start = Instant::now();
        let mode = self.backend.mode().as_str();
        let result = self.backend.invoke(request).await;
        let duration = start.elapsed();

        let outcome = match &result {
            Ok(_) => "success",
            Err(err) => err.kind().as_str(),
        };

        match &result {
            Ok(_) => tracing::debug!(
                operation = operation,
                mode = mode,
                duration_ms = duration.as_millis() as u64,
                "API call succeeded"
            ),
            Err(err) => tracing::warn!(
                operation = operation,
                mode = mode,
                status_code = err.status_code(),
                error = %err,
                "API call failed"
            ),
        }

        let labels = [
            ("operation", operation.to_string()),
            ("mode", mode.to_string()),
            ("outcome", outcome.to_string()),
        ];
        counter!("api_client_requests_total", &labels).increment(1);
        histogram!("api_client_request_duration_seconds", &labels).record(duration.as_secs_f64());

        result
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("mode", &self.backend.mode())
            .field("base_url", &self.settings.base_url)
            .field("session", &self.session)
            .finish()
    }
}
