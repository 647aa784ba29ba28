use agency_api::models::ApiResponse;
use agency_api::session::{FileStore, Session};
use agency_api::{get_configuration, ApiClient};
use agency_core::observability::init_tracing;
use anyhow::Context;
use serde_json::Value;
use std::sync::Arc;

const SAMPLE_DRAFT_ID: &str = "test_123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = get_configuration().context("Failed to load configuration")?;

    init_tracing("api-debug", &settings.telemetry)?;

    let session = match &settings.session.store_path {
        Some(path) => {
            let store = FileStore::open(path)
                .await
                .with_context(|| format!("Failed to open session store {}", path.display()))?;
            Session::new(Arc::new(store))
        }
        None => Session::in_memory(),
    };
    let session = Arc::new(session);
    if let Some(user) = session.restore().await {
        tracing::info!(user_id = %user.id, "Restored session");
    }

    let client = ApiClient::new(settings.api.clone(), session)?;

    println!("API configuration:");
    println!("{}", serde_json::to_string_pretty(&client.get_config().await)?);

    println!("Requesting GET /drafts/{} ...", SAMPLE_DRAFT_ID);
    match client.drafts().get_draft(SAMPLE_DRAFT_ID).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(err) => {
            let envelope = ApiResponse::<Value>::failure(&err);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            println!("{}: {}", err.status_code(), err.message());
            Err(err).context("Sample request failed")
        }
    }
}
