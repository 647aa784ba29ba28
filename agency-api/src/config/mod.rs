use agency_core::config::{load_settings, TelemetryConfig};
use agency_core::CoreError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Resolved once at startup and handed to `ApiClient::new`.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Prefix for every request path, e.g. `http://localhost:3000/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Serve canned responses instead of calling `base_url`.
    #[serde(default = "default_use_mock")]
    pub use_mock: bool,
    /// Realtime endpoint. Declared for the dashboard, not used by the gateway.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            use_mock: default_use_mock(),
            ws_url: default_ws_url(),
            environment: default_environment(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_use_mock() -> bool {
    true
}

fn default_ws_url() -> String {
    "ws://localhost:3000".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionSettings {
    /// JSON file backing the session store. In-memory when unset.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

/// Read-only view of the gateway configuration for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub api_url: String,
    pub ws_url: String,
    pub timeout_ms: u64,
    pub use_mocks: bool,
    pub has_auth_token: bool,
    pub environment: String,
}

pub fn get_configuration() -> Result<Settings, CoreError> {
    let base_path = std::env::current_dir()?;

    // Running from the crate directory or from the workspace root
    let configuration_directory = if base_path.ends_with("agency-api") {
        base_path.join("config")
    } else {
        base_path.join("agency-api").join("config")
    };

    load_settings(&configuration_directory)
}
