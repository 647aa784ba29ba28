use crate::config::TelemetryConfig;
use crate::error::CoreError;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{Resource, runtime, trace as sdktrace};
use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber: JSON logs filtered by `RUST_LOG` (falling
/// back to the configured level), plus OTLP span export when an endpoint is
/// configured. Must run inside a tokio runtime when OTLP is enabled.
pub fn init_tracing(service_name: &str, telemetry: &TelemetryConfig) -> Result<(), CoreError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&telemetry.log_level));

    let otel_layer = match telemetry.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let tracer = otlp_tracer(service_name, endpoint)?;
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(otel_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .try_init()
        .map_err(|e| CoreError::Telemetry(e.to_string()))
}

fn otlp_tracer(service_name: &str, endpoint: &str) -> Result<sdktrace::Tracer, CoreError> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
            KeyValue::new("service.name", service_name.to_string()),
        ])))
        .install_batch(runtime::Tokio)
        .map_err(|e| {
            CoreError::Telemetry(format!(
                "failed to initialize OTLP tracer for '{}' at '{}': {}",
                service_name, endpoint, e
            ))
        })
}

static TEST_INIT: Once = Once::new();

/// Human-readable subscriber routed through the test harness. Safe to call
/// from every test.
pub fn init_test_tracing() {
    TEST_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,agency_api=debug")),
            )
            .with_test_writer()
            .try_init()
            .ok();
    });
}
