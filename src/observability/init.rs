//! Subscriber setup.

use super::tracer::file_tracer_provider;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the data directory.
pub const TRACE_FILE: &str = "termfolio-otlp.json";

const SERVICE_NAME: &str = "termfolio";

/// Installs the global subscriber: an `EnvFilter` built from `level` feeding
/// an OpenTelemetry layer that writes to `<data_dir>/termfolio-otlp.json`.
///
/// Returns `false` without installing anything if the data directory cannot
/// be created, and `false` if a subscriber is already installed, so calling it
/// twice is harmless. An invalid `level` falls back to `info`.
pub fn init_tracing(level: &str, data_dir: &Path) -> bool {
    if std::fs::create_dir_all(data_dir).is_err() {
        return false;
    }

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry().with(filter).with(layer).try_init().is_ok()
}
