//! Subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::tracer;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE: &str = "zofi-otlp.jsonl";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to
/// `~/.local/share/zellij/zofi/zofi-otlp.jsonl`.
///
/// Failures are silent. An unparsable level falls back to `info`, an unusable
/// data directory disables tracing, and a second call is a no-op.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "zofi"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("zofi.mode", format!("{:?}", config.mode).to_lowercase()),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let layer = OpenTelemetryLayer::new(provider.tracer("zofi"));
    opentelemetry::global::set_tracer_provider(provider);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
