//! Tracing subscriber setup.

use super::tracer;
use crate::{Config, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::{Path, PathBuf};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported in the OTLP resource and scope.
pub(super) const SERVICE_NAME: &str = "Bookshelf";

/// Trace file name inside the data directory.
const TRACE_FILE_NAME: &str = "bookshelf-otlp.json";

/// Installs the global subscriber: `EnvFilter` at the configured level plus an
/// OpenTelemetry layer exporting to `<data dir>/bookshelf-otlp.json`.
///
/// A second call leaves the first subscriber in place.
///
/// # Errors
///
/// Returns [`BookshelfError::Io`](crate::BookshelfError::Io) if the data
/// directory cannot be created. Nothing is installed in that case and the
/// plugin can keep running untraced.
///
/// # Example
///
/// ```rust,no_run
/// use bookshelf::observability::init_tracing;
/// use bookshelf::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// if let Err(e) = init_tracing(&config) {
///     eprintln!("tracing disabled: {e}");
/// }
/// ```
pub fn init_tracing(config: &Config) -> Result<()> {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let trace_file = prepare_trace_file(&crate::infrastructure::get_data_dir())?;

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);
    let provider = tracer::create_tracer_provider(trace_file, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
    Ok(())
}

/// Creates `data_dir` if needed and returns the trace file path inside it.
fn prepare_trace_file(data_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join(TRACE_FILE_NAME))
}
