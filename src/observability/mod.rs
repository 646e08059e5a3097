//! OpenTelemetry tracing with file-based export.
//!
//! Plugins run inside Zellij's WASM sandbox with no collector to talk to, so
//! spans are serialized as OTLP JSON and appended to a rotating file under the
//! plugin's data directory:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk
//!                → FileSpanExporter → bookshelf-otlp.json
//! ```
//!
//! Trace level comes from the `trace_level` plugin option (default `info`).
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: tracer provider and the file span exporter
//! - [`span_formatter`]: OTLP JSON encoding of span batches
//! - [`file_writer`]: size-rotated append-only writer
//! - [`trace_context`]: trace ids carried across the async web request

mod file_writer;
mod init;
mod span_formatter;
mod trace_context;
mod tracer;

pub use init::init_tracing;
pub use trace_context::TraceContext;
#[cfg(test)]
pub(crate) use tracer::create_tracer_provider;
