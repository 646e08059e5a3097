//! Trace context carried through a web request.
//!
//! A catalog read is started in one `update` call and resolved in a later
//! one. The span ids of the starting span travel in the request's context map
//! so the span that handles the response can be parented to it.

use opentelemetry::trace::{
    SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
};

/// Hex-encoded ids of the span that issued a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// 32 hex chars.
    pub trace_id: String,
    /// 16 hex chars.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current `tracing` span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Builds a context whose active span is the carried one, for use with
    /// `OpenTelemetrySpanExt::set_parent`.
    ///
    /// Returns `None` if either id fails to parse.
    #[must_use]
    pub fn remote_parent(&self) -> Option<opentelemetry::Context> {
        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}
