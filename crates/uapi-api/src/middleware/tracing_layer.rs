//! # Request/Response Tracing
//!
//! Per-request spans carrying method, URI, and status code, emitted at the
//! levels the service logs at.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>>;

/// Build the `TraceLayer` wrapped around every API route.
///
/// Spans open at `INFO` so request logging follows the default `EnvFilter`;
/// 4xx responses are ordinary outcomes and are not reported as failures.
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
