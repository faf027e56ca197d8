//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;
use axum::extract::Request;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
///
/// The logging middleware is added with `Router::layer` so it runs after
/// routing and can read the matched route.
///
/// Request spans are parented to the span that is current when the app is
/// built, so process-wide fields reach every request event even though
/// connections are served on their own tasks.
pub fn build_app(state: AppState) -> Router {
    let root = Span::current();
    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(
            TraceLayer::new_for_http().make_span_with(move |request: &Request| {
                tracing::info_span!(
                    parent: &root,
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
}
