//! Route definitions for the Strata HTTP API.
//!
//! Everything is mounted under `/api`. The `v1/sample`, `v2/sample` and
//! `GET v1/auth` routes sit behind the bearer-token middleware. Unknown
//! paths and methods get the JSON error envelope.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Build the router with every route and the auth middleware in place.
pub fn build_router(state: AppState) -> Router {
    let v1 = Router::new()
        .merge(auth_routes(&state))
        .merge(sample_v1_routes(&state));

    let api = Router::new()
        .merge(health_routes())
        .nest("/v1", v1)
        .nest("/v2", sample_v2_routes(&state));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::fallback::not_found)
        .method_not_allowed_fallback(handlers::fallback::method_not_allowed)
        .with_state(state)
}

/// Liveness and dependency health
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route("/service", get(handlers::health::service))
}

/// Token issuance is public; identity lookup is not
fn auth_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth", get(handlers::auth::me))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/access-token", post(handlers::auth::access_token))
        .route(
            "/auth/access-token/programmatic",
            post(handlers::auth::programmatic_access_token),
        )
        .merge(protected)
}

fn sample_v1_routes(state: &AppState) -> Router<AppState> {
    use handlers::sample_v1::*;

    Router::new()
        .route("/sample", get(list).post(add))
        .route("/sample/{id}", put(update))
        .route("/sample/proxy", get(proxy))
        .route("/sample/database", get(database))
        .route("/sample/cache", get(cache))
        .route("/sample/pub-sub", post(publish))
        .route("/sample/xml", post(post_xml))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
}

fn sample_v2_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/sample", get(handlers::sample_v2::list))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
}
