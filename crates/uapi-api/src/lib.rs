//! # uapi-api: HTTP Service for the User API
//!
//! Serves the routes declared by `uapi-contract`, validating every request
//! against the schemas from `uapi-schema`, and publishes the generated API
//! document.
//!
//! ## API Surface
//!
//! | Route                | Module                 | Input           | Output    |
//! |----------------------|------------------------|-----------------|-----------|
//! | `GET /users/{id}`    | [`routes::users`]      | `UserIdParams`  | `User`    |
//! | `POST /users`        | [`routes::users`]      | `CreateUser`    | `User`    |
//! | `POST /posts`        | [`routes::posts`]      | `CreatePost`    | `Post`    |
//! | `POST /comments`     | [`routes::comments`]   | `CreateComment` | `Comment` |
//! | `GET /openapi.json`  | [`openapi`]            |                 | document  |
//! | `GET /api-docs`      | `viewer` (feature)     |                 | HTML      |
//! | `GET /health/*`      | this module            |                 | text      |
//!
//! ## Request Outcomes
//!
//! Malformed JSON is a 400 `BAD_REQUEST`. Well-formed JSON that violates the
//! schema is a 400 `VALIDATION_ERROR` whose `details` is the full violation
//! list. A valid request is answered 200 with the typed record.

pub mod bootstrap;
pub mod error;
pub mod extractors;
pub mod ids;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
#[cfg(feature = "viewer")]
pub mod viewer;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes are mounted outside the trace layer so that orchestrator
/// polling does not flood request logs.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::users::router())
        .merge(routes::posts::router())
        .merge(routes::comments::router())
        .merge(openapi::router())
        .layer(middleware::tracing_layer::layer())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe. Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. State is fully built before the router exists, so a
/// serving process is always ready.
async fn readiness() -> &'static str {
    "ready"
}
