//! # OpenAPI Document Endpoint
//!
//! Serves the document generated at startup at `/openapi.json`. The bytes are
//! rendered once in [`bootstrap`](crate::bootstrap::bootstrap), so every
//! request returns an identical body. When the `viewer` feature is enabled a
//! Swagger UI page is mounted at `/api-docs`.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    let router = Router::new().route("/openapi.json", get(openapi_json));
    #[cfg(feature = "viewer")]
    let router = router.route("/api-docs", get(crate::viewer::api_docs));
    router
}

/// GET /openapi.json: Return the generated API document.
async fn openapi_json(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.document_json.to_string(),
    )
}
