//! # Users
//!
//! - `GET /users/{id}` → `User`
//! - `POST /users` (`CreateUser`) → `User`

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use uapi_schema::{CreateUser, User, UserIdParams};

use crate::error::AppError;
use crate::extractors::{extract_model, path_model};
use crate::ids::RecordKind;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{id}", get(get_user))
        .route("/users", post(create_user))
}

/// GET /users/{id}: Return the user with the given identifier.
///
/// There is no store behind the service, so the record is a placeholder
/// carrying the requested id.
async fn get_user(
    State(state): State<AppState>,
    Path(segments): Path<HashMap<String, String>>,
) -> Result<Json<User>, AppError> {
    let params: UserIdParams = path_model(segments, state.validation())?;
    Ok(Json(User {
        id: params.id,
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
    }))
}

/// POST /users: Create a user.
async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let create: CreateUser = extract_model(body, state.validation())?;
    let user = create.into_user(state.ids.issue(RecordKind::User));
    tracing::info!(user_id = %user.id, "user created");
    Ok(Json(user))
}
