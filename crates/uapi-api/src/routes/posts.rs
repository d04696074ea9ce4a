//! # Posts
//!
//! - `POST /posts` (`CreatePost`) → `Post`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use uapi_schema::{CreatePost, Post};

use crate::error::AppError;
use crate::extractors::extract_model;
use crate::ids::RecordKind;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/posts", post(create_post))
}

async fn create_post(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Post>, AppError> {
    let create: CreatePost = extract_model(body, state.validation())?;
    let post = create.into_post(state.ids.issue(RecordKind::Post));
    tracing::info!(post_id = %post.id, author_id = %post.author_id, "post created");
    Ok(Json(post))
}
