//! # Comments
//!
//! - `POST /comments` (`CreateComment`) → `Comment`
//!
//! Neither `postId` nor `authorId` is checked for existence; only their
//! shape is validated.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use uapi_schema::{Comment, CreateComment};

use crate::error::AppError;
use crate::extractors::extract_model;
use crate::ids::RecordKind;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/comments", post(create_comment))
}

async fn create_comment(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Comment>, AppError> {
    let create: CreateComment = extract_model(body, state.validation())?;
    let comment = create.into_comment(state.ids.issue(RecordKind::Comment));
    tracing::info!(
        comment_id = %comment.id,
        post_id = %comment.post_id,
        "comment created"
    );
    Ok(Json(comment))
}
