//! # Request Extraction & Validation
//!
//! The adapter between axum's raw extractors and the schema validator.
//! Handlers take the body as `Result<Json<Value>, JsonRejection>` so that
//! syntax errors and schema violations are told apart:
//!
//! ```ignore
//! async fn handler(
//!     State(state): State<AppState>,
//!     body: Result<Json<Value>, JsonRejection>,
//! ) -> Result<Json<User>, AppError> {
//!     let create: CreateUser = extract_model(body, state.validation())?;
//!     ...
//! }
//! ```

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;
use uapi_schema::{parse, Modeled, ValidationOptions};

use crate::error::AppError;

/// Extract a JSON body, mapping rejections to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it against `T`'s schema.
///
/// Syntax errors become [`AppError::BadRequest`]; schema violations become
/// [`AppError::Validation`] with the complete violation list.
pub fn extract_model<T: Modeled>(
    result: Result<Json<Value>, JsonRejection>,
    options: ValidationOptions,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    Ok(parse::<T>(&value, options)?)
}

/// Validate captured path segments against `T`'s schema.
///
/// Segments arrive as strings, so the validator sees them as string fields.
pub fn path_model<T: Modeled>(
    segments: HashMap<String, String>,
    options: ValidationOptions,
) -> Result<T, AppError> {
    let input = Value::Object(
        segments
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect(),
    );
    Ok(parse::<T>(&input, options)?)
}
