//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure leaves the service as a JSON body of the form
//! `{"error": {"code", "message", "details"?}}`.
//!
//! | Variant      | Status | Code               | `details`             |
//! |--------------|--------|--------------------|-----------------------|
//! | `BadRequest` | 400    | `BAD_REQUEST`      | none                  |
//! | `Validation` | 400    | `VALIDATION_ERROR` | the violation list    |
//! | `Internal`   | 500    | `INTERNAL_ERROR`   | none, message masked  |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uapi_schema::{ParseError, Violation};

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "VALIDATION_ERROR").
    pub code: String,
    pub message: String,
    /// The violation list for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Body is not syntactically valid JSON, or not JSON at all (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Input parsed as JSON but does not satisfy the route's schema (400).
    #[error("request failed validation with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let details = match &self {
            Self::Validation(violations) => serde_json::to_value(violations).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Invalid(violations) => Self::Validation(violations),
            drift @ ParseError::Drift { .. } => Self::Internal(drift.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Validation(vec![]), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{err}");
        }
    }

    #[test]
    fn error_body_without_details_omits_key() {
        let body = ErrorBody {
            error: ErrorDetail {
                code: "TEST".to_string(),
                message: "test message".to_string(),
                details: None,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("TEST"));
        assert!(!json.contains("details"));
    }

    #[tokio::test]
    async fn validation_carries_violations_verbatim() {
        let violations = vec![
            Violation::new("name", "required"),
            Violation::new("email", "invalid email"),
        ];
        let (status, body) = response_parts(AppError::Validation(violations)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.code, "VALIDATION_ERROR");
        assert!(body.error.message.contains("2 violation(s)"), "{}", body.error.message);
        assert_eq!(
            body.error.details,
            Some(json!([
                {"path": "name", "message": "required"},
                {"path": "email", "message": "invalid email"}
            ]))
        );
    }

    #[tokio::test]
    async fn bad_request_has_no_details() {
        let (status, body) = response_parts(AppError::BadRequest("malformed".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.code, "BAD_REQUEST");
        assert!(body.error.message.contains("malformed"));
        assert!(body.error.details.is_none());
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let (status, body) = response_parts(AppError::Internal("type drifted".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(body.error.details.is_none());
    }

    #[test]
    fn parse_invalid_converts_to_validation() {
        let err = AppError::from(ParseError::Invalid(vec![Violation::root("expected object")]));
        match err {
            AppError::Validation(v) => assert_eq!(v, [Violation::root("expected object")]),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn parse_drift_converts_to_internal() {
        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err = AppError::from(ParseError::Drift { schema: "User", source });
        assert!(matches!(err, AppError::Internal(ref m) if m.contains("User")));
    }
}
