//! # API Document
//!
//! The generated OpenAPI document. Built once from a registry snapshot and
//! immutable afterwards.

use serde::Serialize;
use serde_json::Value;
use utoipa::openapi::OpenApi;

/// Immutable OpenAPI description of the full API surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ApiDocument {
    openapi: OpenApi,
}

impl ApiDocument {
    pub(crate) fn new(openapi: OpenApi) -> Self {
        Self { openapi }
    }

    /// The underlying `utoipa` document.
    pub fn openapi(&self) -> &OpenApi {
        &self.openapi
    }

    /// Compact JSON rendering.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.openapi)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.openapi)
    }

    /// Path templates in document order.
    pub fn path_names(&self) -> Vec<&str> {
        self.openapi.paths.paths.keys().map(String::as_str).collect()
    }

    /// Component schema names, keyed by schema identifier.
    pub fn schema_names(&self) -> Vec<&str> {
        self.openapi
            .components
            .as_ref()
            .map(|c| c.schemas.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
