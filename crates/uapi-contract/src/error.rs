//! # Contract Errors
//!
//! Both errors describe faults in the service's own route wiring. They are
//! raised during startup and never on a request path.

use thiserror::Error;
use uapi_schema::SchemaRef;

use crate::registry::HttpMethod;

/// A route with this method and path is already registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("route {method} {path} is already registered")]
pub struct DuplicateRouteError {
    pub method: HttpMethod,
    pub path: String,
}

/// Errors from [`crate::generate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// A contract references a schema the catalog does not define.
    #[error("route {method} {path} references undefined schema {schema}")]
    UnresolvedSchema {
        method: HttpMethod,
        path: String,
        schema: SchemaRef,
    },

    /// The params schema does not declare exactly the path's placeholders.
    #[error("route {method} {path} has placeholders {placeholders:?} but params fields {fields:?}")]
    PathParamsMismatch {
        method: HttpMethod,
        path: String,
        placeholders: Vec<String>,
        fields: Vec<String>,
    },

    /// Path segments are always present, so an optional params field can
    /// never be absent.
    #[error("route {method} {path} declares optional path parameter {field}")]
    OptionalPathParam {
        method: HttpMethod,
        path: String,
        field: String,
    },
}
