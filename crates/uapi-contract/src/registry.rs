//! # Contract Registry
//!
//! Records, per (method, path), which schema governs the path parameters,
//! which governs the request body, and which governs each response status.
//! Contracts reference schemas by identifier; resolution happens in the
//! generator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uapi_schema::SchemaRef;

use crate::error::DuplicateRouteError;

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Lowercase name, as used for OpenAPI path-item keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// One documented response of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    pub description: String,
    /// JSON body schema, if the response has a body.
    pub schema: Option<SchemaRef>,
}

/// The association between a route and the schemas governing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteContract {
    pub method: HttpMethod,
    /// OpenAPI-style path template, e.g. `/users/{id}`.
    pub path: String,
    pub summary: String,
    pub description: String,
    /// Distinct tags in the order first given.
    pub tags: Vec<String>,
    /// Schema of the path parameters.
    pub params: Option<SchemaRef>,
    /// Schema of the JSON request body.
    pub body: Option<SchemaRef>,
    /// Responses keyed by status code, exactly as registered.
    pub responses: BTreeMap<u16, ResponseSpec>,
}

impl RouteContract {
    /// Start a contract for `method path` with no schemas attached.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: String::new(),
            description: String::new(),
            tags: Vec::new(),
            params: None,
            body: None,
            responses: BTreeMap::new(),
        }
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a tag. Repeated tags are ignored.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn params(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.params = Some(schema.into());
        self
    }

    pub fn body(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.body = Some(schema.into());
        self
    }

    /// Document a response with a JSON body. A later call for the same
    /// status replaces the earlier one.
    pub fn response(
        mut self,
        status: u16,
        description: impl Into<String>,
        schema: impl Into<SchemaRef>,
    ) -> Self {
        self.responses.insert(
            status,
            ResponseSpec {
                description: description.into(),
                schema: Some(schema.into()),
            },
        );
        self
    }

    /// Document a response without a body.
    pub fn empty_response(mut self, status: u16, description: impl Into<String>) -> Self {
        self.responses.insert(
            status,
            ResponseSpec {
                description: description.into(),
                schema: None,
            },
        );
        self
    }

    /// The (method, path) pair identifying this route.
    pub fn key(&self) -> (HttpMethod, &str) {
        (self.method, self.path.as_str())
    }

    /// Every schema reference in this contract: params, body, then
    /// responses by status.
    pub fn schema_refs(&self) -> impl Iterator<Item = &SchemaRef> {
        self.params
            .iter()
            .chain(self.body.iter())
            .chain(self.responses.values().filter_map(|r| r.schema.as_ref()))
    }
}

/// Append-only, insertion-ordered set of route contracts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractRegistry {
    routes: Vec<RouteContract>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contract.
    ///
    /// # Errors
    ///
    /// [`DuplicateRouteError`] if a contract with the same method and path
    /// is already registered; the registry is left unchanged.
    pub fn register(&mut self, contract: RouteContract) -> Result<(), DuplicateRouteError> {
        if self.routes.iter().any(|r| r.key() == contract.key()) {
            return Err(DuplicateRouteError {
                method: contract.method,
                path: contract.path,
            });
        }
        tracing::debug!(method = %contract.method, path = %contract.path, "route contract registered");
        self.routes.push(contract);
        Ok(())
    }

    /// All contracts in registration order.
    pub fn all(&self) -> &[RouteContract] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteContract> {
        self.routes.iter()
    }

    /// An owned copy of the current contracts, independent of this registry.
    pub fn snapshot(&self) -> Vec<RouteContract> {
        self.routes.clone()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ContractRegistry {
    type Item = &'a RouteContract;
    type IntoIter = std::slice::Iter<'a, RouteContract>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
