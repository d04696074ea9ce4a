//! # uapi-contract: Route Contracts & API Document Generation
//!
//! Associates each route (method + path) with the schemas that govern its
//! request and responses, and derives the OpenAPI document from those
//! associations and the schema catalog.
//!
//! ## Registry (`registry`)
//!
//! [`ContractRegistry`] is an explicit, append-only builder value. Routes
//! keep registration order; a second registration of the same method and
//! path fails with [`DuplicateRouteError`].
//!
//! ## Generator (`generator`)
//!
//! [`generate`] is a pure function of a contract sequence, a
//! [`uapi_schema::SchemaCatalog`], and [`ApiInfo`]. Identical inputs produce
//! byte-identical output. A reference to a schema missing from the catalog
//! fails with [`GenerateError::UnresolvedSchema`] instead of being dropped.
//!
//! ## Crate Policy
//!
//! - Depends only on `uapi-schema` internally.
//! - Registration and generation happen once at startup; their errors are
//!   wiring faults and must halt the process.

pub mod deployment;
pub mod document;
pub mod error;
pub mod generator;
pub mod registry;

pub use deployment::standard_registry;
pub use document::ApiDocument;
pub use error::{DuplicateRouteError, GenerateError};
pub use generator::{generate, ApiInfo};
pub use registry::{ContractRegistry, HttpMethod, ResponseSpec, RouteContract};
