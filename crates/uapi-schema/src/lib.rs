//! # uapi-schema: Record Schemas & Validation
//!
//! The single source of truth for the shapes of records the User API accepts
//! and returns. Every schema is plain `'static` data; behavior lives in
//! stateless functions keyed by schema identity.
//!
//! ## Schema Definitions (`field`, `catalog`)
//!
//! A [`SchemaDef`] is an ordered list of [`FieldSpec`]s plus a description and
//! a stable identifier. The deployment's schemas (`User`, `CreateUser`, `Post`,
//! `CreatePost`, `Comment`, `CreateComment`, `UserIdParams`) are `static` items
//! collected into a [`SchemaCatalog`].
//!
//! ## Runtime Validation (`validate`)
//!
//! [`validate`] checks an untyped JSON value against a schema and returns a
//! [`ValidationResult`]: either the declared fields, or every field-level
//! [`Violation`] in declaration order. Malformed input never panics.
//!
//! ## Typed Models (`model`)
//!
//! Each schema has an explicitly declared Rust struct implementing
//! [`Modeled`]. Property tests check that every record the validator accepts
//! deserializes into the declared struct, so the two cannot drift silently.
//!
//! ## Crate Policy
//!
//! - Leaf of the workspace DAG: no internal dependencies.
//! - No I/O. Nothing in this crate blocks or suspends.
//! - No `.unwrap()` outside tests; malformed schemas surface as
//!   [`SchemaDefError`].

pub mod catalog;
pub mod error;
pub mod field;
pub mod model;
pub mod validate;

pub use catalog::{
    SchemaCatalog, COMMENT, CREATE_COMMENT, CREATE_POST, CREATE_USER, POST, STANDARD_SCHEMAS,
    USER, USER_ID_PARAMS,
};
pub use error::SchemaDefError;
pub use field::{
    Constraints, FieldKind, FieldSpec, SchemaDef, SchemaRef, EMAIL_PATTERN, UUID_PATTERN,
};
pub use model::{
    parse, Comment, CreateComment, CreatePost, CreateUser, Modeled, ParseError, Post, User,
    UserIdParams,
};
pub use validate::{validate, Record, ValidationOptions, ValidationResult, Violation};
