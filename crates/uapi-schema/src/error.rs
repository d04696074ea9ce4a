//! # Schema Definition Errors
//!
//! Errors raised when a schema itself is malformed. These indicate a
//! programming error in the static schema wiring, never bad request data,
//! and are surfaced at startup before any request is served.

use thiserror::Error;

use crate::field::FieldKind;

/// A schema definition violates one of its structural invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDefError {
    /// The schema identifier is empty.
    #[error("schema identifier must not be empty")]
    EmptyId,

    /// Two fields in one schema share a name.
    #[error("schema {schema} declares field {field:?} more than once")]
    DuplicateField {
        /// Identifier of the offending schema.
        schema: String,
        /// The repeated field name.
        field: String,
    },

    /// A length constraint was placed on a kind that has no length.
    #[error("schema {schema}: field {field:?} of kind {kind} cannot carry a length constraint")]
    LengthOnNonText {
        schema: String,
        field: String,
        kind: FieldKind,
    },

    /// `min_length` exceeds `max_length`.
    #[error("schema {schema}: field {field:?} has min_length {min} > max_length {max}")]
    InvertedLength {
        schema: String,
        field: String,
        min: usize,
        max: usize,
    },

    /// A catalog already holds a schema with this identifier.
    #[error("schema {0} is already defined in the catalog")]
    DuplicateSchema(String),
}
