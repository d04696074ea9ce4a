//! # Field & Schema Definitions
//!
//! Pure data describing record shapes. A [`SchemaDef`] carries no behavior
//! beyond structural self-checks; the validator and the contract generator
//! both read the same definition, keyed by [`SchemaDef::id`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaDefError;

/// Canonical hyphenated 8-4-4-4-12 form, either case.
pub const UUID_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// `local@domain.tld`: dot-separated atoms on both sides, no leading,
/// trailing or doubled dots, hyphens only inside domain labels, and an
/// alphabetic TLD of at least two letters.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9_'+\-]+(?:\.[A-Za-z0-9_'+\-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$";

/// Primitive kind of a field value.
///
/// `Uuid` and `Email` are strings on the wire with an additional format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Uuid,
    Email,
    Number,
    Integer,
    Boolean,
}

impl FieldKind {
    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::Email => "email",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    /// Whether values of this kind are JSON strings (and so have a length).
    pub fn is_text(&self) -> bool {
        matches!(self, Self::String | Self::Uuid | Self::Email)
    }

    /// Regular expression a value of this kind must match in full.
    ///
    /// The validator and the generated document both use it, so the two
    /// accept the same strings.
    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            Self::Uuid => Some(UUID_PATTERN),
            Self::Email => Some(EMAIL_PATTERN),
            _ => None,
        }
    }

    /// The JSON type a value of this kind must have.
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::String | Self::Uuid | Self::Email => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size constraints on a field. Lengths count Unicode scalar values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl Constraints {
    /// No constraints.
    pub const NONE: Self = Self {
        min_length: None,
        max_length: None,
    };

    pub fn is_empty(&self) -> bool {
        self.min_length.is_none() && self.max_length.is_none()
    }
}

/// One declared field of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field. Unique within its schema.
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub constraints: Constraints,
    /// Human-readable description, emitted verbatim into the API document.
    pub description: &'static str,
}

impl FieldSpec {
    /// A required field with no constraints.
    pub const fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            constraints: Constraints::NONE,
            description,
        }
    }

    /// An optional field with no constraints.
    pub const fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            constraints: Constraints::NONE,
            description,
        }
    }

    /// Add a minimum length.
    pub const fn min_length(self, min: usize) -> Self {
        Self {
            constraints: Constraints {
                min_length: Some(min),
                max_length: self.constraints.max_length,
            },
            ..self
        }
    }

    /// Add a maximum length.
    pub const fn max_length(self, max: usize) -> Self {
        Self {
            constraints: Constraints {
                min_length: self.constraints.min_length,
                max_length: Some(max),
            },
            ..self
        }
    }
}

/// A record shape: ordered fields, a description, and a stable identifier.
///
/// Schemas that share fields (e.g. `User` and `CreateUser`) are independent
/// values; there is no inheritance between them.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaDef {
    /// Stable identifier, also used as the component name in the API document.
    pub id: &'static str,
    pub description: &'static str,
    /// Fields in declaration order.
    pub fields: &'static [FieldSpec],
}

impl SchemaDef {
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `name` is a declared field.
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of the required fields, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// A by-identifier reference to this schema.
    pub fn reference(&self) -> SchemaRef {
        SchemaRef::new(self.id)
    }

    /// Check the structural invariants of the definition.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaDefError`] found, scanning fields in order.
    pub fn check(&self) -> Result<(), SchemaDefError> {
        if self.id.trim().is_empty() {
            return Err(SchemaDefError::EmptyId);
        }
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in self.fields {
            if !seen.insert(field.name) {
                return Err(SchemaDefError::DuplicateField {
                    schema: self.id.to_string(),
                    field: field.name.to_string(),
                });
            }
            if !field.kind.is_text() && !field.constraints.is_empty() {
                return Err(SchemaDefError::LengthOnNonText {
                    schema: self.id.to_string(),
                    field: field.name.to_string(),
                    kind: field.kind,
                });
            }
            if let (Some(min), Some(max)) =
                (field.constraints.min_length, field.constraints.max_length)
            {
                if min > max {
                    return Err(SchemaDefError::InvertedLength {
                        schema: self.id.to_string(),
                        field: field.name.to_string(),
                        min,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Reference to a schema by identifier.
///
/// Route contracts hold these rather than the schema itself; the generator
/// resolves them against a catalog and fails loudly on a miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaRef(String);

impl SchemaRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&SchemaDef> for SchemaRef {
    fn from(schema: &SchemaDef) -> Self {
        schema.reference()
    }
}

impl From<&str> for SchemaRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
