//! # Runtime Validation
//!
//! Checks an untyped JSON value against a [`SchemaDef`].
//!
//! ## Rules
//!
//! For each declared field, in declaration order:
//!
//! 1. Missing and required → `required`. Missing and optional → skipped.
//! 2. Present → kind check, then format check (email, uuid), then length
//!    constraints. The first failing check produces the field's only
//!    violation.
//!
//! Violations accumulate across fields, so one missing field never masks a
//! malformed neighbour. Undeclared keys are dropped unless
//! [`ValidationOptions::strict`] is set, in which case each one is reported
//! after the declared-field violations. Input that is not a JSON object
//! yields a single root violation.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::{FieldKind, FieldSpec, SchemaDef, EMAIL_PATTERN, UUID_PATTERN};

/// Declared fields of a validated record, in declaration order.
pub type Record = Map<String, Value>;

pub(crate) const MSG_REQUIRED: &str = "required";
pub(crate) const MSG_UNKNOWN_FIELD: &str = "unknown field";
pub(crate) const MSG_EXPECTED_OBJECT: &str = "expected object";
pub(crate) const MSG_INVALID_EMAIL: &str = "invalid email";
pub(crate) const MSG_INVALID_UUID: &str = "invalid uuid";

static UUID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(UUID_PATTERN).expect("uuid pattern is a valid regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Validator configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Reject keys the schema does not declare.
    pub strict: bool,
}

impl ValidationOptions {
    /// Closed-record mode: undeclared keys are violations.
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// A single field-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field name, or empty for the input as a whole.
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// A violation about the input as a whole.
    pub fn root(message: impl Into<String>) -> Self {
        Self::new(String::new(), message)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationResult {
    /// Exactly the declared fields that were present, each checked.
    Valid { value: Record },
    /// Non-empty, in field declaration order.
    Invalid { violations: Vec<Violation> },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Violations, empty when valid.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Valid { .. } => &[],
            Self::Invalid { violations } => violations,
        }
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> Result<Record, Vec<Violation>> {
        match self {
            Self::Valid { value } => Ok(value),
            Self::Invalid { violations } => Err(violations),
        }
    }
}

/// Validate `input` against `schema`.
///
/// Never panics on untrusted input; every malformed shape becomes an
/// [`ValidationResult::Invalid`].
pub fn validate(schema: &SchemaDef, input: &Value, options: ValidationOptions) -> ValidationResult {
    let Some(object) = input.as_object() else {
        return ValidationResult::Invalid {
            violations: vec![Violation::root(MSG_EXPECTED_OBJECT)],
        };
    };

    let mut value = Record::new();
    let mut violations = Vec::new();

    for field in schema.fields {
        match object.get(field.name) {
            None if field.required => violations.push(Violation::new(field.name, MSG_REQUIRED)),
            None => {}
            Some(raw) => match check_field(field, raw) {
                Ok(()) => {
                    value.insert(field.name.to_string(), raw.clone());
                }
                Err(message) => violations.push(Violation::new(field.name, message)),
            },
        }
    }

    if options.strict {
        violations.extend(
            object
                .keys()
                .filter(|key| !schema.declares(key))
                .map(|key| Violation::new(key.as_str(), MSG_UNKNOWN_FIELD)),
        );
    }

    if violations.is_empty() {
        ValidationResult::Valid { value }
    } else {
        tracing::debug!(
            schema = schema.id,
            count = violations.len(),
            "input rejected by schema"
        );
        ValidationResult::Invalid { violations }
    }
}

/// Kind, then format, then size. Returns the first failure.
fn check_field(field: &FieldSpec, raw: &Value) -> Result<(), String> {
    check_kind(field.kind, raw)?;
    if let Some(text) = raw.as_str() {
        check_format(field.kind, text)?;
        check_length(field, text)?;
    }
    Ok(())
}

fn check_kind(kind: FieldKind, raw: &Value) -> Result<(), String> {
    let ok = match kind {
        FieldKind::String | FieldKind::Uuid | FieldKind::Email => raw.is_string(),
        FieldKind::Number => raw.is_number(),
        FieldKind::Integer => raw.is_i64() || raw.is_u64(),
        FieldKind::Boolean => raw.is_boolean(),
    };
    if ok {
        Ok(())
    } else {
        Err(format!("expected {}", kind.json_type()))
    }
}

fn check_format(kind: FieldKind, text: &str) -> Result<(), String> {
    match kind {
        FieldKind::Uuid if !UUID_RE.is_match(text) => Err(MSG_INVALID_UUID.to_string()),
        FieldKind::Email if !is_email(text) => Err(MSG_INVALID_EMAIL.to_string()),
        _ => Ok(()),
    }
}

fn check_length(field: &FieldSpec, text: &str) -> Result<(), String> {
    let len = text.chars().count();
    if let Some(min) = field.constraints.min_length {
        if len < min {
            return Err(format!("must contain at least {min} character(s)"));
        }
    }
    if let Some(max) = field.constraints.max_length {
        if len > max {
            return Err(format!("must contain at most {max} character(s)"));
        }
    }
    Ok(())
}

fn is_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}
