//! # Schema Catalog
//!
//! The deployment's record schemas and the identifier-keyed set that holds
//! them. Each entity has a full schema (with the server-assigned `id`) and a
//! create schema (without it).

use crate::error::SchemaDefError;
use crate::field::{FieldKind, FieldSpec, SchemaDef, SchemaRef};

// -- Users --------------------------------------------------------------------

static USER_FIELDS: [FieldSpec; 3] = [
    FieldSpec::required("id", FieldKind::Uuid, "Unique identifier for the user"),
    FieldSpec::required("name", FieldKind::String, "Name of the user").min_length(1),
    FieldSpec::required("email", FieldKind::Email, "Email address of the user"),
];

/// A stored user.
pub static USER: SchemaDef = SchemaDef {
    id: "User",
    description: "User Schema",
    fields: &USER_FIELDS,
};

// `name` deliberately carries no minimum length here.
static CREATE_USER_FIELDS: [FieldSpec; 2] = [
    FieldSpec::required("name", FieldKind::String, "Name of the user"),
    FieldSpec::required("email", FieldKind::Email, "Email address of the user"),
];

/// Body of `POST /users`.
pub static CREATE_USER: SchemaDef = SchemaDef {
    id: "CreateUser",
    description: "Create User Schema",
    fields: &CREATE_USER_FIELDS,
};

static USER_ID_PARAMS_FIELDS: [FieldSpec; 1] = [FieldSpec::required(
    "id",
    FieldKind::Uuid,
    "Identifier of the user to fetch",
)];

/// Path parameters of `GET /users/{id}`.
pub static USER_ID_PARAMS: SchemaDef = SchemaDef {
    id: "UserIdParams",
    description: "User path parameters",
    fields: &USER_ID_PARAMS_FIELDS,
};

// -- Posts --------------------------------------------------------------------

static POST_FIELDS: [FieldSpec; 4] = [
    FieldSpec::required("id", FieldKind::Uuid, "Unique identifier for the post"),
    FieldSpec::required("title", FieldKind::String, "Title of the post").min_length(1),
    FieldSpec::required("content", FieldKind::String, "Body text of the post"),
    FieldSpec::required("authorId", FieldKind::Uuid, "Identifier of the authoring user"),
];

/// A stored post.
pub static POST: SchemaDef = SchemaDef {
    id: "Post",
    description: "Post Schema",
    fields: &POST_FIELDS,
};

static CREATE_POST_FIELDS: [FieldSpec; 3] = [
    FieldSpec::required("title", FieldKind::String, "Title of the post").min_length(1),
    FieldSpec::required("content", FieldKind::String, "Body text of the post"),
    FieldSpec::required("authorId", FieldKind::Uuid, "Identifier of the authoring user"),
];

/// Body of `POST /posts`.
pub static CREATE_POST: SchemaDef = SchemaDef {
    id: "CreatePost",
    description: "Create Post Schema",
    fields: &CREATE_POST_FIELDS,
};

// -- Comments -----------------------------------------------------------------

static COMMENT_FIELDS: [FieldSpec; 4] = [
    FieldSpec::required("id", FieldKind::Uuid, "Unique identifier for the comment"),
    FieldSpec::required("postId", FieldKind::Uuid, "Identifier of the commented post"),
    FieldSpec::required("authorId", FieldKind::Uuid, "Identifier of the commenting user"),
    FieldSpec::required("content", FieldKind::String, "Text of the comment").min_length(1),
];

/// A stored comment.
pub static COMMENT: SchemaDef = SchemaDef {
    id: "Comment",
    description: "Comment Schema",
    fields: &COMMENT_FIELDS,
};

static CREATE_COMMENT_FIELDS: [FieldSpec; 3] = [
    FieldSpec::required("postId", FieldKind::Uuid, "Identifier of the commented post"),
    FieldSpec::required("authorId", FieldKind::Uuid, "Identifier of the commenting user"),
    FieldSpec::required("content", FieldKind::String, "Text of the comment").min_length(1),
];

/// Body of `POST /comments`.
pub static CREATE_COMMENT: SchemaDef = SchemaDef {
    id: "CreateComment",
    description: "Create Comment Schema",
    fields: &CREATE_COMMENT_FIELDS,
};

/// Every schema of this deployment, in catalog order.
pub static STANDARD_SCHEMAS: [&SchemaDef; 7] = [
    &USER,
    &CREATE_USER,
    &USER_ID_PARAMS,
    &POST,
    &CREATE_POST,
    &COMMENT,
    &CREATE_COMMENT,
];

// -- Catalog ------------------------------------------------------------------

/// Ordered set of schemas keyed by identifier.
///
/// Built once at startup and read-only afterwards. Insertion checks each
/// schema's invariants, so anything resolvable from a catalog is well-formed.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: Vec<&'static SchemaDef>,
}

impl SchemaCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding [`STANDARD_SCHEMAS`].
    ///
    /// # Errors
    ///
    /// Fails only if one of the static definitions is malformed.
    pub fn standard() -> Result<Self, SchemaDefError> {
        let mut catalog = Self::new();
        for schema in STANDARD_SCHEMAS {
            catalog.insert(schema)?;
        }
        Ok(catalog)
    }

    /// Add a schema.
    ///
    /// # Errors
    ///
    /// [`SchemaDefError::DuplicateSchema`] if the identifier is taken, or the
    /// schema's own structural error.
    pub fn insert(&mut self, schema: &'static SchemaDef) -> Result<(), SchemaDefError> {
        schema.check()?;
        if self.get(schema.id).is_some() {
            return Err(SchemaDefError::DuplicateSchema(schema.id.to_string()));
        }
        tracing::trace!(schema = schema.id, fields = schema.fields.len(), "schema added to catalog");
        self.schemas.push(schema);
        Ok(())
    }

    /// Look up a schema by identifier.
    pub fn get(&self, id: &str) -> Option<&'static SchemaDef> {
        self.schemas.iter().copied().find(|s| s.id == id)
    }

    /// Resolve a reference against this catalog.
    pub fn resolve(&self, reference: &SchemaRef) -> Option<&'static SchemaDef> {
        self.get(reference.as_str())
    }

    /// Schemas in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &'static SchemaDef> + '_ {
        self.schemas.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
