//! # Typed Models
//!
//! One explicitly declared struct per schema. The mapping type → schema is
//! stated by [`Modeled::schema`] rather than inferred, and the property tests
//! at the bottom of this module check that every record the validator accepts
//! is assignable to the declared struct with exactly the schema's fields.
//!
//! `CreateUser` is declared from the `CreateUser` schema and therefore has no
//! `id`; only [`User`] carries the server-assigned identifier.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{COMMENT, CREATE_COMMENT, CREATE_POST, CREATE_USER, POST, USER, USER_ID_PARAMS};
use crate::field::SchemaDef;
use crate::validate::{validate, ValidationOptions, Violation};

/// A Rust type declared to mirror a schema.
pub trait Modeled: Serialize + DeserializeOwned {
    /// The schema this type mirrors.
    fn schema() -> &'static SchemaDef;
}

/// Failure of [`parse`].
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input did not satisfy the schema.
    #[error("input failed validation with {} violation(s)", .0.len())]
    Invalid(Vec<Violation>),

    /// The schema accepted the input but the declared type did not.
    /// This is a programming error: the type and schema have drifted apart.
    #[error("validated record does not fit declared type for schema {schema}: {source}")]
    Drift {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Validate `input` against `T::schema()` and convert it into `T`.
///
/// # Errors
///
/// [`ParseError::Invalid`] carries the full, ordered violation list.
pub fn parse<T: Modeled>(input: &Value, options: ValidationOptions) -> Result<T, ParseError> {
    let record = validate(T::schema(), input, options)
        .into_result()
        .map_err(ParseError::Invalid)?;
    serde_json::from_value(Value::Object(record)).map_err(|source| ParseError::Drift {
        schema: T::schema().id,
        source,
    })
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl Modeled for User {
    fn schema() -> &'static SchemaDef {
        &USER
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

impl Modeled for CreateUser {
    fn schema() -> &'static SchemaDef {
        &CREATE_USER
    }
}

impl CreateUser {
    /// Attach a server-assigned identifier.
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserIdParams {
    pub id: Uuid,
}

impl Modeled for UserIdParams {
    fn schema() -> &'static SchemaDef {
        &USER_ID_PARAMS
    }
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

impl Modeled for Post {
    fn schema() -> &'static SchemaDef {
        &POST
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

impl Modeled for CreatePost {
    fn schema() -> &'static SchemaDef {
        &CREATE_POST
    }
}

impl CreatePost {
    pub fn into_post(self, id: Uuid) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            author_id: self.author_id,
        }
    }
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
}

impl Modeled for Comment {
    fn schema() -> &'static SchemaDef {
        &COMMENT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateComment {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
}

impl Modeled for CreateComment {
    fn schema() -> &'static SchemaDef {
        &CREATE_COMMENT
    }
}

impl CreateComment {
    pub fn into_comment(self, id: Uuid) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            author_id: self.author_id,
            content: self.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIXED_ID: &str = "a779e093-1fe2-43e7-9fa7-878ed00852ff";

    #[test]
    fn parse_create_user_and_assign_id() {
        let input = json!({"name": "John Doe", "email": "john.doe@example.com"});
        let create: CreateUser = parse(&input, ValidationOptions::default()).unwrap();
        let user = create.into_user(Uuid::parse_str(FIXED_ID).unwrap());
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"id": FIXED_ID, "name": "John Doe", "email": "john.doe@example.com"})
        );
    }

    #[test]
    fn create_user_type_omits_identifier() {
        // The create type mirrors the CreateUser schema, not the full User schema.
        let input = json!({"id": FIXED_ID, "name": "Ann", "email": "ann@example.com"});
        let create: CreateUser = parse(&input, ValidationOptions::default()).unwrap();
        let encoded = serde_json::to_value(&create).unwrap();
        assert!(encoded.get("id").is_none());
        assert_eq!(CreateUser::schema().id, "CreateUser");
        assert!(!CreateUser::schema().declares("id"));
    }

    #[test]
    fn parse_reports_every_violation() {
        let err = parse::<CreatePost>(&json!({"content": 1}), ValidationOptions::default())
            .unwrap_err();
        match err {
            ParseError::Invalid(violations) => {
                let paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
                assert_eq!(paths, ["title", "content", "authorId"]);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn camel_case_wire_names() {
        let comment = CreateComment {
            post_id: Uuid::nil(),
            author_id: Uuid::nil(),
            content: "hi".into(),
        }
        .into_comment(Uuid::nil());
        let encoded = serde_json::to_value(comment).unwrap();
        assert!(encoded.get("postId").is_some());
        assert!(encoded.get("authorId").is_some());
    }

    #[test]
    fn each_type_names_its_schema() {
        assert_eq!(User::schema().id, "User");
        assert_eq!(UserIdParams::schema().id, "UserIdParams");
        assert_eq!(Post::schema().id, "Post");
        assert_eq!(CreatePost::schema().id, "CreatePost");
        assert_eq!(Comment::schema().id, "Comment");
        assert_eq!(CreateComment::schema().id, "CreateComment");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::field::{FieldKind, FieldSpec};
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;
    use serde_json::Map;

    /// Values satisfying one field's kind, format, and length constraints.
    fn field_value(field: &FieldSpec) -> BoxedStrategy<Value> {
        match field.kind {
            FieldKind::Uuid => any::<u128>()
                .prop_map(|n| Value::String(Uuid::from_u128(n).to_string()))
                .boxed(),
            FieldKind::Email => "[a-z]{1,8}(\\.[a-z]{1,8})?@[a-z]{1,8}\\.(com|org|io)"
                .prop_map(Value::String)
                .boxed(),
            FieldKind::String => {
                let min = field.constraints.min_length.unwrap_or(0);
                let max = field.constraints.max_length.unwrap_or(min + 24);
                proptest::string::string_regex(&format!("[a-zA-Z0-9 ]{{{min},{max}}}"))
                    .expect("length pattern compiles")
                    .prop_map(Value::String)
                    .boxed()
            }
            FieldKind::Number => any::<i32>()
                .prop_map(|n| serde_json::json!(f64::from(n) / 4.0))
                .boxed(),
            FieldKind::Integer => any::<i64>().prop_map(Value::from).boxed(),
            FieldKind::Boolean => any::<bool>().prop_map(Value::Bool).boxed(),
        }
    }

    /// Objects conforming to `schema`, with a few undeclared extra keys.
    fn conforming(schema: &'static SchemaDef) -> impl Strategy<Value = Value> {
        let fields: Vec<_> = schema
            .fields
            .iter()
            .map(|field| {
                let name = field.name;
                field_value(field).prop_map(move |value| (name, value))
            })
            .collect();
        let extras = prop::collection::btree_map("x_[a-z]{1,6}", any::<i64>(), 0..3);
        (fields, extras).prop_map(|(pairs, extras)| {
            let mut object = Map::new();
            for (name, value) in pairs {
                object.insert(name.to_string(), value);
            }
            for (name, value) in extras {
                object.insert(name, Value::from(value));
            }
            Value::Object(object)
        })
    }

    /// The validator accepts `input`, and the accepted record converts into
    /// `T` whose serialized form has exactly the schema's fields, in order.
    fn assert_assignable<T: Modeled>(input: &Value) -> Result<(), TestCaseError> {
        let model: T = parse(input, ValidationOptions::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let encoded =
            serde_json::to_value(&model).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let keys: Vec<&str> = encoded
            .as_object()
            .map(|o| o.keys().map(String::as_str).collect())
            .unwrap_or_default();
        let declared: Vec<&str> = T::schema().fields.iter().map(|f| f.name).collect();
        prop_assert_eq!(keys, declared);
        Ok(())
    }

    proptest! {
        #[test]
        fn user_records_fit_user_type(input in conforming(&USER)) {
            assert_assignable::<User>(&input)?;
        }

        #[test]
        fn create_user_records_fit_create_user_type(input in conforming(&CREATE_USER)) {
            assert_assignable::<CreateUser>(&input)?;
        }

        #[test]
        fn params_records_fit_params_type(input in conforming(&USER_ID_PARAMS)) {
            assert_assignable::<UserIdParams>(&input)?;
        }

        #[test]
        fn post_records_fit_post_type(input in conforming(&POST)) {
            assert_assignable::<Post>(&input)?;
        }

        #[test]
        fn create_post_records_fit_create_post_type(input in conforming(&CREATE_POST)) {
            assert_assignable::<CreatePost>(&input)?;
        }

        #[test]
        fn comment_records_fit_comment_type(input in conforming(&COMMENT)) {
            assert_assignable::<Comment>(&input)?;
        }

        #[test]
        fn create_comment_records_fit_create_comment_type(input in conforming(&CREATE_COMMENT)) {
            assert_assignable::<CreateComment>(&input)?;
        }

        /// Each field fails on its own: removing or mistyping any subset of
        /// fields yields exactly one violation per broken field, in order.
        #[test]
        fn fields_fail_independently(
            base in conforming(&CREATE_POST),
            damage in prop::collection::vec(0u8..3, CREATE_POST.fields.len()),
        ) {
            let mut object = base.as_object().cloned().unwrap_or_default();
            let mut expected = Vec::new();
            for (field, how) in CREATE_POST.fields.iter().zip(&damage) {
                match how {
                    1 => {
                        object.remove(field.name);
                        expected.push(Violation::new(field.name, "required"));
                    }
                    2 => {
                        object.insert(field.name.to_string(), Value::Bool(true));
                        expected.push(Violation::new(field.name, "expected string"));
                    }
                    _ => {}
                }
            }
            let result = validate(&CREATE_POST, &Value::Object(object), ValidationOptions::default());
            prop_assert_eq!(result.violations(), expected.as_slice());
            prop_assert_eq!(result.is_valid(), expected.is_empty());
        }
    }
}
