//! # API Document Generator
//!
//! Walks route contracts in order and translates them, together with the
//! schemas they reference, into an OpenAPI 3.1 document.
//!
//! ## Translation
//!
//! | Source                     | Document                                        |
//! |----------------------------|-------------------------------------------------|
//! | `SchemaDef`                | `components.schemas.<id>` (object)              |
//! | `FieldSpec`                | property: type, format, pattern, min/maxLength, description |
//! | contract `params` schema   | one `in: path` parameter per field (inlined)    |
//! | contract `body` schema     | `requestBody` → `$ref` to the component         |
//! | contract responses         | `responses.<status>` → `$ref`, status verbatim  |
//!
//! Formatted kinds carry both `format` and the validator's own `pattern`, so
//! a document consumer rejects exactly what the validator rejects. A params
//! schema must declare exactly the path template's `{name}` placeholders,
//! each as a required field.
//!
//! Routes sharing a path merge into one path item keyed by method. Paths
//! keep registration order, properties keep field order, and components are
//! keyed by schema identifier, so the output is a pure function of the input.

use uapi_schema::{FieldKind, FieldSpec, SchemaCatalog, SchemaDef, SchemaRef};
use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::info::InfoBuilder;
use utoipa::openapi::path::{
    HttpMethod as OpenApiMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn,
    PathItemBuilder, PathsBuilder,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{ComponentsBuilder, ObjectBuilder, Ref, Schema, SchemaFormat, Type};
use utoipa::openapi::tag::TagBuilder;
use utoipa::openapi::{OpenApiBuilder, RefOr, Required};

use crate::document::ApiDocument;
use crate::error::GenerateError;
use crate::registry::{HttpMethod, RouteContract};

const JSON: &str = "application/json";

/// Title and version of the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
}

impl ApiInfo {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
        }
    }
}

/// Generate the API document for `contracts`, resolving schema references
/// against `catalog`.
///
/// # Errors
///
/// The first wiring fault, in contract order: a schema the catalog does not
/// hold ([`GenerateError::UnresolvedSchema`]), or a params schema that does
/// not match the path template ([`GenerateError::PathParamsMismatch`],
/// [`GenerateError::OptionalPathParam`]).
pub fn generate(
    contracts: &[RouteContract],
    catalog: &SchemaCatalog,
    info: &ApiInfo,
) -> Result<ApiDocument, GenerateError> {
    let mut components: Vec<&'static SchemaDef> = Vec::new();
    let mut path_items: Vec<(&str, Vec<(OpenApiMethod, Operation)>)> = Vec::new();
    let mut tags: Vec<&str> = Vec::new();

    for contract in contracts {
        let resolve = |reference: &SchemaRef| {
            catalog
                .resolve(reference)
                .ok_or_else(|| GenerateError::UnresolvedSchema {
                    method: contract.method,
                    path: contract.path.clone(),
                    schema: reference.clone(),
                })
        };

        let params = contract.params.as_ref().map(&resolve).transpose()?;
        check_path_params(contract, params)?;
        let body = contract.body.as_ref().map(&resolve).transpose()?;
        let mut responses = Vec::with_capacity(contract.responses.len());
        for (status, spec) in &contract.responses {
            let schema = spec.schema.as_ref().map(&resolve).transpose()?;
            responses.push((*status, spec.description.as_str(), schema));
        }

        for schema in body.iter().chain(responses.iter().filter_map(|r| r.2.as_ref())) {
            if !components.iter().any(|s| s.id == schema.id) {
                components.push(*schema);
            }
        }
        for tag in &contract.tags {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }

        let operation = operation(contract, params, body, &responses);
        let method = openapi_method(contract.method);
        match path_items.iter().position(|(path, _)| *path == contract.path) {
            Some(index) => path_items[index].1.push((method, operation)),
            None => path_items.push((contract.path.as_str(), vec![(method, operation)])),
        }
    }

    let mut paths = PathsBuilder::new();
    for (path, operations) in path_items {
        let mut item = PathItemBuilder::new();
        for (method, operation) in operations {
            item = item.operation(method, operation);
        }
        paths = paths.path(path, item.build());
    }

    let mut schemas = ComponentsBuilder::new();
    for schema in &components {
        schemas = schemas.schema(schema.id, component_schema(schema));
    }

    let openapi = OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title(info.title.clone())
                .version(info.version.clone())
                .build(),
        )
        .paths(paths.build())
        .components(Some(schemas.build()))
        .tags(Some(
            tags.iter()
                .map(|name| TagBuilder::new().name(*name).build())
                .collect::<Vec<_>>(),
        ))
        .build();

    tracing::info!(
        title = %info.title,
        routes = contracts.len(),
        schemas = components.len(),
        "api document generated"
    );
    Ok(ApiDocument::new(openapi))
}

fn openapi_method(method: HttpMethod) -> OpenApiMethod {
    match method {
        HttpMethod::Get => OpenApiMethod::Get,
        HttpMethod::Post => OpenApiMethod::Post,
        HttpMethod::Put => OpenApiMethod::Put,
        HttpMethod::Patch => OpenApiMethod::Patch,
        HttpMethod::Delete => OpenApiMethod::Delete,
    }
}

fn operation(
    contract: &RouteContract,
    params: Option<&'static SchemaDef>,
    body: Option<&'static SchemaDef>,
    responses: &[(u16, &str, Option<&'static SchemaDef>)],
) -> Operation {
    let mut builder = OperationBuilder::new()
        .operation_id(Some(operation_id(contract)))
        .summary(non_empty(&contract.summary))
        .description(non_empty(&contract.description))
        .tags(Some(contract.tags.clone()));

    for field in params.map(|p| p.fields).unwrap_or_default() {
        builder = builder.parameter(
            ParameterBuilder::new()
                .name(field.name)
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .description(Some(field.description))
                .schema(Some(property_schema(field)))
                .build(),
        );
    }

    if let Some(body) = body {
        builder = builder.request_body(Some(
            RequestBodyBuilder::new()
                .description(Some(body.description))
                .content(JSON, json_content(body))
                .required(Some(Required::True))
                .build(),
        ));
    }

    for (status, description, schema) in responses {
        let mut response = ResponseBuilder::new().description(*description);
        if let Some(schema) = schema {
            response = response.content(JSON, json_content(schema));
        }
        builder = builder.response(status.to_string(), response.build());
    }

    builder.build()
}

/// `post_users`, `get_users_id`, ...
fn operation_id(contract: &RouteContract) -> String {
    let slug: Vec<&str> = contract
        .path
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect();
    if slug.is_empty() {
        contract.method.as_str().to_string()
    } else {
        format!("{}_{}", contract.method.as_str(), slug.join("_"))
    }
}

/// `{name}` placeholders of a path template, in order.
fn placeholders(path: &str) -> Vec<&str> {
    path.split('/')
        .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
        .collect()
}

fn check_path_params(
    contract: &RouteContract,
    params: Option<&'static SchemaDef>,
) -> Result<(), GenerateError> {
    let fields = params.map(|p| p.fields).unwrap_or_default();
    if let Some(field) = fields.iter().find(|f| !f.required) {
        return Err(GenerateError::OptionalPathParam {
            method: contract.method,
            path: contract.path.clone(),
            field: field.name.to_string(),
        });
    }

    let mut expected = placeholders(&contract.path);
    let mut declared: Vec<&str> = fields.iter().map(|f| f.name).collect();
    expected.sort_unstable();
    declared.sort_unstable();
    if expected != declared {
        return Err(GenerateError::PathParamsMismatch {
            method: contract.method,
            path: contract.path.clone(),
            placeholders: expected.into_iter().map(str::to_string).collect(),
            fields: declared.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(())
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn json_content(schema: &SchemaDef) -> utoipa::openapi::content::Content {
    ContentBuilder::new()
        .schema(Some(Ref::from_schema_name(schema.id)))
        .build()
}

fn component_schema(schema: &SchemaDef) -> RefOr<Schema> {
    let mut object = ObjectBuilder::new()
        .schema_type(Type::Object)
        .description(Some(schema.description));
    for field in schema.fields {
        object = object.property(field.name, property_schema(field));
        if field.required {
            object = object.required(field.name);
        }
    }
    RefOr::T(Schema::Object(object.build()))
}

fn property_schema(field: &FieldSpec) -> RefOr<Schema> {
    let mut object = ObjectBuilder::new()
        .schema_type(schema_type(field.kind))
        .description(Some(field.description));
    if let Some(format) = format(field.kind) {
        object = object.format(Some(SchemaFormat::Custom(format.to_string())));
    }
    object = object.pattern(field.kind.pattern());
    if let Some(min) = field.constraints.min_length {
        object = object.min_length(Some(min));
    }
    if let Some(max) = field.constraints.max_length {
        object = object.max_length(Some(max));
    }
    RefOr::T(Schema::Object(object.build()))
}

fn schema_type(kind: FieldKind) -> Type {
    match kind {
        FieldKind::String | FieldKind::Uuid | FieldKind::Email => Type::String,
        FieldKind::Number => Type::Number,
        FieldKind::Integer => Type::Integer,
        FieldKind::Boolean => Type::Boolean,
    }
}

fn format(kind: FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::Uuid => Some("uuid"),
        FieldKind::Email => Some("email"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployment::standard_registry;
    use serde_json::{json, Value};
    use uapi_schema::{
        FieldSpec, CREATE_USER, EMAIL_PATTERN, USER, USER_ID_PARAMS, UUID_PATTERN,
    };

    fn info() -> ApiInfo {
        ApiInfo::new("User API", "1.0.0")
    }

    fn standard_document() -> Value {
        let registry = standard_registry().unwrap();
        let catalog = SchemaCatalog::standard().unwrap();
        generate(registry.all(), &catalog, &info())
            .unwrap()
            .to_value()
            .unwrap()
    }

    #[test]
    fn document_header() {
        let doc = standard_document();
        assert_eq!(doc["openapi"], "3.1.0");
        assert_eq!(doc["info"]["title"], "User API");
        assert_eq!(doc["info"]["version"], "1.0.0");
    }

    #[test]
    fn paths_follow_registration_order() {
        let registry = standard_registry().unwrap();
        let catalog = SchemaCatalog::standard().unwrap();
        let doc = generate(registry.all(), &catalog, &info()).unwrap();
        assert_eq!(doc.path_names(), ["/users/{id}", "/users", "/posts", "/comments"]);
    }

    #[test]
    fn components_are_deduplicated() {
        let registry = standard_registry().unwrap();
        let catalog = SchemaCatalog::standard().unwrap();
        let doc = generate(registry.all(), &catalog, &info()).unwrap();
        // `User` is referenced by two routes but listed once; params are inlined.
        let mut names = doc.schema_names();
        names.sort_unstable();
        assert_eq!(
            names,
            ["Comment", "CreateComment", "CreatePost", "CreateUser", "Post", "User"]
        );
    }

    #[test]
    fn post_users_operation_shape() {
        let doc = standard_document();
        let op = &doc["paths"]["/users"]["post"];
        assert_eq!(op["summary"], "Create User");
        assert_eq!(op["description"], "Create a new user");
        assert_eq!(op["tags"], json!(["Users"]));
        assert_eq!(op["operationId"], "post_users");
        assert_eq!(
            op["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/CreateUser"
        );
        assert_eq!(
            op["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/User"
        );
        assert_eq!(op["responses"]["200"]["description"], "User created");
        assert!(op["responses"].get("400").is_none());
        assert!(op["responses"].get("default").is_none());
    }

    #[test]
    fn get_user_has_path_parameter_and_no_body() {
        let doc = standard_document();
        let op = &doc["paths"]["/users/{id}"]["get"];
        assert!(op.get("requestBody").is_none());
        let params = op["parameters"].as_array().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0]["name"], "id");
        assert_eq!(params[0]["in"], "path");
        assert_eq!(params[0]["required"], true);
        assert_eq!(params[0]["schema"]["type"], "string");
        assert_eq!(params[0]["schema"]["format"], "uuid");
        assert_eq!(params[0]["schema"]["pattern"], UUID_PATTERN);
    }

    #[test]
    fn field_specs_translate_to_properties() {
        let doc = standard_document();
        let user = &doc["components"]["schemas"]["User"];
        assert_eq!(user["type"], "object");
        assert_eq!(user["description"], "User Schema");
        assert_eq!(user["required"], json!(["id", "name", "email"]));
        assert_eq!(
            user["properties"]["id"],
            json!({
                "type": "string",
                "description": "Unique identifier for the user",
                "format": "uuid",
                "pattern": UUID_PATTERN
            })
        );
        assert_eq!(user["properties"]["name"]["minLength"], 1);
        assert!(user["properties"]["name"].get("pattern").is_none());
        assert_eq!(user["properties"]["email"]["format"], "email");
        assert_eq!(user["properties"]["email"]["pattern"], EMAIL_PATTERN);

        let create = &doc["components"]["schemas"]["CreateUser"];
        assert!(create["properties"]["name"].get("minLength").is_none());
        assert!(create["properties"].get("id").is_none());
    }

    #[test]
    fn property_order_matches_field_order() {
        let doc = standard_document();
        let keys: Vec<_> = doc["components"]["schemas"]["Post"]["properties"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, ["id", "title", "content", "authorId"]);
    }

    #[test]
    fn generation_is_idempotent() {
        let registry = standard_registry().unwrap();
        let catalog = SchemaCatalog::standard().unwrap();
        let first = generate(registry.all(), &catalog, &info()).unwrap();
        let second = generate(&registry.snapshot(), &catalog, &info()).unwrap();
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn unresolved_response_schema_fails_generation() {
        let contracts = [
            RouteContract::new(HttpMethod::Post, "/users")
                .body(&CREATE_USER)
                .response(200, "User created", &USER),
            RouteContract::new(HttpMethod::Post, "/ghosts")
                .body(&CREATE_USER)
                .response(200, "Spooky", "Ghost"),
        ];
        let catalog = SchemaCatalog::standard().unwrap();
        let err = generate(&contracts, &catalog, &info()).unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnresolvedSchema {
                method: HttpMethod::Post,
                path: "/ghosts".into(),
                schema: SchemaRef::from("Ghost"),
            }
        );
        let message = err.to_string();
        assert!(message.contains("POST /ghosts"), "{message}");
        assert!(message.contains("Ghost"), "{message}");
    }

    #[test]
    fn unresolved_params_schema_fails_generation() {
        let contracts = [RouteContract::new(HttpMethod::Get, "/users/{id}").params(&USER_ID_PARAMS)];
        let mut catalog = SchemaCatalog::new();
        catalog.insert(&USER).unwrap();
        let err = generate(&contracts, &catalog, &info()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnresolvedSchema { ref schema, .. } if schema.as_str() == "UserIdParams"
        ));
    }

    #[test]
    fn methods_on_one_path_merge_into_one_item() {
        let contracts = [
            RouteContract::new(HttpMethod::Post, "/users")
                .body(&CREATE_USER)
                .response(200, "User created", &USER),
            RouteContract::new(HttpMethod::Get, "/posts").empty_response(204, "Nothing"),
            RouteContract::new(HttpMethod::Get, "/users").response(200, "All users", &USER),
        ];
        let catalog = SchemaCatalog::standard().unwrap();
        let doc = generate(&contracts, &catalog, &info()).unwrap();
        assert_eq!(doc.path_names(), ["/users", "/posts"]);
        let value = doc.to_value().unwrap();
        assert!(value["paths"]["/users"].get("get").is_some());
        assert!(value["paths"]["/users"].get("post").is_some());
        let empty = &value["paths"]["/posts"]["get"]["responses"]["204"];
        assert_eq!(empty["description"], "Nothing");
        assert!(empty.get("content").is_none());
    }

    #[test]
    fn status_codes_are_kept_verbatim() {
        let contracts = [RouteContract::new(HttpMethod::Post, "/users")
            .body(&CREATE_USER)
            .response(201, "Created", &USER)];
        let catalog = SchemaCatalog::standard().unwrap();
        let value = generate(&contracts, &catalog, &info()).unwrap().to_value().unwrap();
        let responses = value["paths"]["/users"]["post"]["responses"].as_object().unwrap();
        assert_eq!(responses.keys().collect::<Vec<_>>(), ["201"]);
    }

    static OPTIONAL_SLUG_FIELDS: [FieldSpec; 1] =
        [FieldSpec::optional("slug", FieldKind::String, "Optional slug")];
    static OPTIONAL_SLUG: SchemaDef = SchemaDef {
        id: "OptionalSlug",
        description: "Optional slug",
        fields: &OPTIONAL_SLUG_FIELDS,
    };

    #[test]
    fn placeholder_extraction() {
        assert_eq!(placeholders("/users/{id}"), ["id"]);
        assert_eq!(placeholders("/posts/{postId}/comments/{id}"), ["postId", "id"]);
        assert!(placeholders("/users").is_empty());
    }

    #[test]
    fn params_must_name_the_path_placeholders() {
        let catalog = SchemaCatalog::standard().unwrap();
        let renamed = [RouteContract::new(HttpMethod::Get, "/users/{userId}").params(&USER_ID_PARAMS)];
        let err = generate(&renamed, &catalog, &info()).unwrap_err();
        assert_eq!(
            err,
            GenerateError::PathParamsMismatch {
                method: HttpMethod::Get,
                path: "/users/{userId}".into(),
                placeholders: vec!["userId".into()],
                fields: vec!["id".into()],
            }
        );
        assert!(err.to_string().contains("GET /users/{userId}"), "{err}");
    }

    #[test]
    fn placeholder_without_params_schema_fails() {
        let catalog = SchemaCatalog::standard().unwrap();
        let bare = [RouteContract::new(HttpMethod::Get, "/users/{id}").response(200, "User", &USER)];
        let err = generate(&bare, &catalog, &info()).unwrap_err();
        assert!(matches!(err, GenerateError::PathParamsMismatch { ref fields, .. } if fields.is_empty()));
    }

    #[test]
    fn optional_path_param_fails() {
        let mut catalog = SchemaCatalog::standard().unwrap();
        catalog.insert(&OPTIONAL_SLUG).unwrap();
        let contracts = [RouteContract::new(HttpMethod::Get, "/pages/{slug}").params(&OPTIONAL_SLUG)];
        let err = generate(&contracts, &catalog, &info()).unwrap_err();
        assert_eq!(
            err,
            GenerateError::OptionalPathParam {
                method: HttpMethod::Get,
                path: "/pages/{slug}".into(),
                field: "slug".into(),
            }
        );
    }

    #[test]
    fn operation_ids() {
        let get = RouteContract::new(HttpMethod::Get, "/users/{id}");
        assert_eq!(operation_id(&get), "get_users_id");
        let root = RouteContract::new(HttpMethod::Delete, "/");
        assert_eq!(operation_id(&root), "delete");
    }
}
