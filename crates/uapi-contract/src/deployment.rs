//! # Deployment Routes
//!
//! The contracts of this deployment, registered in the order they appear in
//! the generated document.

use uapi_schema::{COMMENT, CREATE_COMMENT, CREATE_POST, CREATE_USER, POST, USER, USER_ID_PARAMS};

use crate::error::DuplicateRouteError;
use crate::registry::{ContractRegistry, HttpMethod, RouteContract};

/// Register every route of the service.
///
/// # Errors
///
/// [`DuplicateRouteError`] if two of the contracts below collide.
pub fn standard_registry() -> Result<ContractRegistry, DuplicateRouteError> {
    let mut registry = ContractRegistry::new();

    registry.register(
        RouteContract::new(HttpMethod::Get, "/users/{id}")
            .summary("Get User")
            .description("Get a user by ID")
            .params(&USER_ID_PARAMS)
            .response(200, "User found", &USER)
            .tag("Users"),
    )?;

    registry.register(
        RouteContract::new(HttpMethod::Post, "/users")
            .summary("Create User")
            .description("Create a new user")
            .body(&CREATE_USER)
            .response(200, "User created", &USER)
            .tag("Users"),
    )?;

    registry.register(
        RouteContract::new(HttpMethod::Post, "/posts")
            .summary("Create post")
            .description("Create a new post")
            .body(&CREATE_POST)
            .response(200, "Created post", &POST)
            .tag("Posts"),
    )?;

    registry.register(
        RouteContract::new(HttpMethod::Post, "/comments")
            .summary("Create comment")
            .description("Create a new comment")
            .body(&CREATE_COMMENT)
            .response(200, "Created comment", &COMMENT)
            .tag("Comments"),
    )?;

    tracing::info!(routes = registry.len(), "route contracts registered");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_four_routes_in_order() {
        let registry = standard_registry().unwrap();
        let keys: Vec<_> = registry.iter().map(RouteContract::key).collect();
        assert_eq!(
            keys,
            [
                (HttpMethod::Get, "/users/{id}"),
                (HttpMethod::Post, "/users"),
                (HttpMethod::Post, "/posts"),
                (HttpMethod::Post, "/comments"),
            ]
        );
    }

    #[test]
    fn get_user_has_no_body() {
        let registry = standard_registry().unwrap();
        let get = &registry.all()[0];
        assert!(get.body.is_none());
        assert_eq!(get.params.as_ref().map(|p| p.as_str()), Some("UserIdParams"));
    }

    #[test]
    fn every_route_documents_only_status_200() {
        for contract in &standard_registry().unwrap() {
            let statuses: Vec<_> = contract.responses.keys().copied().collect();
            assert_eq!(statuses, [200], "{} {}", contract.method, contract.path);
        }
    }
}
