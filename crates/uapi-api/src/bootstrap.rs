//! # Startup
//!
//! Builds the immutable [`AppState`] the router serves from.
//!
//! ## Sequence
//!
//! 1. **Catalog**: collect the deployment's schemas; a malformed schema aborts.
//! 2. **Registry**: register the route contracts; a duplicate aborts.
//! 3. **Document**: generate the API document once; an unresolved schema aborts.
//! 4. **Render**: serialize the document to JSON once; requests reuse the bytes.
//!
//! Every failure here is a wiring defect, so the binary exits non-zero
//! instead of serving a partial surface.

use std::sync::Arc;

use uapi_contract::{
    generate, standard_registry, ContractRegistry, DuplicateRouteError, GenerateError,
};
use uapi_schema::{SchemaCatalog, SchemaDefError};

use crate::ids::{FixedIds, IdIssuance, IdIssuer, RandomIds};
use crate::state::{AppConfig, AppState};

/// Errors during startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("schema catalog is malformed: {0}")]
    Catalog(#[from] SchemaDefError),

    #[error("route registration failed: {0}")]
    DuplicateRoute(#[from] DuplicateRouteError),

    #[error("api document generation failed: {0}")]
    Generate(#[from] GenerateError),

    #[error("api document could not be rendered: {0}")]
    Render(#[from] serde_json::Error),
}

/// Assemble the state for the standard deployment.
pub fn bootstrap(config: AppConfig) -> Result<AppState, BootstrapError> {
    let catalog = SchemaCatalog::standard()?;
    let registry = standard_registry()?;
    assemble(config, catalog, &registry)
}

/// Assemble state from an explicit catalog and registry.
pub fn assemble(
    config: AppConfig,
    catalog: SchemaCatalog,
    registry: &ContractRegistry,
) -> Result<AppState, BootstrapError> {
    let document = generate(registry.all(), &catalog, &config.api_info())?;
    let document_json: Arc<str> = document.to_json()?.into();

    let ids: Arc<dyn IdIssuer> = match config.id_issuance {
        IdIssuance::Fixed => Arc::new(FixedIds),
        IdIssuance::Random => Arc::new(RandomIds),
    };

    tracing::info!(
        title = %config.api_title,
        version = %config.api_version,
        routes = registry.len(),
        schemas = catalog.len(),
        strict = config.strict_validation,
        ids = config.id_issuance.as_str(),
        document_bytes = document_json.len(),
        "bootstrap complete"
    );

    Ok(AppState {
        config,
        catalog: Arc::new(catalog),
        document: Arc::new(document),
        document_json,
        ids,
    })
}
