//! # Application State
//!
//! Configuration read once from the environment, and the shared state passed
//! to every handler through the `State` extractor. Everything here is
//! immutable after [`bootstrap`](crate::bootstrap::bootstrap); handlers only
//! read it.

use std::sync::Arc;

use thiserror::Error;
use uapi_contract::{ApiDocument, ApiInfo};
use uapi_schema::{SchemaCatalog, ValidationOptions};

use crate::ids::{IdIssuance, IdIssuer};

/// Log output format of the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Invalid environment configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Reject request fields the schema does not declare.
    pub strict_validation: bool,
    pub id_issuance: IdIssuance,
    pub api_title: String,
    pub api_version: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            strict_validation: false,
            id_issuance: IdIssuance::Fixed,
            api_title: "User API".to_string(),
            api_version: "1.0.0".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// | Variable            | Default    |
    /// |---------------------|------------|
    /// | `PORT`              | `5001`     |
    /// | `STRICT_VALIDATION` | `false`    |
    /// | `ID_ISSUANCE`       | `fixed`    |
    /// | `API_TITLE`         | `User API` |
    /// | `API_VERSION`       | `1.0.0`    |
    /// | `LOG_FORMAT`        | `text`     |
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] for the first variable that is set but
    /// unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("PORT") {
            config.port = value
                .trim()
                .parse()
                .map_err(|_| invalid("PORT", value, "a port number"))?;
        }
        if let Some(value) = lookup("STRICT_VALIDATION") {
            config.strict_validation = parse_bool(&value)
                .ok_or_else(|| invalid("STRICT_VALIDATION", value, "true or false"))?;
        }
        if let Some(value) = lookup("ID_ISSUANCE") {
            config.id_issuance = value
                .parse()
                .map_err(|()| invalid("ID_ISSUANCE", value, "fixed or random"))?;
        }
        if let Some(value) = lookup("API_TITLE").filter(|v| !v.trim().is_empty()) {
            config.api_title = value;
        }
        if let Some(value) = lookup("API_VERSION").filter(|v| !v.trim().is_empty()) {
            config.api_version = value;
        }
        if let Some(value) = lookup("LOG_FORMAT") {
            config.log_format = match value.trim().to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(invalid("LOG_FORMAT", value, "text or json")),
            };
        }
        Ok(config)
    }

    pub fn validation(&self) -> ValidationOptions {
        ValidationOptions {
            strict: self.strict_validation,
        }
    }

    /// Title and version for the generated document.
    pub fn api_info(&self) -> ApiInfo {
        ApiInfo::new(self.api_title.clone(), self.api_version.clone())
    }
}

fn invalid(var: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value,
        expected,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<SchemaCatalog>,
    pub document: Arc<ApiDocument>,
    /// `document` rendered once at startup and served verbatim.
    pub document_json: Arc<str>,
    pub ids: Arc<dyn IdIssuer>,
}

impl AppState {
    pub fn validation(&self) -> ValidationOptions {
        self.config.validation()
    }
}
