//! # uapi-api: Binary Entry Point
//!
//! Reads configuration from the environment, bootstraps the document and
//! state, and serves the router. Binds to `PORT` (default 5001).

use uapi_api::state::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    init_tracing(config.as_ref().map(|c| c.log_format).unwrap_or_default());

    let config = config.map_err(|e| {
        tracing::error!("Configuration invalid: {e}");
        e
    })?;

    let state = uapi_api::bootstrap::bootstrap(config.clone()).map_err(|e| {
        tracing::error!("Bootstrap failed: {e}");
        e
    })?;

    let app = uapi_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("User API listening on {}", addr);
    #[cfg(feature = "viewer")]
    tracing::info!("API documentation at http://localhost:{}/api-docs", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Structured tracing, filtered by `RUST_LOG` (default `info`).
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
