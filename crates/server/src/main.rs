//! # quake-server
//!
//! REST API server for magnitude forecasts over the USGS catalog.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use quake_facade::{MagnitudeModel, ServiceConfig, TreeEnsemble, UsgsClient};
use quake_server::{app, cors_layer, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quake_server=info,quake_core=info,tower_http=info".into()),
        )
        .init();

    let config = ServiceConfig::from_env().context("invalid configuration")?;

    let source = UsgsClient::with_base_url(
        config.usgs_api_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    )
    .context("failed to build catalog client")?;

    let model: Option<Arc<dyn MagnitudeModel>> = match TreeEnsemble::from_path(&config.model_path) {
        Ok(model) => Some(Arc::new(model)),
        Err(e) => {
            tracing::warn!(error = %e, "Forecast model unavailable, prediction routes will return 503");
            None
        }
    };

    let state = AppState::new(Arc::new(source), model);
    let cors = cors_layer(&config.cors_allowed_origin)
        .with_context(|| format!("invalid CORS origin '{}'", config.cors_allowed_origin))?;
    let router = app(state).layer(cors);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid HOST:PORT '{}'", config.bind_address()))?;

    tracing::info!(
        "quake-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, router).await?;
    Ok(())
}
