mod config;
mod errors;
mod form;
mod prediction_client;
mod routes;
mod state;
mod submission;
mod ui;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::prediction_client::PredictionClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting predictor web v{}", env!("CARGO_PKG_VERSION"));

    let predictor = PredictionClient::new(
        config.prediction_api_url.clone(),
        config.prediction_timeout,
    )
    .context("Failed to build prediction HTTP client")?;
    info!(
        "Prediction client initialized (endpoint: {}, timeout: {:?})",
        config.prediction_api_url, config.prediction_timeout
    );

    let state = AppState {
        predictor: Arc::new(predictor),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
