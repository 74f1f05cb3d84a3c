// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use anyhow::Context;
use axum::{routing::{get, post}, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::ChartService;
use crate::infrastructure::config::load_charts_config;
use crate::infrastructure::http_totals_source::HttpTotalsSource;
use crate::infrastructure::plotly_renderer::PlotlyRenderer;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_page, chart_traces, health_check, reload_chart};

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/meter/:meter/:variant", get(chart_page))
        .route("/meter/:meter/:variant/traces.json", get(chart_traces))
        .route("/meter/:meter/:variant/reload", post(reload_chart))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_charts_config().context("Failed to load chart configuration")?;

    // Create adapters (infrastructure layer)
    let source = Arc::new(HttpTotalsSource::new(
        config.source.base_url.clone(),
        Duration::from_secs(config.source.timeout_secs),
    )?);
    let renderer = Arc::new(PlotlyRenderer::new(
        config.page.plotly_src.clone(),
        config.page.title_prefix.clone(),
    ));

    // Create services (application layer)
    let chart_service = ChartService::new(source, renderer);
    let state = Arc::new(AppState { chart_service });

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        "Starting energy-charts on {} (totals from {})",
        addr,
        config.source.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
