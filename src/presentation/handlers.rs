// HTTP request handlers
use crate::domain::meter::MeterId;
use crate::domain::page::PageVariant;
use crate::domain::series::Trace;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub appended: usize,
    pub traces: usize,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Chart page for a meter; the first request triggers the upstream fetch
pub async fn chart_page(
    Path((meter, variant)): Path<(MeterId, PageVariant)>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    Html(state.chart_service.page(meter, variant).await)
}

/// Accumulated traces for a meter's chart as Plotly JSON
pub async fn chart_traces(
    Path((meter, variant)): Path<(MeterId, PageVariant)>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Trace>> {
    Json(state.chart_service.traces(meter, variant).await)
}

/// Fetch the document again and append its series to the chart
pub async fn reload_chart(
    Path((meter, variant)): Path<(MeterId, PageVariant)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    let appended = state
        .chart_service
        .load(meter, variant)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, variant.alert_message(&e)))?;
    let traces = state.chart_service.traces(meter, variant).await.len();

    Ok(Json(ReloadResponse { appended, traces }))
}
