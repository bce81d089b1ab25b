//! Dashboard and report handlers

use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::AppResult;
use crate::services::dashboard::{Dashboard, DashboardService};
use crate::AppState;

/// Get the stockroom overview
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<Dashboard>> {
    let service = DashboardService::new(state.api, state.config.inventory.low_stock_threshold);
    let dashboard = service.overview().await?;
    Ok(Json(dashboard))
}

/// Upstream report summary, unchanged
pub async fn get_report_summary(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let service = DashboardService::new(state.api, state.config.inventory.low_stock_threshold);
    Ok(Json(service.report_summary().await?))
}
