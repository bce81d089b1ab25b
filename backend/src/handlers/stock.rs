//! HTTP handlers for the manage-stock flow

use axum::{extract::State, Json};
use serde::Deserialize;
use shared::models::{ProductSelection, Recipient};
use validator::Validate;

use crate::error::AppResult;
use crate::services::stock::{StockAdjustmentOutcome, StockPreview, StockService};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct StockAdjustmentInput {
    #[validate(length(min = 1, message = "Add at least one product row"))]
    pub selections: Vec<ProductSelection>,
    #[serde(default)]
    pub recipient: Option<Recipient>,
}

/// Validation and payloads for a batch, without applying it
pub async fn preview_adjustments(
    State(state): State<AppState>,
    Json(input): Json<StockAdjustmentInput>,
) -> AppResult<Json<StockPreview>> {
    input.validate()?;

    let service = StockService::new(state.api);
    let preview = service
        .preview(&input.selections, input.recipient.as_ref())
        .await?;
    Ok(Json(preview))
}

/// Apply a batch of additions and removals
pub async fn apply_adjustments(
    State(state): State<AppState>,
    Json(input): Json<StockAdjustmentInput>,
) -> AppResult<Json<StockAdjustmentOutcome>> {
    input.validate()?;

    let service = StockService::new(state.api);
    let outcome = service
        .apply(&input.selections, input.recipient.as_ref())
        .await?;
    Ok(Json(outcome))
}
