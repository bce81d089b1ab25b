//! HTTP handlers for stock-in and distribution movements

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use shared::models::{MovementDraft, MovementType, ProductSelection, Recipient};
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::services::movement::{MovementReceipt, MovementService, MovementValidation};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovementInput {
    pub movement_type: MovementType,
    #[validate(length(min = 1, message = "Add at least one product row"))]
    pub selections: Vec<ProductSelection>,
    #[validate(
        length(min = 1, max = 120, message = "Stock manager name is required"),
        custom = "not_blank"
    )]
    pub stock_manager: String,
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub recipient: Option<Recipient>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Stock manager name is required".into());
        return Err(error);
    }
    Ok(())
}

impl From<MovementInput> for MovementDraft {
    fn from(input: MovementInput) -> Self {
        MovementDraft {
            movement_type: input.movement_type,
            selections: input.selections,
            stock_manager: input.stock_manager.trim().to_string(),
            notes: input.notes,
            supplier: input.supplier,
            recipient: input.recipient,
        }
    }
}

/// Validate a movement draft without recording it
pub async fn validate_movement(
    State(state): State<AppState>,
    Json(input): Json<MovementInput>,
) -> AppResult<Json<MovementValidation>> {
    input.validate()?;

    let service = MovementService::new(state.api);
    let validation = service.validate(&MovementDraft::from(input)).await?;
    Ok(Json(validation))
}

/// Record a movement
pub async fn create_movement(
    State(state): State<AppState>,
    Json(input): Json<MovementInput>,
) -> AppResult<(StatusCode, Json<MovementReceipt>)> {
    input.validate()?;

    let service = MovementService::new(state.api);
    let receipt = service.submit(&MovementDraft::from(input)).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
