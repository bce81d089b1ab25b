//! Stock-in and distribution movements

use std::sync::Arc;

use serde::Serialize;
use shared::models::MovementDraft;
use shared::reconcile::{build_movement_request, CreateMovementRequest};
use shared::validation::{validate_selections, ValidationMode, ValidationReport};

use super::ProductService;
use crate::error::{AppError, AppResult};
use crate::external::InventoryApi;

#[derive(Clone)]
pub struct MovementService {
    api: Arc<dyn InventoryApi>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementValidation {
    pub blocking: bool,
    pub report: ValidationReport,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementReceipt {
    pub request: CreateMovementRequest,
    pub total_items: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MovementService {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self { api }
    }

    /// Validate a draft against freshly fetched stock
    pub async fn validate(&self, draft: &MovementDraft) -> AppResult<MovementValidation> {
        let catalog = ProductService::new(self.api.clone()).catalog().await?;
        let report = validate_selections(
            &draft.selections,
            &catalog,
            ValidationMode::from(draft.movement_type),
            draft.recipient.as_ref(),
        );

        Ok(MovementValidation {
            blocking: report.is_blocking(),
            messages: report.messages(),
            report,
        })
    }

    /// Validate, then record the movement upstream
    pub async fn submit(&self, draft: &MovementDraft) -> AppResult<MovementReceipt> {
        let catalog = ProductService::new(self.api.clone()).catalog().await?;
        let report = validate_selections(
            &draft.selections,
            &catalog,
            ValidationMode::from(draft.movement_type),
            draft.recipient.as_ref(),
        );
        if report.is_blocking() {
            return Err(AppError::BatchRejected(report));
        }

        let request = build_movement_request(draft, &catalog);
        let response = self.api.create_movement(&request).await?.into_result()?;

        let total_items = request.total_items();
        tracing::info!(
            "Recorded {} movement: {} items across {} products by {}",
            draft.movement_type,
            total_items,
            request.products.len(),
            request.stock_manager
        );

        Ok(MovementReceipt {
            request,
            total_items,
            message: response.message,
        })
    }
}
