//! Manage-stock flow: validate a mixed add/remove batch, then dispatch it

use std::sync::Arc;

use serde::Serialize;
use shared::models::{ProductSelection, Recipient};
use shared::reconcile::{reconcile, ReconciliationTotals, StockReconciliation};
use shared::validation::{validate_selections, ValidationMode, ValidationReport};

use super::ProductService;
use crate::error::{AppError, AppResult};
use crate::external::InventoryApi;

#[derive(Clone)]
pub struct StockService {
    api: Arc<dyn InventoryApi>,
}

/// What a batch would do, without touching upstream stock
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPreview {
    pub blocking: bool,
    pub validation: ValidationReport,
    pub messages: Vec<String>,
    pub reconciliation: StockReconciliation,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustmentOutcome {
    pub totals: ReconciliationTotals,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl StockService {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self { api }
    }

    /// Validate against freshly fetched stock and compute the payloads
    pub async fn preview(
        &self,
        selections: &[ProductSelection],
        recipient: Option<&Recipient>,
    ) -> AppResult<StockPreview> {
        let catalog = ProductService::new(self.api.clone()).catalog().await?;
        let validation =
            validate_selections(selections, &catalog, ValidationMode::Adjustment, recipient);
        let reconciliation = reconcile(selections);

        Ok(StockPreview {
            blocking: validation.is_blocking(),
            messages: validation.messages(),
            message: reconciliation.confirmation_message(),
            validation,
            reconciliation,
        })
    }

    /// Apply a batch: additions first, then removals.
    ///
    /// A removal failure after additions landed is reported as
    /// `PartiallyApplied` so the client does not resubmit the additions.
    pub async fn apply(
        &self,
        selections: &[ProductSelection],
        recipient: Option<&Recipient>,
    ) -> AppResult<StockAdjustmentOutcome> {
        let preview = self.preview(selections, recipient).await?;
        if preview.blocking {
            return Err(AppError::BatchRejected(preview.validation));
        }

        let StockReconciliation {
            to_add,
            to_remove,
            totals,
        } = preview.reconciliation;

        if !to_add.is_empty() {
            self.api.add_quantities(&to_add).await?.into_result()?;
            tracing::info!(
                "Added {} units across {} products",
                totals.total_add,
                totals.products_add
            );
        }

        if !to_remove.is_empty() {
            let removed = self
                .api
                .remove_quantities(&to_remove)
                .await
                .and_then(|response| response.into_result());
            if let Err(e) = removed {
                if to_add.is_empty() {
                    return Err(e);
                }
                tracing::error!(
                    "Removals failed after {} units were added: {}",
                    totals.total_add,
                    e
                );
                return Err(AppError::PartiallyApplied {
                    units_added: totals.total_add,
                    products_added: totals.products_add,
                    cause: e.to_string(),
                });
            }
            tracing::info!(
                "Removed {} units across {} products for {}",
                totals.total_remove,
                totals.products_remove,
                recipient.map(Recipient::display_name).unwrap_or("no recipient")
            );
        }

        Ok(StockAdjustmentOutcome {
            totals,
            message: preview.message,
            recipient: recipient.map(|r| r.display_name().to_string()),
        })
    }
}
