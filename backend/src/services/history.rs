//! Movement history views and CSV export

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use shared::history::{aggregate, filter_movements, HistoryFilters, HistoryView};
use shared::models::{Movement, MovementType};

use crate::error::{AppError, AppResult};
use crate::external::InventoryApi;

#[derive(Clone)]
pub struct HistoryService {
    api: Arc<dyn InventoryApi>,
    offset: FixedOffset,
}

/// One exported line item
#[derive(Debug, Serialize)]
pub struct HistoryCsvRow {
    pub date: String,
    pub time: String,
    pub movement_id: String,
    #[serde(rename = "type")]
    pub movement_type: &'static str,
    pub stock_manager: String,
    /// Supplier for stock-in, department for distributions
    pub counterparty: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u64,
    pub unit: String,
    pub notes: String,
}

impl HistoryService {
    pub fn new(api: Arc<dyn InventoryApi>, offset: FixedOffset) -> Self {
        Self { api, offset }
    }

    pub async fn history(&self, filters: &HistoryFilters) -> AppResult<HistoryView> {
        let now = Utc::now().with_timezone(&self.offset);
        self.history_at(filters, &now).await
    }

    /// History as seen at a given instant
    pub async fn history_at(
        &self,
        filters: &HistoryFilters,
        now: &DateTime<FixedOffset>,
    ) -> AppResult<HistoryView> {
        let movements = self.movements().await?;
        Ok(aggregate(&movements, filters, now))
    }

    pub async fn export_csv(&self, filters: &HistoryFilters) -> AppResult<String> {
        let now = Utc::now().with_timezone(&self.offset);
        self.export_csv_at(filters, &now).await
    }

    /// Filtered history flattened to one CSV row per line item, newest first
    pub async fn export_csv_at(
        &self,
        filters: &HistoryFilters,
        now: &DateTime<FixedOffset>,
    ) -> AppResult<String> {
        let movements = self.movements().await?;
        let mut filtered = filter_movements(&movements, filters, now);
        filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let rows: Vec<HistoryCsvRow> = filtered
            .into_iter()
            .flat_map(|movement| self.csv_rows(movement))
            .collect();

        Self::export_to_csv(&rows)
    }

    /// Upstream history, with stock-in values derived from priced lines
    /// when the record carries none
    async fn movements(&self) -> AppResult<Vec<Movement>> {
        let mut movements = self.api.list_movements().await?;
        for movement in &mut movements {
            if !movement.is_consistent() {
                tracing::warn!(
                    "Movement {} declares {} items but its lines sum to {}",
                    movement.id,
                    movement.total_items,
                    movement.line_units()
                );
            }
            if movement.total_value.is_none() {
                movement.total_value = movement.computed_total_value();
            }
        }
        Ok(movements)
    }

    fn csv_rows(&self, movement: &Movement) -> Vec<HistoryCsvRow> {
        let local = movement.timestamp.with_timezone(&self.offset);
        let counterparty = match movement.movement_type {
            MovementType::StockIn => movement.supplier.clone().unwrap_or_default(),
            MovementType::Distribution => movement
                .department_name()
                .map(str::to_string)
                .unwrap_or_default(),
        };

        movement
            .products
            .iter()
            .map(|line| HistoryCsvRow {
                date: local.format("%Y-%m-%d").to_string(),
                time: local.format("%H:%M").to_string(),
                movement_id: movement.id.clone(),
                movement_type: movement.movement_type.as_str(),
                stock_manager: movement.stock_manager.clone(),
                counterparty: counterparty.clone(),
                product_id: line.product_id.clone(),
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                unit: line.unit.clone(),
                notes: movement.notes.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization failed: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV flush failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))
    }
}
