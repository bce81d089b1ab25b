//! Dashboard overview

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use shared::models::{Department, Product, ProductCatalog};

use crate::error::AppResult;
use crate::external::InventoryApi;

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn InventoryApi>,
    low_stock_threshold: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub products: usize,
    pub units: u64,
    pub departments: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: Value,
    pub departments: Vec<Department>,
    pub out_of_stock: Vec<Product>,
    pub low_stock: Vec<Product>,
    pub low_stock_threshold: u64,
    pub totals: DashboardTotals,
}

impl DashboardService {
    pub fn new(api: Arc<dyn InventoryApi>, low_stock_threshold: u64) -> Self {
        Self {
            api,
            low_stock_threshold,
        }
    }

    /// Summary, departments and products are loaded concurrently; any
    /// failure fails the whole dashboard
    pub async fn overview(&self) -> AppResult<Dashboard> {
        let (summary, departments, raw_products) = tokio::try_join!(
            self.api.report_summary(),
            self.api.list_departments(),
            self.api.list_products(),
        )?;

        let catalog = ProductCatalog::from(raw_products);
        let out_of_stock: Vec<Product> = catalog.out_of_stock().into_iter().cloned().collect();
        let low_stock: Vec<Product> = catalog
            .low_stock(self.low_stock_threshold)
            .into_iter()
            .cloned()
            .collect();

        let totals = DashboardTotals {
            products: catalog.len(),
            units: catalog.total_units(),
            departments: departments.len(),
            out_of_stock: out_of_stock.len(),
            low_stock: low_stock.len(),
        };

        Ok(Dashboard {
            summary,
            departments,
            out_of_stock,
            low_stock,
            low_stock_threshold: self.low_stock_threshold,
            totals,
        })
    }

    pub async fn report_summary(&self) -> AppResult<Value> {
        self.api.report_summary().await
    }
}
