//! Upstream inventory API integration
//!
//! The backend owns no storage; products, movements and departments live
//! behind the remote inventory REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{Department, Movement, NewDepartment, NewProduct, RawProduct};
use shared::reconcile::{CreateMovementRequest, StockAddition, StockRemoval};

use crate::error::{AppError, AppResult};

pub mod inventory_api;

pub use inventory_api::InventoryApiClient;

/// Acknowledgement returned by upstream write calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Value>,
}

fn default_success() -> bool {
    true
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn rejected(message: impl Into<String>, errors: Vec<Value>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            errors,
        }
    }

    /// Turn `success: false` into `AppError::UpstreamRejected`
    pub fn into_result(self) -> AppResult<Self> {
        if self.success {
            return Ok(self);
        }
        Err(AppError::UpstreamRejected {
            message: self
                .message
                .unwrap_or_else(|| "The inventory service rejected the request".to_string()),
            errors: self.errors,
        })
    }
}

/// Remote inventory operations the backend depends on
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_products(&self) -> AppResult<Vec<RawProduct>>;

    async fn create_product(&self, product: &NewProduct) -> AppResult<RawProduct>;

    async fn delete_product(&self, id: &str) -> AppResult<()>;

    /// Overwrite one product's quantity
    async fn update_quantity(&self, id: &str, quantity: u64) -> AppResult<()>;

    async fn add_quantities(&self, additions: &[StockAddition]) -> AppResult<ApiResponse>;

    async fn remove_quantities(&self, removals: &[StockRemoval]) -> AppResult<ApiResponse>;

    async fn create_movement(&self, request: &CreateMovementRequest) -> AppResult<ApiResponse>;

    async fn list_movements(&self) -> AppResult<Vec<Movement>>;

    async fn list_departments(&self) -> AppResult<Vec<Department>>;

    async fn create_department(&self, department: &NewDepartment) -> AppResult<Department>;

    /// Aggregated figures computed upstream; passed through untouched
    async fn report_summary(&self) -> AppResult<Value>;
}
