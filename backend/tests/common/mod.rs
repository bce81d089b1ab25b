//! In-memory stand-in for the upstream inventory API

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::models::{Department, Movement, NewDepartment, NewProduct, RawProduct};
use shared::quantity::resolve_quantity;
use shared::reconcile::{CreateMovementRequest, StockAddition, StockRemoval};
use stockroom_backend::config::{Config, InventoryConfig, ServerConfig, UpstreamConfig};
use stockroom_backend::external::{ApiResponse, InventoryApi};
use stockroom_backend::{AppError, AppResult, AppState};

#[derive(Default)]
pub struct FakeState {
    pub products: Vec<RawProduct>,
    pub movements: Vec<Movement>,
    pub departments: Vec<Department>,
    pub summary: Value,
    /// Upstream calls in the order they were made
    pub calls: Vec<&'static str>,
    pub additions: Vec<Vec<StockAddition>>,
    pub removals: Vec<Vec<StockRemoval>>,
    pub created_movements: Vec<CreateMovementRequest>,
    pub quick_saves: Vec<(String, u64)>,
    /// Methods that answer as if the upstream were down
    pub failing: HashSet<&'static str>,
    /// Write calls answer `success: false`
    pub reject_writes: bool,
}

#[derive(Default)]
pub struct FakeInventoryApi {
    pub state: Mutex<FakeState>,
}

impl FakeInventoryApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_products(products: Value) -> Arc<Self> {
        let fake = Self::new();
        fake.set_products(products);
        fake
    }

    pub fn set_products(&self, products: Value) {
        let products: Vec<RawProduct> = serde_json::from_value(products).unwrap();
        self.state.lock().unwrap().products = products;
    }

    pub fn set_movements(&self, movements: Value) {
        let movements: Vec<Movement> = serde_json::from_value(movements).unwrap();
        self.state.lock().unwrap().movements = movements;
    }

    pub fn set_departments(&self, departments: Value) {
        let departments: Vec<Department> = serde_json::from_value(departments).unwrap();
        self.state.lock().unwrap().departments = departments;
    }

    pub fn fail(&self, method: &'static str) {
        self.state.lock().unwrap().failing.insert(method);
    }

    pub fn reject_writes(&self) {
        self.state.lock().unwrap().reject_writes = true;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn quantity_of(&self, id: &str) -> Option<u64> {
        let state = self.state.lock().unwrap();
        state.products.iter().find(|p| p.id == id).map(resolve_quantity)
    }

    pub fn as_api(self: &Arc<Self>) -> Arc<dyn InventoryApi> {
        self.clone()
    }

    fn enter(&self, method: &'static str) -> AppResult<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method);
        if state.failing.contains(method) {
            return Err(AppError::UpstreamUnavailable(format!("{} failed", method)));
        }
        Ok(state)
    }

    fn acknowledgement(state: &FakeState) -> ApiResponse {
        if state.reject_writes {
            ApiResponse::rejected("Rejected by inventory", vec![json!("stock changed")])
        } else {
            ApiResponse::ok()
        }
    }
}

fn adjust(products: &mut [RawProduct], id: &str, apply: impl Fn(u64) -> u64) {
    if let Some(product) = products.iter_mut().find(|p| p.id == id) {
        let next = apply(resolve_quantity(product));
        product.quantity = Some(json!(next));
        product.q = None;
        product.stock = None;
    }
}

#[async_trait]
impl InventoryApi for FakeInventoryApi {
    async fn list_products(&self) -> AppResult<Vec<RawProduct>> {
        Ok(self.enter("list_products")?.products.clone())
    }

    async fn create_product(&self, product: &NewProduct) -> AppResult<RawProduct> {
        let mut state = self.enter("create_product")?;
        let created = RawProduct {
            id: format!("P{}", state.products.len() + 1),
            name: product.name.clone(),
            unit: product.unit.clone(),
            quantity: Some(json!(product.quantity)),
            category: product.category.clone(),
            price: product.price,
            ..Default::default()
        };
        state.products.push(created.clone());
        Ok(created)
    }

    async fn delete_product(&self, id: &str) -> AppResult<()> {
        let mut state = self.enter("delete_product")?;
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(AppError::NotFound(format!("Product {}", id)));
        }
        Ok(())
    }

    async fn update_quantity(&self, id: &str, quantity: u64) -> AppResult<()> {
        let mut state = self.enter("update_quantity")?;
        state.quick_saves.push((id.to_string(), quantity));
        adjust(&mut state.products, id, |_| quantity);
        Ok(())
    }

    async fn add_quantities(&self, additions: &[StockAddition]) -> AppResult<ApiResponse> {
        let mut state = self.enter("add_quantities")?;
        state.additions.push(additions.to_vec());
        if !state.reject_writes {
            for addition in additions {
                adjust(&mut state.products, &addition.product_id, |q| {
                    q + addition.quantity_to_add
                });
            }
        }
        Ok(Self::acknowledgement(&state))
    }

    async fn remove_quantities(&self, removals: &[StockRemoval]) -> AppResult<ApiResponse> {
        let mut state = self.enter("remove_quantities")?;
        state.removals.push(removals.to_vec());
        if !state.reject_writes {
            for removal in removals {
                adjust(&mut state.products, &removal.product_id, |q| {
                    q.saturating_sub(removal.quantity_to_remove)
                });
            }
        }
        Ok(Self::acknowledgement(&state))
    }

    async fn create_movement(&self, request: &CreateMovementRequest) -> AppResult<ApiResponse> {
        let mut state = self.enter("create_movement")?;
        state.created_movements.push(request.clone());
        Ok(Self::acknowledgement(&state))
    }

    async fn list_movements(&self) -> AppResult<Vec<Movement>> {
        Ok(self.enter("list_movements")?.movements.clone())
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        Ok(self.enter("list_departments")?.departments.clone())
    }

    async fn create_department(&self, department: &NewDepartment) -> AppResult<Department> {
        let mut state = self.enter("create_department")?;
        let created = Department {
            id: format!("D{}", state.departments.len() + 1),
            name: department.name.clone(),
            description: department.description.clone(),
            icon: department.icon.clone(),
            color: department.color.clone(),
        };
        state.departments.push(created.clone());
        Ok(created)
    }

    async fn report_summary(&self) -> AppResult<Value> {
        Ok(self.enter("report_summary")?.summary.clone())
    }
}

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        upstream: UpstreamConfig {
            base_url: "http://inventory.test".to_string(),
            api_token: None,
            timeout_secs: 1,
        },
        inventory: InventoryConfig::default(),
    }
}

pub fn test_state(fake: &Arc<FakeInventoryApi>) -> AppState {
    AppState {
        api: fake.as_api(),
        config: Arc::new(test_config()),
    }
}

/// Three products using each of the quantity spellings
pub fn sample_products() -> Value {
    json!([
        {"id": "P1", "name": "Rice", "unit": "kg", "quantity": 10},
        {"id": "P2", "name": "Soap", "unit": "bars", "q": 4},
        {"id": "P3", "name": "Gloves", "unit": "pairs", "stock": "0"}
    ])
}

pub fn sample_departments() -> Value {
    json!([
        {"id": "D1", "name": "Kitchen", "icon": "restaurant", "color": "#E53935"},
        {"id": "D2", "name": "Cleaning", "icon": "cleaning-services", "color": "#1E88E5"}
    ])
}
