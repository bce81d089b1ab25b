//! HTTP handlers for the product catalog

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::models::{NewProduct, Product};

use crate::error::AppResult;
use crate::services::ProductService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct QuantityInput {
    pub quantity: u64,
}

/// List products with resolved quantities
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.api);
    let products = service.list().await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = ProductService::new(state.api);
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.api);
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Quick save a quantity; always accepted
pub async fn quick_save_quantity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<QuantityInput>,
) -> StatusCode {
    let service = ProductService::new(state.api);
    service.quick_save(&id, input.quantity).await;
    StatusCode::ACCEPTED
}
