//! Route definitions for the Stockroom backend

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/products", product_routes())
        .nest("/stock", stock_routes())
        .nest("/movements", movement_routes())
        .nest("/departments", department_routes())
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/reports/summary", get(handlers::get_report_summary))
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/:id", delete(handlers::delete_product))
        .route("/:id/quantity", patch(handlers::quick_save_quantity))
}

/// Manage-stock routes
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/preview", post(handlers::preview_adjustments))
        .route("/adjustments", post(handlers::apply_adjustments))
}

/// Movement routes
fn movement_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_movement))
        .route("/validate", post(handlers::validate_movement))
        .route("/history", get(handlers::get_history))
}

/// Department routes
fn department_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_departments).post(handlers::create_department),
        )
        .route("/options", get(handlers::get_department_options))
}
