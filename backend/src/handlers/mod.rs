//! HTTP handlers, one module per resource

pub mod dashboard;
pub mod department;
pub mod health;
pub mod history;
pub mod movement;
pub mod product;
pub mod stock;

pub use dashboard::{get_dashboard, get_report_summary};
pub use department::{create_department, get_department_options, list_departments};
pub use health::health_check;
pub use history::get_history;
pub use movement::{create_movement, validate_movement};
pub use product::{create_product, delete_product, list_products, quick_save_quantity};
pub use stock::{apply_adjustments, preview_adjustments};
