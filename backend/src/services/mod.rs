//! Business logic services for the Stockroom backend

pub mod dashboard;
pub mod department;
pub mod history;
pub mod movement;
pub mod product;
pub mod stock;

pub use dashboard::DashboardService;
pub use department::DepartmentService;
pub use history::HistoryService;
pub use movement::MovementService;
pub use product::ProductService;
pub use stock::StockService;
