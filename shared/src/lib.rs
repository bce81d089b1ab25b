//! Shared types and stock logic for the Stockroom inventory platform
//!
//! This crate contains the domain models and the pure stock rules shared
//! between the backend and the mobile client (via WASM). Nothing in here
//! performs I/O.

pub mod history;
pub mod models;
pub mod quantity;
pub mod reconcile;
pub mod types;
pub mod validation;

pub use history::*;
pub use models::*;
pub use quantity::*;
pub use reconcile::*;
pub use types::*;
pub use validation::*;
