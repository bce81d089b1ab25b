//! Domain models for the Stockroom inventory platform

mod department;
mod movement;
mod product;
mod selection;

pub use department::*;
pub use movement::*;
pub use product::*;
pub use selection::*;
