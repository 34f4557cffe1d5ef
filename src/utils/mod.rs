//! Utils module split into submodules

mod errors;
mod grid;
mod validation;

pub use errors::UtilsError;
pub use grid::{linspace, sorted_union};
pub use validation::validate_range;
