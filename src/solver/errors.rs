use thiserror::Error;

use crate::parser::InputError;
use crate::symbolic::ConversionError;

/// Errors that can occur while solving for intersections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}
