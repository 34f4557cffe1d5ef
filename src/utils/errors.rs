use thiserror::Error;

/// Errors that can occur in utility functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("Bound must be a finite number: {0}")]
    NonFiniteBound(f64),
    #[error("Invalid range: min={min}, max={max}")]
    InvalidRange { min: f64, max: f64 },
}
