use thiserror::Error;

/// A tree that has no symbolic counterpart
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("ConversionError: Not a valid function: {0}")]
    UnsupportedFunction(String),
}
