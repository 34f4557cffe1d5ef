//! Expression tree, its text rendering and numeric evaluation

mod ast;
mod display;
mod errors;
mod eval;

pub use ast::{Expression, InfixOperator, PrefixOperator};
pub use display::ExpressionDisplay;
pub use errors::{EvaluationError, EvaluatorError, UnknownFunctionError};
pub use eval::SUPPORTED_FUNCTIONS;
