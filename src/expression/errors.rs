use thiserror::Error;

/// Numeric domain violations hit while evaluating a tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluatorError {
    #[error("EvaluatorError: Division by zero")]
    DivisionByZero,
    #[error("EvaluatorError: Square root of negative number")]
    NegativeSqrt,
    #[error("EvaluatorError: Logarithm of non-positive number")]
    NonPositiveLog,
}

/// A function call whose name the evaluator does not know
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown Function: {name}")]
pub struct UnknownFunctionError {
    pub name: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),
    #[error(transparent)]
    UnknownFunction(#[from] UnknownFunctionError),
}
