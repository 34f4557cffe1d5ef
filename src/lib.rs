//! Graphsolve - A library for evaluating, intersecting and sampling expressions of one variable
//!
//! Text is tokenized, parsed into an immutable [`Expression`] tree, and then
//! either evaluated numerically, solved symbolically against a second
//! expression, or sampled adaptively for plotting.
//!
//! ```
//! use graphsolve::{evaluate, parse_expression};
//!
//! if let Ok(tree) = parse_expression("2x^2 - 3") {
//!     assert_eq!(evaluate(&tree, 2.0), Ok(5.0));
//! }
//! ```

pub mod expression;
pub mod lexer;
pub mod parser;
pub mod sampler;
pub mod solver;
pub mod symbolic;
pub mod utils;

// Re-export the main public API
pub use expression::{EvaluationError, EvaluatorError, Expression, UnknownFunctionError};
pub use lexer::{LexerError, Token, tokenize};
pub use parser::{InputError, ParserError, parse, parse_expression};
pub use sampler::{AdaptiveSampler, SamplerConfig, sample};
pub use solver::{Solution, Solver, SolverConfig, SolverError};
pub use symbolic::{AlgebraBackend, ConversionError, SymbolicBackend};

/// Evaluate a parsed expression with the variable bound to `x`
///
/// # Errors
///
/// Returns [`EvaluationError::Evaluator`] for division by zero, the square
/// root of a negative number or the logarithm of a non-positive number, and
/// [`EvaluationError::UnknownFunction`] for an unrecognised function name.
///
/// # Examples
///
/// ```
/// use graphsolve::{EvaluationError, EvaluatorError, evaluate, parse_expression};
///
/// match parse_expression("1/(x-2)") {
///     Ok(tree) => {
///         assert_eq!(evaluate(&tree, 3.0), Ok(1.0));
///         assert_eq!(
///             evaluate(&tree, 2.0),
///             Err(EvaluationError::Evaluator(EvaluatorError::DivisionByZero))
///         );
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn evaluate(expression: &Expression, x: f64) -> Result<f64, EvaluationError> {
    expression.evaluate(x)
}

/// Find the real values of `x` where two expressions are equal
///
/// This is a convenience function that uses a default solver with the
/// built-in algebra backend.
///
/// # Returns
///
/// * `Ok(Solution)` - The sorted roots, or `identical` set with no roots
///   when both sides are the same expression
/// * `Err(SolverError)` - If either input fails to lex, parse or convert
///
/// # Errors
///
/// This function will return an error if:
/// * Either text contains an invalid character or malformed number
/// * Either text is not a valid expression
/// * Either expression uses a function without a symbolic counterpart
///
/// # Examples
///
/// ```
/// use graphsolve::solve;
///
/// match solve("2x+1", "x-3") {
///     Ok(solution) => assert_eq!(solution.roots, vec![-4.0]),
///     Err(e) => println!("Error: {}", e),
/// }
///
/// if let Ok(solution) = solve("x^2+3", "--3+x^2") {
///     assert!(solution.identical);
///     assert!(solution.roots.is_empty());
/// }
/// ```
pub fn solve(lhs: &str, rhs: &str) -> Result<Solution, SolverError> {
    Solver::default().solve(lhs, rhs)
}
