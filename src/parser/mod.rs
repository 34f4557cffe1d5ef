//! Pratt parser turning tokens into expression trees

mod core;
mod errors;
mod rules;

pub use self::core::{Parser, parse, parse_expression, parse_expression_with_variable};
pub use errors::{InputError, ParserError};

#[cfg(test)]
mod tests;
