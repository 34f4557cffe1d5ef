//! Text to token conversion in a single left-to-right pass

mod core;
mod errors;
mod token;

pub use self::core::{DEFAULT_VARIABLE, tokenize, tokenize_with_variable};
pub use errors::LexerError;
pub use token::{Number, Token, TokenKind};
