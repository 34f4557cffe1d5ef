use thiserror::Error;

use crate::lexer::LexerError;

/// Malformed token sequences; carries no position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("ParserError: No prefix function for {0}")]
    NoPrefixFunction(String),
    #[error("ParserError: Nothing to parse at the end of the input")]
    EndOfInput,
    #[error("ParserError: Expected left parenthesis")]
    ExpectedLeftParen,
    #[error("ParserError: Expected right parenthesis")]
    ExpectedRightParen,
    #[error("ParserError: Not a valid expression")]
    InvalidExpression,
}

/// Failure turning raw text into a tree, from either stage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parser(#[from] ParserError),
}
