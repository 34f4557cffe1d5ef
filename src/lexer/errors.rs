use thiserror::Error;

/// Malformed characters or numbers found while tokenizing
///
/// Positions are 1-based character offsets into the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("LexerError at position {position}: Invalid character")]
    InvalidCharacter { position: usize },
    #[error("LexerError at position {position}: Multiple decimal points")]
    MultipleDecimalPoints { position: usize },
}

impl LexerError {
    pub fn position(&self) -> usize {
        match self {
            LexerError::InvalidCharacter { position }
            | LexerError::MultipleDecimalPoints { position } => *position,
        }
    }
}
