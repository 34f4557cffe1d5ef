use log::{debug, warn};

use crate::lexer::errors::LexerError;
use crate::lexer::token::{Number, Token};

/// Symbol used for the free variable when none is given
pub const DEFAULT_VARIABLE: char = 'x';

/// Explicit scanning position over the input characters
struct Cursor<'a> {
    chars: &'a [char],
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self { chars, position: 0 }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// 1-based position of the current character, used in error reports
    fn report_position(&self) -> usize {
        self.position + 1
    }
}

/// Tokenizes `text` using the default variable symbol `x`
///
/// # Errors
///
/// Returns an error on a character that starts no token or on a number
/// literal with more than one decimal point.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexerError> {
    tokenize_with_variable(text, DEFAULT_VARIABLE)
}

/// Tokenizes `text`, treating `variable` as the free variable
///
/// # Errors
///
/// See [`tokenize`].
pub fn tokenize_with_variable(text: &str, variable: char) -> Result<Vec<Token>, LexerError> {
    debug!("Tokenizing '{}' with variable '{}'", text, variable);

    let chars: Vec<char> = text.chars().collect();
    let mut cursor = Cursor::new(&chars);
    let mut tokens = Vec::new();

    while let Some(c) = cursor.current() {
        if c == variable {
            tokens.push(Token::Variable);
            cursor.advance();
        } else if c.is_ascii_digit() {
            tokens.push(read_number(&mut cursor)?);
        } else if c.is_whitespace() {
            skip_whitespace(&mut cursor);
        } else if let Some(token) = Token::from_symbol(c) {
            tokens.push(token);
            cursor.advance();
        } else if c.is_alphabetic() {
            tokens.push(read_function(&mut cursor));
        } else {
            warn!(
                "Invalid character '{}' at position {}",
                c,
                cursor.report_position()
            );
            return Err(LexerError::InvalidCharacter {
                position: cursor.report_position(),
            });
        }
    }

    debug!("Produced {} tokens", tokens.len());
    Ok(tokens)
}

/// Reads an integer or decimal literal starting at the cursor
///
/// A `.` belongs to the number only when a digit follows it. A second such
/// `.` is an error reported at its own position.
fn read_number(cursor: &mut Cursor) -> Result<Token, LexerError> {
    let mut literal = String::new();
    let mut has_decimal_point = false;

    while let Some(c) = cursor.current() {
        if c.is_ascii_digit() {
            literal.push(c);
        } else if c == '.' && cursor.peek_next().is_some_and(|n| n.is_ascii_digit()) {
            if has_decimal_point {
                warn!(
                    "Multiple decimal points in '{}' at position {}",
                    literal,
                    cursor.report_position()
                );
                return Err(LexerError::MultipleDecimalPoints {
                    position: cursor.report_position(),
                });
            }
            literal.push(c);
            has_decimal_point = true;
        } else {
            break;
        }
        cursor.advance();
    }

    Ok(Token::Number(number_from_literal(&literal, has_decimal_point)))
}

/// Converts a scanned digit run into a number value
///
/// Integers that do not fit in `i64` are kept as floats.
fn number_from_literal(literal: &str, has_decimal_point: bool) -> Number {
    if !has_decimal_point && let Ok(n) = literal.parse::<i64>() {
        return Number::Integer(n);
    }
    // A run of digits with at most one inner point always parses as f64
    Number::Float(literal.parse::<f64>().unwrap_or(f64::NAN))
}

fn read_function(cursor: &mut Cursor) -> Token {
    let mut name = String::new();
    while let Some(c) = cursor.current()
        && c.is_alphanumeric()
    {
        name.push(c);
        cursor.advance();
    }
    Token::Function(name)
}

fn skip_whitespace(cursor: &mut Cursor) {
    while cursor.current().is_some_and(char::is_whitespace) {
        cursor.advance();
    }
}
