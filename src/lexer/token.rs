use std::fmt;

/// Numeric literal value carried by a [`Token::Number`] and by number nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Literal written without a decimal point, such as `42`.
    Integer(i64),
    /// Literal written with a decimal point, such as `3.14`.
    Float(f64),
}

impl Number {
    pub fn value(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Float(n) => n,
        }
    }
}

/// Digit count of the shortest integer literal that overflows `f64`
const OVERFLOW_DIGITS: usize = f64::MAX_10_EXP as usize + 2;

/// Renders the literal so that it lexes back to the same value
///
/// A digit run too long for `f64` lexes as positive infinity, so infinity is
/// written back as such a run. NaN and negative values are never produced by
/// the lexer and have no literal form.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(n) if *n == f64::INFINITY => {
                write!(f, "1{:0<width$}.0", "", width = OVERFLOW_DIGITS - 1)
            }
            // Keep the decimal point so the literal lexes back as a float
            Number::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{:.1}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

/// Smallest lexical unit produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(Number),
    /// The single free variable (`x` by default).
    Variable,
    Minus,
    Plus,
    Asterisk,
    Slash,
    /// A `.` that is not part of a number literal.
    Dot,
    Exponent,
    LParen,
    RParen,
    /// Any alphanumeric run starting with a letter other than the variable.
    Function(String),
}

/// Kind of a token, without its literal payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Variable,
    Minus,
    Plus,
    Asterisk,
    Slash,
    Dot,
    Exponent,
    LParen,
    RParen,
    Function,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_) => TokenKind::Number,
            Token::Variable => TokenKind::Variable,
            Token::Minus => TokenKind::Minus,
            Token::Plus => TokenKind::Plus,
            Token::Asterisk => TokenKind::Asterisk,
            Token::Slash => TokenKind::Slash,
            Token::Dot => TokenKind::Dot,
            Token::Exponent => TokenKind::Exponent,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Function(_) => TokenKind::Function,
        }
    }

    /// Maps a single-character operator or delimiter to its token
    pub fn from_symbol(c: char) -> Option<Token> {
        match c {
            '-' => Some(Token::Minus),
            '+' => Some(Token::Plus),
            '*' => Some(Token::Asterisk),
            '/' => Some(Token::Slash),
            '^' => Some(Token::Exponent),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '.' => Some(Token::Dot),
            _ => None,
        }
    }
}

/// Renders the literal value of the token
///
/// The variable is always written as the default `x`; tokens do not carry
/// the symbol they were lexed from.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable => write!(f, "x"),
            Token::Minus => write!(f, "-"),
            Token::Plus => write!(f, "+"),
            Token::Asterisk => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Dot => write!(f, "."),
            Token::Exponent => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Function(name) => write!(f, "{}", name),
        }
    }
}
