use crate::expression::InfixOperator;
use crate::lexer::TokenKind;

/// Precedence the right operand of an implicit multiplication is parsed at
pub(crate) const IMPLICIT_PRECEDENCE: u8 = 2;

/// What to do when a token kind starts an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrefixRule {
    Number,
    Variable,
    Negate,
    /// Unary plus, dropped from the tree.
    Identity,
    Group,
    Call,
}

/// What to do when a token kind follows a complete left operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InfixRule {
    Binary(InfixOperator),
    /// Right-associative power.
    Exponent,
    /// Juxtaposition read as multiplication; the token is not consumed.
    Implicit,
}

/// Binding strength of a token in infix position; 0 ends the expression
pub(crate) fn precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Plus | TokenKind::Minus => 1,
        TokenKind::Asterisk | TokenKind::Slash => 2,
        TokenKind::Exponent => 3,
        TokenKind::Variable | TokenKind::LParen | TokenKind::Function => 4,
        TokenKind::Number | TokenKind::Dot | TokenKind::RParen => 0,
    }
}

pub(crate) fn prefix_rule(kind: TokenKind) -> Option<PrefixRule> {
    match kind {
        TokenKind::Number => Some(PrefixRule::Number),
        TokenKind::Variable => Some(PrefixRule::Variable),
        TokenKind::Minus => Some(PrefixRule::Negate),
        TokenKind::Plus => Some(PrefixRule::Identity),
        TokenKind::LParen => Some(PrefixRule::Group),
        TokenKind::Function => Some(PrefixRule::Call),
        TokenKind::Asterisk
        | TokenKind::Slash
        | TokenKind::Dot
        | TokenKind::Exponent
        | TokenKind::RParen => None,
    }
}

pub(crate) fn infix_rule(kind: TokenKind) -> Option<InfixRule> {
    match kind {
        TokenKind::Plus => Some(InfixRule::Binary(InfixOperator::Add)),
        TokenKind::Minus => Some(InfixRule::Binary(InfixOperator::Subtract)),
        TokenKind::Asterisk => Some(InfixRule::Binary(InfixOperator::Multiply)),
        TokenKind::Slash => Some(InfixRule::Binary(InfixOperator::Divide)),
        TokenKind::Exponent => Some(InfixRule::Exponent),
        TokenKind::Variable | TokenKind::LParen | TokenKind::Function => Some(InfixRule::Implicit),
        TokenKind::Number | TokenKind::Dot | TokenKind::RParen => None,
    }
}
