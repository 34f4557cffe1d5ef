use log::debug;

use crate::expression::{Expression, InfixOperator};
use crate::lexer::{DEFAULT_VARIABLE, Token, TokenKind, tokenize_with_variable};
use crate::parser::errors::{InputError, ParserError};
use crate::parser::rules::{self, IMPLICIT_PRECEDENCE, InfixRule, PrefixRule};

/// Precedence-climbing parser over a borrowed token slice
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses the whole token slice into one tree
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError`] when the tokens do not form exactly one
    /// expression.
    pub fn parse(mut self) -> Result<Expression, ParserError> {
        let expression = self.parse_expression(0)?;
        if self.position < self.tokens.len() {
            debug!(
                "Unconsumed tokens after position {} of {}",
                self.position,
                self.tokens.len()
            );
            return Err(ParserError::InvalidExpression);
        }
        Ok(expression)
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn parse_expression(&mut self, precedence: u8) -> Result<Expression, ParserError> {
        let token = self.current().ok_or(ParserError::EndOfInput)?;
        let rule = rules::prefix_rule(token.kind())
            .ok_or_else(|| ParserError::NoPrefixFunction(token.to_string()))?;
        let mut left = self.parse_prefix(rule, token)?;

        while let Some(token) = self.current()
            && precedence < rules::precedence(token.kind())
        {
            let Some(rule) = rules::infix_rule(token.kind()) else {
                break;
            };
            left = self.parse_infix(rule, left)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self, rule: PrefixRule, token: &'a Token) -> Result<Expression, ParserError> {
        match (rule, token) {
            (PrefixRule::Number, Token::Number(n)) => {
                self.advance();
                Ok(Expression::number(*n))
            }
            (PrefixRule::Variable, _) => {
                self.advance();
                Ok(Expression::Variable)
            }
            (PrefixRule::Negate, _) => {
                self.advance();
                let operand = self.parse_expression(0)?;
                Ok(Expression::negate(operand))
            }
            (PrefixRule::Identity, _) => {
                self.advance();
                self.parse_expression(0)
            }
            (PrefixRule::Group, _) => self.parse_group(),
            (PrefixRule::Call, Token::Function(name)) => {
                self.advance();
                match self.current() {
                    Some(Token::LParen) => {
                        let argument = self.parse_group()?;
                        Ok(Expression::call(name.clone(), argument))
                    }
                    _ => Err(ParserError::ExpectedLeftParen),
                }
            }
            _ => Err(ParserError::NoPrefixFunction(token.to_string())),
        }
    }

    /// Parses `( expr )` starting at the opening parenthesis
    ///
    /// A missing `)` at the end of the input is accepted.
    fn parse_group(&mut self) -> Result<Expression, ParserError> {
        self.advance();
        let inner = self.parse_expression(0)?;
        match self.current().map(Token::kind) {
            None => Ok(inner),
            Some(TokenKind::RParen) => {
                self.advance();
                Ok(inner)
            }
            Some(_) => Err(ParserError::ExpectedRightParen),
        }
    }

    fn parse_infix(&mut self, rule: InfixRule, left: Expression) -> Result<Expression, ParserError> {
        match rule {
            InfixRule::Binary(operator) => {
                self.advance();
                let right = self.parse_expression(operator.precedence())?;
                Ok(Expression::infix(left, operator, right))
            }
            InfixRule::Exponent => {
                self.advance();
                let right = self.parse_expression(InfixOperator::Power.precedence() - 1)?;
                Ok(Expression::infix(left, InfixOperator::Power, right))
            }
            InfixRule::Implicit => {
                let right = self.parse_expression(IMPLICIT_PRECEDENCE)?;
                Ok(Expression::infix(left, InfixOperator::Multiply, right))
            }
        }
    }
}

/// Parses a full token sequence into one expression tree
///
/// # Errors
///
/// Returns a [`ParserError`] for empty input, tokens that cannot start an
/// expression, a function name without `(`, or trailing tokens.
pub fn parse(tokens: &[Token]) -> Result<Expression, ParserError> {
    let result = Parser::new(tokens).parse();
    match &result {
        Ok(expression) => debug!("Parsed {} tokens into {}", tokens.len(), expression),
        Err(e) => debug!("Parsing failed: {}", e),
    }
    result
}

/// Tokenizes and parses `text` with the default variable symbol
///
/// # Errors
///
/// Returns [`InputError::Lexer`] or [`InputError::Parser`] from the failing stage.
pub fn parse_expression(text: &str) -> Result<Expression, InputError> {
    parse_expression_with_variable(text, DEFAULT_VARIABLE)
}

/// Tokenizes and parses `text`, treating `variable` as the free variable
///
/// # Errors
///
/// Returns [`InputError::Lexer`] or [`InputError::Parser`] from the failing stage.
pub fn parse_expression_with_variable(text: &str, variable: char) -> Result<Expression, InputError> {
    let tokens = tokenize_with_variable(text, variable)?;
    Ok(parse(&tokens)?)
}
