use std::fmt;

use crate::lexer::Number;

/// Immutable expression tree over the single free variable
///
/// Each node owns its children; trees built from equal token sequences are
/// structurally equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    NumberLiteral(Number),
    Variable,
    Prefix {
        operator: PrefixOperator,
        operand: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
    },
    /// Call of a function by name; the name is checked only when evaluated
    FunctionCall {
        name: String,
        argument: Box<Expression>,
    },
}

/// Unary prefix operators kept in the tree (unary plus is elided by the parser)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Expression {
    pub fn number(value: Number) -> Self {
        Expression::NumberLiteral(value)
    }

    pub fn negate(operand: Expression) -> Self {
        Expression::Prefix {
            operator: PrefixOperator::Minus,
            operand: Box::new(operand),
        }
    }

    pub fn infix(left: Expression, operator: InfixOperator, right: Expression) -> Self {
        Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<String>, argument: Expression) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            argument: Box::new(argument),
        }
    }
}

impl PrefixOperator {
    pub fn symbol(self) -> char {
        match self {
            PrefixOperator::Minus => '-',
        }
    }
}

impl InfixOperator {
    pub fn symbol(self) -> char {
        match self {
            InfixOperator::Add => '+',
            InfixOperator::Subtract => '-',
            InfixOperator::Multiply => '*',
            InfixOperator::Divide => '/',
            InfixOperator::Power => '^',
        }
    }

    /// Binding strength, matching the parser's precedence table
    pub fn precedence(self) -> u8 {
        match self {
            InfixOperator::Add | InfixOperator::Subtract => 1,
            InfixOperator::Multiply | InfixOperator::Divide => 2,
            InfixOperator::Power => 3,
        }
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
