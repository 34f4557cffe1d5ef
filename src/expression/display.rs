use std::fmt;

use crate::expression::ast::{Expression, InfixOperator};
use crate::lexer::DEFAULT_VARIABLE;

fn binding(expr: &Expression) -> Option<u8> {
    match expr {
        Expression::Infix { operator, .. } => Some(operator.precedence()),
        _ => None,
    }
}

fn needs_parens(child: &Expression, parent: InfixOperator, is_right: bool) -> bool {
    if matches!(child, Expression::Prefix { .. }) {
        return true;
    }
    let Some(child_precedence) = binding(child) else {
        return false;
    };
    let parent_precedence = parent.precedence();
    let right_associative = parent == InfixOperator::Power;
    if is_right != right_associative {
        child_precedence <= parent_precedence
    } else {
        child_precedence < parent_precedence
    }
}

fn write_with_parens(
    f: &mut fmt::Formatter,
    expr: &Expression,
    variable: char,
    need_parens: bool,
) -> fmt::Result {
    if need_parens {
        write!(f, "(")?;
        fmt_expression(f, expr, variable)?;
        write!(f, ")")
    } else {
        fmt_expression(f, expr, variable)
    }
}

fn fmt_expression(f: &mut fmt::Formatter, expr: &Expression, variable: char) -> fmt::Result {
    match expr {
        Expression::NumberLiteral(n) => write!(f, "{}", n),
        Expression::Variable => write!(f, "{}", variable),
        Expression::Prefix { operator, operand } => {
            write!(f, "{}", operator)?;
            fmt_expression(f, operand, variable)
        }
        Expression::Infix {
            left,
            operator,
            right,
        } => {
            write_with_parens(f, left, variable, needs_parens(left, *operator, false))?;
            write!(f, "{}", operator)?;
            write_with_parens(f, right, variable, needs_parens(right, *operator, true))
        }
        Expression::FunctionCall { name, argument } => {
            write!(f, "{}(", name)?;
            fmt_expression(f, argument, variable)?;
            write!(f, ")")
        }
    }
}

/// Rendering of an [`Expression`] with a chosen variable symbol
///
/// Returned by [`Expression::display_with_variable`].
pub struct ExpressionDisplay<'a> {
    expression: &'a Expression,
    variable: char,
}

impl Expression {
    /// Renders the tree writing the variable as `variable`
    ///
    /// The text parses back to the same tree with
    /// [`parse_expression_with_variable`](crate::parser::parse_expression_with_variable)
    /// and the same symbol.
    pub fn display_with_variable(&self, variable: char) -> ExpressionDisplay<'_> {
        ExpressionDisplay {
            expression: self,
            variable,
        }
    }
}

impl fmt::Display for ExpressionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_expression(f, self.expression, self.variable)
    }
}

/// Renders the tree as text that tokenizes and parses back to the same tree
///
/// A prefix minus swallows everything after it when parsed, so a negation
/// inside a binary operation is always wrapped in parentheses. Multiplication
/// is always written explicitly. The variable is written as `x`.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_expression(f, self, DEFAULT_VARIABLE)
    }
}
