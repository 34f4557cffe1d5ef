use log::debug;

use crate::expression::ast::{Expression, InfixOperator, PrefixOperator};
use crate::expression::errors::{EvaluationError, EvaluatorError, UnknownFunctionError};

/// Names accepted by [`Expression::evaluate`] in function calls
pub const SUPPORTED_FUNCTIONS: [&str; 4] = ["sqrt", "log10", "sin", "cos"];

fn apply_infix(operator: InfixOperator, left: f64, right: f64) -> Result<f64, EvaluatorError> {
    match operator {
        InfixOperator::Add => Ok(left + right),
        InfixOperator::Subtract => Ok(left - right),
        InfixOperator::Multiply => Ok(left * right),
        InfixOperator::Divide => {
            if right == 0.0 {
                debug!("Division by zero attempted: {} / {}", left, right);
                Err(EvaluatorError::DivisionByZero)
            } else {
                Ok(left / right)
            }
        }
        // Negative bases with fractional exponents produce NaN, which is left as is
        InfixOperator::Power => Ok(left.powf(right)),
    }
}

fn apply_function(name: &str, argument: f64) -> Result<f64, EvaluationError> {
    match name {
        "sqrt" if argument < 0.0 => Err(EvaluatorError::NegativeSqrt.into()),
        "sqrt" => Ok(argument.sqrt()),
        "log10" if argument <= 0.0 => Err(EvaluatorError::NonPositiveLog.into()),
        "log10" => Ok(argument.log10()),
        "sin" => Ok(argument.sin()),
        "cos" => Ok(argument.cos()),
        _ => Err(UnknownFunctionError {
            name: name.to_string(),
        }
        .into()),
    }
}

impl Expression {
    /// Evaluates the tree with the free variable bound to `x`
    ///
    /// # Errors
    ///
    /// Returns an error when encountering:
    /// - Division by an exact zero
    /// - Square root of a negative number
    /// - Base-10 logarithm of a non-positive number
    /// - A function name outside [`SUPPORTED_FUNCTIONS`]
    pub fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        let result = match self {
            Expression::NumberLiteral(n) => Ok(n.value()),
            Expression::Variable => Ok(x),
            Expression::Prefix { operator, operand } => {
                let value = operand.evaluate(x)?;
                match operator {
                    PrefixOperator::Minus => Ok(-value),
                }
            }
            Expression::Infix {
                left,
                operator,
                right,
            } => {
                let left = left.evaluate(x)?;
                let right = right.evaluate(x)?;
                apply_infix(*operator, left, right).map_err(EvaluationError::from)
            }
            Expression::FunctionCall { name, argument } => {
                let value = argument.evaluate(x)?;
                apply_function(name, value)
            }
        };

        if let Err(e) = &result {
            debug!("Evaluation of {} at x = {} failed: {}", self, x, e);
        }

        result
    }

    /// Returns a reusable closure evaluating this tree at a given point
    pub fn evaluator(&self) -> impl Fn(f64) -> Result<f64, EvaluationError> + Sync + '_ {
        move |x| self.evaluate(x)
    }
}
