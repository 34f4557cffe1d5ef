use std::f64::consts::{LN_10, PI};
use std::fmt;

use crate::expression::{Expression, InfixOperator, PrefixOperator};
use crate::symbolic::errors::ConversionError;

/// Functions with a symbolic counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolicFunction {
    Sqrt,
    Log10,
    Sin,
    Cos,
}

impl SymbolicFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(SymbolicFunction::Sqrt),
            "log10" => Some(SymbolicFunction::Log10),
            "sin" => Some(SymbolicFunction::Sin),
            "cos" => Some(SymbolicFunction::Cos),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SymbolicFunction::Sqrt => "sqrt",
            SymbolicFunction::Log10 => "log10",
            SymbolicFunction::Sin => "sin",
            SymbolicFunction::Cos => "cos",
        }
    }

    /// Real value of the function, `None` outside its domain
    pub fn apply(self, value: f64) -> Option<f64> {
        match self {
            SymbolicFunction::Sqrt if value < 0.0 => None,
            SymbolicFunction::Sqrt => Some(value.sqrt()),
            SymbolicFunction::Log10 if value <= 0.0 => None,
            SymbolicFunction::Log10 => Some(value.log10()),
            SymbolicFunction::Sin => Some(value.sin()),
            SymbolicFunction::Cos => Some(value.cos()),
        }
    }

    /// Real arguments at which the function takes `value`
    ///
    /// Periodic functions return their solutions in `[0, 2π)` only.
    pub fn inverse(self, value: f64) -> Vec<f64> {
        match self {
            SymbolicFunction::Sqrt if value >= 0.0 => vec![value * value],
            SymbolicFunction::Sqrt => Vec::new(),
            SymbolicFunction::Log10 => vec![10_f64.powf(value)],
            SymbolicFunction::Sin if value.abs() <= 1.0 => {
                let principal = value.asin();
                vec![principal.rem_euclid(2.0 * PI), PI - principal]
            }
            SymbolicFunction::Cos if value.abs() <= 1.0 => {
                let principal = value.acos();
                vec![principal, 2.0 * PI - principal]
            }
            SymbolicFunction::Sin | SymbolicFunction::Cos => Vec::new(),
        }
    }
}

impl fmt::Display for SymbolicFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Expression over one real variable built from the symbolic primitives
///
/// Subtraction, division and negation have no node of their own; they are
/// expressed with addition, multiplication and powers of `-1`.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicExpr {
    Constant(f64),
    Variable,
    Add(Box<SymbolicExpr>, Box<SymbolicExpr>),
    Mul(Box<SymbolicExpr>, Box<SymbolicExpr>),
    Pow(Box<SymbolicExpr>, Box<SymbolicExpr>),
    Apply(SymbolicFunction, Box<SymbolicExpr>),
}

impl SymbolicExpr {
    /// Converts a parsed tree, rejecting function names without a counterpart
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::UnsupportedFunction`] for unknown names.
    pub fn from_expression(expression: &Expression) -> Result<Self, ConversionError> {
        let converted = match expression {
            Expression::NumberLiteral(n) => SymbolicExpr::Constant(n.value()),
            Expression::Variable => SymbolicExpr::Variable,
            Expression::Prefix { operator, operand } => match operator {
                PrefixOperator::Minus => SymbolicExpr::Mul(
                    Box::new(SymbolicExpr::Constant(-1.0)),
                    Box::new(Self::from_expression(operand)?),
                ),
            },
            Expression::Infix {
                left,
                operator,
                right,
            } => {
                let left = Box::new(Self::from_expression(left)?);
                let right = Self::from_expression(right)?;
                match operator {
                    InfixOperator::Add => SymbolicExpr::Add(left, Box::new(right)),
                    InfixOperator::Subtract => SymbolicExpr::Add(
                        left,
                        Box::new(SymbolicExpr::Mul(
                            Box::new(SymbolicExpr::Constant(-1.0)),
                            Box::new(right),
                        )),
                    ),
                    InfixOperator::Multiply => SymbolicExpr::Mul(left, Box::new(right)),
                    InfixOperator::Divide => SymbolicExpr::Mul(
                        left,
                        Box::new(SymbolicExpr::Pow(
                            Box::new(right),
                            Box::new(SymbolicExpr::Constant(-1.0)),
                        )),
                    ),
                    InfixOperator::Power => SymbolicExpr::Pow(left, Box::new(right)),
                }
            }
            Expression::FunctionCall { name, argument } => {
                let function = SymbolicFunction::from_name(name)
                    .ok_or_else(|| ConversionError::UnsupportedFunction(name.clone()))?;
                SymbolicExpr::Apply(function, Box::new(Self::from_expression(argument)?))
            }
        };
        Ok(converted)
    }

    /// Real value at `x`, `None` where undefined or not finite
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        let value = match self {
            SymbolicExpr::Constant(c) => *c,
            SymbolicExpr::Variable => x,
            SymbolicExpr::Add(a, b) => a.evaluate(x)? + b.evaluate(x)?,
            SymbolicExpr::Mul(a, b) => a.evaluate(x)? * b.evaluate(x)?,
            SymbolicExpr::Pow(a, b) => a.evaluate(x)?.powf(b.evaluate(x)?),
            SymbolicExpr::Apply(function, argument) => function.apply(argument.evaluate(x)?)?,
        };
        value.is_finite().then_some(value)
    }

    /// Value at `x` with the scale its rounding error grows with
    ///
    /// The scale is the first-order sensitivity of the result to relative
    /// perturbations of every leaf, plus the magnitude of the result itself.
    /// Near a root of high multiplicity it shrinks with the value, so a
    /// residual can be judged without an absolute floor.
    pub(crate) fn evaluate_with_scale(&self, x: f64) -> Option<(f64, f64)> {
        let (value, propagated) = match self {
            SymbolicExpr::Constant(c) => (*c, 0.0),
            SymbolicExpr::Variable => (x, 0.0),
            SymbolicExpr::Add(a, b) => {
                let ((a, sa), (b, sb)) = (a.evaluate_with_scale(x)?, b.evaluate_with_scale(x)?);
                (a + b, sa + sb)
            }
            SymbolicExpr::Mul(a, b) => {
                let ((a, sa), (b, sb)) = (a.evaluate_with_scale(x)?, b.evaluate_with_scale(x)?);
                (a * b, sa * b.abs() + a.abs() * sb)
            }
            SymbolicExpr::Pow(a, b) => {
                let ((a, sa), (b, sb)) = (a.evaluate_with_scale(x)?, b.evaluate_with_scale(x)?);
                let value = a.powf(b);
                let through_base = if a != 0.0 {
                    (b * value / a).abs() * sa
                } else if b > 1.0 {
                    0.0
                } else {
                    sa.powf(b)
                };
                let through_exponent = if sb > 0.0 && a > 0.0 {
                    (value * a.ln()).abs() * sb
                } else {
                    0.0
                };
                (value, through_base + through_exponent)
            }
            SymbolicExpr::Apply(function, argument) => {
                let (a, sa) = argument.evaluate_with_scale(x)?;
                let value = function.apply(a)?;
                let slope = match function {
                    SymbolicFunction::Sqrt if value > 0.0 => (2.0 * value).recip(),
                    SymbolicFunction::Sqrt => return Some((value, sa.sqrt())),
                    SymbolicFunction::Log10 => (a * LN_10).recip().abs(),
                    SymbolicFunction::Sin => a.cos().abs(),
                    SymbolicFunction::Cos => a.sin().abs(),
                };
                (value, slope * sa)
            }
        };
        value
            .is_finite()
            .then_some((value, value.abs() + propagated))
    }
}

impl fmt::Display for SymbolicExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SymbolicExpr::Constant(c) => write!(f, "{}", c),
            SymbolicExpr::Variable => write!(f, "x"),
            SymbolicExpr::Add(a, b) => write!(f, "({} + {})", a, b),
            SymbolicExpr::Mul(a, b) => write!(f, "({} * {})", a, b),
            SymbolicExpr::Pow(a, b) => write!(f, "{}^{}", a, b),
            SymbolicExpr::Apply(function, argument) => write!(f, "{}({})", function, argument),
        }
    }
}
