use std::fmt;

use log::{debug, trace};

use crate::expression::Expression;
use crate::symbolic::algebra::{Canonicalizer, Fraction, Generator, Polynomial};
use crate::symbolic::errors::ConversionError;
use crate::symbolic::expr::SymbolicExpr;
use crate::symbolic::roots::real_roots;

/// Residual allowed between both sides, relative to their rounding scale
const VERIFICATION_TOLERANCE: f64 = 1e-6;
/// Candidates closer than this, relative to their size, are one root
const MERGE_TOLERANCE: f64 = 1e-6;

/// Computer-algebra capability the solver depends on
pub trait SymbolicBackend {
    type Expr: Clone + fmt::Debug + Send + Sync;

    /// # Errors
    ///
    /// Fails when the tree uses something the backend cannot represent.
    fn to_symbolic(&self, expression: &Expression) -> Result<Self::Expr, ConversionError>;

    /// Finite real solutions of `lhs = rhs`, ascending; empty when none are found
    fn solve_equation(&self, lhs: &Self::Expr, rhs: &Self::Expr) -> Vec<f64>;

    fn are_identical(&self, lhs: &Self::Expr, rhs: &Self::Expr) -> bool;
}

/// Configuration for [`AlgebraBackend`]
#[derive(Debug, Clone)]
pub struct AlgebraConfig {
    /// How many nested atoms (`sin(log10(..))`) are inverted while solving.
    pub max_depth: usize,
    /// Largest integer exponent expanded into a polynomial.
    pub max_expanded_power: u32,
}

impl Default for AlgebraConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_expanded_power: 64,
        }
    }
}

/// Built-in backend working on rational functions of the variable and atoms
#[derive(Debug, Clone, Default)]
pub struct AlgebraBackend {
    config: AlgebraConfig,
}

impl AlgebraBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AlgebraConfig) -> Self {
        Self { config }
    }

    fn difference(&self, lhs: &SymbolicExpr, rhs: &SymbolicExpr) -> Option<Fraction> {
        let canonicalizer = Canonicalizer::new(self.config.max_expanded_power);
        let lhs = canonicalizer.canonicalize(lhs)?;
        let rhs = canonicalizer.canonicalize(rhs)?;
        lhs.sub(&rhs)
    }

    fn zeros(&self, polynomial: &Polynomial, depth: usize) -> Vec<f64> {
        if depth > self.config.max_depth {
            debug!("Giving up below nesting depth {}", self.config.max_depth);
            return Vec::new();
        }

        let (common, reduced) = polynomial.split_common_factor();
        let mut roots: Vec<f64> = common
            .iter()
            .flat_map(|generator| self.generator_zeros(generator, 0.0, depth))
            .collect();

        let generators = reduced.generators();
        match generators.len() {
            0 => {}
            1 => {
                if let Some(generator) = generators.first() {
                    for value in real_roots(&reduced.coefficients(generator)) {
                        roots.extend(self.generator_zeros(generator, value, depth));
                    }
                }
            }
            n => debug!("Equation mixes {} independent terms, not solvable here", n),
        }
        roots
    }

    /// Values of the variable at which `generator` equals `value`
    fn generator_zeros(&self, generator: &Generator, value: f64, depth: usize) -> Vec<f64> {
        match generator {
            Generator::Variable => vec![value],
            Generator::Atom(atom) => atom
                .invert(value)
                .into_iter()
                .filter_map(|target| atom.inner().sub(&Fraction::constant(target)))
                .flat_map(|difference| self.zeros(difference.numerator(), depth + 1))
                .collect(),
        }
    }
}

/// Whether both sides are equal at `x` up to their own rounding error
///
/// The evaluation scale vanishes together with the value near a flat root,
/// so points merely close to a root of high multiplicity are rejected.
fn both_sides_agree(lhs: &SymbolicExpr, rhs: &SymbolicExpr, x: f64) -> bool {
    match (lhs.evaluate_with_scale(x), rhs.evaluate_with_scale(x)) {
        (Some((a, scale_a)), Some((b, scale_b))) => {
            (a - b).abs() <= VERIFICATION_TOLERANCE * (scale_a + scale_b)
        }
        _ => false,
    }
}

fn same_root(a: f64, b: f64) -> bool {
    (a - b).abs() <= MERGE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

impl SymbolicBackend for AlgebraBackend {
    type Expr = SymbolicExpr;

    fn to_symbolic(&self, expression: &Expression) -> Result<SymbolicExpr, ConversionError> {
        SymbolicExpr::from_expression(expression)
    }

    fn solve_equation(&self, lhs: &SymbolicExpr, rhs: &SymbolicExpr) -> Vec<f64> {
        let Some(difference) = self.difference(lhs, rhs) else {
            debug!("No canonical form for {} = {}", lhs, rhs);
            return Vec::new();
        };
        trace!("Solving numerator {} = 0", difference.numerator());

        let mut roots: Vec<f64> = self
            .zeros(difference.numerator(), 0)
            .into_iter()
            .filter(|x| both_sides_agree(lhs, rhs, *x))
            .map(|x| if x == 0.0 { 0.0 } else { x })
            .collect();
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|a, b| same_root(*a, *b));
        roots
    }

    fn are_identical(&self, lhs: &SymbolicExpr, rhs: &SymbolicExpr) -> bool {
        match self.difference(lhs, rhs) {
            Some(difference) => difference.numerator().is_zero(),
            None => lhs == rhs,
        }
    }
}
