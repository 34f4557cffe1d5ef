use log::{debug, info};

use crate::expression::Expression;
use crate::lexer::DEFAULT_VARIABLE;
use crate::parser::parse_expression_with_variable;
use crate::solver::errors::SolverError;
use crate::symbolic::{AlgebraBackend, ConversionError, SymbolicBackend};

/// Configuration for reading equations
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub variable_symbol: char,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            variable_symbol: DEFAULT_VARIABLE,
        }
    }
}

/// Outcome of intersecting two expressions
///
/// When `identical` is set every real number is a solution and `roots` is left empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solution {
    pub roots: Vec<f64>,
    pub identical: bool,
}

/// Finds where two expressions of the free variable are equal
pub struct Solver<B: SymbolicBackend = AlgebraBackend> {
    config: SolverConfig,
    backend: B,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self::with_backend(config, AlgebraBackend::default())
    }
}

impl<B: SymbolicBackend> Solver<B> {
    pub fn with_backend(config: SolverConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Get a reference to the solver configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Parses both texts and solves `lhs = rhs`
    ///
    /// # Errors
    ///
    /// Returns the lexer or parser error of the first input that fails, or a
    /// conversion error when a tree uses a function the backend lacks.
    pub fn solve(&self, lhs: &str, rhs: &str) -> Result<Solution, SolverError> {
        let variable = self.config.variable_symbol;
        let lhs = parse_expression_with_variable(lhs, variable)?;
        let rhs = parse_expression_with_variable(rhs, variable)?;
        Ok(self.solve_trees(&lhs, &rhs)?)
    }

    /// Solves `lhs = rhs` for already parsed trees
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] when a tree has no symbolic form.
    pub fn solve_trees(&self, lhs: &Expression, rhs: &Expression) -> Result<Solution, ConversionError> {
        let variable = self.config.variable_symbol;
        info!(
            "Solving {} = {}",
            lhs.display_with_variable(variable),
            rhs.display_with_variable(variable)
        );

        let lhs = self.backend.to_symbolic(lhs)?;
        let rhs = self.backend.to_symbolic(rhs)?;

        if self.backend.are_identical(&lhs, &rhs) {
            info!("Expressions are identical");
            return Ok(Solution {
                roots: Vec::new(),
                identical: true,
            });
        }

        let roots = self.backend.solve_equation(&lhs, &rhs);
        if roots.is_empty() {
            debug!("No real roots found");
        } else {
            info!("Found {} real roots", roots.len());
        }

        Ok(Solution {
            roots,
            identical: false,
        })
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}
