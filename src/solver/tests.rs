use crate::lexer::LexerError;
use crate::parser::{InputError, ParserError};
use crate::solver::{Solution, Solver, SolverConfig, SolverError};
use crate::symbolic::{ConversionError, SymbolicBackend};

fn assert_roots(solution: &Result<Solution, SolverError>, expected: &[f64]) {
    assert!(solution.is_ok(), "solve failed: {:?}", solution);
    if let Ok(solution) = solution {
        assert!(!solution.identical);
        assert_eq!(solution.roots.len(), expected.len(), "{:?}", solution.roots);
        for (root, want) in solution.roots.iter().zip(expected) {
            assert!((root - want).abs() < 1e-4, "got {}, expected {}", root, want);
        }
    }
}

#[test]
fn test_linear_intersection() {
    let solver = Solver::default();
    assert_roots(&solver.solve("2x+1", "x-3"), &[-4.0]);
}

#[test]
fn test_quadratic_intersection() {
    let solver = Solver::default();
    assert_roots(&solver.solve("x^2", "4"), &[-2.0, 2.0]);
}

#[test]
fn test_logarithm_intersection() {
    let solver = Solver::default();
    assert_roots(&solver.solve("log10(x)", "1"), &[10.0]);
}

#[test]
fn test_cubic_intersection() {
    let solver = Solver::default();
    assert_roots(&solver.solve("x^3-5*x", "0"), &[-2.2361, 0.0, 2.2361]);
}

#[test]
fn test_repeated_root_is_reported_once() {
    let solver = Solver::default();
    assert_roots(&solver.solve("(x+1)^24", "0"), &[-1.0]);
    assert_roots(&solver.solve("x^100", "1"), &[-1.0, 1.0]);
}

#[test]
fn test_no_real_intersection() {
    let solver = Solver::default();
    assert_eq!(
        solver.solve("x^2+4", "0"),
        Ok(Solution {
            roots: Vec::new(),
            identical: false
        })
    );
}

#[test]
fn test_identical_expressions() {
    let solver = Solver::default();
    assert_eq!(
        solver.solve("x^2+3", "--3+x^2"),
        Ok(Solution {
            roots: Vec::new(),
            identical: true
        })
    );
}

#[test]
fn test_errors_from_either_side_propagate() {
    let solver = Solver::default();
    assert_eq!(
        solver.solve("3x,", "x"),
        Err(SolverError::Input(InputError::Lexer(
            LexerError::InvalidCharacter { position: 3 }
        )))
    );
    assert_eq!(
        solver.solve("x", "5 +"),
        Err(SolverError::Input(InputError::Parser(ParserError::EndOfInput)))
    );
    assert_eq!(
        solver.solve("foo(x)", "1"),
        Err(SolverError::Conversion(ConversionError::UnsupportedFunction(
            "foo".to_string()
        )))
    );
}

#[test]
fn test_error_messages_are_not_wrapped() {
    let solver = Solver::default();
    let result = solver.solve("x", "sqrt");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.to_string(), "ParserError: Expected left parenthesis");
    }
}

#[test]
fn test_custom_variable_symbol() {
    let solver = Solver::new(SolverConfig {
        variable_symbol: 't',
    });
    assert_eq!(solver.config().variable_symbol, 't');
    assert_roots(&solver.solve("2t", "6"), &[3.0]);
}

#[test]
fn test_solver_with_custom_backend() {
    struct Constant;

    impl SymbolicBackend for Constant {
        type Expr = ();

        fn to_symbolic(
            &self,
            _expression: &crate::expression::Expression,
        ) -> Result<(), ConversionError> {
            Ok(())
        }

        fn solve_equation(&self, _lhs: &(), _rhs: &()) -> Vec<f64> {
            vec![1.5]
        }

        fn are_identical(&self, _lhs: &(), _rhs: &()) -> bool {
            false
        }
    }

    let solver = Solver::with_backend(SolverConfig::default(), Constant);
    assert_roots(&solver.solve("anything(x)", "x"), &[1.5]);
}
