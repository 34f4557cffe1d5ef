use crate::expression::{EvaluationError, EvaluatorError};
use crate::parser::parse_expression;
use crate::sampler::{AdaptiveSampler, SamplerConfig, sample};

fn strictly_ascending(x: &[f64]) -> bool {
    x.windows(2).all(|w| matches!(w, [a, b] if a < b))
}

#[test]
fn test_default_grid_spans_minimum_extent() {
    let (x, y) = sample(|_| Ok::<f64, EvaluationError>(1.0), -5.0, 5.0, 201, &[]);
    assert_eq!(x.len(), y.len());
    assert_eq!(x.first(), Some(&-100.0));
    assert_eq!(x.last(), Some(&100.0));
    assert!(strictly_ascending(&x));
    assert!(y.iter().all(|v| *v == 1.0));
}

#[test]
fn test_domain_beyond_minimum_extent() {
    let (x, _) = sample(|v| Ok::<f64, EvaluationError>(v), -500.0, 250.0, 11, &[]);
    assert_eq!(x.first(), Some(&-500.0));
    assert_eq!(x.last(), Some(&250.0));
}

#[test]
fn test_must_include_points_and_zero_are_present() {
    let must_include = [-4.0, 0.123_456, 2.0_f64.sqrt(), f64::NAN];
    let (x, y) = sample(|v| Ok::<f64, EvaluationError>(v * v), -10.0, 10.0, 50, &must_include);
    assert_eq!(x.len(), y.len());
    assert!(strictly_ascending(&x));
    for point in must_include.iter().filter(|p| p.is_finite()) {
        assert!(x.contains(point), "missing {}", point);
    }
    assert!(x.contains(&0.0));
}

#[test]
fn test_zero_points_still_samples_required_values() {
    let (x, y) = sample(|_| Ok::<f64, EvaluationError>(2.0), -1.0, 1.0, 0, &[0.5]);
    assert_eq!(x, vec![0.0, 0.5]);
    assert_eq!(y, vec![2.0, 2.0]);
}

#[test]
fn test_refinement_adds_points_where_function_changes() {
    let config = SamplerConfig {
        tolerance: 0.5,
        refinement_points: 10,
        min_extent: 1.0,
    };
    let sampler = AdaptiveSampler::new(config);
    let step = |v: f64| Ok::<f64, EvaluationError>(if v < 0.25 { 0.0 } else { 1.0 });
    let (x, y) = sampler.sample(step, -1.0, 1.0, 5, &[]);

    // Initial grid: -1, -0.5, 0, 0.5, 1. Only the gap (0, 0.5) jumps.
    assert_eq!(x.len(), 5 + 8);
    assert_eq!(x.len(), y.len());
    assert!(strictly_ascending(&x));
    assert!(x.iter().filter(|v| **v > 0.0 && **v < 0.5).count() == 8);
}

#[test]
fn test_smooth_function_is_not_refined() {
    let config = SamplerConfig {
        tolerance: 10.0,
        ..SamplerConfig::default()
    };
    let (x, _) = AdaptiveSampler::new(config).sample(
        |v| Ok::<f64, EvaluationError>(v / 100.0),
        -100.0,
        100.0,
        101,
        &[],
    );
    assert_eq!(x.len(), 101);
}

#[test]
fn test_failures_become_nan_only_where_undefined() {
    let parsed = parse_expression("sqrt(x)");
    assert!(parsed.is_ok());
    if let Ok(expression) = parsed {
        let (x, y) = sample(expression.evaluator(), -10.0, 10.0, 101, &[]);
        for (xi, yi) in x.iter().zip(&y) {
            if *xi < 0.0 {
                assert!(yi.is_nan(), "expected undefined at {}", xi);
            } else {
                assert!(yi.is_finite(), "expected a value at {}", xi);
            }
        }
    }
}

#[test]
fn test_pole_is_absorbed() {
    let (x, y) = sample(
        |v| {
            if v == 0.0 {
                Err(EvaluationError::Evaluator(EvaluatorError::DivisionByZero))
            } else {
                Ok(1.0 / v)
            }
        },
        -1.0,
        1.0,
        20,
        &[],
    );
    let zero = x.iter().position(|v| *v == 0.0);
    assert!(zero.is_some());
    if let Some(index) = zero {
        assert!(y.get(index).is_some_and(|v| v.is_nan()));
        assert_eq!(y.iter().filter(|v| v.is_nan()).count(), 1);
    }
}
