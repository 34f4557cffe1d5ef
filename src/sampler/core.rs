use log::{debug, info};
use rayon::prelude::*;

use crate::utils::{linspace, sorted_union};

/// Configuration for adaptive sampling
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Change in `y` between neighbours above which the gap is refined.
    pub tolerance: f64,
    /// Points inserted across each refined gap, endpoints included.
    pub refinement_points: usize,
    /// The grid always spans at least `[-min_extent, min_extent]`.
    pub min_extent: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            refinement_points: 10,
            min_extent: 100.0,
        }
    }
}

/// Samples a function densely where it changes quickly
#[derive(Debug, Clone, Default)]
pub struct AdaptiveSampler {
    config: SamplerConfig,
}

impl AdaptiveSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the sampler configuration
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Evaluates `evaluate` over a grid refined once around steep changes
    ///
    /// Returns `x` strictly ascending and `y` of the same length. A point
    /// where `evaluate` fails gets `NaN`. The grid contains every finite
    /// value of `must_include` and `0`.
    pub fn sample<F, E>(
        &self,
        evaluate: F,
        x_min: f64,
        x_max: f64,
        point_count: usize,
        must_include: &[f64],
    ) -> (Vec<f64>, Vec<f64>)
    where
        F: Fn(f64) -> Result<f64, E> + Sync,
    {
        let extent = self.config.min_extent.abs();
        let low = [x_min, x_max, -extent]
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(f64::INFINITY, f64::min);
        let high = [x_min, x_max, extent]
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);

        let x = sorted_union(
            linspace(low, high, point_count)
                .into_iter()
                .chain(must_include.iter().copied())
                .chain(std::iter::once(0.0)),
        );
        let y = evaluate_all(&evaluate, &x);

        let refinements: Vec<f64> = x
            .windows(2)
            .zip(y.windows(2))
            .filter_map(|(xs, ys)| match (xs, ys) {
                ([x0, x1], [y0, y1]) if (y1 - y0).abs() > self.config.tolerance => {
                    Some(linspace(*x0, *x1, self.config.refinement_points))
                }
                _ => None,
            })
            .flatten()
            .collect();

        if refinements.is_empty() {
            info!("Sampled {} points over [{}, {}]", x.len(), low, high);
            return (x, y);
        }

        debug!("Refining with {} extra points", refinements.len());
        let x = sorted_union(x.into_iter().chain(refinements));
        let y = evaluate_all(&evaluate, &x);
        info!("Sampled {} points over [{}, {}]", x.len(), low, high);
        (x, y)
    }
}

fn evaluate_all<F, E>(evaluate: &F, x: &[f64]) -> Vec<f64>
where
    F: Fn(f64) -> Result<f64, E> + Sync,
{
    let y: Vec<f64> = x
        .par_iter()
        .map(|&value| evaluate(value).unwrap_or(f64::NAN))
        .collect();
    let undefined = y.iter().filter(|v| v.is_nan()).count();
    if undefined > 0 {
        debug!("{} of {} points are undefined", undefined, y.len());
    }
    y
}

/// Samples with the default configuration
///
/// See [`AdaptiveSampler::sample`].
pub fn sample<F, E>(
    evaluate: F,
    x_min: f64,
    x_max: f64,
    point_count: usize,
    must_include: &[f64],
) -> (Vec<f64>, Vec<f64>)
where
    F: Fn(f64) -> Result<f64, E> + Sync,
{
    AdaptiveSampler::default().sample(evaluate, x_min, x_max, point_count, must_include)
}
