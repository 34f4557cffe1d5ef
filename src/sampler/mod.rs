//! Curvature-adaptive sampling of a function for plotting

mod core;

pub use self::core::{AdaptiveSampler, SamplerConfig, sample};

#[cfg(test)]
mod tests;
