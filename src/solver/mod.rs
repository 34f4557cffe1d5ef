mod core;
mod errors;

pub use self::core::{Solution, Solver, SolverConfig};
pub use errors::SolverError;

#[cfg(test)]
mod tests;
