//! Symbolic representation of expression trees and equation solving over the reals

mod algebra;
mod backend;
mod errors;
mod expr;
mod roots;

pub use backend::{AlgebraBackend, AlgebraConfig, SymbolicBackend};
pub use errors::ConversionError;
pub use expr::{SymbolicExpr, SymbolicFunction};
