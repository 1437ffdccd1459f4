//! HP Eval - Evaluator for objective functions and swarm statistics.
//!
//! Walks the node trees of `hp_ir` against an
//! [`EvaluationContext`](hp_arith::EvaluationContext):
//! - [`FunctionEvaluator`]: objective functions, bounds handling and the
//!   distance to the one-dimensional local optimum
//! - [`StatisticEvaluator`]: statistics over a [`Swarm`] snapshot
//! - [`evaluate_specific_function`]: element-wise vector functions
//! - [`evaluate_operation`], [`evaluate_pair`], [`evaluate_constant`]:
//!   scalar leaves
//!
//! # Caching
//!
//! The scaled, rotated and random quadratic functions need per-dimension
//! data (scales, matrices, directions). It is computed on first use for each
//! `(function, dimensions, precision)` and kept behind a `parking_lot::Mutex`
//! in the evaluator, so evaluation takes `&self`.

mod bounds;
mod cache;
mod catalogue;
mod distance;
pub mod errors;
mod function;
mod operators;
mod statistic;

pub use bounds::{BoundOverride, OutOfBoundsBehavior};
pub use errors::{EvalError, EvalResult};
pub use function::{evaluate_specific_function, FunctionEvaluator};
pub use operators::{evaluate_constant, evaluate_operation, evaluate_pair};
pub use statistic::{StatisticEvaluator, Swarm};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
