//! Expression Node Trees
//!
//! Typed trees built by `hp_parse` and walked by `hp_eval`:
//! - [`Operation`], [`PairOp`], [`ConstantEvaluation`]: scalar leaves
//! - [`SpecificFunction`]: vector to vector
//! - [`Function`], [`StandardFunction`]: vector to scalar
//! - [`VectorMergeOperation`]: reduces a vector to a scalar
//! - [`Statistic`], [`SpecificStatistic`]: read a swarm snapshot
//!
//! # Design
//!
//! - **Sum types**: every node category is an enum; evaluation is a `match`,
//!   so a new keyword cannot be added without handling it everywhere.
//! - **Owned children**: `Box`/direct fields, no sharing, no cycles.
//! - **Immutable**: generator leaves hold a pristine [`RandomGenerator`]
//!   which the evaluator clones before drawing.
//!
//! Nodes containing floats store them as [`Float`] (raw bits) so every node
//! is `Eq + Hash` and can key a cache.
//!
//! [`RandomGenerator`]: hp_rng::RandomGenerator

mod float;
mod function;
mod merge;
mod operation;
mod statistic;

pub use float::Float;
pub use function::{
    DirectionMode, Function, SpecificFunction, StandardFunction, DEFAULT_SCALE_MAX,
};
pub use operation::{ConstantEvaluation, Operation, PairOp};
pub use merge::VectorMergeOperation;
pub use statistic::{MergeAxis, SpecificStatistic, Statistic};

#[cfg(test)]
mod tests;
