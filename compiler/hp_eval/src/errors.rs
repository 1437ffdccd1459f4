//! Evaluation errors and their constructors.
//!
//! Arithmetic failures arrive as [`DomainError`] and are wrapped unchanged;
//! the remaining variants describe shape problems of the evaluated trees.

use hp_arith::DomainError;
use thiserror::Error;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("the swarm has no objective function")]
    MissingObjective,
    #[error("cannot combine vectors of length {left} and {right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("index {index} is out of range for a vector of length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("{what} of an empty vector")]
    EmptyInput { what: &'static str },
}

#[cold]
pub fn dimension_mismatch(left: usize, right: usize) -> EvalError {
    EvalError::DimensionMismatch { left, right }
}

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::IndexOutOfRange { index, len }
}

#[cold]
pub fn empty_input(what: &'static str) -> EvalError {
    EvalError::EmptyInput { what }
}

#[cold]
pub fn missing_objective() -> EvalError {
    EvalError::MissingObjective
}
