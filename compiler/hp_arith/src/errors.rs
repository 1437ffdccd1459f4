//! Arithmetic failures.
//!
//! A [`DomainError`] aborts the evaluation path it occurs on. Loss of
//! precision is not an error; it only raises the advisory flag on the
//! [`EvaluationContext`](crate::EvaluationContext).

use thiserror::Error;

/// Result of an arithmetic operation.
pub type ArithResult<T> = Result<T, DomainError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DomainError {
    // Arithmetic
    #[error("division by zero in {operation}")]
    DivisionByZero { operation: &'static str },
    #[error("{operation} is undefined for {operand}")]
    OutOfDomain {
        operation: &'static str,
        operand: String,
    },
    #[error("{operation} of infinite operands is indeterminate")]
    Indeterminate { operation: &'static str },
    #[error("{operation} produced no number")]
    NotANumber { operation: &'static str },

    // Conversion
    #[error("cannot convert \"{0}\" to a number")]
    Unparsable(String),

    // Backend
    #[error("arbitrary-precision backend failure: {0}")]
    Backend(String),
}

#[cold]
pub fn division_by_zero(operation: &'static str) -> DomainError {
    DomainError::DivisionByZero { operation }
}

#[cold]
pub fn out_of_domain(operation: &'static str, operand: impl ToString) -> DomainError {
    DomainError::OutOfDomain {
        operation,
        operand: operand.to_string(),
    }
}

#[cold]
pub fn indeterminate(operation: &'static str) -> DomainError {
    DomainError::Indeterminate { operation }
}

#[cold]
pub fn not_a_number(operation: &'static str) -> DomainError {
    DomainError::NotANumber { operation }
}
