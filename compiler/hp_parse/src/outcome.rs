//! Three-way parse outcome.
//!
//! | Variant | Cursor | Meaning |
//! |---------|--------|---------|
//! | `Ok` | advanced past the rule | the rule matched |
//! | `NoMatch` | unchanged | this alternative does not apply, try the next |
//! | `Malformed` | anywhere | the keyword matched but the rest is broken |
//!
//! `NoMatch` is the soft failure that drives backtracking; `Malformed` is
//! the hard failure that stops it. A rule that consumed its keyword turns
//! a `NoMatch` of a mandatory part into `Malformed` with [`require!`].
//!
//! ## Usage
//!
//! ```ignore
//! fn parse_function(&mut self) -> ParseOutcome<Function> {
//!     one_of!(self,
//!         self.operated_function(),
//!         self.standard_function(),
//!         self.combined_function(),
//!     )
//! }
//! ```

use crate::error::{ErrorContext, ExpectedSet, ParseError};

/// Result of one grammar rule.
#[derive(Debug)]
pub enum ParseOutcome<T> {
    /// The rule matched and produced a value.
    Ok {
        value: T,
    },

    /// The rule does not apply here.
    ///
    /// The cursor is back where the rule started.
    NoMatch {
        /// What would have been accepted.
        expected: ExpectedSet,
        /// Token position the rule was tried at.
        position: usize,
    },

    /// The rule committed and then failed. Not retried.
    Malformed {
        error: ParseError,
    },
}

impl<T> ParseOutcome<T> {
    // === Constructors ===

    #[inline]
    pub fn matched(value: T) -> Self {
        Self::Ok { value }
    }

    #[inline]
    pub fn no_match(expected: ExpectedSet, position: usize) -> Self {
        Self::NoMatch { expected, position }
    }

    #[inline]
    pub fn malformed(error: ParseError) -> Self {
        Self::Malformed { error }
    }

    // === Predicates ===

    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Returns `true` for the soft failure that allows trying alternatives.
    #[inline]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }

    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    // === Transformations ===

    /// Map the success value, preserving the variant.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ParseOutcome<U> {
        match self {
            Self::Ok { value } => ParseOutcome::Ok { value: f(value) },
            Self::NoMatch { expected, position } => ParseOutcome::NoMatch { expected, position },
            Self::Malformed { error } => ParseOutcome::Malformed { error },
        }
    }

    /// Try an alternative if this failed softly.
    ///
    /// The caller is responsible for restoring the cursor; `one_of!` does so.
    #[must_use]
    pub fn or_else<F: FnOnce() -> ParseOutcome<T>>(self, f: F) -> ParseOutcome<T> {
        match self {
            Self::NoMatch { .. } => f(),
            Self::Ok { .. } | Self::Malformed { .. } => self,
        }
    }

    /// Attach "while parsing {context}" to hard errors.
    ///
    /// `NoMatch` is left alone; it is used for backtracking and shouldn't
    /// accumulate context.
    #[must_use]
    pub fn with_error_context(self, context: ErrorContext) -> Self {
        match self {
            Self::Malformed { error } => Self::Malformed {
                error: error.with_context(context),
            },
            other => other,
        }
    }

    /// Convert to Option, discarding error information.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok { value } => Some(value),
            Self::NoMatch { .. } | Self::Malformed { .. } => None,
        }
    }
}

// === Backtracking Macros ===

/// Try alternatives in order, restoring the cursor between them.
///
/// - `Ok`: return it
/// - `Malformed`: return it (committed, no backtracking)
/// - `NoMatch`: merge the expected set and try the next alternative
///
/// If every alternative fails softly the merged `NoMatch` is returned.
/// The parser (`$self`) must have `snapshot()` and `restore()`.
#[macro_export]
macro_rules! one_of {
    ($self:expr, $($alternative:expr),+ $(,)?) => {{
        let original = $self.snapshot();
        let mut accumulated = $crate::ExpectedSet::new();
        let mut last_position = original.position();
        let mut outcome = None;
        $(
            if outcome.is_none() {
                match $alternative {
                    $crate::ParseOutcome::NoMatch { expected, position } => {
                        accumulated.union_with(&expected);
                        last_position = last_position.max(position);
                        $self.restore(original);
                    }
                    decided => outcome = Some(decided),
                }
            }
        )+
        outcome.unwrap_or($crate::ParseOutcome::NoMatch {
            expected: accumulated,
            position: last_position,
        })
    }};
}

/// Require a successful parse, upgrading `NoMatch` to `Malformed`.
///
/// Use after a rule has committed (consumed its keyword). The context is
/// attached to the error built from the soft failure.
#[macro_export]
macro_rules! require {
    ($self:expr, $parser:expr, $context:expr) => {{
        match $parser {
            $crate::ParseOutcome::Ok { value } => value,
            $crate::ParseOutcome::Malformed { error } => {
                return $crate::ParseOutcome::Malformed { error };
            }
            $crate::ParseOutcome::NoMatch { expected, position } => {
                let error = $self.expected_error(expected, position).with_context($context);
                return $crate::ParseOutcome::Malformed { error };
            }
        }
    }};
}

/// Sequence a parse, returning early on any failure unchanged.
#[macro_export]
macro_rules! chain {
    ($parser:expr) => {{
        match $parser {
            $crate::ParseOutcome::Ok { value } => value,
            $crate::ParseOutcome::NoMatch { expected, position } => {
                return $crate::ParseOutcome::NoMatch { expected, position };
            }
            $crate::ParseOutcome::Malformed { error } => {
                return $crate::ParseOutcome::Malformed { error };
            }
        }
    }};
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
