//! Parse error types.
//!
//! - [`ParseErrorKind`]: what went wrong, for matching in callers and tests
//! - [`ParseError`]: kind, message, token position and optional context
//! - [`ErrorContext`]: Elm-style "while parsing X" descriptions
//! - [`Expected`], [`ExpectedSet`]: what a failed rule would have accepted

use std::fmt;

use thiserror::Error;

/// Context describing what was being parsed when an error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    Operation,
    RandomGenerator,
    SpecificFunction,
    Function,
    StandardFunction,
    MergeOperation,
    SpecificStatistic,
    Statistic,
}

impl ErrorContext {
    /// Get a human-readable description of this context.
    ///
    /// Returns a phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::Operation => "an operation",
            Self::RandomGenerator => "a random generator",
            Self::SpecificFunction => "a specific function",
            Self::Function => "a function",
            Self::StandardFunction => "a standard function",
            Self::MergeOperation => "a vector merge operation",
            Self::SpecificStatistic => "a specific statistic",
            Self::Statistic => "a statistic",
        }
    }
}

/// A grammar category a rule can expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Expected {
    Operation,
    PairOperation,
    Constant,
    RandomGenerator,
    SpecificFunction,
    Function,
    StandardFunctionName,
    DirectionMode,
    MergeOperation,
    MergeAxis,
    SpecificStatistic,
    Statistic,
    Number,
    Integer,
}

impl Expected {
    const ALL: [Expected; 14] = [
        Expected::Operation,
        Expected::PairOperation,
        Expected::Constant,
        Expected::RandomGenerator,
        Expected::SpecificFunction,
        Expected::Function,
        Expected::StandardFunctionName,
        Expected::DirectionMode,
        Expected::MergeOperation,
        Expected::MergeAxis,
        Expected::SpecificStatistic,
        Expected::Statistic,
        Expected::Number,
        Expected::Integer,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Expected::Operation => "an operation",
            Expected::PairOperation => "one of `+`, `-`, `*`, `/`, `min`, `max`",
            Expected::Constant => "a constant",
            Expected::RandomGenerator => "a random generator",
            Expected::SpecificFunction => "a specific function",
            Expected::Function => "a function",
            Expected::StandardFunctionName => "a standard function name",
            Expected::DirectionMode => {
                "`firstDimension`, `diagonalDirection` or `randomDirection`"
            }
            Expected::MergeOperation => "a vector merge operation",
            Expected::MergeAxis => "`particle` or `dimension`",
            Expected::SpecificStatistic => "a specific statistic",
            Expected::Statistic => "a statistic",
            Expected::Number => "a number",
            Expected::Integer => "an integer",
        }
    }
}

/// A set of [`Expected`] categories, merged across failed alternatives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpectedSet(u16);

impl ExpectedSet {
    /// Create an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn single(expected: Expected) -> Self {
        Self(1 << expected as u8)
    }

    #[inline]
    #[must_use]
    pub const fn with(self, expected: Expected) -> Self {
        Self(self.0 | (1 << expected as u8))
    }

    #[inline]
    pub fn union_with(&mut self, other: &ExpectedSet) {
        self.0 |= other.0;
    }

    #[inline]
    pub const fn contains(self, expected: Expected) -> bool {
        self.0 & (1 << expected as u8) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Expected> {
        Expected::ALL.into_iter().filter(move |&e| self.contains(e))
    }

    /// Format as "a, b or c".
    pub fn format_expected(self) -> String {
        let descriptions: Vec<&str> = self.iter().map(Expected::description).collect();
        match descriptions.split_last() {
            None => "something else".to_string(),
            Some((last, [])) => (*last).to_string(),
            Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of command")]
    UnexpectedEnd,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unknown standard function")]
    UnknownStandardFunction,
    #[error("token not allowed here")]
    ForbiddenToken,
    #[error("command has trailing tokens")]
    TrailingTokens,
}

/// A parse failure at a token position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Index of the offending token (the token count at the end).
    pub position: usize,
    /// Optional "while parsing ..." context.
    pub context: Option<String>,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, position: usize) -> Self {
        ParseError {
            kind,
            message: message.into(),
            position,
            context: None,
        }
    }

    /// `found` is the token at `position`, or `None` at the end of the
    /// command.
    #[cold]
    pub fn expected(expected: ExpectedSet, position: usize, found: Option<&str>) -> Self {
        let wanted = expected.format_expected();
        match found {
            Some(token) => ParseError::new(
                ParseErrorKind::UnexpectedToken,
                format!("expected {wanted}, found `{token}`"),
                position,
            ),
            None => ParseError::new(
                ParseErrorKind::UnexpectedEnd,
                format!("expected {wanted}, found end of command"),
                position,
            ),
        }
    }

    #[cold]
    pub fn unknown_standard_function(name: &str, position: usize) -> Self {
        ParseError::new(
            ParseErrorKind::UnknownStandardFunction,
            format!("unknown standard function `{name}`"),
            position,
        )
    }

    #[cold]
    pub fn forbidden_in_function(token: &str, position: usize) -> Self {
        ParseError::new(
            ParseErrorKind::ForbiddenToken,
            format!("{token} is an invalid option for function."),
            position,
        )
    }

    #[cold]
    pub fn trailing_tokens(position: usize, found: &str) -> Self {
        ParseError::new(
            ParseErrorKind::TrailingTokens,
            format!("unexpected `{found}` after a complete command"),
            position,
        )
    }

    /// Add context for better error messages.
    ///
    /// Keeps the innermost context if one is already set.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        if self.context.is_none() {
            self.context = Some(format!("while parsing {}", context.description()));
        }
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at token {}", self.message, self.position)?;
        if let Some(context) = &self.context {
            write!(f, " {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
