//! Recursive descent parser for configuration commands.
//!
//! A command is a list of whitespace-separated tokens such as
//! `merge sum pow 2 identity`. Each grammar rule is a `Parser` method
//! returning a [`ParseOutcome`]; alternatives are tried in a fixed priority
//! order with `one_of!`, and a rule that matched its keyword reports a broken
//! remainder as `Malformed` instead of letting the caller try something else.
//!
//! The entry points report how many tokens the node took ([`Parsed`]); the
//! `*_command` variants additionally reject trailing tokens.
//!
//! Parsing is pure: it builds `hp_ir` nodes and never evaluates anything.

mod cursor;
mod error;
mod grammar;
mod outcome;
mod snapshot;

pub use cursor::Cursor;
pub use error::{ErrorContext, Expected, ExpectedSet, ParseError, ParseErrorKind};
pub use outcome::ParseOutcome;
pub use snapshot::ParserSnapshot;

use hp_ir::{Function, Operation, SpecificFunction, Statistic};
use hp_rng::RandomGenerator;

/// A parsed node and the number of tokens it consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed<T> {
    pub node: T,
    pub consumed: usize,
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    #[inline]
    pub fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot::new(self.cursor.position())
    }

    #[inline]
    pub fn restore(&mut self, snapshot: ParserSnapshot) {
        self.cursor.set_position(snapshot.cursor_pos);
    }

    /// Consume `keyword` or fail softly with `expected`.
    pub(crate) fn keyword(&mut self, keyword: &str, expected: Expected) -> ParseOutcome<()> {
        if self.cursor.eat(keyword) {
            ParseOutcome::matched(())
        } else {
            ParseOutcome::no_match(ExpectedSet::single(expected), self.position())
        }
    }

    /// Error for a soft failure at `position`, naming the token found there.
    pub(crate) fn expected_error(&self, expected: ExpectedSet, position: usize) -> ParseError {
        ParseError::expected(expected, position, self.cursor.token_at(position))
    }

    /// Turn a rule's outcome into a result, reporting the consumed count.
    fn finish<T>(&self, outcome: ParseOutcome<T>) -> Result<Parsed<T>, ParseError> {
        match outcome {
            ParseOutcome::Ok { value } => Ok(Parsed {
                node: value,
                consumed: self.position(),
            }),
            ParseOutcome::NoMatch { expected, position } => {
                Err(self.expected_error(expected, position))
            }
            ParseOutcome::Malformed { error } => Err(error),
        }
    }
}

/// Split a command line into tokens.
pub fn tokenize(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

fn parse_with<'a, T>(
    tokens: &'a [String],
    context: ErrorContext,
    rule: impl FnOnce(&mut Parser<'a>) -> ParseOutcome<T>,
) -> Result<Parsed<T>, ParseError> {
    let mut parser = Parser::new(tokens);
    let outcome = rule(&mut parser).with_error_context(context);
    parser.finish(outcome)
}

fn complete<T>(tokens: &[String], parsed: Parsed<T>) -> Result<T, ParseError> {
    match tokens.get(parsed.consumed) {
        Some(extra) => Err(ParseError::trailing_tokens(parsed.consumed, extra)),
        None => Ok(parsed.node),
    }
}

/// Parse a function from the start of `tokens`.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse_function(tokens: &[String]) -> Result<Parsed<Function>, ParseError> {
    parse_with(tokens, ErrorContext::Function, Parser::parse_function)
}

/// Parse a statistic from the start of `tokens`.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse_statistic(tokens: &[String]) -> Result<Parsed<Statistic>, ParseError> {
    parse_with(tokens, ErrorContext::Statistic, Parser::parse_statistic)
}

/// Parse an operation from the start of `tokens`.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse_operation(tokens: &[String]) -> Result<Parsed<Operation>, ParseError> {
    parse_with(tokens, ErrorContext::Operation, Parser::parse_operation)
}

/// Parse a random generator description from the start of `tokens`.
///
/// Never partially consumes: on failure nothing is taken.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse_random_generator(tokens: &[String]) -> Result<Parsed<RandomGenerator>, ParseError> {
    parse_with(tokens, ErrorContext::RandomGenerator, Parser::parse_random_generator)
}

/// Parse a specific function from the start of `tokens`.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse_specific_function(tokens: &[String]) -> Result<Parsed<SpecificFunction>, ParseError> {
    parse_with(tokens, ErrorContext::SpecificFunction, Parser::parse_specific_function)
}

/// Parse a function that spans all of `tokens`.
pub fn parse_function_command(tokens: &[String]) -> Result<Function, ParseError> {
    complete(tokens, parse_function(tokens)?)
}

/// Parse a statistic that spans all of `tokens`.
pub fn parse_statistic_command(tokens: &[String]) -> Result<Statistic, ParseError> {
    complete(tokens, parse_statistic(tokens)?)
}

/// Parse an operation that spans all of `tokens`.
pub fn parse_operation_command(tokens: &[String]) -> Result<Operation, ParseError> {
    complete(tokens, parse_operation(tokens)?)
}

/// Parse a random generator description that spans all of `tokens`.
pub fn parse_random_generator_command(tokens: &[String]) -> Result<RandomGenerator, ParseError> {
    complete(tokens, parse_random_generator(tokens)?)
}

/// Parse a specific function that spans all of `tokens`.
pub fn parse_specific_function_command(
    tokens: &[String],
) -> Result<SpecificFunction, ParseError> {
    complete(tokens, parse_specific_function(tokens)?)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
