use super::*;
use crate::error::{Expected, ParseErrorKind};
use pretty_assertions::assert_eq;

fn make_error() -> ParseError {
    ParseError::new(ParseErrorKind::UnexpectedToken, "test error", 0)
}

#[test]
fn test_matched() {
    let outcome: ParseOutcome<i32> = ParseOutcome::matched(42);
    assert!(outcome.is_ok());
    assert!(!outcome.is_no_match());
    assert_eq!(outcome.ok().unwrap(), 42);
}

#[test]
fn test_no_match() {
    let outcome: ParseOutcome<i32> =
        ParseOutcome::no_match(ExpectedSet::single(Expected::Function), 3);
    assert!(outcome.is_no_match());
    assert!(!outcome.is_malformed());
    assert_eq!(outcome.ok(), None);
}

#[test]
fn test_map() {
    let outcome = ParseOutcome::matched(42).map(|x| x * 2);
    assert_eq!(outcome.ok().unwrap(), 84);
}

#[test]
fn test_or_else() {
    let soft = ParseOutcome::<i32>::no_match(ExpectedSet::new(), 0)
        .or_else(|| ParseOutcome::matched(99));
    assert_eq!(soft.ok().unwrap(), 99);

    let hard = ParseOutcome::<i32>::malformed(make_error()).or_else(|| ParseOutcome::matched(0));
    assert!(hard.is_malformed());
}

#[test]
fn test_with_error_context() {
    let outcome = ParseOutcome::<i32>::malformed(make_error())
        .with_error_context(ErrorContext::Statistic);
    let ParseOutcome::Malformed { error } = outcome else {
        panic!("expected a malformed outcome");
    };
    assert_eq!(error.context.as_deref(), Some("while parsing a statistic"));

    let soft = ParseOutcome::<i32>::no_match(ExpectedSet::new(), 0)
        .with_error_context(ErrorContext::Statistic);
    assert!(soft.is_no_match());
}
