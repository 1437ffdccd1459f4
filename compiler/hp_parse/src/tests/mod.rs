//! Parser tests, grouped by entry point.

mod statistic_tests;

use crate::tokenize;

/// Tokens of a command written with single spaces.
fn tokens(command: &str) -> Vec<String> {
    tokenize(command)
}

#[test]
fn test_tokenize_splits_on_any_whitespace() {
    pretty_assertions::assert_eq!(
        tokenize("  merge\tsum \n identity "),
        vec!["merge".to_string(), "sum".to_string(), "identity".to_string()]
    );
    assert!(tokenize("   ").is_empty());
}
