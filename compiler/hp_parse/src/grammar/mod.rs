//! Grammar Modules
//!
//! Each module extends `Parser` with the rules for one node category:
//!
//! - [`scalar`]: numbers, operations, pair operations, constants
//! - [`generator`]: random generator descriptions
//! - [`function`]: specific functions, functions, vector merge operations
//! - [`standard`]: names of the benchmark functions after `standard`
//! - [`statistic`]: specific statistics and statistics
//!
//! # Design
//!
//! - **Priority order**: alternatives are tried in a fixed order with
//!   `one_of!`, so a keyword is claimed by the first rule that knows it.
//! - **Commit on keyword**: once a rule consumed its keyword, missing or
//!   broken parts are `Malformed` (`require!`) rather than `NoMatch`.
//! - **Stack safety**: rules that recurse into a child of the same category
//!   run under `ensure_sufficient_stack`.

mod function;
mod generator;
mod scalar;
mod standard;
mod statistic;
