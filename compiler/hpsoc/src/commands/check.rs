//! `hpso check <kind> <tokens>`: parse without evaluating.

use hp_parse::{
    parse_function, parse_operation, parse_random_generator, parse_specific_function,
    parse_statistic, ParseError, Parsed,
};
use hp_rng::RandomGenerator;

use super::{interpret, CommandError, CommandResult};
use crate::Options;

/// Print the node name and the number of tokens it consumed.
pub fn run_check(options: &Options) -> CommandResult<String> {
    let Some((kind, tokens)) = options.tokens.split_first() else {
        return Err(usage());
    };
    let (name, consumed) = match kind.as_str() {
        "function" => named(tokens, parse_function, |f| f.name())?,
        "specific" => named(tokens, parse_specific_function, |f| f.name())?,
        "statistic" => named(tokens, parse_statistic, |s| s.name())?,
        "operation" => named(tokens, parse_operation, ToString::to_string)?,
        "rng" => named(tokens, parse_random_generator, RandomGenerator::name)?,
        _ => return Err(usage()),
    };
    Ok(format!("{name} {consumed}\n"))
}

fn named<T>(
    tokens: &[String],
    parse: impl FnOnce(&[String]) -> Result<Parsed<T>, ParseError>,
    name: impl FnOnce(&T) -> String,
) -> CommandResult<(String, usize)> {
    let parsed = interpret(tokens, parse)?;
    Ok((name(&parsed.node), parsed.consumed))
}

fn usage() -> CommandError {
    CommandError::Usage(
        "usage: hpso check <function|specific|statistic|operation|rng> <tokens...>".to_string(),
    )
}
