//! `hpso rng --draws=<n> <tokens>`: print draws of a generator.
//!
//! Integer and uniform draws come from two copies of the generator, so both
//! columns start from the same state.

use hp_parse::parse_random_generator_command;
use hp_rng::RandomSource;

use super::{configure, interpret, CommandResult};
use crate::Options;

pub fn run_rng(options: &Options) -> CommandResult<String> {
    let mut integers = interpret(&options.tokens, parse_random_generator_command)?;
    let mut uniforms = integers.clone();
    let ctx = configure(options)?;
    let mut out = format!("{}\n", integers.name());
    for draw in 0..options.draws {
        let integer = integers.next_integer();
        let uniform = ctx.uniform_value(&mut uniforms);
        out.push_str(&format!("{draw} {integer} {}\n", ctx.format_value(&uniform)));
    }
    Ok(out)
}
