//! `hpso function --at=<x> <tokens>`: evaluate an objective function.

use hp_eval::FunctionEvaluator;
use hp_parse::parse_function_command;

use super::{advisory, configure, interpret, point, verify, CommandResult};
use crate::Options;

pub fn run_function(options: &Options) -> CommandResult<String> {
    let function = interpret(&options.tokens, parse_function_command)?;
    let mut ctx = configure(options)?;
    let evaluator = FunctionEvaluator::with_behavior(options.bounds);
    let position = point(&ctx, options)?;
    let value = evaluator.evaluate(&mut ctx, &function, &position)?;
    let mut out = format!("{} {}\n", function.name(), ctx.format_value(&value));
    if options.verify {
        out.push_str(&verify(&mut ctx, &value, |ctx| {
            let position = point(ctx, options)?;
            Ok(evaluator.evaluate(ctx, &function, &position)?)
        })?);
    }
    out.push_str(advisory(&ctx));
    Ok(out)
}
