//! `hpso distance --at=<x> --dim=<d> <tokens>`: distance to the local
//! optimum along one axis.

use hp_eval::FunctionEvaluator;
use hp_parse::parse_function_command;

use super::{advisory, configure, interpret, point, verify, CommandResult};
use crate::Options;

pub fn run_distance(options: &Options) -> CommandResult<String> {
    let function = interpret(&options.tokens, parse_function_command)?;
    let mut ctx = configure(options)?;
    let evaluator = FunctionEvaluator::with_behavior(options.bounds);
    let position = point(&ctx, options)?;
    let dim = options.dim;
    let distance = evaluator.distance_to_local_optimum(&mut ctx, &function, &position, dim)?;
    let mut out = format!(
        "Dist{} {dim} {}\n",
        function.name(),
        ctx.format_value(&distance)
    );
    if options.verify {
        out.push_str(&verify(&mut ctx, &distance, |ctx| {
            let position = point(ctx, options)?;
            Ok(evaluator.distance_to_local_optimum(ctx, &function, &position, dim)?)
        })?);
    }
    out.push_str(advisory(&ctx));
    Ok(out)
}
