//! `hpso operation --at=<x> <tokens>`: apply a unary operation.

use hp_arith::{EvaluationContext, Value};
use hp_eval::evaluate_operation;
use hp_parse::parse_operation_command;

use super::{advisory, configure, interpret, point, verify, CommandError, CommandResult};
use crate::Options;

pub fn run_operation(options: &Options) -> CommandResult<String> {
    let operation = interpret(&options.tokens, parse_operation_command)?;
    let mut ctx = configure(options)?;
    let argument = scalar(&ctx, options)?;
    let value = evaluate_operation(&mut ctx, operation, &argument)?;
    let mut out = format!("{operation} {}\n", ctx.format_value(&value));
    if options.verify {
        out.push_str(&verify(&mut ctx, &value, |ctx| {
            let argument = scalar(ctx, options)?;
            Ok(evaluate_operation(ctx, operation, &argument)?)
        })?);
    }
    out.push_str(advisory(&ctx));
    Ok(out)
}

fn scalar(ctx: &EvaluationContext, options: &Options) -> CommandResult<Value> {
    let mut values = point(ctx, options)?;
    match values.pop() {
        Some(value) if values.is_empty() => Ok(value),
        _ => Err(CommandError::Usage(
            "an operation takes a single argument: pass --at=<x>".to_string(),
        )),
    }
}
