//! Driver commands.
//!
//! Each command interprets `Options::tokens`, evaluates in a context built
//! from the flags and returns the text to print.

mod check;
mod distance;
mod function;
mod operation;
mod rng;

pub use check::run_check;
pub use distance::run_distance;
pub use function::run_function;
pub use operation::run_operation;
pub use rng::run_rng;

use std::cmp::Ordering;

use hp_arith::{DomainError, EvaluationContext, Value};
use hp_eval::EvalError;
use hp_parse::ParseError;
use thiserror::Error;

use crate::Options;

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    /// The tokens do not form the expected node.
    #[error(
        "One of the specified commands in the configuration file can not be interpreted:\n\"{command}\""
    )]
    Uninterpretable {
        command: String,
        #[source]
        source: ParseError,
    },
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("{0}")]
    Usage(String),
}

/// Run a parser over the command tokens.
pub(crate) fn interpret<T>(
    tokens: &[String],
    parse: impl FnOnce(&[String]) -> Result<T, ParseError>,
) -> CommandResult<T> {
    parse(tokens).map_err(|source| {
        tracing::debug!(%source, "command rejected");
        CommandError::Uninterpretable {
            command: tokens.join(" "),
            source,
        }
    })
}

/// A context with the precision settings of `options`.
pub(crate) fn configure(options: &Options) -> CommandResult<EvaluationContext> {
    let mut ctx = EvaluationContext::new()?;
    if let Some(bits) = options.precision {
        ctx.set_initial_precision(bits);
        ctx.set_precision(bits);
    }
    if let Some(bits) = options.safety_margin {
        ctx.set_safety_margin(bits);
    }
    if let Some(digits) = options.output_precision {
        ctx.set_output_precision(digits);
    }
    if let Some(mode) = options.check_mode {
        ctx.set_check_mode(mode);
    }
    if let Some(probability) = options.check_probability {
        ctx.set_check_probability(probability);
    }
    tracing::debug!(precision = ctx.precision(), "context configured");
    Ok(ctx)
}

/// The `--at` point at the working precision.
pub(crate) fn point(ctx: &EvaluationContext, options: &Options) -> CommandResult<Vec<Value>> {
    if options.at.is_empty() {
        return Err(CommandError::Usage(
            "missing evaluation point: pass --at=<x1,x2,...>".to_string(),
        ));
    }
    Ok(options
        .at
        .iter()
        .map(|&x| ctx.to_value_f64(x))
        .collect::<Result<_, _>>()?)
}

/// Repeat an evaluation at twice the working precision and describe how
/// many leading bits of `value` it confirms.
pub(crate) fn verify(
    ctx: &mut EvaluationContext,
    value: &Value,
    rerun: impl FnOnce(&mut EvaluationContext) -> CommandResult<Value>,
) -> CommandResult<String> {
    let precision = ctx.precision();
    ctx.set_precision(precision * 2);
    let agreement = rerun(ctx).and_then(|high| agreement_bits(ctx, value, &high));
    ctx.set_precision(precision);
    Ok(match agreement? {
        None => format!("verify: identical at {precision} and {} bits\n", precision * 2),
        Some(bits) => format!(
            "verify: {bits:.1} bits agree between {precision} and {} bits\n",
            precision * 2
        ),
    })
}

/// `None` when both values are equal, else `log2(|high| / |high - low|)`
/// floored at zero.
fn agreement_bits(
    ctx: &mut EvaluationContext,
    low: &Value,
    high: &Value,
) -> CommandResult<Option<f64>> {
    if ctx.compare_unchecked(low, high) == Ordering::Equal {
        return Ok(None);
    }
    let difference = ctx.subtract(high, low)?;
    let difference = ctx.abs(&difference);
    let magnitude = ctx.abs(high);
    let bits = ctx.log2_double(&magnitude)? - ctx.log2_double(&difference)?;
    Ok(Some(if bits.is_nan() { 0.0 } else { bits.max(0.0) }))
}

/// The advisory line, if some operation lost more than the safety margin.
pub(crate) fn advisory(ctx: &EvaluationContext) -> &'static str {
    if ctx.is_increase_precision_recommended() {
        "warning: significant bits were lost; increase the precision\n"
    } else {
        ""
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
