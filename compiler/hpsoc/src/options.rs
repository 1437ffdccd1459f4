//! Flags and command tokens.
//!
//! Flags start with `--`; everything else is a token of the command, so
//! single-dash tokens such as `-` or `-1.5` pass through unchanged.

use hp_arith::CheckMode;
use hp_eval::OutOfBoundsBehavior;
use thiserror::Error;

/// Settings for one driver invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub precision: Option<usize>,
    pub safety_margin: Option<usize>,
    pub output_precision: Option<i32>,
    pub check_mode: Option<CheckMode>,
    pub check_probability: Option<f64>,
    pub bounds: OutOfBoundsBehavior,
    /// Evaluation point.
    pub at: Vec<f64>,
    /// Dimension for `distance`.
    pub dim: usize,
    /// Number of draws for `rng`.
    pub draws: usize,
    /// Re-evaluate at twice the precision and report the agreement.
    pub verify: bool,
    pub verbose: bool,
    /// Tokens of the command to interpret.
    pub tokens: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            precision: None,
            safety_margin: None,
            output_precision: None,
            check_mode: None,
            check_probability: None,
            bounds: OutOfBoundsBehavior::default(),
            at: Vec::new(),
            dim: 0,
            draws: 5,
            verify: false,
            verbose: false,
            tokens: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
    #[error("invalid value `{value}` for `--{flag}`")]
    InvalidValue { flag: &'static str, value: String },
}

fn invalid(flag: &'static str, value: &str) -> OptionError {
    OptionError::InvalidValue {
        flag,
        value: value.to_string(),
    }
}

fn number<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, OptionError> {
    value.parse().map_err(|_| invalid(flag, value))
}

/// Split `args` into flags and command tokens.
pub fn parse_options(args: &[String]) -> Result<Options, OptionError> {
    let mut options = Options::default();
    for arg in args {
        let Some(flag) = arg.strip_prefix("--") else {
            options.tokens.push(arg.clone());
            continue;
        };
        let (name, value) = flag.split_once('=').unwrap_or((flag, ""));
        match name {
            "precision" => options.precision = Some(number("precision", value)?),
            "safety-margin" => options.safety_margin = Some(number("safety-margin", value)?),
            "output-precision" => {
                options.output_precision = Some(number("output-precision", value)?);
            }
            "check-precision" => {
                let mode = CheckMode::from_keyword(value)
                    .ok_or_else(|| invalid("check-precision", value))?;
                options.check_mode = Some(mode);
            }
            "check-probability" => {
                let probability: f64 = number("check-probability", value)?;
                if !(0.0..=1.0).contains(&probability) {
                    return Err(invalid("check-probability", value));
                }
                options.check_probability = Some(probability);
            }
            "bounds" => {
                options.bounds = OutOfBoundsBehavior::from_keyword(value)
                    .ok_or_else(|| invalid("bounds", value))?;
            }
            "at" => {
                options.at = value
                    .split(',')
                    .map(|x| number("at", x.trim()))
                    .collect::<Result<_, _>>()?;
            }
            "dim" => options.dim = number("dim", value)?,
            "draws" => options.draws = number("draws", value)?,
            "verify" => options.verify = true,
            "verbose" => options.verbose = true,
            _ => return Err(OptionError::UnknownFlag(arg.clone())),
        }
    }
    Ok(options)
}
