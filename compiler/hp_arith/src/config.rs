//! Precision-control settings.

/// When arithmetic checks for lost significant bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CheckMode {
    Always,
    /// Skip checks while a statistic is being evaluated.
    #[default]
    AlwaysExceptStatistics,
    Never,
}

impl CheckMode {
    /// Parse the configuration keyword (`all`, `allExceptStatistics`, `never`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "all" | "always" => Some(CheckMode::Always),
            "allExceptStatistics" | "alwaysExceptStatistics" => {
                Some(CheckMode::AlwaysExceptStatistics)
            }
            "never" => Some(CheckMode::Never),
            _ => None,
        }
    }
}

pub const DEFAULT_INITIAL_PRECISION: usize = 32;
pub const DEFAULT_SAFETY_MARGIN: usize = 32;
pub const DEFAULT_OUTPUT_PRECISION: i32 = 5;

/// Output precision that derives the digit count from the working precision.
pub const DERIVED_OUTPUT_PRECISION: i32 = -1;

/// Precision settings carried by an [`EvaluationContext`](crate::EvaluationContext).
#[derive(Clone, Debug, PartialEq)]
pub struct PrecisionConfig {
    pub initial_precision: usize,
    pub initial_precision_already_set: bool,
    /// Bits that must survive an addition before an increase is recommended.
    pub safety_margin: usize,
    pub check_mode: CheckMode,
    /// `<= 0` disables checks, `>= 1` forces them, otherwise a Bernoulli draw.
    pub check_probability: f64,
    /// Sticky; only cleared by the caller.
    pub increase_recommended: bool,
    /// Decimal digits after the point in formatted output.
    pub output_precision: i32,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        PrecisionConfig {
            initial_precision: DEFAULT_INITIAL_PRECISION,
            initial_precision_already_set: false,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            check_mode: CheckMode::default(),
            check_probability: 1.0,
            increase_recommended: false,
            output_precision: DEFAULT_OUTPUT_PRECISION,
        }
    }
}
