//! Precision-adaptive arbitrary-precision arithmetic.
//!
//! All arithmetic goes through an [`EvaluationContext`], which owns the
//! working precision, the precision-control settings and the default random
//! source. Results are owned [`Value`]s; dropping a value releases it.
//!
//! # Precision control
//!
//! Additions (and the subtractions hidden in range reduction and close
//! comparisons) estimate whether cancellation ate into the safety margin.
//! If so, the context's advisory flag is raised:
//!
//! ```text
//! let sum = ctx.add(&a, &b)?;
//! if ctx.is_increase_precision_recommended() {
//!     // rerun at a higher precision, or warn
//! }
//! ```
//!
//! The runtime never reruns anything itself, and never clears the flag.
//!
//! Values are built at no fewer than 64 bits whatever the working
//! precision; [`EvaluationContext::precision`] still reports the bits that
//! were asked for.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | `value` | [`Value`], live-value accounting |
//! | `context` | [`EvaluationContext`], constants, precision checks |
//! | `ops` | add, multiply, divide, compare, pow |
//! | `transcendental` | sqrt, exp, log, trigonometry |
//! | `random` | uniform and Gaussian draws |
//! | `vector` | sums, products, projections |
//! | `format` | `%.*e` output, conversion to `f64` |

mod config;
mod context;
mod errors;
mod format;
mod ops;
mod random;
mod transcendental;
mod value;
mod vector;

pub use astro_float::BigFloat;
pub use config::{
    CheckMode, PrecisionConfig, DEFAULT_INITIAL_PRECISION, DEFAULT_OUTPUT_PRECISION,
    DEFAULT_SAFETY_MARGIN, DERIVED_OUTPUT_PRECISION,
};
pub use context::EvaluationContext;
pub use errors::{ArithResult, DomainError};
pub use format::format_scientific;
pub use value::{live_values, LeakCheck, Value};
