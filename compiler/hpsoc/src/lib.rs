//! HPSO driver library.
//!
//! Reads one command from the arguments, parses its tokens with `hp_parse`
//! and evaluates the result in a fresh
//! [`EvaluationContext`](hp_arith::EvaluationContext) configured from the
//! flags. Every command returns its output as text; only the binary prints
//! and exits.

pub mod commands;
mod options;

use std::sync::Once;

pub use commands::CommandError;
pub use options::{parse_options, OptionError, Options};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enabled by `RUST_LOG` (for example
/// `RUST_LOG=hp_parse=trace`) or by `--verbose`, which defaults the filter
/// to `debug`. Spans render as an indented tree on stderr.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let from_env = std::env::var("RUST_LOG").is_ok();
        if !from_env && !verbose {
            return;
        }
        let filter = if from_env {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new("debug")
        };
        tracing_subscriber::registry()
            .with(HierarchicalLayer::new(2).with_targets(true))
            .with(filter)
            .init();
    });
}
