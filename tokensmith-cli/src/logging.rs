//! Log output for the CLI.
//!
//! Everything goes to stderr so `render` output on stdout can be piped. `RUST_LOG` wins
//! when set; otherwise the configured level is raised one step per `-v`.

use tracing_subscriber::{fmt, EnvFilter};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// `base` raised by `verbosity` steps, capped at `trace`. Unknown names count as `warn`.
pub fn effective_level(base: &str, verbosity: u8) -> &'static str {
    let start = LEVELS
        .iter()
        .position(|level| level.eq_ignore_ascii_case(base.trim()))
        .unwrap_or(1);
    LEVELS[(start + usize::from(verbosity)).min(LEVELS.len() - 1)]
}

pub fn init(base: &str, verbosity: u8) {
    let directive = effective_level(base, verbosity);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let subscriber = fmt::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
