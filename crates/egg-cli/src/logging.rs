//! Diagnostic logging
//!
//! Logs go to stderr so they never mix with program output. The filter comes
//! from `EGG_LOG` (same syntax as `RUST_LOG`) and defaults to warnings only.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_ENV: &str = "EGG_LOG";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}
