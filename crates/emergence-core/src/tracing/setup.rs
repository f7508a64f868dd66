//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::defaults::DEFAULT_LOG_FILTER;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "EMERGENCE_LOG";

static INIT: Once = Once::new();

/// Initialize the tracing/logging system.
///
/// Reads `EMERGENCE_LOG` for per-crate log levels.
/// Format: `EMERGENCE_LOG=emergence_discovery=debug,emergence_storage=warn`
///
/// Falls back to `emergence=info` if `EMERGENCE_LOG` is not set or is invalid.
/// Idempotent: later calls are no-ops, and an already-installed global
/// subscriber is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
