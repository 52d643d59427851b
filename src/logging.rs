//! Tracing setup
//!
//! Events go to stderr so they never mix with command output. `RUST_LOG`
//! wins over the `log_level` setting, which wins over the built-in default.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor the settings provide one
pub const DEFAULT_DIRECTIVE: &str = "couple_planner=warn";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber; later calls are ignored
pub fn init_tracing(configured: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), configured);

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

fn build_filter(env: Option<&str>, configured: Option<&str>) -> EnvFilter {
    [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
