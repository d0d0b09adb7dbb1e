//! Logging setup for the CLI. Output goes to stderr so command results on
//! stdout stay clean.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const APP_TARGET: &str = "tradesum";

/// Debug output for this crate only when `verbose`; dependencies stay quiet.
fn app_targets(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Targets::new().with_target(APP_TARGET, level)
}

/// Installs the global subscriber. `RUST_LOG`, when set, replaces the
/// default directive derived from `verbose`.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "off" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(app_targets(verbose))
        .with(env_filter)
        .init();
}
