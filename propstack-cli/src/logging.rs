//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Install a stderr subscriber.
///
/// With no `-v` flag the filter comes from `RUST_LOG`, defaulting to
/// `warn`; `-v` selects `debug` and `-vv` selects `trace`.
pub fn init(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // A subscriber may already be installed when embedded in tests.
    let _already_set = Registry::default()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
