//! Tracing setup shared by the binaries

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr subscriber so stdout stays free for command output.
/// Respects `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
