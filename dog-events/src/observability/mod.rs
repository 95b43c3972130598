//! Log output setup for binaries and tests embedding the publisher.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global fmt subscriber filtered by `RUST_LOG`
/// (default `dog_events=info`). Returns `false` if one was already set.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dog_events=info"));

    fmt().with_env_filter(filter).with_target(true).try_init().is_ok()
}

/// Same as [`init_tracing`] with JSON-formatted lines
pub fn init_json_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dog_events=info"));

    fmt().json().with_env_filter(filter).try_init().is_ok()
}
