//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; embedding applications call
//! `setup_logger` once at startup (extra calls are ignored). `RUST_LOG`
//! overrides the default `info` level, e.g. `RUST_LOG=commander_deck=debug`
//! to see rejected deck mutations and discarded search responses.

use std::sync::Once;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a global fmt subscriber.
pub fn setup_logger() {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .try_init();
    });
}
