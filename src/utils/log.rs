// src/utils/log.rs

//! Logging set-up for binaries built on the codec.
//!
//! The library itself only emits records through the `log` facade
//! (`debug!` for per-pass sizes, `info!` for the chosen variant). Nothing is
//! printed until a binary installs a subscriber:
//!
//! ```
//! mbp_codec::utils::log::init_subscriber(mbp_codec::utils::log::Level::DEBUG);
//! ```
//!
//! The subscriber is a `tracing-subscriber` fmt subscriber writing to
//! standard error. It also forwards `log` records, so library messages show up
//! alongside anything the binary emits through `tracing`.

pub use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initializes a global logging subscriber.
///
/// This should be called once at the beginning of the program's execution.
/// Returns `false` if a global subscriber was already installed.
///
/// # Arguments
/// * `max_level` - The maximum level of messages to log (e.g., `Level::INFO`, `Level::DEBUG`).
pub fn init_subscriber(max_level: Level) -> bool {
    FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(false) // Don't print the module path
        .try_init()
        .is_ok()
}
