//! Process-wide logging setup shared by everything that embeds the storefront
//! and back-office crates.

pub mod config;
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};

/// Initialize logging from the environment.
///
/// Falls back to defaults when the environment is invalid. Safe to call more
/// than once; later calls are no-ops.
pub fn init() {
    let config = ObservabilityConfig::from_env().unwrap_or_else(|err| {
        eprintln!("invalid logging configuration ({err:#}); using defaults");
        ObservabilityConfig::default()
    });
    tracing::init_with(&config);
}
