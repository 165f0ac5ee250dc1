//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Bare registry; tests install the capture layer themselves
    Test,
}

static INIT_ONCE: Once = Once::new();

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize the logging facility
///
/// Only the first call installs a subscriber; later calls are no-ops.
/// Events are written to stderr so that stdout stays free for command output.
///
/// - **Development**: human-readable, `filterx=debug`
/// - **Production**: JSON, `filterx=info`
/// - **Test**: no output
///
/// `RUST_LOG` overrides the default directive in both output profiles.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter("filterx=debug"))
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter("filterx=info"))
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
