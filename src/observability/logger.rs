//! Logging setup
//!
//! - Human-readable lines on stderr
//! - Stdout stays reserved for command output
//! - `RUST_LOG` overrides the default filter

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::{ObservabilityError, ObservabilityResult};

const DEFAULT_LOG_FILTER: &str = "schooldir=info";
const VERBOSE_LOG_FILTER: &str = "schooldir=debug";

/// Logging configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    /// Log at debug level
    pub verbose: bool,
    /// Emit ANSI colours
    pub ansi: bool,
}

impl LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_filter()))
    }
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: LogConfig) -> ObservabilityResult<()> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .with_target(false),
        )
        .with(config.filter())
        .try_init()
        .map_err(|e| ObservabilityError::init_failed(e.to_string()))
}
