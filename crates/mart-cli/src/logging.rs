//! Logging setup over `tracing-subscriber`.
//!
//! All pipeline progress is routed through `tracing`; the CLI installs a
//! single stderr subscriber at startup. Verbosity flags take precedence,
//! otherwise `RUST_LOG` applies.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Subscriber configuration derived from CLI flags.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level to emit.
    pub level_filter: LevelFilter,
    /// Honor `RUST_LOG` when no explicit verbosity flag was given.
    pub use_env_filter: bool,
    /// Whether to emit ANSI colors.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) {
    let filter = if config.use_env_filter {
        EnvFilter::builder()
            .with_default_directive(config.level_filter.into())
            .from_env_lossy()
    } else {
        EnvFilter::default().add_directive(config.level_filter.into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(config.with_ansi)
        .with_writer(std::io::stderr)
        .init();
}
