//! One-shot logger setup for the engine and everything built on it.
//!
//! The crates log through the `log` facade; this module wires the
//! facade to `env_logger` exactly once, so a demo binary's `main` and a
//! test harness can both call [`init_logging`] without fighting over
//! the global logger.

use std::sync::Once;

/// Logger settings, applied on first init only.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter in `env_logger` syntax, e.g. `"sigil_ui=debug,wgpu=warn"`.
    /// `None` defers to `RUST_LOG`, then to Info.
    pub env_filter: Option<String>,
    /// ANSI color behavior for the log output.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok());
        match filter {
            Some(f) => {
                builder.parse_filters(&f);
            }
            // Interaction logs (clicks, callbacks) live at info level.
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.write_style(config.write_style).init();

        log::debug!("logging initialized");
    });
}
