//! `[logging]` section and subscriber setup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Log filter and output format.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// A `tracing` filter directive such as `info` or `accuracy_pool=debug`.
    #[serde(default = "default_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    /// Adjust the level for `-q` / `-v` flags.
    ///
    /// Quiet lowers to `warn`, one `-v` raises to `debug`, two or more to
    /// `trace`. Without flags the configured level stands.
    #[must_use]
    pub fn with_verbosity(mut self, quiet: bool, verbose: u8) -> Self {
        match verbose {
            0 if quiet => self.level = "warn".into(),
            0 => {}
            1 => self.level = "debug".into(),
            _ => self.level = "trace".into(),
        }
        self
    }

    /// Install the global subscriber. Logs go to stderr; `RUST_LOG` wins
    /// over the configured level.
    ///
    /// A second call is a no-op.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
        let _ = if self.format == "json" {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    }
}
