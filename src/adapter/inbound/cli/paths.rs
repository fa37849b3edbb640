//! Default file locations.

use std::path::PathBuf;

/// Environment variable that overrides the default config path.
pub const CONFIG_ENV: &str = "ACCURACY_POOL_CONFIG";

/// Config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "accuracy-pool.toml";

/// Returns the default config file path.
///
/// `ACCURACY_POOL_CONFIG` wins over `./accuracy-pool.toml`.
pub fn default_config() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .filter(|path| !path.is_empty())
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from)
}
