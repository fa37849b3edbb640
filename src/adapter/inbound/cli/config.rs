//! Handlers for `config init`, `config show` and `config validate`.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::settings::Config;

/// Documented template written by `config init`.
pub const TEMPLATE: &str = include_str!("../../../../accuracy-pool.toml.example");

fn write_template(path: &Path) -> Result<()> {
    let file_error = |source| Error::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(file_error)?;
    }
    fs::write(path, TEMPLATE).map_err(file_error)
}

/// Write the template to `path`, refusing to clobber without `force`.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        }
        .into());
    }
    write_template(path)?;

    output::success(&format!("wrote {}", path.display()));
    output::hint(&format!(
        "edit it, then run `accuracy-pool config validate -c {}`",
        path.display()
    ));
    Ok(())
}

/// Print the settings in effect. A missing file means defaults.
pub fn show(path: &Path) -> Result<()> {
    let loaded = path.exists();
    let config = Config::load_or_default(path)?;
    let effective = config.effective();

    if output::is_json() {
        output::json_output(json!({
            "command": "config show",
            "path": path.display().to_string(),
            "loaded": loaded,
            "config": effective,
        }));
        return Ok(());
    }

    output::section("Configuration");
    output::field("Source", path.display());
    if !loaded {
        output::note("file not found, using defaults");
    }

    output::section("Allocation");
    output::field("Decimals", effective.allocation.decimals);

    output::section("Pool");
    output::field("Min participants", effective.pool.min_participants);
    output::field("Fee", format!("{} bps", effective.pool.fee_bps));

    output::section("Logging");
    output::field("Level", effective.log_level);
    output::field("Format", effective.log_format);
    Ok(())
}

/// Load and validate `path`; the file must exist.
pub fn validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    config.settler()?;
    output::success(&format!("{} is valid", path.display()));
    Ok(())
}
