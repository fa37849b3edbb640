//! CLI output formatting.
//!
//! Every report line goes through [`emit`], which picks one of three modes:
//! colored text, nothing (quiet), or one JSON object per line. Commands
//! that produce a single result document bypass this with [`json_output`].

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::{json, Value as Json};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::{Amount, MarketStatus};

/// Output flags taken from the global CLI options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// One JSON document (or JSON line) per result instead of text.
    pub json: bool,
    /// Only warnings and errors.
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn current() -> OutputConfig {
    let cell = OUTPUT.get_or_init(|| RwLock::new(OutputConfig::default()));
    match cell.read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    let cell = OUTPUT.get_or_init(|| RwLock::new(config));
    match cell.write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// Whether a line survives quiet mode.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Priority {
    Regular,
    Always,
}

fn emit(kind: &str, priority: Priority, payload: impl FnOnce() -> Json, text: impl FnOnce()) {
    let config = current();
    if config.json {
        println!("{}", json!({ "type": kind, "payload": payload() }));
    } else if !config.quiet || priority == Priority::Always {
        text();
    }
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    emit(
        "header",
        Priority::Regular,
        || json!({ "app": "accuracy-pool", "version": version }),
        || println!("{} {}\n", "accuracy-pool".bold(), version.dimmed()),
    );
}

/// Print a bold section title.
pub fn section(title: &str) {
    emit(
        "section",
        Priority::Regular,
        || json!({ "title": title }),
        || println!("\n{}", title.bold()),
    );
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        Priority::Regular,
        || json!({ "label": label, "value": value }),
        || println!("  {:<16} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit(
        "success",
        Priority::Regular,
        || json!({ "message": message }),
        || println!("  {} {}", "✓".green(), message),
    );
}

pub fn warning(message: &str) {
    emit(
        "warning",
        Priority::Always,
        || json!({ "message": message }),
        || println!("  {} {}", "⚠".yellow(), message),
    );
}

pub fn note(message: &str) {
    emit(
        "note",
        Priority::Regular,
        || json!({ "message": message }),
        || println!("  {}", message.dimmed()),
    );
}

pub fn hint(message: &str) {
    emit(
        "hint",
        Priority::Regular,
        || json!({ "message": message }),
        || println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed()),
    );
}

/// Print an error to stderr. Never suppressed.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

/// Render rows as a rounded table, indented under the current section.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    let rendered = table.to_string();
    emit(
        "table",
        Priority::Regular,
        || json!({ "content": rendered }),
        || {
            for line in rendered.lines() {
                println!("  {line}");
            }
        },
    );
}

/// Emit a complete JSON result document.
pub fn json_output(value: Json) {
    println!("{value}");
}

/// Format a token amount without trailing zeros.
#[must_use]
pub fn amount(value: Amount) -> String {
    value.normalize().to_string()
}

/// Format a market status, colored by lifecycle stage.
#[must_use]
pub fn status(status: MarketStatus) -> String {
    if is_json() {
        return status.to_string();
    }
    match status {
        MarketStatus::Pending => status.dimmed().to_string(),
        MarketStatus::Active => status.green().to_string(),
        MarketStatus::Resolved => status.cyan().to_string(),
        MarketStatus::Cancelled => status.red().to_string(),
    }
}

#[must_use]
pub fn highlight(value: impl Display) -> String {
    if is_json() {
        return value.to_string();
    }
    value.cyan().to_string()
}

#[must_use]
pub fn muted(value: impl Display) -> String {
    if is_json() {
        return value.to_string();
    }
    value.dimmed().to_string()
}
