//! Crate-level errors.
//!
//! Domain rule violations stay wrapped in [`DomainError`]; everything else
//! here is about reading files and documents.

use std::path::PathBuf;

use thiserror::Error;

use crate::infrastructure::diagnostic::InputError;
use crate::domain::DomainError;

/// Problems with the TOML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config field `{field}` must be set")]
    MissingField { field: &'static str },

    #[error("config field `{field}` {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{} already exists (use --force to overwrite)", path.display())]
    AlreadyExists { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A malformed input document, rendered with its source span.
    #[error(transparent)]
    Input(#[from] Box<InputError>),

    #[error("input document has no `{field}`")]
    MissingInput { field: &'static str },

    #[error("cannot access {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
