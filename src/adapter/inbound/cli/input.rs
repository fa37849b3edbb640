//! Loading of JSON documents exported from the market contracts.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::{Amount, Bet, Market, Value};
use crate::error::{Error, Result};
use crate::infrastructure::diagnostic::InputError;

/// A resolved market's bets and outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionInput {
    /// The value the market resolved to.
    #[serde(default)]
    pub actual_value: Option<Value>,
    /// Post-fee pool. When absent, the sum of stakes is used.
    #[serde(default)]
    pub pool: Option<Amount>,
    #[serde(default)]
    pub bets: Vec<Bet>,
}

impl ResolutionInput {
    /// The resolved value, required by allocation and settlement.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingInput` when the document has no `actual_value`.
    pub fn actual_value(&self) -> Result<Value> {
        self.actual_value.ok_or(Error::MissingInput {
            field: "actual_value",
        })
    }
}

/// Read and parse a JSON document, reporting parse errors with their location.
///
/// # Errors
///
/// Returns `Error::File` if the file cannot be read and `Error::Input` if it
/// is not a valid document.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&path.display().to_string(), &content)
}

/// Parse a JSON document held in memory.
///
/// # Errors
///
/// Returns `Error::Input` with a source span on malformed content.
pub fn parse_document<T: DeserializeOwned>(name: &str, content: &str) -> Result<T> {
    serde_json::from_str(content)
        .map_err(|err| Box::new(InputError::from_json(name, content, &err)).into())
}

/// Read a resolution document.
///
/// # Errors
///
/// See [`read_document`].
pub fn read_resolution(path: &Path) -> Result<ResolutionInput> {
    read_document(path)
}

/// Read a JSON array of markets.
///
/// # Errors
///
/// See [`read_document`].
pub fn read_markets(path: &Path) -> Result<Vec<Market>> {
    read_document(path)
}
