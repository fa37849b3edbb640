//! Miette-based diagnostics for malformed input documents.
//!
//! The struct fields are read by miette's derive macros when the report is
//! rendered.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// An input document that failed to parse, with the offending location.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(accuracy_pool::input))]
pub struct InputError {
    /// Human-readable error message.
    pub message: String,

    /// The document content.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl InputError {
    /// Build a diagnostic from a serde_json error against `content`.
    #[must_use]
    pub fn from_json(name: &str, content: &str, err: &serde_json::Error) -> Self {
        let offset = offset_of(content, err.line(), err.column());
        let help = match err.classify() {
            serde_json::error::Category::Data => {
                Some("amounts and values may be JSON numbers or decimal strings".to_string())
            }
            serde_json::error::Category::Eof => Some("the document ends early".to_string()),
            _ => None,
        };
        Self {
            message: format!("invalid input document: {err}"),
            src: NamedSource::new(name, content.to_string()),
            span: (offset, 1).into(),
            help,
        }
    }
}

/// Byte offset of a 1-based (line, column) position, clamped to the content.
fn offset_of(content: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    offset.min(content.len().saturating_sub(1))
}
