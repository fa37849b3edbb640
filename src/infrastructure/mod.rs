//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation and logging setup
//! - [`diagnostic`] - Source-span diagnostics for malformed input documents

pub mod config;
pub mod diagnostic;
