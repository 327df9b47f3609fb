//! # magescaff Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout magescaff. Like the rest
//! of the crate it pairs a `thiserror` enum for the failures we want to
//! recognise with `anyhow` for propagation and context.
//!
//! ## Architecture
//!
//! - `ScaffoldError`: the domain error enum. Several variants carry the exact
//!   user-facing text printed by the command layer (e.g. `Module name is missing!`).
//! - `Result<T>`: alias for `anyhow::Result<T>`.
//!
//! Errors never crash a command. The step runner in `commands::run_step`
//! prints them as one line and moves on (see `ScaffoldError::is_user_input`).
//!
//! ## Examples
//!
//! ```rust
//! // Abort a step with a message the user sees verbatim
//! anyhow::bail!(ScaffoldError::InvalidInput("Invalid route id!".into()));
//!
//! // Add context to filesystem failures
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for magescaff.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Module name is missing!")]
    ModuleMissing,

    #[error("Module doesn't exist in code directory!")]
    ModuleNotFound { name: String },

    /// Invalid or missing command input. The payload is the complete message.
    #[error("{0}")]
    InvalidInput(String),

    #[error("XML parse error: {0}")]
    XmlParse(String),

    #[error("XML reader error: {source}")]
    Xml {
        #[from]
        source: quick_xml::Error,
    },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

impl ScaffoldError {
    /// Shorthand for an `InvalidInput` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        ScaffoldError::InvalidInput(message.into())
    }

    /// Whether this error describes bad command input rather than a failed operation.
    /// Such errors are printed without any context chain.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            ScaffoldError::ModuleMissing
                | ScaffoldError::ModuleNotFound { .. }
                | ScaffoldError::InvalidInput(_)
        )
    }
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;
