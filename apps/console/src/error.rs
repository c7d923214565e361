//! # Console Error Type
//!
//! Everything that can stop the host from starting or keep reading.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  tablepos.toml ── toml::de::Error ──┐                                  │
//! │  validate()    ── Config(..) ───────┤                                  │
//! │  stdin/stdout  ── io::Error ────────┼──► ConsoleError ──► run() logs   │
//! │  seed data     ── CoreError ────────┘        it, exit code stays 0     │
//! │                                                                         │
//! │  User actions never reach this type: the engine turns them into         │
//! │  toasts or no-ops, and failed saves are logged by the shell.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tablepos_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Configuration loaded but failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// `tablepos.toml` is not valid TOML or has wrong field types.
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The built-in menu or floor plan failed validation.
    #[error("Catalog error: {0}")]
    Core(#[from] CoreError),
}

impl ConsoleError {
    pub fn config(message: impl Into<String>) -> Self {
        ConsoleError::Config(message.into())
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
