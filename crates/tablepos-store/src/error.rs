//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Host shell logs it and keeps the session running                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loading has no error type: unreadable data means "no saved orders".

use std::path::PathBuf;

use thiserror::Error;

/// Errors from saving the order map.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be written or renamed into place.
    ///
    /// ## When This Occurs
    /// - Data directory is read-only
    /// - Disk full
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The order map could not be encoded.
    #[error("Failed to encode orders: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_names_the_file() {
        let err = StoreError::io(
            "/data/restaurant_orders.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to write /data/restaurant_orders.json: denied"
        );
    }
}
