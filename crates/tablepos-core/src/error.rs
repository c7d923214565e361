//! # Error Types
//!
//! Domain-specific error types for tablepos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tablepos-core errors (this file)                                      │
//! │  ├── CoreError        - Lookup misses, empty-order actions             │
//! │  └── ValidationError  - Bad seed data, bad search input                │
//! │                                                                         │
//! │  tablepos-store errors (separate crate)                                │
//! │  └── StoreError       - Saving the order map failed                    │
//! │                                                                         │
//! │  tablepos-console errors (host)                                        │
//! │  └── ConsoleError     - Config, stdin, store                           │
//! │                                                                         │
//! │  None of these are fatal to a running session. The engine turns       │
//! │  CoreError into a no-op or a warning toast.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::TableId;

// =============================================================================
// Core Error
// =============================================================================

/// Core ordering errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Table id does not resolve in the registry.
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    /// The action needs at least one order line.
    ///
    /// ## When This Occurs
    /// - Generating a bill for a table with nothing ordered
    /// - Ending a session on an empty table
    #[error("No items ordered for {table}")]
    EmptyOrder { table: String },

    /// No table detail view is open.
    #[error("No table is open")]
    NoOpenSession,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building the catalog/registry from static data and when
/// checking free-text search input.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more (and a real number).
    #[error("{field} must be a non-negative number")]
    MustBeNonNegative { field: String },

    /// Duplicate value (e.g., two menu items sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::TableNotFound(9).to_string(), "Table not found: 9");
        let err = CoreError::EmptyOrder {
            table: "Table 2".to_string(),
        };
        assert_eq!(err.to_string(), "No items ordered for Table 2");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Duplicate {
            field: "menu item id".to_string(),
            value: "11".to_string(),
        };
        assert_eq!(err.to_string(), "menu item id '11' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
