//! # Validation Module
//!
//! Checks applied to the static seed data when the catalog and registry
//! are built, and to free-text search input.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Startup                                                               │
//! │  ├── MenuCatalog::new   → validate_name, validate_price                │
//! │  └── TableRegistry::new → validate_name, validate_capacity             │
//! │           │  (a bad seed entry is a programming error: reject it)      │
//! │           ▼                                                             │
//! │  Runtime                                                               │
//! │  └── search boxes       → validate_search_query                        │
//! │           (a bad term degrades the search, never the session)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tablepos_core::validation::{validate_price, validate_search_query};
//!
//! validate_price(350.0).unwrap();
//! assert_eq!(validate_search_query("  naan ").unwrap(), "naan");
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted search term.
pub const MAX_SEARCH_LEN: usize = 100;

/// Longest accepted menu item or table name.
pub const MAX_NAME_LEN: usize = 80;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (menu item or table).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 80 characters
///
/// ## Example
/// ```rust
/// use tablepos_core::validation::validate_name;
///
/// assert!(validate_name("menu item name", "Garlic Naan").is_ok());
/// assert!(validate_name("menu item name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a menu price.
///
/// ## Rules
/// - Must be a finite number
/// - Zero is allowed (complimentary items)
///
/// ## Example
/// ```rust
/// use tablepos_core::validation::validate_price;
///
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-1.0).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a table's seat count.
pub fn validate_capacity(capacity: u32) -> ValidationResult<()> {
    if capacity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "capacity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
