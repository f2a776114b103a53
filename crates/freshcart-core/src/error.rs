//! # Error Types
//!
//! Domain-specific error types for freshcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  freshcart-core errors (this file)                                      │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  freshcart-store errors (separate crate)                                │
//! │  └── StoreError       - Persistence adapter failures                    │
//! │                                                                         │
//! │  freshcart-reconcile errors (separate crate)                            │
//! │  └── CatalogError     - Variant-catalog lookup failures                 │
//! │                                                                         │
//! │  NOTE: most engine failures are NOT errors. "No matching variant",      │
//! │  "no savings", "empty schedule", out-of-range quantities are ordinary   │
//! │  degraded values; only input that gates a network lookup (the pincode)  │
//! │  becomes a typed error.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, reason)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., non-numeric pincode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
