//! # Validation Module
//!
//! Input validation utilities for the freshcart engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Kinds of Bad Input                             │
//! │                                                                         │
//! │  Quantities        → CLAMPED, silently, into [1, 99].                   │
//! │                       Commerce UIs never reject a stepper click;        │
//! │                       they pin it to the nearest legal value.           │
//! │                                                                         │
//! │  Identity inputs   → VALIDATED with typed errors (pincode).             │
//! │  (pincode, etc.)     These gate a network lookup, so garbage should     │
//! │                       be stopped before it becomes a request.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MIN_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity Clamping
// =============================================================================

/// Clamps a requested quantity into the legal range [1, 99].
///
/// Never rejects: 0 and negatives become 1, oversized requests become 99.
///
/// ## Example
/// ```rust
/// use freshcart_core::validation::clamp_quantity;
///
/// assert_eq!(clamp_quantity(0), 1);
/// assert_eq!(clamp_quantity(-5), 1);
/// assert_eq!(clamp_quantity(42), 42);
/// assert_eq!(clamp_quantity(1000), 99);
/// ```
#[inline]
pub fn clamp_quantity(quantity: i64) -> i64 {
    quantity.clamp(MIN_ITEM_QUANTITY, MAX_ITEM_QUANTITY)
}

// =============================================================================
// Pincode Validation
// =============================================================================

/// Validates a delivery pincode before depot resolution.
///
/// ## Rules
/// - Must not be empty
/// - Exactly 6 digits
/// - Must not start with 0 (no Indian postal zone does)
///
/// ## Returns
/// The trimmed pincode string.
pub fn validate_pincode(pincode: &str) -> ValidationResult<String> {
    let pincode = pincode.trim();

    if pincode.is_empty() {
        return Err(ValidationError::Required {
            field: "pincode".to_string(),
        });
    }

    if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "must be exactly 6 digits".to_string(),
        });
    }

    if pincode.starts_with('0') {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "must not start with 0".to_string(),
        });
    }

    Ok(pincode.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_quantity_bounds() {
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(99), 99);
        assert_eq!(clamp_quantity(100), 99);
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(i64::MIN), 1);
        assert_eq!(clamp_quantity(i64::MAX), 99);
    }

    #[test]
    fn test_validate_pincode() {
        assert_eq!(validate_pincode(" 110001 ").unwrap(), "110001");
        assert!(validate_pincode("").is_err());
        assert!(validate_pincode("11000").is_err());
        assert!(validate_pincode("1100011").is_err());
        assert!(validate_pincode("11000a").is_err());
        assert!(validate_pincode("010001").is_err());
    }
}
