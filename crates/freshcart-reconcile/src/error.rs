//! # Catalog Error Types
//!
//! Failures of the external variant-catalog and depot-resolution
//! collaborators. These never cross the reconciler's public boundary as
//! errors: the reconciler catches them and degrades the cart to an
//! all-unavailable annotation instead (fail safe toward "cannot confirm,
//! don't assume available").

use thiserror::Error;

/// A failed catalog or depot-resolution lookup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (DNS, connection reset, offline).
    #[error("Network error: {0}")]
    Network(String),

    /// The catalog service answered with a non-success status.
    #[error("Catalog service returned status {0}")]
    Status(u16),

    /// The lookup did not complete in time.
    #[error("Catalog lookup timed out")]
    Timeout,

    /// The response body could not be decoded.
    #[error("Could not decode catalog response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Whether a later retry could plausibly succeed.
    ///
    /// Decode failures are deterministic; everything else is weather.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CatalogError::Decode(_))
    }
}

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::Status(503).to_string(),
            "Catalog service returned status 503"
        );
        assert_eq!(CatalogError::Timeout.to_string(), "Catalog lookup timed out");
    }

    #[test]
    fn test_retryability() {
        assert!(CatalogError::Network("reset".into()).is_retryable());
        assert!(CatalogError::Timeout.is_retryable());
        assert!(!CatalogError::Decode("bad json".into()).is_retryable());
    }
}
