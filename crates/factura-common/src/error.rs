//! Error types for the Factura system
//!
//! Provides a unified error type and the storage sub-error it wraps

use thiserror::Error;

/// Result type alias using FacturaError
pub type Result<T> = std::result::Result<T, FacturaError>;

/// Unified error type for Factura operations
#[derive(Debug, Error)]
pub enum FacturaError {
    // Storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Record store failures
///
/// Raised by whichever backend implements the store trait. The triage engine
/// never retries or downgrades these; they surface to the caller unchanged,
/// wrapped as [`FacturaError::Storage`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Backend failure: {0}")]
    Backend(String),

    #[error("Record serialization failed: {0}")]
    Serialization(String),
}

// Implement From for common external error types
impl From<serde_json::Error> for FacturaError {
    fn from(err: serde_json::Error) -> Self {
        FacturaError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for FacturaError {
    fn from(err: std::io::Error) -> Self {
        FacturaError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_wraps_into_unified_error() {
        let err: FacturaError = StoreError::Backend("connection refused".to_string()).into();
        assert!(err.to_string().contains("connection refused"));
        assert!(matches!(err, FacturaError::Storage(_)));
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: FacturaError = parse_err.into();
        assert!(matches!(err, FacturaError::Serialization(_)));
    }
}
