//! # Service Error Types
//!
//! What callers of the coordinator and inventory service see.
//!
//! ## Error Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CoreError      ──► ServiceError::Core         (validation, not found) │
//! │  DbError        ──► ServiceError::Persistence  (store unavailable)     │
//! │  DispatchError  ──► ServiceError::Dispatch     (printer failed)        │
//! │  toml / io      ──► ServiceError::Config       (startup only)          │
//! │                                                                         │
//! │  Nothing is retried. Errors travel up unchanged.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kasse_core::CoreError;
use kasse_db::DbError;
use thiserror::Error;

// =============================================================================
// Dispatch Error
// =============================================================================

/// Receipt dispatcher failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The printer (or whatever sink backs it) could not be reached.
    #[error("Printer unavailable: {0}")]
    Unavailable(String),

    /// Writing the rendered receipt failed.
    #[error("Printer I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dispatcher calls.
pub type DispatchResult<T> = Result<T, DispatchError>;

// =============================================================================
// Service Error
// =============================================================================

/// Errors returned by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Domain rule violated or entity missing.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence collaborator failed.
    #[error("Persistence unavailable: {0}")]
    Persistence(#[from] DbError),

    /// A receipt could not be printed.
    #[error("Receipt dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    /// Returns true for lookup misses, whichever layer noticed them.
    pub fn is_not_found(&self) -> bool {
        match self {
            ServiceError::Core(e) => e.is_not_found(),
            ServiceError::Persistence(e) => e.is_not_found(),
            _ => false,
        }
    }
}

impl From<toml::de::Error> for ServiceError {
    fn from(err: toml::de::Error) -> Self {
        ServiceError::Config(err.to_string())
    }
}

impl From<kasse_core::ValidationError> for ServiceError {
    fn from(err: kasse_core::ValidationError) -> Self {
        ServiceError::Core(err.into())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_across_layers() {
        assert!(ServiceError::from(CoreError::OrderNotFound(1)).is_not_found());
        assert!(ServiceError::from(DbError::not_found("Order", "1")).is_not_found());
        assert!(!ServiceError::Config("bad".into()).is_not_found());
        assert!(!ServiceError::from(DispatchError::Unavailable("off".into())).is_not_found());
    }

    #[test]
    fn test_core_message_is_transparent() {
        let err = ServiceError::from(CoreError::IncompleteOrder { missing: "table" });
        assert_eq!(err.to_string(), "Order is incomplete: table is missing");
    }
}
