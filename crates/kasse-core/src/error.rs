//! # Error Types
//!
//! Domain-specific error types for kasse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasse-core errors (this file)                                         │
//! │  ├── CoreError        - Domain errors (format, incomplete, not found)  │
//! │  └── ValidationError  - Field-level rule failures                      │
//! │                                                                         │
//! │  kasse-db errors (separate crate)                                      │
//! │  └── DbError          - Persistence failures                           │
//! │                                                                         │
//! │  kasse-service errors                                                  │
//! │  └── ServiceError     - Core + Db + Dispatch, what callers see         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{DeliveryId, ItemId, OrderId, TableId};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A stored item multiset contains a token that is not an integer.
    ///
    /// ## When This Occurs
    /// - The `item_ids` column was edited by hand
    /// - A client sent `"5,x,7"` instead of `"5,7"`
    #[error("Malformed item list: token '{token}' is not an item ID")]
    Format { token: String },

    /// An order is missing a field required before it may be stored.
    ///
    /// ## User Workflow
    /// ```text
    /// Waiter taps "Send" without picking a table
    ///      │
    ///      ▼
    /// validate_complete(order)
    ///      │
    ///      ▼
    /// IncompleteOrder { missing: "table" }
    ///      │
    ///      ▼
    /// Nothing printed, nothing stored
    /// ```
    #[error("Order is incomplete: {missing} is missing")]
    IncompleteOrder { missing: &'static str },

    /// Order lookup by ID found nothing.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Item lookup by ID found nothing.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Table lookup by ID found nothing.
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    /// Delivery lookup by ID found nothing.
    #[error("Delivery not found: {0}")]
    DeliveryNotFound(DeliveryId),

    /// Two versions being diffed belong to different orders.
    #[error("Cannot diff order {old} against order {new}")]
    OrderIdMismatch { old: OrderId, new: OrderId },

    /// `create` was called with an order that already has an ID.
    #[error("Order {0} is already persisted")]
    AlreadyPersisted(OrderId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for the lookup-miss family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::OrderNotFound(_)
                | CoreError::ItemNotFound(_)
                | CoreError::TableNotFound(_)
                | CoreError::DeliveryNotFound(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised for deliveries before anything reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::IncompleteOrder { missing: "table" };
        assert_eq!(err.to_string(), "Order is incomplete: table is missing");

        let err = CoreError::Format {
            token: "x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed item list: token 'x' is not an item ID"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_not_found_family() {
        assert!(CoreError::OrderNotFound(3).is_not_found());
        assert!(CoreError::ItemNotFound(3).is_not_found());
        assert!(!CoreError::AlreadyPersisted(3).is_not_found());
    }
}
