//! # Validation Module
//!
//! Input validation for Kasse.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (pure, before any side effect)                   │
//! │  ├── Order completeness (items, table, price, timestamp)               │
//! │  └── Delivery field rules                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK (quantity > 0)                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasse_core::validation::validate_complete;
//! use kasse_core::multiset::ItemMultiset;
//! use kasse_core::{Money, Order};
//!
//! let mut order = Order::draft(ItemMultiset::from_ids([1]), 3, Money::from_cents(450));
//! assert!(validate_complete(&order).is_ok());
//!
//! order.table_id = None;
//! assert!(validate_complete(&order).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Delivery, Order};

/// Result type for field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Order Validators
// =============================================================================

/// Checks that an order carries everything it needs to be stored.
///
/// ## Rules
/// - `items` present (an empty list is allowed, a missing one is not)
/// - `table_id` present and positive
/// - `price` nonzero
/// - `timestamp` present
///
/// The first missing field is reported.
pub fn validate_complete(order: &Order) -> CoreResult<()> {
    let missing = if order.items.is_none() {
        Some("items")
    } else if !order.table_id.is_some_and(|id| id > 0) {
        Some("table")
    } else if order.price.is_zero() {
        Some("price")
    } else if order.timestamp.is_none() {
        Some("timestamp")
    } else {
        None
    };

    match missing {
        Some(missing) => Err(CoreError::IncompleteOrder { missing }),
        None => Ok(()),
    }
}

/// Checks an order about to be created: complete and not yet stored.
pub fn validate_new_order(order: &Order) -> CoreResult<()> {
    validate_complete(order)?;

    if !order.is_new() {
        return Err(CoreError::AlreadyPersisted(order.id));
    }

    Ok(())
}

// =============================================================================
// Delivery Validators
// =============================================================================

/// Validates a delivery before it is recorded.
pub fn validate_delivery(delivery: &Delivery) -> ValidationResult<()> {
    if delivery.quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if delivery.item_id <= 0 {
        return Err(ValidationError::Required {
            field: "item_id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
