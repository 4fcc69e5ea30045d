//! # kasse-core: Pure Order & Inventory Logic for Kasse
//!
//! This crate holds every rule of the restaurant backend that can be
//! expressed without I/O: the stored item-list codec, the stock ledger,
//! order diffing, lifecycle planning and receipt text.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasse Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kasse-service (L2)                           │   │
//! │  │   OrderCoordinator ── InventoryService ── ReceiptDispatcher     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasse-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌────────┐ ┌──────┐ ┌───────────┐ ┌─────────┐  │   │
//! │  │   │ multiset │ │ ledger │ │ diff │ │ lifecycle │ │ receipt │  │   │
//! │  │   │  codec   │ │ stock  │ │delta │ │  plans    │ │  text   │  │   │
//! │  │   └──────────┘ └────────┘ └──────┘ └───────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO PRINTER • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasse-db (L1)                                │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Table, Delivery, Order, DeltaOrder)
//! - [`money`] - Money type with integer arithmetic
//! - [`multiset`] - Item multiset and its stored text form
//! - [`ledger`] - Stock derived from deliveries minus orders
//! - [`diff`] - Added/removed items between two order versions
//! - [`lifecycle`] - Which receipts each transition prints
//! - [`receipt`] - Kitchen ticket and customer receipt rendering
//! - [`validation`] - Order completeness and field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kasse_core::diff::delta_order;
//! use kasse_core::multiset::ItemMultiset;
//! use kasse_core::{Money, Order};
//!
//! let mut old = Order::draft(ItemMultiset::decode("3,3,4").unwrap(), 2, Money::from_cents(1500));
//! old.id = 7;
//! let mut new = old.clone();
//! new.items = Some(ItemMultiset::decode("3,4,6,6").unwrap());
//!
//! // Only the two new 6s go to the kitchen
//! let delta = delta_order(&old, &new).unwrap();
//! assert_eq!(delta.items.encode(), "6,6");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod diff;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod money;
pub mod multiset;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use multiset::ItemMultiset;
pub use receipt::{PrintableOrder, ReceiptKind, ReceiptSettings, RestaurantInfo};
pub use types::*;
