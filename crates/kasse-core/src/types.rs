//! # Domain Types
//!
//! Core domain types used throughout Kasse.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    Delivery     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄──│  item_id (FK)   │   │  id (0 = draft) │       │
//! │  │  name           │   │  quantity       │   │  items (bag)    │       │
//! │  │  retail_price   │   └─────────────────┘   │  price          │       │
//! │  │  quantity*      │                         │  timestamp      │       │
//! │  │  available      │   ┌─────────────────┐   │  table_id  ─────┼──┐    │
//! │  └─────────────────┘   │     Table       │   │  paid           │  │    │
//! │                        │  id, name       │◄──┴─────────────────┘──┘    │
//! │   * derived by ledger  │  available      │                             │
//! │                        └─────────────────┘   DeltaOrder: transient     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! All IDs are integers assigned by the store and never reused. Items and
//! tables are soft-deleted through `available`; orders and deliveries can be
//! hard-deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::multiset::ItemMultiset;

/// Menu item identifier.
pub type ItemId = i64;

/// Table identifier.
pub type TableId = i64;

/// Order identifier. `0` marks an order that has not been stored yet.
pub type OrderId = i64;

/// Delivery identifier.
pub type DeliveryId = i64;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1990 bps = 19.9%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Rate printed on customer receipts unless configured otherwise.
    pub const RECEIPT_DEFAULT: TaxRate = TaxRate(1990);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::RECEIPT_DEFAULT
    }
}

// =============================================================================
// Item
// =============================================================================

/// A menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: ItemId,

    /// Display name shown on tickets and receipts.
    pub name: String,

    /// Unit retail price.
    pub retail_price: Money,

    /// Units in stock. Not stored; filled in by the inventory ledger.
    #[serde(default)]
    pub quantity: i64,

    /// `false` once the item is retired (soft delete).
    pub available: bool,
}

impl Item {
    /// Creates an item that has not been stored yet.
    pub fn new(name: impl Into<String>, retail_price: Money) -> Self {
        Item {
            id: 0,
            name: name.into(),
            retail_price,
            quantity: 0,
            available: true,
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// A table guests are seated at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub available: bool,
}

impl Table {
    /// Creates a table that has not been stored yet.
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            id: 0,
            name: name.into(),
            available: true,
        }
    }
}

// =============================================================================
// Delivery
// =============================================================================

/// Goods received for one item. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub item_id: ItemId,
    /// Units received.
    pub quantity: i64,
}

impl Delivery {
    /// Creates a delivery that has not been stored yet.
    pub fn new(item_id: ItemId, quantity: i64) -> Self {
        Delivery {
            id: 0,
            item_id,
            quantity,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// Where an order stands in its lifecycle.
///
/// ```text
///   Draft ──create──► Open ──update(paid)──► Paid
///                      │  ◄──update(unpaid)──┘
///                      └──update(unpaid)──► Open
/// ```
/// Deletion is possible from any persisted phase and is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPhase {
    /// Not stored yet (`id == 0`).
    Draft,
    /// Stored, not paid.
    Open,
    /// Stored and paid.
    Paid,
}

/// A guest order.
///
/// `price` is stored independently of `items`; it is never re-derived from
/// item prices when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// `0` until the store assigns an ID.
    #[serde(default)]
    pub id: OrderId,

    /// Ordered items. `None` when the client sent nothing at all.
    pub items: Option<ItemMultiset>,

    /// Total price of the order.
    pub price: Money,

    /// When the order was placed.
    pub timestamp: Option<DateTime<Utc>>,

    /// Table the order belongs to.
    pub table_id: Option<TableId>,

    /// Whether the guest has paid.
    #[serde(default)]
    pub paid: bool,
}

impl Order {
    /// Creates a draft order stamped with the current time.
    pub fn draft(items: ItemMultiset, table_id: TableId, price: Money) -> Self {
        Order {
            id: 0,
            items: Some(items),
            price,
            timestamp: Some(Utc::now()),
            table_id: Some(table_id),
            paid: false,
        }
    }

    /// True while the order has not been stored.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> OrderPhase {
        if self.is_new() {
            OrderPhase::Draft
        } else if self.paid {
            OrderPhase::Paid
        } else {
            OrderPhase::Open
        }
    }

    /// Number of times `item_id` appears in this order.
    pub fn count_of(&self, item_id: ItemId) -> u32 {
        self.items.as_ref().map_or(0, |items| items.count(item_id))
    }
}

// =============================================================================
// Delta Order
// =============================================================================

/// Items added between two versions of one order.
///
/// Never stored. It exists to drive the kitchen ticket after an update:
/// the kitchen only needs to see what is new. ID and table come from the old
/// version; price, timestamp and paid flag come from the new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaOrder {
    pub id: OrderId,
    pub table_id: Option<TableId>,
    /// Units added by the new version.
    pub items: ItemMultiset,
    /// Units the new version dropped. Not printed anywhere.
    pub removed: ItemMultiset,
    pub price: Money,
    pub timestamp: Option<DateTime<Utc>>,
    pub paid: bool,
}

impl DeltaOrder {
    /// An empty delta means there is nothing to send to the kitchen.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
