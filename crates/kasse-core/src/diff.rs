//! # Order Diff
//!
//! Reconciles two versions of the same order so only new items go to the
//! kitchen, while the customer receipt still uses the full new version.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  old = {3:2, 4:1}          new = {3:1, 4:1, 6:2}                        │
//! │                                                                         │
//! │  for id in distinct(old ++ new):                                       │
//! │      delta = new[id] - old[id]                                         │
//! │                                                                         │
//! │      3: 1 - 2 = -1  → removed += 1×3                                   │
//! │      4: 1 - 1 =  0  → nothing                                          │
//! │      6: 2 - 0 = +2  → added   += 2×6                                   │
//! │                                                                         │
//! │  added = {6:2}  removed = {3:1}                                        │
//! │  added - removed == new - old, per item                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;

use crate::error::{CoreError, CoreResult};
use crate::multiset::ItemMultiset;
use crate::types::{DeltaOrder, Order};

/// Units added and removed between two multisets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultisetDiff {
    pub added: ItemMultiset,
    pub removed: ItemMultiset,
}

impl MultisetDiff {
    /// True when both sides hold the same counts.
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Computes added and removed units going from `old` to `new`.
///
/// IDs are visited in first-seen order across `old` then `new`, which is
/// the order they appear in the resulting multisets.
pub fn diff_multisets(old: &ItemMultiset, new: &ItemMultiset) -> MultisetDiff {
    let mut diff = MultisetDiff::default();
    let mut seen = ItemMultiset::new();

    for (id, _) in old.iter().chain(new.iter()) {
        if seen.count(id) > 0 {
            continue;
        }
        seen.add(id, 1);

        let before = old.count(id);
        let after = new.count(id);
        match after.cmp(&before) {
            Ordering::Greater => diff.added.add(id, after - before),
            Ordering::Less => diff.removed.add(id, before - after),
            Ordering::Equal => {}
        }
    }

    diff
}

/// Builds the delta order for an update from `old` to `new`.
///
/// ## Carried Fields
/// - `id`, `table_id`: from `old`
/// - `price`, `timestamp`, `paid`: from `new`
///
/// ## Errors
/// `OrderIdMismatch` if the two versions are not the same order.
///
/// ## Example
/// ```rust
/// use kasse_core::diff::delta_order;
/// use kasse_core::multiset::ItemMultiset;
/// use kasse_core::{Money, Order};
///
/// let mut old = Order::draft(ItemMultiset::from_ids([3, 3, 4]), 2, Money::from_cents(1500));
/// old.id = 11;
/// let mut new = old.clone();
/// new.items = Some(ItemMultiset::from_ids([3, 4, 6, 6]));
///
/// let delta = delta_order(&old, &new).unwrap();
/// assert_eq!(delta.items.encode(), "6,6");
/// assert_eq!(delta.removed.encode(), "3");
/// ```
pub fn delta_order(old: &Order, new: &Order) -> CoreResult<DeltaOrder> {
    if old.id != new.id {
        return Err(CoreError::OrderIdMismatch {
            old: old.id,
            new: new.id,
        });
    }

    let empty = ItemMultiset::new();
    let diff = diff_multisets(
        old.items.as_ref().unwrap_or(&empty),
        new.items.as_ref().unwrap_or(&empty),
    );

    Ok(DeltaOrder {
        id: old.id,
        table_id: old.table_id,
        items: diff.added,
        removed: diff.removed,
        price: new.price,
        timestamp: new.timestamp,
        paid: new.paid,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
