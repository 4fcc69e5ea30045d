//! # Item Multiset
//!
//! The bag of item IDs an order consists of, plus the codec for its stored
//! text form.
//!
//! ## Stored Form
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders.item_ids = "5,5,7"                                              │
//! │                        │                                                │
//! │                 decode │  ▲ encode                                      │
//! │                        ▼  │                                             │
//! │  ItemMultiset { 5 → 2, 7 → 1 }   (distinct IDs in first-seen order)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the counts matter for equality. Insertion order is kept so that
//! encoding a diff result lists items in the order they were discovered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::ItemId;

/// Separator between IDs in the stored text form.
pub const ITEM_DELIMITER: char = ',';

/// A multiset of item IDs.
///
/// ## Example
/// ```rust
/// use kasse_core::multiset::ItemMultiset;
///
/// let bag = ItemMultiset::decode("5,7,5").unwrap();
/// assert_eq!(bag.count(5), 2);
/// assert_eq!(bag.encode(), "5,5,7");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<ItemId>", from = "Vec<ItemId>")]
pub struct ItemMultiset {
    /// Distinct IDs with their counts. Counts are never zero.
    entries: Vec<(ItemId, u32)>,
}

impl ItemMultiset {
    /// Creates an empty multiset.
    pub fn new() -> Self {
        ItemMultiset::default()
    }

    /// Builds a multiset from individual units.
    pub fn from_ids(ids: impl IntoIterator<Item = ItemId>) -> Self {
        ids.into_iter().collect()
    }

    /// Decodes the stored text form.
    ///
    /// Blank input is the empty multiset. Any token that is not an integer
    /// (including an empty token between two delimiters) is rejected.
    pub fn decode(text: &str) -> CoreResult<Self> {
        let text = text.trim();
        let mut bag = ItemMultiset::new();

        if text.is_empty() {
            return Ok(bag);
        }

        for token in text.split(ITEM_DELIMITER) {
            let token = token.trim();
            let id = token.parse::<ItemId>().map_err(|_| CoreError::Format {
                token: token.to_string(),
            })?;
            bag.add(id, 1);
        }

        Ok(bag)
    }

    /// Decodes a nullable column; `None` decodes to the empty multiset.
    pub fn decode_opt(text: Option<&str>) -> CoreResult<Self> {
        text.map_or_else(|| Ok(ItemMultiset::new()), ItemMultiset::decode)
    }

    /// Encodes to the stored text form, one token per unit.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for id in self.units() {
            if !out.is_empty() {
                out.push(ITEM_DELIMITER);
            }
            out.push_str(&id.to_string());
        }
        out
    }

    /// Adds `count` units of `id`.
    pub fn add(&mut self, id: ItemId, count: u32) {
        if count == 0 {
            return;
        }
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, n)) => *n += count,
            None => self.entries.push((id, count)),
        }
    }

    /// Units of `id` in the multiset.
    pub fn count(&self, id: ItemId) -> u32 {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map_or(0, |(_, n)| *n)
    }

    /// True if the multiset holds no units.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of units.
    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|(_, n)| u64::from(*n)).sum()
    }

    /// Distinct IDs with counts, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Every unit, repeats included, grouped by ID in first-seen order.
    pub fn units(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries
            .iter()
            .flat_map(|(id, n)| std::iter::repeat(*id).take(*n as usize))
    }
}

/// Equality is by counts only; insertion order is ignored.
impl PartialEq for ItemMultiset {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(id, n)| other.count(*id) == *n)
    }
}

impl Eq for ItemMultiset {}

impl FromIterator<ItemId> for ItemMultiset {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        let mut bag = ItemMultiset::new();
        for id in iter {
            bag.add(id, 1);
        }
        bag
    }
}

impl From<Vec<ItemId>> for ItemMultiset {
    fn from(ids: Vec<ItemId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<ItemMultiset> for Vec<ItemId> {
    fn from(bag: ItemMultiset) -> Self {
        bag.units().collect()
    }
}

impl FromStr for ItemMultiset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemMultiset::decode(s)
    }
}

impl fmt::Display for ItemMultiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_counts_repeats() {
        let bag = ItemMultiset::decode("5,5,7").unwrap();
        assert_eq!(bag.count(5), 2);
        assert_eq!(bag.count(7), 1);
        assert_eq!(bag.count(8), 0);
        assert_eq!(bag.total_units(), 3);
    }

    #[test]
    fn test_decode_blank_is_empty() {
        assert!(ItemMultiset::decode("").unwrap().is_empty());
        assert!(ItemMultiset::decode("   ").unwrap().is_empty());
        assert!(ItemMultiset::decode_opt(None).unwrap().is_empty());
    }

    #[test]
    fn test_decode_trims_tokens() {
        let bag = ItemMultiset::decode(" 3 , 4,3 ").unwrap();
        assert_eq!(bag.count(3), 2);
        assert_eq!(bag.count(4), 1);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = ItemMultiset::decode("5,x,7").unwrap_err();
        assert_eq!(
            err,
            CoreError::Format {
                token: "x".to_string()
            }
        );

        assert!(matches!(
            ItemMultiset::decode("5,,7"),
            Err(CoreError::Format { .. })
        ));
        assert!(matches!(
            ItemMultiset::decode("5;7"),
            Err(CoreError::Format { .. })
        ));
    }

    #[test]
    fn test_encode_groups_in_first_seen_order() {
        let bag = ItemMultiset::from_ids([9, 2, 9, 4, 2]);
        assert_eq!(bag.encode(), "9,9,2,2,4");
        assert_eq!(ItemMultiset::new().encode(), "");
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = ItemMultiset::from_ids([1, 2, 2]);
        let b = ItemMultiset::from_ids([2, 1, 2]);
        let c = ItemMultiset::from_ids([1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut bag = ItemMultiset::new();
        bag.add(3, 0);
        assert!(bag.is_empty());
        assert_eq!(bag, ItemMultiset::new());
    }

    #[test]
    fn test_serde_as_flat_id_list() {
        let bag = ItemMultiset::from_ids([5, 7, 5]);
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, "[5,5,7]");

        let back: ItemMultiset = serde_json::from_str("[7,5,5]").unwrap();
        assert_eq!(back, bag);
    }

    proptest! {
        /// decode(encode(m)) == m for any multiset.
        #[test]
        fn round_trip_preserves_counts(ids in prop::collection::vec(1i64..50, 0..40)) {
            let bag = ItemMultiset::from_ids(ids.clone());
            let decoded = ItemMultiset::decode(&bag.encode()).unwrap();
            prop_assert_eq!(&decoded, &bag);
            prop_assert_eq!(decoded.total_units(), ids.len() as u64);
        }
    }
}
