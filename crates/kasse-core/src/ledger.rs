//! # Inventory Ledger
//!
//! Derives current stock from history instead of storing it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stock(item) = Σ deliveries(item).quantity                              │
//! │              − Σ occurrences of item across every order's items        │
//! │                                                                         │
//! │  • every order counts, paid or not                                      │
//! │  • retired items still count                                            │
//! │  • the result may be negative (oversold / missing delivery data)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here caches. Deliveries and orders change between calls and a
//! venue's history is small, so every call recomputes from its inputs.

use crate::types::{Delivery, Item, ItemId, Order};

/// Total units of `item_id` received across all deliveries.
pub fn delivered_quantity(item_id: ItemId, deliveries: &[Delivery]) -> i64 {
    deliveries
        .iter()
        .filter(|d| d.item_id == item_id)
        .map(|d| d.quantity)
        .sum()
}

/// Total units of `item_id` ordered across all orders.
pub fn consumed_quantity(item_id: ItemId, orders: &[Order]) -> i64 {
    orders.iter().map(|o| i64::from(o.count_of(item_id))).sum()
}

/// Current available quantity of one item.
///
/// ## Example
/// ```rust
/// use kasse_core::ledger::current_quantity;
/// use kasse_core::multiset::ItemMultiset;
/// use kasse_core::{Delivery, Money, Order};
///
/// let deliveries = [Delivery::new(5, 10)];
/// let orders = [Order::draft(ItemMultiset::from_ids([5, 5, 7]), 1, Money::from_cents(900))];
///
/// assert_eq!(current_quantity(5, &deliveries, &orders), 8);
/// assert_eq!(current_quantity(7, &deliveries, &orders), -1);
/// ```
pub fn current_quantity(item_id: ItemId, deliveries: &[Delivery], orders: &[Order]) -> i64 {
    delivered_quantity(item_id, deliveries) - consumed_quantity(item_id, orders)
}

/// Fills in `quantity` on every item from the ledger.
pub fn with_quantities(items: Vec<Item>, deliveries: &[Delivery], orders: &[Order]) -> Vec<Item> {
    items
        .into_iter()
        .map(|mut item| {
            item.quantity = current_quantity(item.id, deliveries, orders);
            item
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::multiset::ItemMultiset;
    use proptest::prelude::*;

    fn order(ids: &[ItemId], paid: bool) -> Order {
        let mut o = Order::draft(ItemMultiset::from_ids(ids.to_vec()), 1, Money::from_cents(100));
        o.paid = paid;
        o
    }

    #[test]
    fn test_deliveries_without_orders() {
        let deliveries = [Delivery::new(5, 10)];
        assert_eq!(current_quantity(5, &deliveries, &[]), 10);
    }

    #[test]
    fn test_orders_consume_stock() {
        let deliveries = [Delivery::new(5, 10)];
        let orders = [order(&[5, 5, 7], false)];

        assert_eq!(current_quantity(5, &deliveries, &orders), 8);
        // No delivery for 7 at all
        assert_eq!(current_quantity(7, &deliveries, &orders), -1);
    }

    #[test]
    fn test_paid_and_unpaid_orders_both_count() {
        let deliveries = [Delivery::new(3, 4), Delivery::new(3, 6)];
        let orders = [order(&[3], true), order(&[3, 3], false)];
        assert_eq!(current_quantity(3, &deliveries, &orders), 7);
    }

    #[test]
    fn test_order_without_items_consumes_nothing() {
        let mut empty = order(&[], false);
        empty.items = None;
        assert_eq!(consumed_quantity(1, &[empty]), 0);
    }

    #[test]
    fn test_with_quantities_ignores_availability() {
        let mut retired = Item::new("Retired Soup", Money::from_cents(450));
        retired.id = 2;
        retired.available = false;
        let mut bread = Item::new("Bread", Money::from_cents(150));
        bread.id = 1;

        let deliveries = [Delivery::new(1, 20), Delivery::new(2, 5)];
        let orders = [order(&[1, 2, 2], false)];

        let items = with_quantities(vec![bread, retired], &deliveries, &orders);
        assert_eq!(items[0].quantity, 19);
        assert_eq!(items[1].quantity, 3);
    }

    proptest! {
        /// Reordering deliveries and orders never changes the result.
        #[test]
        fn quantity_is_order_independent(
            delivered in prop::collection::vec((1i64..5, 1i64..20), 0..12),
            ordered in prop::collection::vec(prop::collection::vec(1i64..5, 0..6), 0..8),
        ) {
            let deliveries: Vec<Delivery> =
                delivered.iter().map(|(id, q)| Delivery::new(*id, *q)).collect();
            let orders: Vec<Order> = ordered.iter().map(|ids| order(ids, false)).collect();

            let mut rev_deliveries = deliveries.clone();
            rev_deliveries.reverse();
            let mut rev_orders = orders.clone();
            rev_orders.reverse();

            for id in 1i64..5 {
                let expected: i64 = delivered.iter().filter(|(d, _)| *d == id).map(|(_, q)| q).sum::<i64>()
                    - ordered.iter().flatten().filter(|o| **o == id).count() as i64;
                prop_assert_eq!(current_quantity(id, &deliveries, &orders), expected);
                prop_assert_eq!(current_quantity(id, &rev_deliveries, &rev_orders), expected);
            }
        }
    }
}
