//! # Inventory Service
//!
//! Stock queries and delivery bookkeeping.
//!
//! Every stock figure is recomputed from the full delivery and order
//! history on each call through [`kasse_core::ledger`]; nothing is cached
//! between calls.

use kasse_core::ledger::{current_quantity, with_quantities};
use kasse_core::validation::validate_delivery;
use kasse_core::{CoreError, Delivery, DeliveryId, Item, ItemId, Table};
use tracing::{debug, info, instrument};

use crate::error::ServiceResult;
use crate::store::PosStore;

/// Read side of the menu plus the delivery ledger.
#[derive(Debug, Clone)]
pub struct InventoryService<S> {
    store: S,
}

impl<S: PosStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        InventoryService { store }
    }

    /// All items, retired ones included, with derived quantities.
    pub async fn list_items(&self) -> ServiceResult<Vec<Item>> {
        let items = self.store.all_items().await?;
        let deliveries = self.store.all_deliveries().await?;
        let orders = self.store.all_orders().await?;

        debug!(
            items = items.len(),
            deliveries = deliveries.len(),
            orders = orders.len(),
            "Computing stock"
        );
        Ok(with_quantities(items, &deliveries, &orders))
    }

    /// One item with its derived quantity.
    pub async fn item_with_quantity(&self, id: ItemId) -> ServiceResult<Item> {
        let mut item = self
            .store
            .item_by_id(id)
            .await?
            .ok_or(CoreError::ItemNotFound(id))?;
        item.quantity = self.current_quantity(id).await?;
        Ok(item)
    }

    /// Stock of `id`: delivered minus ordered. May be negative.
    ///
    /// Works for IDs with no item row as well; they simply have no
    /// deliveries.
    pub async fn current_quantity(&self, id: ItemId) -> ServiceResult<i64> {
        let deliveries = self.store.all_deliveries().await?;
        let orders = self.store.all_orders().await?;
        Ok(current_quantity(id, &deliveries, &orders))
    }

    pub async fn list_deliveries(&self) -> ServiceResult<Vec<Delivery>> {
        Ok(self.store.all_deliveries().await?)
    }

    /// Records received goods for an existing item.
    ///
    /// ## Errors
    /// * `ValidationError::MustBePositive` - quantity ≤ 0
    /// * `CoreError::ItemNotFound` - no such item (retired items are fine)
    #[instrument(skip(self), fields(item_id = delivery.item_id, quantity = delivery.quantity))]
    pub async fn record_delivery(&self, delivery: Delivery) -> ServiceResult<Delivery> {
        validate_delivery(&delivery)?;

        if self.store.item_by_id(delivery.item_id).await?.is_none() {
            return Err(CoreError::ItemNotFound(delivery.item_id).into());
        }

        let id = self.store.insert_delivery(&delivery).await?;
        info!(delivery_id = id, "Delivery recorded");
        Ok(Delivery { id, ..delivery })
    }

    /// Removes a delivery, e.g. one booked against the wrong item.
    #[instrument(skip(self))]
    pub async fn delete_delivery(&self, id: DeliveryId) -> ServiceResult<()> {
        match self.store.delete_delivery(id).await {
            Ok(()) => {
                info!("Delivery deleted");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(CoreError::DeliveryNotFound(id).into()),
            Err(e) => Err(e.into()),
        }
    }

    /// All tables, retired ones included.
    pub async fn list_tables(&self) -> ServiceResult<Vec<Table>> {
        Ok(self.store.all_tables().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::store::MemoryStore;
    use kasse_core::{ItemMultiset, Money, Order, ValidationError};

    async fn setup() -> (InventoryService<MemoryStore>, MemoryStore, ItemId, ItemId) {
        let store = MemoryStore::new();
        let bread = store.add_item(Item::new("Brot", Money::from_cents(150))).await;
        let mut soup = Item::new("Suppe", Money::from_cents(590));
        soup.available = false;
        let soup = store.add_item(soup).await;
        (InventoryService::new(store.clone()), store, bread, soup)
    }

    async fn place(store: &MemoryStore, ids: &[ItemId], paid: bool) {
        let mut order = Order::draft(ItemMultiset::from_ids(ids.to_vec()), 1, Money::from_cents(100));
        order.paid = paid;
        store.insert_order(&order).await.unwrap();
    }

    #[tokio::test]
    async fn test_quantity_is_deliveries_minus_orders() {
        let (inventory, store, bread, _) = setup().await;
        inventory.record_delivery(Delivery::new(bread, 10)).await.unwrap();
        assert_eq!(inventory.current_quantity(bread).await.unwrap(), 10);

        place(&store, &[bread, bread], false).await;
        place(&store, &[bread], true).await;
        assert_eq!(inventory.current_quantity(bread).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_quantity_without_deliveries_goes_negative() {
        let (inventory, store, bread, _) = setup().await;
        place(&store, &[bread], false).await;
        assert_eq!(inventory.current_quantity(bread).await.unwrap(), -1);
    }

    #[tokio::test]
    async fn test_list_items_covers_retired_items() {
        let (inventory, store, bread, soup) = setup().await;
        inventory.record_delivery(Delivery::new(soup, 4)).await.unwrap();
        place(&store, &[soup, bread], false).await;

        let items = inventory.list_items().await.unwrap();
        let soup_row = items.iter().find(|i| i.id == soup).unwrap();
        assert!(!soup_row.available);
        assert_eq!(soup_row.quantity, 3);
        assert_eq!(items.iter().find(|i| i.id == bread).unwrap().quantity, -1);
    }

    #[tokio::test]
    async fn test_item_with_quantity() {
        let (inventory, _, bread, _) = setup().await;
        inventory.record_delivery(Delivery::new(bread, 5)).await.unwrap();

        let item = inventory.item_with_quantity(bread).await.unwrap();
        assert_eq!(item.quantity, 5);
        assert!(inventory.item_with_quantity(999).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_record_delivery_rules() {
        let (inventory, _, bread, _) = setup().await;

        let err = inventory.record_delivery(Delivery::new(bread, 0)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let err = inventory.record_delivery(Delivery::new(404, 3)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::ItemNotFound(404))));
        assert!(inventory.list_deliveries().await.unwrap().is_empty());

        let stored = inventory.record_delivery(Delivery::new(bread, 3)).await.unwrap();
        assert!(stored.id > 0);
    }

    #[tokio::test]
    async fn test_delete_delivery_updates_stock() {
        let (inventory, _, bread, _) = setup().await;
        let first = inventory.record_delivery(Delivery::new(bread, 10)).await.unwrap();
        inventory.record_delivery(Delivery::new(bread, 2)).await.unwrap();

        inventory.delete_delivery(first.id).await.unwrap();
        assert_eq!(inventory.current_quantity(bread).await.unwrap(), 2);

        let err = inventory.delete_delivery(first.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::DeliveryNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_tables() {
        let (inventory, store, _, _) = setup().await;
        store.add_table(Table::new("Theke")).await;
        assert_eq!(inventory.list_tables().await.unwrap().len(), 1);
    }
}
