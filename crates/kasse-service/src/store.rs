//! # Persistence Collaborator
//!
//! The narrow set of reads and writes the services need, as a trait.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderCoordinator / InventoryService                                    │
//! │            │                                                            │
//! │            ▼                                                            │
//! │       PosStore (trait)                                                  │
//! │        ├── kasse_db::Database   SQLite, production                      │
//! │        └── MemoryStore          in-process, tests and demos             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both implementations report failures as [`DbError`] and agree on the
//! edge cases: writes to missing rows are `NotFound`, deliveries for
//! unknown items are `ForeignKeyViolation`, IDs are never reused.

use std::collections::BTreeMap;
use std::sync::Arc;

use kasse_core::{Delivery, DeliveryId, Item, ItemId, Order, OrderId, Table, TableId};
use kasse_db::{Database, DbError, DbResult};
use tokio::sync::Mutex;

/// Reads and writes the services perform against the canonical store.
#[allow(async_fn_in_trait)]
pub trait PosStore {
    async fn all_items(&self) -> DbResult<Vec<Item>>;

    async fn all_tables(&self) -> DbResult<Vec<Table>>;

    async fn all_deliveries(&self) -> DbResult<Vec<Delivery>>;

    async fn all_orders(&self) -> DbResult<Vec<Order>>;

    async fn item_by_id(&self, id: ItemId) -> DbResult<Option<Item>>;

    async fn order_by_id(&self, id: OrderId) -> DbResult<Option<Order>>;

    /// Stores a new order and returns the assigned ID.
    async fn insert_order(&self, order: &Order) -> DbResult<OrderId>;

    async fn update_order(&self, id: OrderId, order: &Order) -> DbResult<()>;

    async fn delete_order(&self, id: OrderId) -> DbResult<()>;

    /// Stores a new delivery and returns the assigned ID.
    async fn insert_delivery(&self, delivery: &Delivery) -> DbResult<DeliveryId>;

    async fn delete_delivery(&self, id: DeliveryId) -> DbResult<()>;
}

// =============================================================================
// SQLite
// =============================================================================

impl PosStore for Database {
    async fn all_items(&self) -> DbResult<Vec<Item>> {
        self.items().list_all().await
    }

    async fn all_tables(&self) -> DbResult<Vec<Table>> {
        self.tables().list_all().await
    }

    async fn all_deliveries(&self) -> DbResult<Vec<Delivery>> {
        self.deliveries().list_all().await
    }

    async fn all_orders(&self) -> DbResult<Vec<Order>> {
        self.orders().list_all().await
    }

    async fn item_by_id(&self, id: ItemId) -> DbResult<Option<Item>> {
        self.items().get_by_id(id).await
    }

    async fn order_by_id(&self, id: OrderId) -> DbResult<Option<Order>> {
        self.orders().get_by_id(id).await
    }

    async fn insert_order(&self, order: &Order) -> DbResult<OrderId> {
        self.orders().insert(order).await
    }

    async fn update_order(&self, id: OrderId, order: &Order) -> DbResult<()> {
        self.orders().update(id, order).await
    }

    async fn delete_order(&self, id: OrderId) -> DbResult<()> {
        self.orders().delete(id).await
    }

    async fn insert_delivery(&self, delivery: &Delivery) -> DbResult<DeliveryId> {
        self.deliveries().insert(delivery).await
    }

    async fn delete_delivery(&self, id: DeliveryId) -> DbResult<()> {
        self.deliveries().delete(id).await
    }
}

// =============================================================================
// In-Memory
// =============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    items: BTreeMap<ItemId, Item>,
    tables: BTreeMap<TableId, Table>,
    deliveries: BTreeMap<DeliveryId, Delivery>,
    orders: BTreeMap<OrderId, Order>,
    last_id: i64,
    offline: bool,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn check_online(&self) -> DbResult<()> {
        if self.offline {
            return Err(DbError::ConnectionFailed("store offline".to_string()));
        }
        Ok(())
    }
}

/// In-process store with the same semantics as the SQLite one.
///
/// Cloning shares the underlying state. Intended for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a menu item and returns its ID.
    pub async fn add_item(&self, item: Item) -> ItemId {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        state.items.insert(id, Item { id, quantity: 0, ..item });
        id
    }

    /// Adds a table and returns its ID.
    pub async fn add_table(&self, table: Table) -> TableId {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        state.tables.insert(id, Table { id, ..table });
        id
    }

    /// While offline, every trait call fails with `ConnectionFailed`.
    pub async fn set_offline(&self, offline: bool) {
        self.state.lock().await.offline = offline;
    }
}

impl PosStore for MemoryStore {
    async fn all_items(&self) -> DbResult<Vec<Item>> {
        let state = self.state.lock().await;
        state.check_online()?;
        Ok(state.items.values().cloned().collect())
    }

    async fn all_tables(&self) -> DbResult<Vec<Table>> {
        let state = self.state.lock().await;
        state.check_online()?;
        Ok(state.tables.values().cloned().collect())
    }

    async fn all_deliveries(&self) -> DbResult<Vec<Delivery>> {
        let state = self.state.lock().await;
        state.check_online()?;
        Ok(state.deliveries.values().copied().collect())
    }

    async fn all_orders(&self) -> DbResult<Vec<Order>> {
        let state = self.state.lock().await;
        state.check_online()?;
        Ok(state.orders.values().cloned().collect())
    }

    async fn item_by_id(&self, id: ItemId) -> DbResult<Option<Item>> {
        let state = self.state.lock().await;
        state.check_online()?;
        Ok(state.items.get(&id).cloned())
    }

    async fn order_by_id(&self, id: OrderId) -> DbResult<Option<Order>> {
        let state = self.state.lock().await;
        state.check_online()?;
        Ok(state.orders.get(&id).cloned())
    }

    async fn insert_order(&self, order: &Order) -> DbResult<OrderId> {
        let mut state = self.state.lock().await;
        state.check_online()?;
        let id = state.next_id();
        state.orders.insert(id, Order { id, ..order.clone() });
        Ok(id)
    }

    async fn update_order(&self, id: OrderId, order: &Order) -> DbResult<()> {
        let mut state = self.state.lock().await;
        state.check_online()?;
        match state.orders.get_mut(&id) {
            Some(stored) => {
                *stored = Order { id, ..order.clone() };
                Ok(())
            }
            None => Err(DbError::not_found("Order", id.to_string())),
        }
    }

    async fn delete_order(&self, id: OrderId) -> DbResult<()> {
        let mut state = self.state.lock().await;
        state.check_online()?;
        state
            .orders
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Order", id.to_string()))
    }

    async fn insert_delivery(&self, delivery: &Delivery) -> DbResult<DeliveryId> {
        let mut state = self.state.lock().await;
        state.check_online()?;
        if !state.items.contains_key(&delivery.item_id) {
            return Err(DbError::ForeignKeyViolation {
                message: format!("item {} does not exist", delivery.item_id),
            });
        }
        let id = state.next_id();
        state.deliveries.insert(id, Delivery { id, ..*delivery });
        Ok(id)
    }

    async fn delete_delivery(&self, id: DeliveryId) -> DbResult<()> {
        let mut state = self.state.lock().await;
        state.check_online()?;
        state
            .deliveries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Delivery", id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kasse_core::{ItemMultiset, Money};
    use kasse_db::DbConfig;

    fn order(table: TableId) -> Order {
        Order::draft(ItemMultiset::from_ids([1, 1]), table, Money::from_cents(700))
    }

    /// Runs the same script against any store.
    async fn exercise(store: &impl PosStore, table: TableId, item: ItemId) {
        let id = store.insert_order(&order(table)).await.unwrap();
        assert_eq!(store.order_by_id(id).await.unwrap().unwrap().id, id);

        let mut next = order(table);
        next.paid = true;
        store.update_order(id, &next).await.unwrap();
        assert!(store.order_by_id(id).await.unwrap().unwrap().paid);

        store.delete_order(id).await.unwrap();
        assert!(store.order_by_id(id).await.unwrap().is_none());
        assert!(store.delete_order(id).await.unwrap_err().is_not_found());
        assert!(store.update_order(id, &next).await.unwrap_err().is_not_found());

        let delivery = store.insert_delivery(&Delivery::new(item, 6)).await.unwrap();
        assert_eq!(store.all_deliveries().await.unwrap().len(), 1);
        store.delete_delivery(delivery).await.unwrap();
        assert!(store.delete_delivery(delivery).await.unwrap_err().is_not_found());

        let err = store.insert_delivery(&Delivery::new(item + 1000, 1)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        // IDs are not handed out twice
        let again = store.insert_order(&order(table)).await.unwrap();
        assert!(again > id);
    }

    #[tokio::test]
    async fn test_memory_store_semantics() {
        let store = MemoryStore::new();
        let table = store.add_table(Table::new("Bar")).await;
        let item = store.add_item(Item::new("Pils", Money::from_cents(320))).await;
        exercise(&store, table, item).await;
    }

    #[tokio::test]
    async fn test_database_store_semantics() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let table = db.tables().insert(&Table::new("Bar")).await.unwrap();
        let item = db
            .items()
            .insert(&Item::new("Pils", Money::from_cents(320)))
            .await
            .unwrap();
        exercise(&db, table, item).await;
    }

    #[tokio::test]
    async fn test_offline_memory_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_offline(true).await;

        assert!(matches!(
            store.all_orders().await.unwrap_err(),
            DbError::ConnectionFailed(_)
        ));
        assert!(store.insert_order(&order(1)).await.is_err());

        store.set_offline(false).await;
        assert!(store.all_orders().await.unwrap().is_empty());
    }
}
