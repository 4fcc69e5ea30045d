//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## Stored Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders row                          Order (kasse-core)                │
//! │  ──────────────────────────          ─────────────────────────────     │
//! │  item_ids    "5,5,7"        ──────►  items: Some({5:2, 7:1})           │
//! │  price_cents 1790           ──────►  price: Money(1790)                │
//! │  created_at  2024-05-01T..  ──────►  timestamp                         │
//! │  table_id    3              ──────►  table_id                          │
//! │  paid        0/1            ──────►  paid                              │
//! │                                                                         │
//! │  The text form exists only in this file. A row whose item_ids do not   │
//! │  decode is reported as DbError::InvalidData, never skipped.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasse_core::{ItemMultiset, Money, Order, OrderId};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    item_ids: String,
    price_cents: i64,
    created_at: DateTime<Utc>,
    table_id: i64,
    paid: bool,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> DbResult<Self> {
        let items = ItemMultiset::decode(&row.item_ids)
            .map_err(|e| DbError::invalid_data("Order", row.id.to_string(), e))?;

        Ok(Order {
            id: row.id,
            items: Some(items),
            price: Money::from_cents(row.price_cents),
            timestamp: Some(row.created_at),
            table_id: Some(row.table_id),
            paid: row.paid,
        })
    }
}

/// Encodes the multiset for storage. A missing multiset is stored empty.
fn encode_items(order: &Order) -> String {
    order
        .items
        .as_ref()
        .map(ItemMultiset::encode)
        .unwrap_or_default()
}

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = OrderRepository::new(pool);
///
/// let id = repo.insert(&order).await?;
/// let stored = repo.get_by_id(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Lists every order, paid or not, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, item_ids, price_cents, created_at, table_id, paid
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded orders");
        rows.into_iter().map(Order::try_from).collect()
    }

    /// Gets an order by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Order))` - Order found
    /// * `Ok(None)` - No such order
    /// * `Err(DbError::InvalidData)` - Stored item list is malformed
    pub async fn get_by_id(&self, id: OrderId) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, item_ids, price_cents, created_at, table_id, paid
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Inserts a new order and returns its assigned ID.
    ///
    /// The order's own `id` is ignored. A missing table or timestamp fails
    /// on the NOT NULL constraint; callers validate before getting here.
    pub async fn insert(&self, order: &Order) -> DbResult<OrderId> {
        debug!(table_id = ?order.table_id, paid = order.paid, "Inserting order");

        let result = sqlx::query(
            r#"
            INSERT INTO orders (item_ids, price_cents, created_at, table_id, paid)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(encode_items(order))
        .bind(order.price.cents())
        .bind(order.timestamp)
        .bind(order.table_id)
        .bind(order.paid)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(order_id = id, "Order inserted");
        Ok(id)
    }

    /// Overwrites the stored order `id` with `order`.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn update(&self, id: OrderId, order: &Order) -> DbResult<()> {
        debug!(order_id = id, paid = order.paid, "Updating order");

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                item_ids = ?2,
                price_cents = ?3,
                created_at = ?4,
                table_id = ?5,
                paid = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(encode_items(order))
        .bind(order.price.cents())
        .bind(order.timestamp)
        .bind(order.table_id)
        .bind(order.paid)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id.to_string()));
        }

        Ok(())
    }

    /// Hard-deletes an order. Irreversible.
    pub async fn delete(&self, id: OrderId) -> DbResult<()> {
        debug!(order_id = id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id.to_string()));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
