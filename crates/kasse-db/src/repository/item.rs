//! # Item Repository
//!
//! Database operations for menu items.
//!
//! Items are read far more often than written: the ledger needs the full
//! list every time stock is shown, and receipts need names and prices.
//! The stored row never carries a quantity; it is derived from deliveries
//! and orders by `kasse_core::ledger`.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use kasse_core::{Item, ItemId, Money};

/// Row shape of the `items` table.
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    retail_price_cents: i64,
    available: bool,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            retail_price: Money::from_cents(row.retail_price_cents),
            quantity: 0,
            available: row.available,
        }
    }
}

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists every item, retired ones included, ordered by ID.
    pub async fn list_all(&self) -> DbResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, retail_price_cents, available
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded items");
        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found (may be unavailable)
    /// * `Ok(None)` - No such item
    pub async fn get_by_id(&self, id: ItemId) -> DbResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, retail_price_cents, available
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    /// Inserts a new item and returns its assigned ID.
    ///
    /// The `id` and `quantity` fields of `item` are ignored.
    pub async fn insert(&self, item: &Item) -> DbResult<ItemId> {
        debug!(name = %item.name, "Inserting item");

        let result = sqlx::query(
            r#"
            INSERT INTO items (name, retail_price_cents, available)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&item.name)
        .bind(item.retail_price.cents())
        .bind(item.available)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Counts all items (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
