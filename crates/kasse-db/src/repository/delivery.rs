//! # Delivery Repository
//!
//! Deliveries are append-only facts: insert or delete, never update.
//! Their quantities are the positive side of the stock ledger.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasse_core::{Delivery, DeliveryId};

#[derive(Debug, sqlx::FromRow)]
struct DeliveryRow {
    id: i64,
    item_id: i64,
    quantity: i64,
}

impl From<DeliveryRow> for Delivery {
    fn from(row: DeliveryRow) -> Self {
        Delivery {
            id: row.id,
            item_id: row.item_id,
            quantity: row.quantity,
        }
    }
}

/// Repository for delivery database operations.
#[derive(Debug, Clone)]
pub struct DeliveryRepository {
    pool: SqlitePool,
}

impl DeliveryRepository {
    /// Creates a new DeliveryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DeliveryRepository { pool }
    }

    /// Lists every delivery ever recorded.
    pub async fn list_all(&self) -> DbResult<Vec<Delivery>> {
        let rows = sqlx::query_as::<_, DeliveryRow>(
            "SELECT id, item_id, quantity FROM deliveries ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded deliveries");
        Ok(rows.into_iter().map(Delivery::from).collect())
    }

    /// Gets a delivery by its ID.
    pub async fn get_by_id(&self, id: DeliveryId) -> DbResult<Option<Delivery>> {
        let row = sqlx::query_as::<_, DeliveryRow>(
            "SELECT id, item_id, quantity FROM deliveries WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Delivery::from))
    }

    /// Inserts a delivery and returns its assigned ID.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - `item_id` does not exist
    /// * `DbError::QueryFailed` - quantity is not positive (CHECK constraint)
    pub async fn insert(&self, delivery: &Delivery) -> DbResult<DeliveryId> {
        debug!(item_id = delivery.item_id, quantity = delivery.quantity, "Inserting delivery");

        let result = sqlx::query("INSERT INTO deliveries (item_id, quantity) VALUES (?1, ?2)")
            .bind(delivery.item_id)
            .bind(delivery.quantity)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Deletes a delivery.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - No such delivery
    pub async fn delete(&self, id: DeliveryId) -> DbResult<()> {
        debug!(id = id, "Deleting delivery");

        let result = sqlx::query("DELETE FROM deliveries WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Delivery", id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use kasse_core::{Delivery, Item, Money};

    async fn db_with_item() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let item = db
            .items()
            .insert(&Item::new("Pils 0.3", Money::from_cents(320)))
            .await
            .unwrap();
        (db, item)
    }

    #[tokio::test]
    async fn test_insert_get_delete() {
        let (db, item) = db_with_item().await;

        let id = db.deliveries().insert(&Delivery::new(item, 24)).await.unwrap();
        let stored = db.deliveries().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.item_id, item);
        assert_eq!(stored.quantity, 24);

        db.deliveries().delete(id).await.unwrap();
        assert!(db.deliveries().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (db, _) = db_with_item().await;
        let err = db.deliveries().delete(5).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_item_violates_foreign_key() {
        let (db, item) = db_with_item().await;
        let err = db
            .deliveries()
            .insert(&Delivery::new(item + 100, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_non_positive_quantity_rejected_by_schema() {
        let (db, item) = db_with_item().await;
        assert!(db.deliveries().insert(&Delivery::new(item, 0)).await.is_err());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let (db, item) = db_with_item().await;
        let first = db.deliveries().insert(&Delivery::new(item, 1)).await.unwrap();
        db.deliveries().delete(first).await.unwrap();
        let second = db.deliveries().insert(&Delivery::new(item, 1)).await.unwrap();
        assert!(second > first);
    }
}
