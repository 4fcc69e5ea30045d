//! # Table Repository
//!
//! Read access to the restaurant's tables. Receipts print table names, and
//! orders reference a table by ID.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use kasse_core::{Table, TableId};

#[derive(Debug, sqlx::FromRow)]
struct TableRow {
    id: i64,
    name: String,
    available: bool,
}

impl From<TableRow> for Table {
    fn from(row: TableRow) -> Self {
        Table {
            id: row.id,
            name: row.name,
            available: row.available,
        }
    }
}

/// Repository for table database operations.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: SqlitePool,
}

impl TableRepository {
    /// Creates a new TableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TableRepository { pool }
    }

    /// Lists every table, retired ones included.
    pub async fn list_all(&self) -> DbResult<Vec<Table>> {
        let rows = sqlx::query_as::<_, TableRow>("SELECT id, name, available FROM tables ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Table::from).collect())
    }

    /// Gets a table by its ID.
    pub async fn get_by_id(&self, id: TableId) -> DbResult<Option<Table>> {
        let row = sqlx::query_as::<_, TableRow>(
            "SELECT id, name, available FROM tables WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Table::from))
    }

    /// Inserts a new table and returns its assigned ID.
    pub async fn insert(&self, table: &Table) -> DbResult<TableId> {
        debug!(name = %table.name, "Inserting table");

        let result = sqlx::query("INSERT INTO tables (name, available) VALUES (?1, ?2)")
            .bind(&table.name)
            .bind(table.available)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }
}
