//! # Database Error Types
//!
//! Everything the SQLite store can report back to the services.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  repository call                     DbError                            │
//! │  ───────────────                     ───────                            │
//! │  update/delete order, 0 rows    ──►  NotFound { "Order", id }           │
//! │  delete delivery, 0 rows        ──►  NotFound { "Delivery", id }        │
//! │  delivery for unknown item      ──►  ForeignKeyViolation                │
//! │  order for unknown table        ──►  ForeignKeyViolation                │
//! │  item_ids "3,x,4" on read       ──►  InvalidData { "Order", id, .. }    │
//! │  quantity <= 0 (CHECK)          ──►  QueryFailed                        │
//! │  pool closed / file unusable    ──►  ConnectionFailed                   │
//! │  every connection busy          ──►  PoolExhausted                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The coordinator turns `NotFound` into the matching domain error; all
//! other variants reach the caller as `ServiceError::Persistence`.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A write or lookup by ID matched no row.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A referenced item or table does not exist.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// The database file could not be opened, or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An embedded migration could not be applied.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected the statement, e.g. a CHECK constraint.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored row does not decode into a domain value.
    #[error("Invalid data in {entity} {id}: {message}")]
    InvalidData {
        entity: String,
        id: String,
        message: String,
    },

    /// No connection became free within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// A row whose stored text failed to decode.
    pub fn invalid_data(
        entity: impl Into<String>,
        id: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        DbError::InvalidData {
            entity: entity.into(),
            id: id.into(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),
            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),
            other => DbError::QueryFailed(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Order", "42");
        assert_eq!(err.to_string(), "Order not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_data_message() {
        let err = DbError::invalid_data("Order", "7", "token 'x' is not an item ID");
        assert_eq!(
            err.to_string(),
            "Invalid data in Order 7: token 'x' is not an item ID"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_sqlx_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(DbError::from(sqlx::Error::RowNotFound).is_not_found());
        assert!(matches!(
            DbError::from(sqlx::Error::Protocol("bad frame".into())),
            DbError::QueryFailed(_)
        ));
    }
}
