//! # kasse-db: Database Layer for Kasse
//!
//! This crate provides database access for the Kasse restaurant backend.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasse Data Flow                                │
//! │                                                                         │
//! │  OrderCoordinator / InventoryService (kasse-service)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kasse-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (repository/) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ ItemRepo      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ TableRepo     │    │ ...          │  │   │
//! │  │   │ Management    │    │ DeliveryRepo  │    │              │  │   │
//! │  │   │               │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <config dir>/kasse/kasse.db                                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (item, table, delivery, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasse_db::{Database, DbConfig};
//!
//! // Opens the file and applies pending migrations
//! let db = Database::new(DbConfig::new("kasse.db")).await?;
//!
//! let orders = db.orders().list_all().await?;
//! let deliveries = db.deliveries().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::delivery::DeliveryRepository;
pub use repository::item::ItemRepository;
pub use repository::order::OrderRepository;
pub use repository::table::TableRepository;
