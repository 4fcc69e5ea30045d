//! # kasse-service: Order Lifecycle & Inventory Services
//!
//! Connects the pure rules in `kasse-core` to the SQLite store in
//! `kasse-db` and to receipt printers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasse Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ kasse-service (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐  ┌──────────────────┐  ┌─────────────┐  │   │
//! │  │   │ OrderCoordinator │  │ InventoryService │  │ KasseConfig │  │   │
//! │  │   │  create/update/  │  │  stock, items,   │  │  telemetry  │  │   │
//! │  │   │  delete + print  │  │  deliveries      │  │             │  │   │
//! │  │   └───┬──────────┬───┘  └────────┬─────────┘  └─────────────┘  │   │
//! │  │       │          │               │                              │   │
//! │  │       │   ReceiptDispatcher      │                              │   │
//! │  │       ▼                          ▼                              │   │
//! │  │   ┌──────────────────────────────────┐                          │   │
//! │  │   │        PosStore (trait)          │                          │   │
//! │  │   └───────────────┬──────────────────┘                          │   │
//! │  └───────────────────┼─────────────────────────────────────────────┘   │
//! │                      ▼                                                  │
//! │        kasse-db (SQLite)      kasse-core (rules, no I/O)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//! ```rust,ignore
//! use kasse_service::{Kasse, KasseConfig, TextReceiptDispatcher};
//!
//! let config = KasseConfig::load_or_default(None);
//! kasse_service::telemetry::init_tracing(&config.log_filter);
//!
//! let printer = TextReceiptDispatcher::new(tokio::io::stdout(), config.receipt_settings());
//! let kasse = Kasse::open(&config, printer).await?;
//!
//! let order = kasse.orders.create_order(draft).await?;
//! let stock = kasse.inventory.list_items().await?;
//! ```

pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod inventory;
pub mod locks;
pub mod store;
pub mod telemetry;

#[cfg(test)]
mod testing;

pub use config::KasseConfig;
pub use coordinator::OrderCoordinator;
pub use dispatch::{ReceiptDispatcher, TextReceiptDispatcher};
pub use error::{DispatchError, DispatchResult, ServiceError, ServiceResult};
pub use inventory::InventoryService;
pub use store::{MemoryStore, PosStore};

use kasse_db::Database;
use tracing::info;

/// The two services wired to one SQLite database.
#[derive(Debug)]
pub struct Kasse<D> {
    pub orders: OrderCoordinator<Database, D>,
    pub inventory: InventoryService<Database>,
}

impl<D: ReceiptDispatcher> Kasse<D> {
    /// Connects to the configured database (running migrations) and wires
    /// both services to it.
    pub async fn open(config: &KasseConfig, dispatcher: D) -> ServiceResult<Self> {
        let db = Database::new(config.db_config()).await?;
        info!(path = ?config.database_path, "Kasse ready");

        Ok(Kasse {
            orders: OrderCoordinator::new(db.clone(), dispatcher),
            inventory: InventoryService::new(db),
        })
    }

    /// The shared database handle.
    pub fn database(&self) -> &Database {
        self.orders.store()
    }
}
