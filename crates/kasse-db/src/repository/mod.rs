//! # Repository Module
//!
//! Database repository implementations for Kasse.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  OrderCoordinator (kasse-service)                                      │
//! │       │                                                                 │
//! │       │  db.orders().get_by_id(12)                                     │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── list_all(&self)                                                   │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, order)                                              │
//! │  ├── update(&self, id, order)                                          │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (mock the repository)                                  │
//! │  • SQL is isolated in one place                                        │
//! │  • Can swap database implementations                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Menu items
//! - [`table::TableRepository`] - Tables
//! - [`delivery::DeliveryRepository`] - Deliveries (insert/delete only)
//! - [`order::OrderRepository`] - Orders and their stored item lists

pub mod delivery;
pub mod item;
pub mod order;
pub mod table;
