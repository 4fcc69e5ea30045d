//! # Order Lifecycle Coordinator
//!
//! Runs order transitions against the store and the receipt dispatcher.
//!
//! ## Sequences
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_order(order)                                                   │
//! │    validate_new_order ──► insert (ID assigned) ──► print plan_create   │
//! │                                                                         │
//! │  update_order(id, new)            [under lock(id)]                     │
//! │    read old ──► validate_complete ──► delta_order ──► print plan_update │
//! │             ──► persist new                                            │
//! │                                                                         │
//! │  delete_order(id)                 [under lock(id)]                     │
//! │    hard delete, any phase                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Rules
//! - Validation and lookup failures happen before any print or write.
//! - A failed print does not stop the remaining prints or the write; the
//!   first print error is returned once the write has happened.
//! - A failed write after printing is returned as is. Receipts already
//!   printed stay printed.

use kasse_core::diff::delta_order;
use kasse_core::lifecycle::{plan_create, plan_update, PlannedReceipt, PrintSubject};
use kasse_core::validation::{validate_complete, validate_new_order};
use kasse_core::{CoreError, DeltaOrder, Order, OrderId, PrintableOrder, ReceiptKind};
use tracing::{debug, info, instrument, warn};

use crate::dispatch::ReceiptDispatcher;
use crate::error::{DispatchError, ServiceResult};
use crate::locks::OrderLocks;
use crate::store::PosStore;

/// Orchestrates order creation, updates, deletion and receipt printing.
///
/// ## Usage
/// ```rust,ignore
/// let coordinator = OrderCoordinator::new(db.clone(), dispatcher);
///
/// let order = coordinator.create_order(draft).await?;
/// let delta = coordinator.update_order(order.id, changed).await?;
/// ```
#[derive(Debug)]
pub struct OrderCoordinator<S, D> {
    store: S,
    dispatcher: D,
    locks: OrderLocks,
}

impl<S, D> OrderCoordinator<S, D>
where
    S: PosStore,
    D: ReceiptDispatcher,
{
    pub fn new(store: S, dispatcher: D) -> Self {
        OrderCoordinator {
            store,
            dispatcher,
            locks: OrderLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Consumes the coordinator and returns the dispatcher.
    pub fn into_dispatcher(self) -> D {
        self.dispatcher
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Stores a new order and prints its receipts.
    ///
    /// ## Returns
    /// The stored order with its assigned ID.
    ///
    /// ## Errors
    /// * `CoreError::IncompleteOrder` / `AlreadyPersisted` - nothing written or printed
    /// * `ServiceError::Persistence` - insert failed, nothing printed
    /// * `ServiceError::Dispatch` - order is stored, a receipt failed
    #[instrument(skip_all, fields(table_id = ?order.table_id, paid = order.paid))]
    pub async fn create_order(&self, mut order: Order) -> ServiceResult<Order> {
        validate_new_order(&order)?;

        order.id = self.store.insert_order(&order).await?;
        info!(order_id = order.id, "Order created");

        let full = PrintableOrder::from(&order);
        if let Some(err) = self.dispatch(&plan_create(&order), &full, None).await? {
            return Err(err.into());
        }

        Ok(order)
    }

    /// Replaces stored order `order_id` with `new_version`.
    ///
    /// `new_version.id` may be `0` or `order_id`; anything else is rejected.
    ///
    /// ## Returns
    /// The delta between the stored and the new version. Its `removed`
    /// side is informational and never printed.
    #[instrument(skip_all, fields(order_id = order_id, paid = new_version.paid))]
    pub async fn update_order(
        &self,
        order_id: OrderId,
        mut new_version: Order,
    ) -> ServiceResult<DeltaOrder> {
        let _guard = self.locks.lock(order_id).await;

        let old = self
            .store
            .order_by_id(order_id)
            .await?
            .ok_or(CoreError::OrderNotFound(order_id))?;

        if !new_version.is_new() && new_version.id != order_id {
            return Err(CoreError::OrderIdMismatch {
                old: order_id,
                new: new_version.id,
            }
            .into());
        }
        new_version.id = order_id;
        validate_complete(&new_version)?;

        let delta = delta_order(&old, &new_version)?;
        debug!(
            added = delta.items.total_units(),
            removed = delta.removed.total_units(),
            "Computed order delta"
        );

        let plan = plan_update(&new_version, &delta);
        let full = PrintableOrder::from(&new_version);
        let partial = PrintableOrder::from(&delta);
        let failure = self.dispatch(&plan, &full, Some(&partial)).await?;

        self.store.update_order(order_id, &new_version).await?;
        info!("Order updated");

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(delta),
        }
    }

    /// Hard-deletes an order regardless of phase.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId) -> ServiceResult<()> {
        let _guard = self.locks.lock(order_id).await;

        match self.store.delete_order(order_id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => return Err(CoreError::OrderNotFound(order_id).into()),
            Err(e) => return Err(e.into()),
        }

        info!("Order deleted");
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn get_order(&self, order_id: OrderId) -> ServiceResult<Order> {
        let order = self
            .store
            .order_by_id(order_id)
            .await?
            .ok_or(CoreError::OrderNotFound(order_id))?;
        Ok(order)
    }

    pub async fn list_orders(&self) -> ServiceResult<Vec<Order>> {
        Ok(self.store.all_orders().await?)
    }

    /// Prints the customer receipt of a stored order again.
    #[instrument(skip(self))]
    pub async fn reprint_receipt(&self, order_id: OrderId) -> ServiceResult<()> {
        let order = self.get_order(order_id).await?;
        let items = self.store.all_items().await?;
        let tables = self.store.all_tables().await?;

        self.dispatcher
            .print(&PrintableOrder::from(&order), &items, &tables, ReceiptKind::Customer)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Prints every planned receipt.
    ///
    /// Store errors while loading names abort before anything is printed.
    /// Print errors are logged and the first one is handed back.
    async fn dispatch(
        &self,
        plan: &[PlannedReceipt],
        full: &PrintableOrder,
        delta: Option<&PrintableOrder>,
    ) -> ServiceResult<Option<DispatchError>> {
        if plan.is_empty() {
            debug!("Nothing to print");
            return Ok(None);
        }

        let items = self.store.all_items().await?;
        let tables = self.store.all_tables().await?;

        let mut first_error = None;
        for planned in plan {
            let subject = match planned.subject {
                PrintSubject::Delta => delta.unwrap_or(full),
                PrintSubject::Order => full,
            };

            if let Err(e) = self.dispatcher.print(subject, &items, &tables, planned.kind).await {
                warn!(order_id = full.id, kind = ?planned.kind, error = %e, "Receipt failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        Ok(first_error)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
