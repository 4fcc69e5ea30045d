//! # Order Lifecycle Planning
//!
//! Decides which receipts an order transition must produce. The decisions
//! are pure; the coordinator in `kasse-service` executes them.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create (Draft → Open/Paid)                                            │
//! │     unpaid: [Kitchen(order)]                                           │
//! │     paid:   [Kitchen(order), Customer(order)]                          │
//! │     no items: the Kitchen entry is dropped                             │
//! │                                                                         │
//! │  update (Open/Paid → Open/Paid)                                        │
//! │     unpaid: [Kitchen(delta)]                                           │
//! │     paid:   [Customer(new), Kitchen(delta)]                            │
//! │     empty delta: the Kitchen entry is dropped                          │
//! │                                                                         │
//! │  Every paid update prints another customer receipt, including a       │
//! │  second paid update of an already paid order.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::receipt::ReceiptKind;
use crate::types::{DeltaOrder, Order};

/// Which version of the order a receipt is printed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintSubject {
    /// The full order as submitted.
    Order,
    /// Only the items added by an update.
    Delta,
}

/// One receipt to request from the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedReceipt {
    pub kind: ReceiptKind,
    pub subject: PrintSubject,
}

impl PlannedReceipt {
    const fn new(kind: ReceiptKind, subject: PrintSubject) -> Self {
        PlannedReceipt { kind, subject }
    }
}

/// Receipts for a newly created order, in print order.
///
/// An order without items sends nothing to the kitchen, like an update
/// that adds nothing.
pub fn plan_create(order: &Order) -> Vec<PlannedReceipt> {
    let mut plan = Vec::with_capacity(2);
    if order.items.as_ref().is_some_and(|items| !items.is_empty()) {
        plan.push(PlannedReceipt::new(ReceiptKind::Kitchen, PrintSubject::Order));
    }
    if order.paid {
        plan.push(PlannedReceipt::new(ReceiptKind::Customer, PrintSubject::Order));
    }
    plan
}

/// Receipts for an update, in print order.
pub fn plan_update(new: &Order, delta: &DeltaOrder) -> Vec<PlannedReceipt> {
    let mut plan = Vec::with_capacity(2);
    if new.paid {
        plan.push(PlannedReceipt::new(ReceiptKind::Customer, PrintSubject::Order));
    }
    if !delta.is_empty() {
        plan.push(PlannedReceipt::new(ReceiptKind::Kitchen, PrintSubject::Delta));
    }
    plan
}

// =============================================================================
// Unit Tests
// =============================================================================
