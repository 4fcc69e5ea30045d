//! Test doubles for the receipt dispatcher.

use std::sync::atomic::{AtomicUsize, Ordering};

use kasse_core::{Item, PrintableOrder, ReceiptKind, Table};
use tokio::sync::Mutex;

use crate::dispatch::ReceiptDispatcher;
use crate::error::{DispatchError, DispatchResult};

/// One recorded `print` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintCall {
    pub kind: ReceiptKind,
    pub order: PrintableOrder,
}

/// Records every print request, optionally failing one kind of receipt.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    calls: Mutex<Vec<PrintCall>>,
    fail_on: Option<ReceiptKind>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher whose `kind` receipts always fail (after being recorded).
    pub fn failing_on(kind: ReceiptKind) -> Self {
        RecordingDispatcher {
            fail_on: Some(kind),
            ..Self::default()
        }
    }

    pub async fn calls(&self) -> Vec<PrintCall> {
        self.calls.lock().await.clone()
    }

    pub async fn kinds(&self) -> Vec<ReceiptKind> {
        self.calls.lock().await.iter().map(|c| c.kind).collect()
    }

    /// Highest number of `print` calls that were running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl ReceiptDispatcher for RecordingDispatcher {
    async fn print(
        &self,
        order: &PrintableOrder,
        _items: &[Item],
        _tables: &[Table],
        kind: ReceiptKind,
    ) -> DispatchResult<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Give other tasks a chance to interleave, like a slow printer would.
        tokio::task::yield_now().await;

        self.calls.lock().await.push(PrintCall {
            kind,
            order: order.clone(),
        });
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on == Some(kind) {
            return Err(DispatchError::Unavailable("paper jam".to_string()));
        }
        Ok(())
    }
}
