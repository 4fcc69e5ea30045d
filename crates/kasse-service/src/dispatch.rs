//! # Receipt Dispatch
//!
//! The boundary between deciding *what* to print and actually printing.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderCoordinator                                                       │
//! │       │ print(order, items, tables, ReceiptKind::Kitchen)               │
//! │       ▼                                                                 │
//! │  ReceiptDispatcher (trait)                                              │
//! │       │                                                                 │
//! │       └── TextReceiptDispatcher<W: AsyncWrite>                          │
//! │              render_* (kasse-core) ──► UTF-8 ──► W                      │
//! │              W = stdout, a file, a TCP stream to a text printer, Vec    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Restaurant details, tax rate and paper width are injected through
//! [`ReceiptSettings`]; nothing here reads global state.

use kasse_core::receipt::{self, PrintableOrder, ReceiptKind, ReceiptSettings};
use kasse_core::{Item, Table};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::error::DispatchResult;

/// Line written after every ticket so consecutive tickets stay apart.
pub const TICKET_SEPARATOR: &str = "\n\n";

/// Accepts print requests from the coordinator.
#[allow(async_fn_in_trait)]
pub trait ReceiptDispatcher {
    /// Prints one receipt.
    ///
    /// `items` and `tables` are the full lists (retired rows included) so
    /// names and prices resolve for historical orders.
    async fn print(
        &self,
        order: &PrintableOrder,
        items: &[Item],
        tables: &[Table],
        kind: ReceiptKind,
    ) -> DispatchResult<()>;
}

/// Renders receipts as text and writes them to an async sink.
#[derive(Debug)]
pub struct TextReceiptDispatcher<W> {
    sink: Mutex<W>,
    settings: ReceiptSettings,
}

impl<W> TextReceiptDispatcher<W>
where
    W: AsyncWrite + Unpin,
{
    /// Creates a dispatcher writing to `sink`.
    pub fn new(sink: W, settings: ReceiptSettings) -> Self {
        TextReceiptDispatcher {
            sink: Mutex::new(sink),
            settings,
        }
    }

    /// Settings used for rendering.
    pub fn settings(&self) -> &ReceiptSettings {
        &self.settings
    }

    /// Consumes the dispatcher and returns the sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

impl<W> ReceiptDispatcher for TextReceiptDispatcher<W>
where
    W: AsyncWrite + Unpin,
{
    #[instrument(skip_all, fields(order_id = order.id, kind = ?kind))]
    async fn print(
        &self,
        order: &PrintableOrder,
        items: &[Item],
        tables: &[Table],
        kind: ReceiptKind,
    ) -> DispatchResult<()> {
        let text = receipt::render(kind, order, items, tables, &self.settings);

        // One ticket at a time; interleaved writes would garble both.
        let mut sink = self.sink.lock().await;
        sink.write_all(text.as_bytes()).await?;
        sink.write_all(TICKET_SEPARATOR.as_bytes()).await?;
        sink.flush().await?;

        debug!(bytes = text.len(), "Receipt written");
        Ok(())
    }
}
