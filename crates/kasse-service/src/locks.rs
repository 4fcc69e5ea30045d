//! # Per-Order Locks
//!
//! Serializes the read-old → diff → print → persist sequence per order ID.
//!
//! ```text
//!   update(12) ──┐
//!   update(12) ──┼──► lock(12) ──► one at a time
//!   delete(12) ──┘
//!   update(13) ─────► lock(13) ──► runs in parallel with order 12
//! ```
//!
//! An entry exists only while someone holds or waits for that order's
//! lock. The last [`OrderGuard`] to drop removes it, so the map stays as
//! small as the number of orders currently being changed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use kasse_core::OrderId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<OrderId, Arc<AsyncMutex<()>>>;

/// One async mutex per order ID currently in use.
///
/// The map itself sits behind a sync mutex: it is only touched for a
/// lookup or a removal and never across an `.await`.
#[derive(Debug, Default)]
pub struct OrderLocks {
    locks: Arc<Mutex<LockMap>>,
}

impl OrderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `id`. Held until the guard drops.
    pub async fn lock(&self, id: OrderId) -> OrderGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(id).or_default())
        };

        OrderGuard {
            id,
            guard: Some(lock.lock_owned().await),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of order IDs currently held or awaited.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive access to one order. Dropping it releases the order and
/// removes the map entry if nobody else is waiting.
#[derive(Debug)]
pub struct OrderGuard {
    id: OrderId,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<Mutex<LockMap>>,
}

impl OrderGuard {
    pub fn order_id(&self) -> OrderId {
        self.id
    }
}

impl Drop for OrderGuard {
    fn drop(&mut self) {
        // New callers clone the entry under this same map lock, so the
        // count cannot grow between the check and the removal.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(self.guard.take());

        let idle = locks
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if idle {
            locks.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_id_is_exclusive() {
        let locks = OrderLocks::new();
        let guard = locks.lock(1).await;

        let second = tokio::time::timeout(Duration::from_millis(20), locks.lock(1)).await;
        assert!(second.is_err(), "second lock on the same order must wait");

        drop(guard);
        let third = tokio::time::timeout(Duration::from_millis(20), locks.lock(1)).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn test_different_ids_do_not_block() {
        let locks = OrderLocks::new();
        let _one = locks.lock(1).await;
        let two = tokio::time::timeout(Duration::from_millis(20), locks.lock(2)).await;
        assert!(two.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_entry_removed_when_last_guard_drops() {
        let locks = OrderLocks::new();
        for id in 0..100 {
            let guard = locks.lock(id).await;
            assert_eq!(guard.order_id(), id);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_entry_kept_while_someone_waits() {
        let locks = OrderLocks::new();
        let first = locks.lock(7).await;

        let (_, waited) = tokio::join!(
            async {
                tokio::task::yield_now().await;
                assert_eq!(locks.len(), 1);
                drop(first);
                // The waiter still holds a reference; the entry must stay.
                assert_eq!(locks.len(), 1);
            },
            locks.lock(7),
        );

        assert_eq!(locks.len(), 1);
        drop(waited);
        assert!(locks.is_empty());
    }
}
