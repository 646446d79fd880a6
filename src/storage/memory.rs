//! In-memory storage backend for testing.
//!
//! Provides [`InMemoryStore`], a thread-safe in-memory implementation
//! of the store traits. Ideal for unit and integration tests where
//! file I/O is undesirable.

use std::sync::Mutex;

#[cfg(feature = "async")]
use core::future::{self, Future};

use crate::error::{ChangeMoneyError, Result};
use crate::models::{Order, OrderId, OrderStatus};

/// Thread-safe in-memory order store for testing.
///
/// Implements both [`super::OrderStore`] (async) and
/// [`super::BlockingOrderStore`] (blocking), providing a zero-setup
/// backend for tests. Insertion order is preserved.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// The order sequence behind a single mutex.
    orders: Mutex<Vec<Order>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut Vec<Order>) -> Result<R>) -> Result<R> {
        let mut orders = self.orders.lock().map_err(|err| lock_error(&err))?;
        f(&mut orders)
    }

    /// Read flavor of [`Self::with_lock`].
    fn read_all(&self) -> Result<Vec<Order>> {
        self.with_lock(|orders| Ok(orders.clone()))
    }

    /// Shared update-status implementation for both trait flavors.
    fn update_in_place(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> Result<Order> {
        self.with_lock(|orders| super::update_order(orders, id, status, updated_at))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> ChangeMoneyError {
    ChangeMoneyError::Storage(err.to_string().into())
}

// ── BlockingOrderStore implementation ───────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingOrderStore for InMemoryStore {
    #[inline]
    fn orders(&self) -> Result<Vec<Order>> {
        self.read_all()
    }

    #[inline]
    fn append(&self, order: Order) -> Result<()> {
        self.with_lock(|orders| {
            orders.push(order);
            Ok(())
        })
    }

    #[inline]
    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> Result<Order> {
        self.update_in_place(id, status, updated_at)
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|orders| {
            orders.clear();
            Ok(())
        })
    }
}

// ── OrderStore (async) implementation ───────────────────────────────────

#[cfg(feature = "async")]
impl super::OrderStore for InMemoryStore {
    #[inline]
    fn orders(&self) -> impl Future<Output = Result<Vec<Order>>> + Send {
        future::ready(self.read_all())
    }

    #[inline]
    fn append(&self, order: Order) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.with_lock(|orders| {
            orders.push(order);
            Ok(())
        }))
    }

    #[inline]
    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> impl Future<Output = Result<Order>> + Send {
        future::ready(self.update_in_place(id, status, updated_at))
    }

    #[inline]
    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.with_lock(|orders| {
            orders.clear();
            Ok(())
        }))
    }
}
