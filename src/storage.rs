//! Pluggable storage backends for the persisted order sequence.
//!
//! This module defines the [`OrderStore`] (async) and
//! [`BlockingOrderStore`] (blocking) traits via a shared macro,
//! mirroring the client generation pattern in [`crate::client`], plus
//! the [`FallbackStore`] combinator that degrades from a primary
//! backend to a local one.
//!
//! Every mutation is a read-modify-write of the whole sequence. The
//! file backend serializes writers behind a lock; the remote backend
//! has no compare-and-swap, so two independent remote writers can
//! still lose an update. That limitation is inherited from the wire
//! format, not hidden here.

#[cfg(feature = "storage-file")]
mod file;
mod memory;
#[cfg(any(feature = "async", feature = "blocking"))]
mod remote;

#[cfg(feature = "storage-file")]
pub use file::FileStore;
pub use memory::InMemoryStore;
#[cfg(feature = "async")]
pub use remote::RemoteStore;
#[cfg(feature = "blocking")]
pub use remote::RemoteBlockingStore;

use crate::error::{ChangeMoneyError, Result};
use crate::models::{Order, OrderId, OrderStatus};

/// Applies a status change to the matching order in a sequence.
///
/// Shared across backends so all of them report not-found identically
/// and leave the sequence untouched when the id is unknown.
fn update_order(
    orders: &mut [Order],
    id: &OrderId,
    status: OrderStatus,
    updated_at: String,
) -> Result<Order> {
    let Some(order) = orders.iter_mut().find(|order| order.id == *id) else {
        return Err(ChangeMoneyError::NotFound(id.as_inner().to_owned()));
    };
    order.status = status;
    order.updated_at = Some(updated_at);
    Ok(order.clone())
}

/// Generates a store trait (async or blocking) with all order methods.
///
/// Uses `@methods` to define the method list once, and `@method` to
/// render each method in async (`impl Future + Send`) or blocking
/// (`fn`) style.
macro_rules! define_store {
    // ── Entry points ────────────────────────────────────────────────
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: async_mode,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_store!(@methods async_mode);
        }
    };
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: blocking,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_store!(@methods blocking);
        }
    };

    // ── Single method list (shared between both variants) ───────────
    (@methods $mode:ident) => {
        define_store!(@method $mode, orders,
            "Returns the full order sequence in insertion order.\n\nAn empty store yields an empty sequence, not an error.\n\n# Errors\n\nReturns an error if the backend fails to read.",
            -> Result<Vec<Order>>);
        define_store!(@method $mode, append,
            "Appends one order to the end of the persisted sequence.\n\nAll-or-nothing: on failure the previously persisted sequence is left unchanged.\n\n# Errors\n\nReturns an error if the backend fails to write.",
            order: Order, -> Result<()>);
        define_store!(@method $mode, update_status,
            "Sets the status and update timestamp on the matching order and returns it.\n\n# Errors\n\nReturns [`ChangeMoneyError::NotFound`](crate::error::ChangeMoneyError::NotFound) if no order has the given id (the store is left unchanged), or another error if the backend fails.",
            id: &OrderId, status: OrderStatus, updated_at: String, -> Result<Order>);
        define_store!(@method $mode, clear,
            "Replaces the persisted sequence with the empty sequence.\n\n# Errors\n\nReturns an error if the backend fails to write.",
            -> Result<()>);
    };

    // ── Blocking method renderer ────────────────────────────────────
    (@method blocking, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*) -> $ret;
    };

    // ── Async method renderer (returns impl Future + Send) ──────────
    (@method async_mode, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*)
            -> impl Future<Output = $ret> + Send;
    };
}

#[cfg(feature = "async")]
mod async_store {
    //! Async store trait definition.

    use crate::error::Result;
    use crate::models::{Order, OrderId, OrderStatus};

    define_store! {
        trait_name: OrderStore,
        trait_doc: "Async storage backend owning the persisted order sequence.\n\nAll methods take `&self` — implementations should use interior mutability\n(e.g. `Mutex`) for thread-safe mutation.",
        mode: async_mode,
    }
}

#[cfg(feature = "blocking")]
mod blocking_store {
    //! Blocking store trait definition.

    use crate::error::Result;
    use crate::models::{Order, OrderId, OrderStatus};

    define_store! {
        trait_name: BlockingOrderStore,
        trait_doc: "Blocking storage backend owning the persisted order sequence.\n\nAll methods take `&self` — implementations should use interior mutability\n(e.g. `Mutex`) for thread-safe mutation.",
        mode: blocking,
    }
}

#[cfg(feature = "async")]
pub use async_store::OrderStore;
#[cfg(feature = "blocking")]
pub use blocking_store::BlockingOrderStore;

/// Decides whether an error from the primary backend warrants running
/// the fallback.
///
/// Domain failures (not-found, validation, bad password) are final;
/// transport, remote-API, storage, and configuration failures degrade.
const fn should_degrade(err: &ChangeMoneyError) -> bool {
    match err {
        ChangeMoneyError::NotFound(_)
        | ChangeMoneyError::Validation(_)
        | ChangeMoneyError::Unauthorized => false,
        ChangeMoneyError::Serialization(_)
        | ChangeMoneyError::Storage(_)
        | ChangeMoneyError::Api { .. }
        | ChangeMoneyError::Config(_) => true,
        #[cfg(any(feature = "async", feature = "blocking"))]
        ChangeMoneyError::Http(_) => true,
        #[cfg(feature = "export")]
        ChangeMoneyError::Export(_) => true,
    }
}

/// Store combinator that tries a primary backend and degrades to a
/// fallback when the primary fails.
///
/// Each operation runs against the primary first; a backend failure is
/// logged as a warning and retried on the fallback. The fallback is
/// never treated as authoritative and successful primary results are
/// not mirrored into it.
#[derive(Debug)]
pub struct FallbackStore<P, F> {
    /// Authoritative backend.
    primary: P,
    /// Backend used only when the primary fails.
    fallback: F,
}

impl<P, F> FallbackStore<P, F> {
    /// Creates a combinator over the given primary and fallback.
    #[inline]
    #[must_use]
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[cfg(feature = "blocking")]
impl<P: BlockingOrderStore, F: BlockingOrderStore> BlockingOrderStore for FallbackStore<P, F> {
    fn orders(&self) -> Result<Vec<Order>> {
        match self.primary.orders() {
            Ok(orders) => Ok(orders),
            Err(err) if should_degrade(&err) => {
                tracing::warn!(error = %err, "primary store read failed, using fallback");
                self.fallback.orders()
            }
            Err(err) => Err(err),
        }
    }

    fn append(&self, order: Order) -> Result<()> {
        match self.primary.append(order.clone()) {
            Ok(()) => Ok(()),
            Err(err) if should_degrade(&err) => {
                tracing::warn!(error = %err, "primary store append failed, using fallback");
                self.fallback.append(order)
            }
            Err(err) => Err(err),
        }
    }

    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> Result<Order> {
        match self.primary.update_status(id, status, updated_at.clone()) {
            Ok(order) => Ok(order),
            Err(err) if should_degrade(&err) => {
                tracing::warn!(error = %err, "primary store update failed, using fallback");
                self.fallback.update_status(id, status, updated_at)
            }
            Err(err) => Err(err),
        }
    }

    fn clear(&self) -> Result<()> {
        match self.primary.clear() {
            Ok(()) => Ok(()),
            Err(err) if should_degrade(&err) => {
                tracing::warn!(error = %err, "primary store clear failed, using fallback");
                self.fallback.clear()
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(feature = "async")]
impl<P: OrderStore, F: OrderStore> OrderStore for FallbackStore<P, F> {
    fn orders(
        &self,
    ) -> impl Future<Output = Result<Vec<Order>>> + Send
    {
        async move {
            match self.primary.orders().await {
                Ok(orders) => Ok(orders),
                Err(err) if should_degrade(&err) => {
                    tracing::warn!(error = %err, "primary store read failed, using fallback");
                    self.fallback.orders().await
                }
                Err(err) => Err(err),
            }
        }
    }

    fn append(
        &self,
        order: Order,
    ) -> impl Future<Output = Result<()>> + Send {
        async move {
            match self.primary.append(order.clone()).await {
                Ok(()) => Ok(()),
                Err(err) if should_degrade(&err) => {
                    tracing::warn!(error = %err, "primary store append failed, using fallback");
                    self.fallback.append(order).await
                }
                Err(err) => Err(err),
            }
        }
    }

    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> impl Future<Output = Result<Order>> + Send {
        async move {
            match self.primary.update_status(id, status, updated_at.clone()).await {
                Ok(order) => Ok(order),
                Err(err) if should_degrade(&err) => {
                    tracing::warn!(error = %err, "primary store update failed, using fallback");
                    self.fallback.update_status(id, status, updated_at).await
                }
                Err(err) => Err(err),
            }
        }
    }

    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        async move {
            match self.primary.clear().await {
                Ok(()) => Ok(()),
                Err(err) if should_degrade(&err) => {
                    tracing::warn!(error = %err, "primary store clear failed, using fallback");
                    self.fallback.clear().await
                }
                Err(err) => Err(err),
            }
        }
    }
}
