//! Remote blob storage backend.
//!
//! Implements the store contract over the opaque remote JSON blob via
//! [`crate::client`]. Every mutation is fetch-modify-replace of the
//! whole array with no compare-and-swap, so two independent remote
//! writers can race and the loser's write is lost — the same
//! limitation as the wire format itself.

#[cfg(feature = "async")]
use crate::client::RemoteClient;
#[cfg(feature = "blocking")]
use crate::client::RemoteBlockingClient;
use crate::error::Result;
use crate::models::{Order, OrderId, OrderStatus};

/// Async order store backed by the remote blob.
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct RemoteStore {
    /// Underlying blob client.
    client: RemoteClient,
}

#[cfg(feature = "async")]
impl RemoteStore {
    /// Creates a store over the given client.
    #[inline]
    #[must_use]
    pub const fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl super::OrderStore for RemoteStore {
    fn orders(&self) -> impl Future<Output = Result<Vec<Order>>> + Send {
        self.client.fetch()
    }

    fn append(&self, order: Order) -> impl Future<Output = Result<()>> + Send {
        async move {
            let mut orders = self.client.fetch().await?;
            orders.push(order);
            self.client.replace(&orders).await
        }
    }

    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> impl Future<Output = Result<Order>> + Send {
        async move {
            let mut orders = self.client.fetch().await?;
            let updated = super::update_order(&mut orders, id, status, updated_at)?;
            self.client.replace(&orders).await?;
            Ok(updated)
        }
    }

    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        self.client.replace(&[])
    }
}

/// Blocking order store backed by the remote blob.
#[cfg(feature = "blocking")]
#[derive(Debug)]
pub struct RemoteBlockingStore {
    /// Underlying blob client.
    client: RemoteBlockingClient,
}

#[cfg(feature = "blocking")]
impl RemoteBlockingStore {
    /// Creates a store over the given client.
    #[inline]
    #[must_use]
    pub const fn new(client: RemoteBlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl super::BlockingOrderStore for RemoteBlockingStore {
    #[inline]
    fn orders(&self) -> Result<Vec<Order>> {
        self.client.fetch()
    }

    fn append(&self, order: Order) -> Result<()> {
        let mut orders = self.client.fetch()?;
        orders.push(order);
        self.client.replace(&orders)
    }

    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> Result<Order> {
        let mut orders = self.client.fetch()?;
        let updated = super::update_order(&mut orders, id, status, updated_at)?;
        self.client.replace(&orders)?;
        Ok(updated)
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.client.replace(&[])
    }
}
