//! High-level order desk facade.
//!
//! Combines intake validation, fee computation, and a storage backend
//! behind one API, in async ([`OrderDesk`]) and blocking
//! ([`OrderDeskBlocking`]) flavors generated from a shared macro.

use crate::error::ValidationIssue;
use crate::fees::Totals;
use crate::models::OrderDraft;

/// Minimum order total (minor units) accepted by intake.
pub const MIN_ORDER_TOTAL: i64 = 1_000_000;

/// External messaging deep link handed to the customer after a
/// successful placement. Fire-and-forget navigation, not part of the
/// data contract.
pub const CONTACT_URL: &str = "https://zalo.me/0838182780";

/// Checks every intake condition and collects one issue per failure.
fn validate(draft: &OrderDraft, totals: &Totals) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if draft.customer_name.trim().is_empty() {
        issues.push(ValidationIssue::MissingCustomerName);
    }
    if draft.phone_number.trim().is_empty() {
        issues.push(ValidationIssue::MissingPhoneNumber);
    }
    if draft.address.trim().is_empty() {
        issues.push(ValidationIssue::MissingAddress);
    }
    if totals.total < MIN_ORDER_TOTAL {
        issues.push(ValidationIssue::BelowMinimumTotal {
            total: totals.total,
            minimum: MIN_ORDER_TOTAL,
        });
    }
    issues
}

/// Generates an order desk (async or blocking) with builder, methods,
/// and tests.
macro_rules! define_desk {
    (
        desk_name: $desk:ident,
        builder_name: $builder:ident,
        storage_trait: $storage_trait:ident,
        desk_doc: $desk_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder<S: $storage_trait> {
            /// Storage backend.
            storage: Option<S>,
        }

        impl<S: $storage_trait> $builder<S> {
            /// Sets the storage backend.
            #[inline]
            #[must_use]
            pub fn storage(mut self, storage: S) -> Self {
                self.storage = Some(storage);
                self
            }

            /// Builds the desk.
            ///
            /// # Errors
            ///
            /// Returns [`ChangeMoneyError::Config`] if no storage was
            /// provided.
            #[inline]
            pub fn build(self) -> Result<$desk<S>> {
                let storage = self
                    .storage
                    .ok_or(ChangeMoneyError::Config("storage backend is required"))?;
                Ok($desk { storage })
            }
        }

        #[doc = $desk_doc]
        #[derive(Debug)]
        pub struct $desk<S: $storage_trait> {
            /// Storage backend owning the order sequence.
            storage: S,
        }

        impl<S: $storage_trait> $desk<S> {
            /// Creates a new builder for configuring the desk.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder<S> {
                $builder { storage: None }
            }

            /// Validates a draft, computes its charges, and appends the
            /// resulting pending order to the store.
            ///
            /// The id and creation timestamp are stamped at this
            /// instant. On success the stored order is returned so the
            /// caller can surface the id and hand off to the contact
            /// channel; on failure nothing is persisted and no handoff
            /// should happen.
            ///
            /// # Errors
            ///
            /// Returns [`ChangeMoneyError::Validation`] listing every
            /// failing intake condition, or a storage error if the
            /// append fails.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn place(&self, draft: &OrderDraft) -> Result<Order> {
                let totals = compute_totals(draft.denomination, draft.quantity);
                let issues = validate(draft, &totals);
                if !issues.is_empty() {
                    tracing::debug!(count = issues.len(), "intake validation failed");
                    return Err(ChangeMoneyError::Validation(issues));
                }
                let order = Order::from_draft(draft, totals, Local::now());
                tracing::info!(id = %order.id, total = order.total, "placing order");
                self.storage.append(order.clone()) $( .$await_ext )? ?;
                Ok(order)
            }

            /// Returns the full order sequence.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read.
            #[inline]
            pub $($async_kw)? fn orders(&self) -> Result<Vec<Order>> {
                self.storage.orders() $( .$await_ext )?
            }

            /// Sets the status of an order, stamping its update
            /// timestamp.
            ///
            /// # Errors
            ///
            /// Returns [`ChangeMoneyError::NotFound`] if no order has
            /// the given id, or a storage error if the write fails.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn update_status(
                &self,
                id: &OrderId,
                status: OrderStatus,
            ) -> Result<Order> {
                let stamp = Order::display_timestamp(&Local::now());
                tracing::info!(status = %status, "updating order status");
                self.storage.update_status(id, status, stamp) $( .$await_ext )?
            }

            /// Marks an order completed.
            ///
            /// # Errors
            ///
            /// Same as [`Self::update_status`].
            #[inline]
            pub $($async_kw)? fn complete(&self, id: &OrderId) -> Result<Order> {
                self.update_status(id, OrderStatus::Completed) $( .$await_ext )?
            }

            /// Moves an order back to pending.
            ///
            /// # Errors
            ///
            /// Same as [`Self::update_status`].
            #[inline]
            pub $($async_kw)? fn reopen(&self, id: &OrderId) -> Result<Order> {
                self.update_status(id, OrderStatus::Pending) $( .$await_ext )?
            }

            /// Deletes every order. There is no per-order delete.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to write.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn clear(&self) -> Result<()> {
                tracing::info!("clearing all orders");
                self.storage.clear() $( .$await_ext )?
            }

            /// Computes dashboard statistics over the current sequence.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read.
            #[inline]
            pub $($async_kw)? fn stats(&self) -> Result<DeskStats> {
                let orders = self.storage.orders() $( .$await_ext )? ?;
                Ok(DeskStats::from_orders(&orders))
            }
        }
    };
}

#[cfg(feature = "async")]
mod async_desk {
    //! Async order desk definition.

    use chrono::Local;

    use super::validate;
    use crate::error::{ChangeMoneyError, Result};
    use crate::fees::compute_totals;
    use crate::models::{Order, OrderDraft, OrderId, OrderStatus};
    use crate::stats::DeskStats;
    use crate::storage::OrderStore;

    define_desk! {
        desk_name: OrderDesk,
        builder_name: OrderDeskBuilder,
        storage_trait: OrderStore,
        desk_doc: "Async order desk over any [`OrderStore`] backend.\n\nUse [`OrderDesk::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing an [`OrderDesk`].",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_desk {
    //! Blocking order desk definition.

    use chrono::Local;

    use super::validate;
    use crate::error::{ChangeMoneyError, Result};
    use crate::fees::compute_totals;
    use crate::models::{Order, OrderDraft, OrderId, OrderStatus};
    use crate::stats::DeskStats;
    use crate::storage::BlockingOrderStore;

    define_desk! {
        desk_name: OrderDeskBlocking,
        builder_name: OrderDeskBlockingBuilder,
        storage_trait: BlockingOrderStore,
        desk_doc: "Blocking order desk over any [`BlockingOrderStore`] backend.\n\nUse [`OrderDeskBlocking::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing an [`OrderDeskBlocking`].",
    }
}

#[cfg(feature = "async")]
pub use async_desk::{OrderDesk, OrderDeskBuilder};
#[cfg(feature = "blocking")]
pub use blocking_desk::{OrderDeskBlocking, OrderDeskBlockingBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChangeMoneyError;
    use crate::fees::compute_totals;
    use crate::models::{OrderId, OrderStatus};
    use crate::storage::InMemoryStore;

    /// A draft that passes every intake check (500,000 × 2).
    fn valid_draft() -> OrderDraft {
        OrderDraft {
            denomination: 500_000,
            quantity: 2,
            customer_name: "Nguyễn Văn A".to_owned(),
            phone_number: "0901234567".to_owned(),
            address: "12 Lý Thường Kiệt, Hà Nội".to_owned(),
            note: String::new(),
        }
    }

    #[test]
    fn validate_passes_a_complete_draft() {
        let draft = valid_draft();
        let totals = compute_totals(draft.denomination, draft.quantity);
        assert!(validate(&draft, &totals).is_empty());
    }

    #[test]
    fn validate_reports_each_blank_field_independently() {
        let blank_name = OrderDraft {
            customer_name: "  ".to_owned(),
            ..valid_draft()
        };
        let totals = compute_totals(500_000, 2);
        assert_eq!(
            validate(&blank_name, &totals),
            vec![ValidationIssue::MissingCustomerName]
        );

        let blank_phone = OrderDraft {
            phone_number: String::new(),
            ..valid_draft()
        };
        assert_eq!(
            validate(&blank_phone, &totals),
            vec![ValidationIssue::MissingPhoneNumber]
        );

        let blank_address = OrderDraft {
            address: String::new(),
            ..valid_draft()
        };
        assert_eq!(
            validate(&blank_address, &totals),
            vec![ValidationIssue::MissingAddress]
        );
    }

    #[test]
    fn validate_rejects_totals_below_the_minimum() {
        // 10,000 × 1 → total 11,200: every text field is filled, the
        // order still fails solely on the minimum.
        let draft = OrderDraft {
            denomination: 10_000,
            quantity: 1,
            ..valid_draft()
        };
        let totals = compute_totals(10_000, 1);
        assert_eq!(
            validate(&draft, &totals),
            vec![ValidationIssue::BelowMinimumTotal {
                total: 11_200,
                minimum: MIN_ORDER_TOTAL,
            }]
        );
    }

    #[test]
    fn validate_collects_every_failure_at_once() {
        let draft = OrderDraft::new(10_000);
        let totals = compute_totals(10_000, 1);
        let issues = validate(&draft, &totals);
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn contact_url_is_the_messaging_deep_link() {
        assert!(CONTACT_URL.starts_with("https://zalo.me/"));
    }

    #[cfg(feature = "blocking")]
    mod blocking {
        use super::*;
        use crate::storage::BlockingOrderStore;

        /// Builds a blocking desk over a fresh in-memory store.
        fn desk() -> OrderDeskBlocking<InMemoryStore> {
            OrderDeskBlocking::builder()
                .storage(InMemoryStore::new())
                .build()
                .unwrap()
        }

        #[test]
        fn builder_requires_storage() {
            let result = OrderDeskBlocking::<InMemoryStore>::builder().build();
            assert!(matches!(result, Err(ChangeMoneyError::Config(_))));
        }

        #[test]
        fn place_appends_a_pending_order() {
            let desk = desk();
            let placed = desk.place(&valid_draft()).unwrap();
            assert_eq!(placed.status, OrderStatus::Pending);
            assert_eq!(placed.total, 1_030_000);

            let orders = desk.orders().unwrap();
            assert_eq!(orders.last(), Some(&placed));
        }

        #[test]
        fn place_rejects_invalid_drafts_without_persisting() {
            let desk = desk();
            let draft = OrderDraft {
                customer_name: String::new(),
                ..valid_draft()
            };
            let result = desk.place(&draft);
            assert!(matches!(result, Err(ChangeMoneyError::Validation(_))));
            assert!(desk.orders().unwrap().is_empty());
        }

        #[test]
        fn update_status_stamps_updated_at() {
            let desk = desk();
            let placed = desk.place(&valid_draft()).unwrap();
            assert!(placed.updated_at.is_none());

            let completed = desk.complete(&placed.id).unwrap();
            assert_eq!(completed.status, OrderStatus::Completed);
            assert!(completed.updated_at.is_some());

            let reopened = desk.reopen(&placed.id).unwrap();
            assert_eq!(reopened.status, OrderStatus::Pending);
        }

        #[test]
        fn update_status_unknown_id_is_not_found() {
            let desk = desk();
            let missing = OrderId::new("missing".to_owned());
            let result = desk.complete(&missing);
            assert!(matches!(result, Err(ChangeMoneyError::NotFound(_))));
        }

        #[test]
        fn clear_then_place_again() {
            let desk = desk();
            let _placed = desk.place(&valid_draft()).unwrap();
            desk.clear().unwrap();
            assert!(desk.orders().unwrap().is_empty());
            let _replaced = desk.place(&valid_draft()).unwrap();
            assert_eq!(desk.orders().unwrap().len(), 1);
        }

        #[test]
        fn stats_reflect_the_store() {
            let desk = desk();
            let placed = desk.place(&valid_draft()).unwrap();
            let _completed = desk.complete(&placed.id).unwrap();

            let stats = desk.stats().unwrap();
            assert_eq!(stats.total_orders, 1);
            assert_eq!(stats.completed_orders, 1);
            assert_eq!(stats.total_revenue, 1_030_000);
            assert_eq!(stats.delivered_subtotal, 1_000_000);
            assert_eq!(stats.completed_fees, 30_000);
        }

        #[test]
        fn append_failure_propagates() {
            /// Store double that refuses every write.
            #[derive(Debug)]
            struct ReadOnlyStore;

            impl BlockingOrderStore for ReadOnlyStore {
                fn orders(&self) -> crate::error::Result<Vec<crate::models::Order>> {
                    Ok(Vec::new())
                }

                fn append(&self, _order: crate::models::Order) -> crate::error::Result<()> {
                    Err(ChangeMoneyError::Storage("disk full".into()))
                }

                fn update_status(
                    &self,
                    id: &OrderId,
                    _status: OrderStatus,
                    _updated_at: String,
                ) -> crate::error::Result<crate::models::Order> {
                    Err(ChangeMoneyError::NotFound(id.as_inner().to_owned()))
                }

                fn clear(&self) -> crate::error::Result<()> {
                    Err(ChangeMoneyError::Storage("disk full".into()))
                }
            }

            let desk = OrderDeskBlocking::builder()
                .storage(ReadOnlyStore)
                .build()
                .unwrap();
            let result = desk.place(&valid_draft());
            assert!(matches!(result, Err(ChangeMoneyError::Storage(_))));
        }
    }

    #[cfg(feature = "async")]
    mod async_tests {
        use super::*;

        /// Builds an async desk over a fresh in-memory store.
        fn desk() -> OrderDesk<InMemoryStore> {
            OrderDesk::builder()
                .storage(InMemoryStore::new())
                .build()
                .unwrap()
        }

        #[tokio::test]
        async fn place_and_list() {
            let desk = desk();
            let placed = desk.place(&valid_draft()).await.unwrap();
            let orders = desk.orders().await.unwrap();
            assert_eq!(orders.last(), Some(&placed));
        }

        #[tokio::test]
        async fn complete_then_stats() {
            let desk = desk();
            let placed = desk.place(&valid_draft()).await.unwrap();
            let _completed = desk.complete(&placed.id).await.unwrap();
            let stats = desk.stats().await.unwrap();
            assert_eq!(stats.completed_orders, 1);
        }

        #[tokio::test]
        async fn invalid_draft_is_rejected() {
            let desk = desk();
            let draft = OrderDraft::new(10_000);
            let result = desk.place(&draft).await;
            assert!(matches!(result, Err(ChangeMoneyError::Validation(_))));
        }
    }
}
