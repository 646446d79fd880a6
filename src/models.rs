//! Data models for exchange orders.
//!
//! Contains the persisted [`Order`] entity, the [`OrderDraft`] intake
//! input, the fixed [`Denomination`] record, and the supporting id and
//! status types.

mod denomination;
mod enums;
mod ids;
mod order;

pub use denomination::Denomination;
pub use enums::OrderStatus;
pub use ids::OrderId;
pub use order::{NOTE_PLACEHOLDER, Order, OrderDraft};
