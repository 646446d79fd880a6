//! Derived statistics over the order list.
//!
//! Computed on demand from the numeric minor-unit fields, never stored
//! and never re-parsed from display strings.

use crate::models::{Order, OrderStatus};

/// Aggregated figures for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeskStats {
    /// Number of orders in the store.
    pub total_orders: usize,
    /// Orders with status `Completed`.
    pub completed_orders: usize,
    /// Orders with status `Pending`.
    pub pending_orders: usize,
    /// Sum of `total` across all orders, in minor units.
    pub total_revenue: i64,
    /// Sum of `subtotal` across completed orders, in minor units.
    pub delivered_subtotal: i64,
    /// Sum of `fee` across completed orders, in minor units.
    pub completed_fees: i64,
}

impl DeskStats {
    /// Computes statistics from an order list.
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = Self {
            total_orders: orders.len(),
            ..Self::default()
        };
        for order in orders {
            stats.total_revenue += order.total;
            match order.status {
                OrderStatus::Completed => {
                    stats.completed_orders += 1;
                    stats.delivered_subtotal += order.subtotal;
                    stats.completed_fees += order.fee;
                }
                OrderStatus::Pending => stats.pending_orders += 1,
            }
        }
        stats
    }

    /// Fraction of orders that are completed; 0 when there are none.
    #[inline]
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        reason = "ratios are display figures, not money"
    )]
    pub fn completion_rate(&self) -> f64 {
        if self.total_orders == 0 {
            0.0
        } else {
            self.completed_orders as f64 / self.total_orders as f64
        }
    }

    /// Completed fees over completed subtotal; 0 when nothing was
    /// delivered.
    #[inline]
    #[must_use]
    pub fn profit_rate(&self) -> f64 {
        ratio(self.completed_fees, self.delivered_subtotal)
    }
}

/// Divide-by-zero-guarded ratio.
#[allow(
    clippy::cast_precision_loss,
    reason = "ratios are display figures, not money"
)]
fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
