//! Enumeration types for constrained order values.

use serde::{Deserialize, Serialize};

/// Processing status of an order.
///
/// Serialized with the Vietnamese display strings the persisted JSON
/// uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Awaiting processing. Every order starts here.
    #[serde(rename = "Chờ xử lý")]
    Pending,
    /// Delivered and settled.
    #[serde(rename = "Hoàn tất")]
    Completed,
}

impl OrderStatus {
    /// Returns the display string (identical to the wire form).
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Chờ xử lý",
            Self::Completed => "Hoàn tất",
        }
    }

    /// Returns the other status (the admin toggle).
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

impl core::fmt::Display for OrderStatus {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
