//! The persisted order entity and the intake draft it is built from.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderStatus};
use crate::fees::{self, Totals};

/// Display placeholder stored when a customer leaves the note blank.
pub const NOTE_PLACEHOLDER: &str = "Không có";

/// Format of the locale display timestamps (`14:30:45 7/8/2026`).
const TIMESTAMP_FORMAT: &str = "%H:%M:%S %-d/%-m/%Y";

/// Fee percentage assumed for records persisted before the field
/// existed.
const fn default_fee_percentage() -> u32 {
    12
}

/// Note text assumed for records persisted without one.
fn default_note() -> String {
    NOTE_PLACEHOLDER.to_owned()
}

/// Customer input collected by the intake flow before an order exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    /// Selected face value in minor units.
    pub denomination: i64,
    /// Number of notes requested.
    pub quantity: u32,
    /// Customer name. Must not be blank to submit.
    pub customer_name: String,
    /// Contact phone number. Must not be blank to submit.
    pub phone_number: String,
    /// Delivery address. Must not be blank to submit.
    pub address: String,
    /// Free-text note; blank means none.
    pub note: String,
}

impl OrderDraft {
    /// Creates a draft for the given denomination with a quantity of
    /// one and empty contact fields.
    #[inline]
    #[must_use]
    pub const fn new(denomination: i64) -> Self {
        Self {
            denomination,
            quantity: 1,
            customer_name: String::new(),
            phone_number: String::new(),
            address: String::new(),
            note: String::new(),
        }
    }

    /// Parses a quantity from raw input, coercing anything that is not
    /// a positive integer to 1.
    #[inline]
    #[must_use]
    pub fn coerce_quantity(raw: &str) -> u32 {
        raw.trim()
            .parse::<u32>()
            .ok()
            .filter(|&quantity| quantity >= 1)
            .unwrap_or(1)
    }
}

/// One customer exchange request plus its computed charges and status.
///
/// Wire format is camelCase JSON matching the persisted order file.
/// Money fields are stored both as integer minor units and as
/// pre-formatted display strings; the rate is frozen at creation time,
/// so later fee table changes never retroactively reprice an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Identifier assigned once at creation, never changed.
    pub id: OrderId,
    /// Locale-formatted placement timestamp (display-only).
    pub created_at: String,
    /// Selected face value in minor units.
    pub denomination: i64,
    /// Display string of the face value.
    pub denomination_label: String,
    /// Number of notes requested.
    pub quantity: u32,
    /// Customer name.
    pub customer_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Face value times quantity, in minor units.
    pub subtotal: i64,
    /// Display form of the subtotal.
    pub subtotal_formatted: String,
    /// Service fee, in minor units.
    pub fee: i64,
    /// Display form of the fee.
    pub fee_formatted: String,
    /// Fee rate as a fraction, frozen at creation time.
    pub fee_rate: f64,
    /// Fee rate as a rounded integer percent.
    #[serde(default = "default_fee_percentage")]
    pub fee_percentage: u32,
    /// Subtotal plus fee, in minor units.
    pub total: i64,
    /// Display form of the total.
    pub total_formatted: String,
    /// Delivery address.
    pub address: String,
    /// Customer note, or the placeholder when none was given.
    #[serde(default = "default_note")]
    pub note: String,
    /// Processing status; always `Pending` on creation.
    pub status: OrderStatus,
    /// Set only when the status changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Order {
    /// Builds a pending order from a draft and its computed totals,
    /// stamping the id and creation timestamp from `placed_at`.
    #[must_use]
    pub fn from_draft<Tz: TimeZone>(draft: &OrderDraft, totals: Totals, placed_at: DateTime<Tz>) -> Self
    where
        Tz::Offset: core::fmt::Display,
    {
        let note = if draft.note.trim().is_empty() {
            NOTE_PLACEHOLDER.to_owned()
        } else {
            draft.note.clone()
        };
        Self {
            id: OrderId::from_timestamp(placed_at.with_timezone(&Utc)),
            created_at: Self::display_timestamp(&placed_at),
            denomination: draft.denomination,
            denomination_label: fees::format_vnd(draft.denomination),
            quantity: draft.quantity,
            customer_name: draft.customer_name.clone(),
            phone_number: draft.phone_number.clone(),
            subtotal: totals.subtotal,
            subtotal_formatted: fees::format_vnd(totals.subtotal),
            fee: totals.fee,
            fee_formatted: fees::format_vnd(totals.fee),
            fee_rate: totals.rate.as_fraction(),
            fee_percentage: totals.rate.percent_rounded(),
            total: totals.total,
            total_formatted: fees::format_vnd(totals.total),
            address: draft.address.clone(),
            note,
            status: OrderStatus::Pending,
            updated_at: None,
        }
    }

    /// Formats an instant the way display timestamps are stored.
    #[inline]
    #[must_use]
    pub fn display_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
    where
        Tz::Offset: core::fmt::Display,
    {
        at.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fees::compute_totals;

    /// Fixed placement instant used across tests.
    fn placed_at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap()
    }

    /// A fully filled draft for 500,000 × 2.
    fn test_draft() -> OrderDraft {
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
    fn from_draft_freezes_charges_and_rate() {
        let draft = test_draft();
        let order = Order::from_draft(&draft, compute_totals(500_000, 2), placed_at());
        assert_eq!(order.id.as_inner(), "1700000000500");
        assert_eq!(order.created_at, "22:13:20 14/11/2023");
        assert_eq!(order.denomination, 500_000);
        assert_eq!(order.denomination_label, "500.000 \u{20ab}");
        assert_eq!(order.subtotal, 1_000_000);
        assert_eq!(order.subtotal_formatted, "1.000.000 \u{20ab}");
        assert_eq!(order.fee, 30_000);
        assert_eq!(order.fee_percentage, 3);
        assert!((order.fee_rate - 0.03).abs() < f64::EPSILON);
        assert_eq!(order.total, 1_030_000);
        assert_eq!(order.total_formatted, "1.030.000 \u{20ab}");
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.updated_at.is_none());
    }

    #[test]
    fn blank_note_becomes_placeholder() {
        let draft = test_draft();
        let order = Order::from_draft(&draft, compute_totals(500_000, 2), placed_at());
        assert_eq!(order.note, NOTE_PLACEHOLDER);

        let with_note = OrderDraft {
            note: "Giao buổi sáng".to_owned(),
            ..test_draft()
        };
        let noted = Order::from_draft(&with_note, compute_totals(500_000, 2), placed_at());
        assert_eq!(noted.note, "Giao buổi sáng");
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let order = Order::from_draft(&test_draft(), compute_totals(500_000, 2), placed_at());
        let json = serde_json::to_string(&order).unwrap();
        for key in [
            "\"id\"",
            "\"createdAt\"",
            "\"denominationLabel\"",
            "\"customerName\"",
            "\"phoneNumber\"",
            "\"subtotalFormatted\"",
            "\"feeFormatted\"",
            "\"feeRate\"",
            "\"feePercentage\"",
            "\"totalFormatted\"",
            "\"status\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
        // updatedAt is omitted until a status change sets it.
        assert!(!json.contains("updatedAt"));
    }

    #[test]
    fn serde_roundtrip_preserves_every_field() {
        let order = Order::from_draft(&test_draft(), compute_totals(500_000, 2), placed_at());
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, order);
    }

    #[test]
    fn deserializes_persisted_record() {
        let json = r#"{
            "id": "1700000000500",
            "createdAt": "22:13:20 14/11/2023",
            "denomination": 100000,
            "denominationLabel": "100.000 ₫",
            "quantity": 12,
            "customerName": "Trần B",
            "phoneNumber": "0912345678",
            "subtotal": 1200000,
            "subtotalFormatted": "1.200.000 ₫",
            "fee": 84000,
            "feeFormatted": "84.000 ₫",
            "feeRate": 0.07,
            "feePercentage": 7,
            "total": 1284000,
            "totalFormatted": "1.284.000 ₫",
            "address": "Đà Nẵng",
            "note": "Không có",
            "status": "Hoàn tất",
            "updatedAt": "08:00:00 15/11/2023"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.fee_percentage, 7);
        assert_eq!(order.updated_at.as_deref(), Some("08:00:00 15/11/2023"));
    }

    #[test]
    fn legacy_record_without_optional_fields_gets_defaults() {
        let json = r#"{
            "id": "1",
            "createdAt": "10:00:00 1/1/2023",
            "denomination": 10000,
            "denominationLabel": "10.000 ₫",
            "quantity": 1,
            "customerName": "C",
            "phoneNumber": "0",
            "subtotal": 10000,
            "subtotalFormatted": "10.000 ₫",
            "fee": 1200,
            "feeFormatted": "1.200 ₫",
            "feeRate": 0.12,
            "total": 11200,
            "totalFormatted": "11.200 ₫",
            "address": "x",
            "status": "Chờ xử lý"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.fee_percentage, 12);
        assert_eq!(order.note, NOTE_PLACEHOLDER);
        assert!(order.updated_at.is_none());
    }

    #[test]
    fn coerce_quantity_accepts_positive_integers() {
        assert_eq!(OrderDraft::coerce_quantity("3"), 3);
        assert_eq!(OrderDraft::coerce_quantity(" 5 "), 5);
    }

    #[test]
    fn coerce_quantity_falls_back_to_one() {
        assert_eq!(OrderDraft::coerce_quantity("abc"), 1);
        assert_eq!(OrderDraft::coerce_quantity(""), 1);
        assert_eq!(OrderDraft::coerce_quantity("0"), 1);
        assert_eq!(OrderDraft::coerce_quantity("-2"), 1);
        assert_eq!(OrderDraft::coerce_quantity("2.5"), 1);
    }

    #[test]
    fn draft_new_defaults_quantity_to_one() {
        let draft = OrderDraft::new(200_000);
        assert_eq!(draft.quantity, 1);
        assert!(draft.customer_name.is_empty());
        assert!(draft.note.is_empty());
    }
}
