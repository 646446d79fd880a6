//! Fee table and order calculator.
//!
//! All money amounts are integer minor units (Vietnamese đồng). Rates
//! are basis points so fee arithmetic never touches floating point;
//! the fraction form exists only for the persisted wire format.

use crate::models::Denomination;

/// Service fee rate expressed in basis points (1/100 of a percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeeRate(u32);

impl FeeRate {
    /// Creates a rate from basis points (300 = 3%).
    #[inline]
    #[must_use]
    pub const fn from_basis_points(bp: u32) -> Self {
        Self(bp)
    }

    /// Returns the rate in basis points.
    #[inline]
    #[must_use]
    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction in `[0, 1)`, as persisted in the
    /// order's `feeRate` field.
    #[inline]
    #[must_use]
    pub fn as_fraction(self) -> f64 {
        f64::from(self.0) / 10_000.0
    }

    /// Returns the rate as an integer percent, rounded half-up, as
    /// persisted in the order's `feePercentage` field.
    #[inline]
    #[must_use]
    #[allow(
        clippy::integer_division,
        reason = "half-up rounding of basis points to whole percent"
    )]
    pub const fn percent_rounded(self) -> u32 {
        (self.0 + 50) / 100
    }

    /// Computes the fee on a subtotal, rounding half-up at minor-unit
    /// resolution.
    #[inline]
    #[must_use]
    #[allow(
        clippy::integer_division,
        reason = "half-up rounding at minor-unit resolution"
    )]
    pub fn fee_on(self, subtotal: i64) -> i64 {
        (subtotal * i64::from(self.0) + 5_000) / 10_000
    }
}

/// Rate charged when a denomination has no entry in the fee table.
///
/// Unlisted denominations silently fall back to this rate instead of
/// being rejected; tests record this as current behavior.
pub const FALLBACK_FEE_RATE: FeeRate = FeeRate::from_basis_points(1_200);

/// The fixed denomination table. Not user-editable at runtime.
pub static FEE_TABLE: [Denomination; 6] = [
    Denomination::new(500_000, "500,000 VNĐ", FeeRate::from_basis_points(300)),
    Denomination::new(200_000, "200,000 VNĐ", FeeRate::from_basis_points(400)),
    Denomination::new(100_000, "100,000 VNĐ", FeeRate::from_basis_points(700)),
    Denomination::new(50_000, "50,000 VNĐ", FeeRate::from_basis_points(1_300)),
    Denomination::new(20_000, "20,000 VNĐ", FeeRate::from_basis_points(1_300)),
    Denomination::new(10_000, "10,000 VNĐ", FeeRate::from_basis_points(1_200)),
];

/// Looks up the table entry for a face value.
#[inline]
#[must_use]
pub fn denomination_for(value: i64) -> Option<&'static Denomination> {
    FEE_TABLE.iter().find(|denom| denom.value == value)
}

/// Returns the table rate for a face value, or [`FALLBACK_FEE_RATE`]
/// when the value is not listed.
#[inline]
#[must_use]
pub fn rate_for(value: i64) -> FeeRate {
    denomination_for(value).map_or(FALLBACK_FEE_RATE, |denom| denom.rate)
}

/// Charges derived from a denomination and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Face value times quantity, in minor units.
    pub subtotal: i64,
    /// Service fee on the subtotal, in minor units.
    pub fee: i64,
    /// Subtotal plus fee, in minor units.
    pub total: i64,
    /// The rate the fee was computed with, frozen at creation time.
    pub rate: FeeRate,
}

/// Computes subtotal, fee, and total for a denomination and quantity.
#[inline]
#[must_use]
pub fn compute_totals(denomination_value: i64, quantity: u32) -> Totals {
    let subtotal = denomination_value * i64::from(quantity);
    let rate = rate_for(denomination_value);
    let fee = rate.fee_on(subtotal);
    Totals {
        subtotal,
        fee,
        total: subtotal + fee,
        rate,
    }
}

/// Formats minor units for display, Vietnamese style: dot thousands
/// separators and a trailing đồng sign (`1.030.000 ₫`).
#[must_use]
pub fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + 4);
    if amount < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped.push_str(" \u{20ab}");
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_six_entries_with_expected_rates() {
        let expected: [(i64, u32); 6] = [
            (500_000, 300),
            (200_000, 400),
            (100_000, 700),
            (50_000, 1_300),
            (20_000, 1_300),
            (10_000, 1_200),
        ];
        for (value, bp) in expected {
            let denom = denomination_for(value).unwrap();
            assert_eq!(denom.rate.basis_points(), bp, "rate for {value}");
        }
    }

    #[test]
    fn totals_for_every_table_entry() {
        for denom in &FEE_TABLE {
            let totals = compute_totals(denom.value, 3);
            assert_eq!(totals.subtotal, denom.value * 3);
            assert_eq!(totals.fee, denom.rate.fee_on(totals.subtotal));
            assert_eq!(totals.total, totals.subtotal + totals.fee);
            assert_eq!(totals.rate, denom.rate);
        }
    }

    #[test]
    fn totals_exact_values() {
        let totals = compute_totals(500_000, 2);
        assert_eq!(totals.subtotal, 1_000_000);
        assert_eq!(totals.fee, 30_000);
        assert_eq!(totals.total, 1_030_000);

        let small = compute_totals(10_000, 1);
        assert_eq!(small.subtotal, 10_000);
        assert_eq!(small.fee, 1_200);
        assert_eq!(small.total, 11_200);
    }

    #[test]
    fn unlisted_denomination_uses_fallback_rate() {
        // Current behavior: an unlisted face value is charged the
        // fallback rate rather than rejected.
        let totals = compute_totals(7_777, 1);
        assert_eq!(totals.rate, FALLBACK_FEE_RATE);
        assert_eq!(totals.fee, FALLBACK_FEE_RATE.fee_on(7_777));
    }

    #[test]
    fn fee_rounds_half_up() {
        // 3% of 11 minor units = 0.033 → rounds to 0; 3% of 17 = 0.051 → 0.
        let rate = FeeRate::from_basis_points(300);
        assert_eq!(rate.fee_on(11), 0);
        // 12% of 21 = 2.52 → 3.
        assert_eq!(FeeRate::from_basis_points(1_200).fee_on(21), 3);
    }

    #[test]
    fn rate_conversions() {
        let rate = FeeRate::from_basis_points(300);
        assert!((rate.as_fraction() - 0.03).abs() < f64::EPSILON);
        assert_eq!(rate.percent_rounded(), 3);
        assert_eq!(FeeRate::from_basis_points(1_250).percent_rounded(), 13);
    }

    #[test]
    fn format_vnd_groups_thousands() {
        assert_eq!(format_vnd(1_030_000), "1.030.000 \u{20ab}");
        assert_eq!(format_vnd(500_000), "500.000 \u{20ab}");
        assert_eq!(format_vnd(0), "0 \u{20ab}");
        assert_eq!(format_vnd(999), "999 \u{20ab}");
        assert_eq!(format_vnd(1_000), "1.000 \u{20ab}");
    }
}
