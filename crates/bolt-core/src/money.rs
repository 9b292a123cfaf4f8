//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  In many retail systems:                                            │
//! │    ₹10.00 / 3 = ₹3.33 (×3 = ₹9.99)  → Lost ₹0.01!                   │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Paise                                        │
//! │    1000 paise / 3 = 333 paise (×3 = 999 paise)                      │
//! │    We KNOW we lost 1 paisa, and handle it explicitly                │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bolt_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(65000); // ₹650.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // ₹1300.00
//! let total = price + Money::from_paise(500);    // ₹655.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(650.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::GstRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type: purchase and
/// selling prices, line amounts, and invoice totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bolt_core::money::Money;
    ///
    /// let price = Money::from_paise(65000); // Represents ₹650.00
    /// assert_eq!(price.paise(), 65000);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Example
    /// ```rust
    /// use bolt_core::money::Money;
    ///
    /// let price = Money::from_rupees(650, 50); // ₹650.50
    /// assert_eq!(price.paise(), 65050);
    ///
    /// let negative = Money::from_rupees(-5, 50); // -₹5.50 (refund)
    /// assert_eq!(negative.paise(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_rupees(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub const fn from_rupees(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the GST embedded in this tax-inclusive amount.
    ///
    /// ## Tax-Inclusive Prices
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────┐
    /// │  BACKING TAX OUT OF AN INCLUSIVE PRICE                          │
    /// │                                                                 │
    /// │  A listed price of ₹1300.00 at 28% GST already CONTAINS the     │
    /// │  tax. The gross is (100 + 28)% of the pre-tax base, so:         │
    /// │                                                                 │
    /// │    tax     = gross × 28 / 128 = ₹284.38                         │
    /// │    taxable = gross − tax      = ₹1015.62                        │
    /// │                                                                 │
    /// │  This is NOT the same as adding 28% on top of the base.         │
    /// └─────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer math in i128 with half-up rounding at the paise boundary.
    ///
    /// ## Example
    /// ```rust
    /// use bolt_core::money::Money;
    /// use bolt_core::types::GstRate;
    ///
    /// let gross = Money::from_paise(130000); // ₹1300.00
    /// let rate = GstRate::from_percent(28);
    ///
    /// // 1300 × 28/128 = 284.375 → rounds to ₹284.38
    /// assert_eq!(gross.embedded_gst(rate).paise(), 28438);
    /// ```
    pub fn embedded_gst(&self, rate: GstRate) -> Money {
        if rate.is_zero() {
            return Money::zero();
        }
        let numerator = self.0 as i128 * rate.percent() as i128;
        let denominator = 100 + rate.percent() as i128;
        Money::from_paise(div_round_half_up(numerator, denominator) as i64)
    }

    /// Returns the taxable portion of this tax-inclusive amount
    /// (the amount with embedded GST removed).
    ///
    /// ## Example
    /// ```rust
    /// use bolt_core::money::Money;
    /// use bolt_core::types::GstRate;
    ///
    /// let gross = Money::from_paise(130000);
    /// let rate = GstRate::from_percent(28);
    /// assert_eq!(gross.excluding_gst(rate).paise(), 101562); // ₹1015.62
    /// ```
    pub fn excluding_gst(&self, rate: GstRate) -> Money {
        *self - self.embedded_gst(rate)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bolt_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(65000); // ₹650.00
    /// let line_amount = unit_price.multiply_quantity(2);
    /// assert_eq!(line_amount.paise(), 130000); // ₹1300.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Integer Rounding Helper
// =============================================================================

/// Divides `n / d` with half-up rounding (d must be positive).
///
/// `(2n + d) / 2d` keeps the math exact for any d, unlike the common
/// `(n + d/2) / d` which mishandles odd denominators.
pub(crate) fn div_round_half_up(n: i128, d: i128) -> i128 {
    debug_assert!(d > 0);
    if n >= 0 {
        (2 * n + d) / (2 * d)
    } else {
        -((-2 * n + d) / (2 * d))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for receipts and debugging. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over an iterator of Money values (for totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(65050);
        assert_eq!(money.paise(), 65050);
        assert_eq!(money.rupees(), 650);
        assert_eq!(money.paise_part(), 50);
    }

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(650, 50);
        assert_eq!(money.paise(), 65050);

        let negative = Money::from_rupees(-5, 50);
        assert_eq!(negative.paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(65000)), "₹650.00");
        assert_eq!(format!("{}", Money::from_paise(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        let result: Money = a * 3;
        assert_eq!(result.paise(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 50].iter().map(|p| Money::from_paise(*p)).sum();
        assert_eq!(total.paise(), 400);
    }

    #[test]
    fn test_embedded_gst_basic() {
        // ₹1300.00 at 28% inclusive → tax 1300 × 28/128 = 284.375 → ₹284.38
        let gross = Money::from_paise(130000);
        let tax = gross.embedded_gst(GstRate::from_percent(28));
        assert_eq!(tax.paise(), 28438);
        assert_eq!(gross.excluding_gst(GstRate::from_percent(28)).paise(), 101562);
    }

    #[test]
    fn test_embedded_gst_zero_rate() {
        let gross = Money::from_paise(130000);
        let tax = gross.embedded_gst(GstRate::zero());
        assert!(tax.is_zero());
        assert_eq!(gross.excluding_gst(GstRate::zero()), gross);
    }

    #[test]
    fn test_embedded_gst_reconciles() {
        // taxable + tax must reconstruct the gross exactly by construction
        for rate in [0u32, 5, 12, 18, 28, 100] {
            let rate = GstRate::from_percent(rate);
            for paise in [1i64, 99, 100, 650, 12345, 99999] {
                let gross = Money::from_paise(paise);
                let tax = gross.embedded_gst(rate);
                let taxable = gross.excluding_gst(rate);
                assert_eq!(taxable + tax, gross);
                assert!(!tax.is_negative());
            }
        }
    }

    #[test]
    fn test_div_round_half_up() {
        assert_eq!(div_round_half_up(10, 4), 3); // 2.5 → 3
        assert_eq!(div_round_half_up(9, 4), 2); // 2.25 → 2
        assert_eq!(div_round_half_up(11, 4), 3); // 2.75 → 3
        assert_eq!(div_round_half_up(3640000, 128), 28438); // 28437.5 → 28438
        assert_eq!(div_round_half_up(-10, 4), -3); // -2.5 → -3 (away from zero)
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_paise(65000);
        let line_amount = unit_price.multiply_quantity(2);
        assert_eq!(line_amount.paise(), 130000);
    }

    /// Documents the intentional precision loss of integer division.
    #[test]
    fn test_division_precision_loss_documented() {
        let ten_rupees = Money::from_paise(1000);
        let one_third = Money::from_paise(1000 / 3); // 333 paise
        let reconstructed: Money = one_third * 3; // 999 paise

        assert_eq!(reconstructed.paise(), 999);
        let lost = ten_rupees - reconstructed;
        assert_eq!(lost.paise(), 1);
    }
}
