//! # Tax & Totals Calculator
//!
//! Pure functions converting cart lines into a GST breakdown.
//!
//! ## The Tax-Inclusive Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Selling prices already CONTAIN the GST, so the gross line amount   │
//! │  is (100 + rate)% of the pre-tax base:                              │
//! │                                                                     │
//! │    line_gross   = quantity × unit_price                             │
//! │    line_gst     = line_gross × rate / (100 + rate)                  │
//! │    line_taxable = line_gross − line_gst                             │
//! │                                                                     │
//! │  Aggregates:                                                        │
//! │    subtotal    = Σ line_taxable                                     │
//! │    gst_amount  = Σ line_gst                                         │
//! │    grand_total = Σ line_gross                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Precision
//! Per-line GST is rarely a whole number of paise (₹1300.00 at 28% embeds
//! ₹284.375 of tax). Aggregation therefore runs in micro-paise (`i128`,
//! 10⁻⁶ paisa resolution) and rounds half-up to paise exactly once, at the
//! point the result is stored or presented. Summing pre-rounded lines
//! instead would compound a paisa of drift per line.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{div_round_half_up, Money};
use crate::types::{CartLine, GstRate};

/// Sub-paisa resolution used while aggregating tax across lines.
const TAX_SCALE: i128 = 1_000_000;

// =============================================================================
// Per-Line Breakdown
// =============================================================================

/// GST split of a single line, rounded to paise for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineBreakdown {
    /// Tax-inclusive line amount (quantity × unit price).
    pub gross: Money,
    /// GST embedded in the gross.
    pub gst: Money,
    /// Gross with the embedded GST removed.
    pub taxable: Money,
}

/// Splits one line into gross / GST / taxable.
///
/// Each component is rounded from the exact value independently, so
/// `taxable + gst` can differ from `gross` by at most one paisa.
///
/// ## Example
/// ```rust
/// use bolt_core::money::Money;
/// use bolt_core::tax::line_breakdown;
/// use bolt_core::types::GstRate;
///
/// // 2 × ₹650.00 at 28% GST
/// let line = line_breakdown(2, Money::from_paise(65000), GstRate::from_percent(28));
/// assert_eq!(line.gross.paise(), 130000); // ₹1300.00
/// assert_eq!(line.gst.paise(), 28438);    // 1300 × 28/128 = 284.375 → ₹284.38
/// assert_eq!(line.taxable.paise(), 101563); // 1015.625 → ₹1015.63
/// ```
pub fn line_breakdown(quantity: u32, unit_price: Money, rate: GstRate) -> LineBreakdown {
    let gross = unit_price.multiply_quantity(quantity as i64);
    let gst_micro = line_gst_micro(gross, rate);
    let gross_micro = gross.paise() as i128 * TAX_SCALE;

    LineBreakdown {
        gross,
        gst: micro_to_paise(gst_micro),
        taxable: micro_to_paise(gross_micro - gst_micro),
    }
}

/// Exact embedded GST of a gross amount, in micro-paise.
fn line_gst_micro(gross: Money, rate: GstRate) -> i128 {
    if rate.is_zero() {
        return 0;
    }
    div_round_half_up(
        gross.paise() as i128 * rate.percent() as i128 * TAX_SCALE,
        (100 + rate.percent()) as i128,
    )
}

/// Rounds a micro-paise amount half-up to whole paise.
fn micro_to_paise(micro: i128) -> Money {
    Money::from_paise(div_round_half_up(micro, TAX_SCALE) as i64)
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Aggregated GST breakdown for a whole cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GstTotals {
    /// Sum of taxable line values.
    pub subtotal: Money,
    /// Sum of embedded GST across lines.
    pub gst_amount: Money,
    /// Sum of tax-inclusive line amounts.
    pub grand_total: Money,
}

impl GstTotals {
    /// All-zero totals (the empty cart).
    pub const fn zero() -> Self {
        GstTotals {
            subtotal: Money::zero(),
            gst_amount: Money::zero(),
            grand_total: Money::zero(),
        }
    }

    /// Checks the monetary invariant: `subtotal + gst_amount` reconstructs
    /// `grand_total` within one paisa of rounding slack.
    pub fn reconciles(&self) -> bool {
        (self.subtotal + self.gst_amount - self.grand_total).paise().abs() <= 1
    }
}

impl Default for GstTotals {
    fn default() -> Self {
        GstTotals::zero()
    }
}

/// Computes aggregate totals for a sequence of
/// `(quantity, tax-inclusive unit price, rate)` triples.
///
/// The grand total is an exact integer sum; subtotal and GST are
/// accumulated at micro-paise resolution and rounded once at the end.
pub fn compute_totals<I>(lines: I) -> GstTotals
where
    I: IntoIterator<Item = (u32, Money, GstRate)>,
{
    let mut grand_total = Money::zero();
    let mut gst_micro: i128 = 0;

    for (quantity, unit_price, rate) in lines {
        let gross = unit_price.multiply_quantity(quantity as i64);
        grand_total += gross;
        gst_micro += line_gst_micro(gross, rate);
    }

    let gross_micro = grand_total.paise() as i128 * TAX_SCALE;

    GstTotals {
        subtotal: micro_to_paise(gross_micro - gst_micro),
        gst_amount: micro_to_paise(gst_micro),
        grand_total,
    }
}

/// Convenience wrapper over [`compute_totals`] for cart lines.
pub fn cart_totals(lines: &[CartLine]) -> GstTotals {
    compute_totals(lines.iter().map(|l| (l.quantity, l.unit_price, l.gst_rate)))
}

// =============================================================================
// Unit Tests
// =============================================================================
