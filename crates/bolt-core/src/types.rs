//! # Domain Types
//!
//! Core domain types used throughout Bolt POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐    │
//! │  │    Product      │   │    CartLine     │   │    Invoice      │    │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │    │
//! │  │  id (u32)       │   │  product_id     │   │  id (u32)       │    │
//! │  │  code (SKU)     │   │  quantity       │   │  invoice_number │    │
//! │  │  stock          │   │  price snapshot │   │  frozen items   │    │
//! │  │  selling_price  │   │  rate snapshot  │   │  totals         │    │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘    │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐                          │
//! │  │    GstRate      │   │  CustomerInfo   │                          │
//! │  │  ─────────────  │   │  ─────────────  │                          │
//! │  │  percent (u32)  │   │  name (opt)     │                          │
//! │  │  28 = 28%       │   │  phone (opt)    │                          │
//! │  └─────────────────┘   └─────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Cart lines and invoice lines carry frozen copies of product data
//! (name, code, price, rate) taken when the product entered the cart.
//! A later product edit or deletion cannot change an in-progress sale
//! or a committed invoice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{LOW_STOCK_THRESHOLD, WALK_IN_CUSTOMER};

// =============================================================================
// GST Rate
// =============================================================================

/// GST rate represented as an integer percentage.
///
/// Indian GST slabs are whole percentages (0, 5, 12, 18, 28), so a `u32`
/// percent is exact. Valid range is 0-100; see
/// [`validation::validate_gst_rate`](crate::validation::validate_gst_rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GstRate(u32);

impl GstRate {
    /// Creates a GST rate from an integer percentage.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        GstRate(percent)
    }

    /// Returns the rate as an integer percentage.
    #[inline]
    pub const fn percent(&self) -> u32 {
        self.0
    }

    /// Zero GST rate.
    #[inline]
    pub const fn zero() -> Self {
        GstRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for GstRate {
    fn default() -> Self {
        GstRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A spare part available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier, assigned by the entity store, never reused.
    pub id: u32,

    /// Display name shown in inventory and on invoices.
    pub name: String,

    /// Vehicle brand/model this part fits (e.g. "Maruti Swift").
    pub brand: String,

    /// Part code (SKU) - business identifier, printed on invoices.
    pub code: String,

    /// HSN code for GST classification (e.g. "8708").
    pub hsn_code: String,

    /// Current stock level. Never negative after a committed transaction.
    pub stock: u32,

    /// What the shop paid for the part.
    pub purchase_price: Money,

    /// Tax-inclusive selling price.
    pub selling_price: Money,

    /// GST rate embedded in the selling price.
    pub gst_rate: GstRate,
}

impl Product {
    /// Checks whether the requested quantity can be covered by current stock.
    #[inline]
    pub fn can_sell(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }

    /// Checks whether this product is running low (dashboard alert).
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Value of the on-hand stock at purchase price.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.purchase_price.multiply_quantity(self.stock as i64)
    }
}

/// Payload for creating a product. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub code: String,
    pub hsn_code: String,
    pub stock: u32,
    pub purchase_price: Money,
    pub selling_price: Money,
    pub gst_rate: GstRate,
}

/// Explicit partial update for a product.
///
/// Every mutable field is an `Option`; only `Some` fields are applied, and
/// each is validated individually before any of them is merged. This replaces
/// an unchecked generic field merge with a closed, typed surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub code: Option<String>,
    pub hsn_code: Option<String>,
    pub stock: Option<u32>,
    pub purchase_price: Option<Money>,
    pub selling_price: Option<Money>,
    pub gst_rate: Option<GstRate>,
}

impl ProductPatch {
    /// A patch that only sets the stock level (used by checkout).
    pub fn set_stock(stock: u32) -> Self {
        ProductPatch {
            stock: Some(stock),
            ..ProductPatch::default()
        }
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.brand.is_none()
            && self.code.is_none()
            && self.hsn_code.is_none()
            && self.stock.is_none()
            && self.purchase_price.is_none()
            && self.selling_price.is_none()
            && self.gst_rate.is_none()
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product/quantity pairing in a cart.
///
/// Carries a frozen snapshot of the product's name, code, price and rate
/// taken when the line was created. Pricing at checkout uses these values,
/// never a live re-read of the product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product id (for stock reconciliation at checkout).
    pub product_id: u32,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Part code at time of adding (frozen).
    pub code: String,

    /// Quantity to sell. Must be positive.
    pub quantity: u32,

    /// Tax-inclusive unit price at time of adding (frozen).
    pub unit_price: Money,

    /// GST rate at time of adding (frozen).
    pub gst_rate: GstRate,
}

impl CartLine {
    /// Creates a cart line from a product, freezing its price and rate.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            code: product.code.clone(),
            quantity,
            unit_price: product.selling_price,
            gst_rate: product.gst_rate,
        }
    }

    /// The tax-inclusive line amount (unit price × quantity).
    #[inline]
    pub fn amount(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity as i64)
    }
}

// =============================================================================
// Customer Info
// =============================================================================

/// Optional customer details captured at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl CustomerInfo {
    /// Name to print on the invoice; placeholder when absent or blank.
    pub fn resolved_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => WALK_IN_CUSTOMER.to_string(),
        }
    }

    /// Phone to store on the invoice; empty string when absent.
    pub fn resolved_phone(&self) -> String {
        self.phone
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .to_string()
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A frozen line item on a committed invoice.
///
/// Snapshot pattern: captures product data at time of sale so that later
/// product edits or deletions cannot change sales history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceLine {
    pub product_id: u32,
    /// Product name at time of sale (frozen).
    pub name: String,
    /// Part code at time of sale (frozen).
    pub code: String,
    /// Quantity sold.
    pub quantity: u32,
    /// Tax-inclusive unit price at time of sale (frozen).
    pub unit_price: Money,
    /// GST rate at time of sale (frozen).
    pub gst_rate: GstRate,
    /// Tax-inclusive line amount (unit price × quantity).
    pub amount: Money,
}

impl From<&CartLine> for InvoiceLine {
    fn from(line: &CartLine) -> Self {
        InvoiceLine {
            product_id: line.product_id,
            name: line.name.clone(),
            code: line.code.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            gst_rate: line.gst_rate,
            amount: line.amount(),
        }
    }
}

/// Payload for persisting an invoice. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<InvoiceLine>,
    pub subtotal: Money,
    pub gst_amount: Money,
    pub grand_total: Money,
    pub created_at: DateTime<Utc>,
}

/// A committed, immutable invoice.
///
/// Created exactly once at checkout; there is no update or delete operation
/// (audit-trail semantics).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    /// Unique identifier, assigned by the entity store.
    pub id: u32,

    /// Human-facing invoice number, unique and monotonically increasing
    /// within a billing period.
    pub invoice_number: String,

    pub customer_name: String,
    pub customer_phone: String,

    /// Ordered frozen line snapshots, immune to later product edits.
    pub items: Vec<InvoiceLine>,

    /// Sum of taxable line values.
    pub subtotal: Money,

    /// Sum of embedded GST across lines.
    pub gst_amount: Money,

    /// Sum of tax-inclusive line amounts.
    pub grand_total: Money,

    /// When the invoice was committed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Serializes the frozen line items to JSON.
    ///
    /// Collaborators that persist invoices as flat records store the line
    /// list in this embedded form.
    pub fn items_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.items)
    }

    /// Checks the monetary invariant: subtotal + GST reconstructs the grand
    /// total within one paisa of rounding slack.
    pub fn totals_reconcile(&self) -> bool {
        let diff = (self.subtotal + self.gst_amount - self.grand_total).paise();
        diff.abs() <= 1
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn brake_pads() -> Product {
        Product {
            id: 1,
            name: "Brake Pad Set".to_string(),
            brand: "Maruti Swift".to_string(),
            code: "BP-MS-001".to_string(),
            hsn_code: "8708".to_string(),
            stock: 25,
            purchase_price: Money::from_paise(45000),
            selling_price: Money::from_paise(65000),
            gst_rate: GstRate::from_percent(28),
        }
    }

    #[test]
    fn test_gst_rate_percent() {
        let rate = GstRate::from_percent(28);
        assert_eq!(rate.percent(), 28);
        assert!(!rate.is_zero());
        assert!(GstRate::default().is_zero());
    }

    #[test]
    fn test_product_stock_helpers() {
        let mut product = brake_pads();
        assert!(product.can_sell(25));
        assert!(!product.can_sell(26));
        assert!(!product.is_low_stock());

        product.stock = 9;
        assert!(product.is_low_stock());

        assert_eq!(product.stock_value().paise(), 45000 * 9);
    }

    #[test]
    fn test_cart_line_freezes_price() {
        let mut product = brake_pads();
        let line = CartLine::from_product(&product, 2);

        // A later price edit must not affect the existing line
        product.selling_price = Money::from_paise(99900);

        assert_eq!(line.unit_price.paise(), 65000);
        assert_eq!(line.amount().paise(), 130000);
    }

    #[test]
    fn test_patch_helpers() {
        assert!(ProductPatch::default().is_empty());

        let patch = ProductPatch::set_stock(23);
        assert!(!patch.is_empty());
        assert_eq!(patch.stock, Some(23));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_customer_info_placeholders() {
        let walk_in = CustomerInfo::default();
        assert_eq!(walk_in.resolved_name(), WALK_IN_CUSTOMER);
        assert_eq!(walk_in.resolved_phone(), "");

        let named = CustomerInfo {
            name: Some("  Ramesh Kumar ".to_string()),
            phone: Some("98765 43210".to_string()),
        };
        assert_eq!(named.resolved_name(), "Ramesh Kumar");
        assert_eq!(named.resolved_phone(), "98765 43210");

        let blank = CustomerInfo {
            name: Some("   ".to_string()),
            phone: None,
        };
        assert_eq!(blank.resolved_name(), WALK_IN_CUSTOMER);
    }

    #[test]
    fn test_invoice_items_json_shape() {
        let product = brake_pads();
        let line = InvoiceLine::from(&CartLine::from_product(&product, 2));
        let invoice = Invoice {
            id: 1,
            invoice_number: "INV-2024-0001".to_string(),
            customer_name: WALK_IN_CUSTOMER.to_string(),
            customer_phone: String::new(),
            items: vec![line],
            subtotal: Money::from_paise(101563),
            gst_amount: Money::from_paise(28438),
            grand_total: Money::from_paise(130000),
            created_at: Utc::now(),
        };

        let json = invoice.items_json().unwrap();
        assert!(json.contains("\"productId\":1"));
        assert!(json.contains("\"unitPrice\":65000"));
        assert!(json.contains("\"code\":\"BP-MS-001\""));

        assert!(invoice.totals_reconcile());
    }
}
