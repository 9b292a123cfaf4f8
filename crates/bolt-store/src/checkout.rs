//! # Checkout Orchestrator
//!
//! Turns a cart into a committed invoice and reconciled stock.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Pipeline                              │
//! │                                                                     │
//! │  1. VALIDATE   cart non-empty, quantities positive,                 │
//! │                every product exists        → abort, no side effects │
//! │  2. PRICE      GST totals from the cart's price snapshots           │
//! │                (never a live product re-read)                       │
//! │  3. SEQUENCE   take the next invoice number                         │
//! │                (burned if anything later fails)                     │
//! │  4. STAGE      compute every stock adjustment against a working     │
//! │                copy; shortfalls clamp at zero and queue a warning   │
//! │  5. COMMIT     write the invoice and ALL staged stock levels        │
//! │                together - no fallible step in between              │
//! │                                                                     │
//! │  Oversell is a WARNING, not an error: the invoice still commits,    │
//! │  stock clamps at zero, and the operator reconciles manually.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use bolt_core::validation::validate_quantity;
use bolt_core::{
    cart_totals, CartLine, CustomerInfo, Invoice, InvoiceLine, NewInvoice, ProductPatch,
    ValidationError,
};

use crate::error::StoreError;
use crate::sequencer::InvoiceSequencer;
use crate::store::EntityStore;

// =============================================================================
// Checkout Error
// =============================================================================

/// Failures that abort a checkout attempt.
///
/// Validation and not-found failures occur before the invoice number is
/// taken, so a rejected checkout leaves no trace at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Checkout was attempted with no cart lines.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line failed validation (non-positive quantity, etc.).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A cart line references a product that is not in the store.
    #[error("product not found: {product_id}")]
    ProductNotFound { product_id: u32 },

    /// The entity store rejected a write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Stock Shortfall Warning
// =============================================================================

/// Raised when a line sells more than the store has on hand.
///
/// Non-fatal: the invoice commits, the product's stock clamps at zero, and
/// the discrepancy is surfaced here (and logged) so the operator can
/// reconcile the physical count manually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockShortfall {
    pub product_id: u32,
    pub code: String,
    /// Quantity the cart line asked for.
    pub requested: u32,
    /// Stock available when the line was staged.
    pub available: u32,
}

/// The result of a committed checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub invoice: Invoice,
    pub warnings: Vec<StockShortfall>,
}

// =============================================================================
// Checkout
// =============================================================================

/// Runs a full checkout against the store and sequencer.
///
/// The caller must hold whatever lock serializes store access for the whole
/// call (the [`Shop`](crate::shop::Shop) facade does this); with that, two
/// concurrent checkouts can never both read a stale stock value.
pub fn checkout(
    store: &mut EntityStore,
    sequencer: &mut InvoiceSequencer,
    cart: &[CartLine],
    customer: &CustomerInfo,
) -> Result<CheckoutOutcome, CheckoutError> {
    // ---- 1. Validate (no side effects on failure) ----------------------
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    for line in cart {
        validate_quantity(line.quantity)?;
        if store.get_product(line.product_id).is_none() {
            return Err(CheckoutError::ProductNotFound {
                product_id: line.product_id,
            });
        }
    }

    // ---- 2. Price from the cart's snapshots ----------------------------
    let totals = cart_totals(cart);

    // ---- 3. Sequence (number is consumed from here on) -----------------
    let invoice_number = sequencer.next();

    // ---- 4. Stage stock adjustments ------------------------------------
    // Re-read current stock per line against a working copy, so duplicate
    // lines for one product accumulate instead of clobbering each other.
    let mut staged: HashMap<u32, u32> = HashMap::new();
    let mut warnings: Vec<StockShortfall> = Vec::new();

    for line in cart {
        let product = store
            .get_product(line.product_id)
            .ok_or(CheckoutError::ProductNotFound {
                product_id: line.product_id,
            })?;
        let available = staged
            .get(&line.product_id)
            .copied()
            .unwrap_or(product.stock);

        let new_stock = if line.quantity > available {
            warnings.push(StockShortfall {
                product_id: line.product_id,
                code: product.code.clone(),
                requested: line.quantity,
                available,
            });
            0
        } else {
            available - line.quantity
        };
        staged.insert(line.product_id, new_stock);
    }

    // ---- 5. Commit: invoice + all staged stock, together ----------------
    let invoice = store.create_invoice(NewInvoice {
        invoice_number,
        customer_name: customer.resolved_name(),
        customer_phone: customer.resolved_phone(),
        items: cart.iter().map(InvoiceLine::from).collect(),
        subtotal: totals.subtotal,
        gst_amount: totals.gst_amount,
        grand_total: totals.grand_total,
        created_at: Utc::now(),
    });

    for (&product_id, &stock) in &staged {
        store.update_product(product_id, ProductPatch::set_stock(stock))?;
    }

    for shortfall in &warnings {
        warn!(
            product_id = shortfall.product_id,
            code = %shortfall.code,
            requested = shortfall.requested,
            available = shortfall.available,
            "Stock shortfall: sold past available stock, clamped at zero"
        );
    }

    info!(
        invoice_id = invoice.id,
        number = %invoice.invoice_number,
        grand_total = %invoice.grand_total,
        lines = invoice.items.len(),
        "Checkout committed"
    );

    Ok(CheckoutOutcome { invoice, warnings })
}

// =============================================================================
// Unit Tests
// =============================================================================
