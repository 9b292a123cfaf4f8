//! # Cart Module
//!
//! The transient shopping cart built up during billing.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                               │
//! │                                                                     │
//! │  Billing Action            Cart Change                              │
//! │  ──────────────            ───────────                              │
//! │  Click Product ──────────► add_product()      merge or push line    │
//! │  Change Quantity ────────► update_quantity()  set qty (0 removes)   │
//! │  Click Remove ───────────► remove_line()      drop the line         │
//! │  New Sale ───────────────► clear()            empty the cart        │
//! │  Totals Panel ───────────► totals()           live GST preview      │
//! │                                                                     │
//! │  Lines hold price/rate SNAPSHOTS taken when the product was added;  │
//! │  checkout prices from the cart, never from a live product re-read.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::tax::{cart_totals, GstTotals};
use crate::types::{CartLine, Product};
use crate::validation::validate_quantity;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors raised by cart edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The referenced product has no line in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(u32),

    /// The product is out of stock and cannot be added.
    #[error("product {0} is out of stock")]
    OutOfStock(u32),

    /// Quantity or other field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product again merges
///   quantities)
/// - Every line quantity is positive (setting a quantity to 0 removes the
///   line)
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Lines in the cart, in the order products were first added.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantities merge (the original snapshot is
    ///   kept; stock is not re-checked on increments)
    /// - New product with zero stock: rejected with [`CartError::OutOfStock`]
    /// - New product otherwise: a fresh line with frozen price/rate
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        validate_quantity(quantity)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            let merged = line.quantity + quantity;
            validate_quantity(merged)?;
            line.quantity = merged;
            return Ok(());
        }

        if product.stock == 0 {
            return Err(CartError::OutOfStock(product.id));
        }

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - Product not in cart: [`CartError::NotInCart`]
    pub fn update_quantity(&mut self, product_id: u32, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_line(product_id);
        }

        validate_quantity(quantity)?;

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CartError::NotInCart(product_id)),
        }
    }

    /// Removes a line by product id.
    pub fn remove_line(&mut self, product_id: u32) -> Result<(), CartError> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() == initial_len {
            Err(CartError::NotInCart(product_id))
        } else {
            Ok(())
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Live GST totals for the current lines (the billing panel preview).
    pub fn totals(&self) -> GstTotals {
        cart_totals(&self.lines)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
