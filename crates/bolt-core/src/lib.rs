//! # bolt-core: Pure Business Logic for Bolt POS
//!
//! This crate is the **heart** of Bolt POS, a point-of-sale and inventory
//! tool for a small auto-parts shop. It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Bolt POS Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 Frontend / HTTP layer (external)              │  │
//! │  │    Inventory UI ──► Billing UI ──► Invoice print              │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                ★ bolt-core (THIS CRATE) ★                     │  │
//! │  │                                                               │  │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐       │  │
//! │  │   │  types  │  │  money  │  │   tax   │  │ validation │       │  │
//! │  │   │ Product │  │  Money  │  │ GST math│  │   rules    │       │  │
//! │  │   │ Invoice │  │  paise  │  │ totals  │  │   checks   │       │  │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └────────────┘       │  │
//! │  │                       ┌─────────┐                             │  │
//! │  │                       │  cart   │                             │  │
//! │  │                       └─────────┘                             │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │              bolt-store (entity store + checkout)             │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Invoice, CartLine, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`tax`] - GST breakdown of tax-inclusive prices
//! - [`cart`] - Transient shopping cart with merge semantics
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bolt_core::money::Money;
//! use bolt_core::tax::line_breakdown;
//! use bolt_core::types::GstRate;
//!
//! // Create money from paise (never from floats!)
//! let price = Money::from_paise(65000); // ₹650.00
//!
//! // Back the GST out of the tax-inclusive price
//! let line = line_breakdown(2, price, GstRate::from_percent(28));
//!
//! // 2 × ₹650 at 28% embeds ₹284.38 of tax
//! assert_eq!(line.gst.paise(), 28438);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bolt_core::Money` instead of
// `use bolt_core::money::Money`

pub use cart::{Cart, CartError};
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use tax::{cart_totals, compute_totals, line_breakdown, GstTotals, LineBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a product counts as "low stock" on the dashboard.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Maximum quantity of a single line in a cart.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Customer name printed on an invoice when none was captured.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";
