//! # bolt-store: Entity Store & Checkout for Bolt POS
//!
//! This crate owns the canonical entity collections and the sale
//! transaction. It is the only place stock quantities and invoice records
//! are mutated.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Bolt POS Data Flow                            │
//! │                                                                     │
//! │  Collaborator call (checkout, update_product, ...)                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                   bolt-store (THIS CRATE)                     │  │
//! │  │                                                               │  │
//! │  │   ┌────────────┐   ┌─────────────┐   ┌─────────────────┐      │  │
//! │  │   │    Shop    │──►│ EntityStore │   │ InvoiceSequencer│      │  │
//! │  │   │ (shop.rs)  │   │ (store.rs)  │   │ (sequencer.rs)  │      │  │
//! │  │   │            │   │             │   │                 │      │  │
//! │  │   │ one Mutex  │   │ products    │   │ INV-2024-0042   │      │  │
//! │  │   │ per shop   │   │ invoices    │   │ never repeats   │      │  │
//! │  │   └─────┬──────┘   └─────────────┘   └─────────────────┘      │  │
//! │  │         │               ▲                    ▲                 │  │
//! │  │         └───────────────┴────────────────────┘                 │  │
//! │  │                  checkout (checkout.rs)                        │  │
//! │  │        validate → price → sequence → stage → commit            │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  bolt-core (pure GST math, types, validation)                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - In-memory entity collections with monotone id assignment
//! - [`sequencer`] - Invoice number sequencing per billing period
//! - [`checkout`] - The sale transaction orchestrator
//! - [`shop`] - The locked facade collaborators call
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use bolt_core::{Cart, CustomerInfo, GstRate, Money, NewProduct};
//! use bolt_store::{Shop, ShopConfig};
//!
//! let shop = Shop::new(ShopConfig::default());
//!
//! let pads = shop.create_product(NewProduct {
//!     name: "Brake Pad Set".to_string(),
//!     brand: "Maruti Swift".to_string(),
//!     code: "BP-MS-001".to_string(),
//!     hsn_code: "8708".to_string(),
//!     stock: 25,
//!     purchase_price: Money::from_paise(45000),
//!     selling_price: Money::from_paise(65000),
//!     gst_rate: GstRate::from_percent(28),
//! })?;
//!
//! let mut cart = Cart::new();
//! cart.add_product(&pads, 2)?;
//!
//! let outcome = shop.checkout(&cart.lines, &CustomerInfo::default())?;
//! assert_eq!(outcome.invoice.grand_total, Money::from_paise(130000));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod sequencer;
pub mod shop;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutError, CheckoutOutcome, StockShortfall};
pub use error::{StoreError, StoreResult};
pub use sequencer::{InvoiceSequencer, SequencerState, DEFAULT_INVOICE_PREFIX};
pub use shop::{Shop, ShopConfig, ShopStats};
pub use store::EntityStore;
