//! # Shop Facade
//!
//! The single entry point collaborators (HTTP layer, desktop UI) call.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Shop Transaction Lock                           │
//! │                                                                     │
//! │  Shop ──► Arc<Mutex<ShopInner>> ──► EntityStore + InvoiceSequencer  │
//! │                                                                     │
//! │  Every operation acquires the lock; checkout holds it for the       │
//! │  WHOLE transaction (validate → price → sequence → stage → commit),  │
//! │  so two concurrent checkouts against the same product can never     │
//! │  both read a stale stock value and both decrement past zero.        │
//! │                                                                     │
//! │  The store and the sequencer live under ONE lock: the invoice       │
//! │  counter advances in the same critical section as the writes it     │
//! │  numbers.                                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::{Datelike, Utc};
use serde::Serialize;

use bolt_core::{
    CartLine, CustomerInfo, Invoice, Money, NewProduct, Product, ProductPatch,
};

use crate::checkout::{checkout, CheckoutError, CheckoutOutcome};
use crate::error::StoreResult;
use crate::sequencer::{InvoiceSequencer, SequencerState, DEFAULT_INVOICE_PREFIX};
use crate::store::EntityStore;

// =============================================================================
// Shop Config
// =============================================================================

/// Construction-time settings for a shop session.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Prefix for invoice numbers (shop setting, e.g. "INV").
    pub invoice_prefix: String,
    /// Billing period the sequencer is scoped to (e.g. calendar year).
    pub billing_period: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            invoice_prefix: DEFAULT_INVOICE_PREFIX.to_string(),
            billing_period: Utc::now().year().to_string(),
        }
    }
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// Inventory overview for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopStats {
    /// Number of products in the store.
    pub total_products: usize,
    /// Value of all on-hand stock at purchase price.
    pub total_stock_value: Money,
    /// Products whose stock has fallen below the low-stock threshold.
    pub low_stock: Vec<Product>,
}

impl ShopStats {
    /// Number of low-stock products.
    pub fn low_stock_count(&self) -> usize {
        self.low_stock.len()
    }
}

// =============================================================================
// Shop
// =============================================================================

/// The shop session: entity store and invoice sequencer behind one lock.
///
/// Cheap to clone (the clone shares the same state), so a server can hand
/// one instance to every request handler.
#[derive(Debug, Clone)]
pub struct Shop {
    inner: Arc<Mutex<ShopInner>>,
}

#[derive(Debug)]
struct ShopInner {
    store: EntityStore,
    sequencer: InvoiceSequencer,
}

impl Shop {
    /// Creates an empty shop with a fresh sequencer per the config.
    pub fn new(config: ShopConfig) -> Self {
        Shop::from_parts(
            EntityStore::new(),
            InvoiceSequencer::new(config.invoice_prefix, config.billing_period),
        )
    }

    /// Assembles a shop from explicit state - used to restore a persisted
    /// sequencer (which survives store resets) alongside a store.
    pub fn from_parts(store: EntityStore, sequencer: InvoiceSequencer) -> Self {
        Shop {
            inner: Arc::new(Mutex::new(ShopInner { store, sequencer })),
        }
    }

    /// Executes a function with shared access to the inner state.
    fn with_inner<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ShopInner) -> R,
    {
        let mut inner = self.inner.lock().expect("Shop mutex poisoned");
        f(&mut inner)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Lists products in insertion order.
    pub fn list_products(&self) -> Vec<Product> {
        self.with_inner(|inner| inner.store.list_products())
    }

    /// Gets a product by id.
    pub fn get_product(&self, id: u32) -> Option<Product> {
        self.with_inner(|inner| inner.store.get_product(id).cloned())
    }

    /// Creates a product.
    pub fn create_product(&self, data: NewProduct) -> StoreResult<Product> {
        self.with_inner(|inner| inner.store.create_product(data))
    }

    /// Applies a validated partial update to a product.
    pub fn update_product(&self, id: u32, patch: ProductPatch) -> StoreResult<Product> {
        self.with_inner(|inner| inner.store.update_product(id, patch))
    }

    /// Deletes a product (idempotent).
    pub fn delete_product(&self, id: u32) {
        self.with_inner(|inner| inner.store.delete_product(id));
    }

    /// Case-insensitive substring search over name, brand and code.
    ///
    /// An empty or blank query returns the full listing.
    pub fn search_products(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        self.with_inner(|inner| {
            inner
                .store
                .list_products()
                .into_iter()
                .filter(|p| {
                    needle.is_empty()
                        || p.name.to_lowercase().contains(&needle)
                        || p.brand.to_lowercase().contains(&needle)
                        || p.code.to_lowercase().contains(&needle)
                })
                .collect()
        })
    }

    // =========================================================================
    // Checkout & Invoices
    // =========================================================================

    /// Runs a checkout transaction under the shop lock.
    ///
    /// The lock is held across the whole pipeline, so the stock read in the
    /// staging step cannot go stale before the commit.
    pub fn checkout(
        &self,
        cart: &[CartLine],
        customer: &CustomerInfo,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        self.with_inner(|inner| checkout(&mut inner.store, &mut inner.sequencer, cart, customer))
    }

    /// Lists invoices in insertion order.
    pub fn list_invoices(&self) -> Vec<Invoice> {
        self.with_inner(|inner| inner.store.list_invoices())
    }

    // =========================================================================
    // Dashboard & Sequencer State
    // =========================================================================

    /// Computes the dashboard stats.
    pub fn stats(&self) -> ShopStats {
        self.with_inner(|inner| {
            let products = inner.store.list_products();
            let total_stock_value: Money = products.iter().map(Product::stock_value).sum();
            let low_stock = products
                .iter()
                .filter(|p| p.is_low_stock())
                .cloned()
                .collect();
            ShopStats {
                total_products: products.len(),
                total_stock_value,
                low_stock,
            }
        })
    }

    /// Snapshot of the invoice sequencer for external persistence.
    pub fn sequencer_state(&self) -> SequencerState {
        self.with_inner(|inner| inner.sequencer.state())
    }

    /// Rolls the sequencer into a new billing period (e.g. at year end).
    /// Rolling to the current period is a no-op.
    pub fn roll_billing_period(&self, period: impl Into<String>) {
        let period = period.into();
        self.with_inner(|inner| inner.sequencer.roll_period(period));
    }
}

impl Default for Shop {
    fn default() -> Self {
        Shop::new(ShopConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bolt_core::{Cart, GstRate};

    fn shop_2024() -> Shop {
        Shop::new(ShopConfig {
            invoice_prefix: "INV".to_string(),
            billing_period: "2024".to_string(),
        })
    }

    fn part(name: &str, brand: &str, code: &str, stock: u32, price_paise: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            brand: brand.to_string(),
            code: code.to_string(),
            hsn_code: "8708".to_string(),
            stock,
            purchase_price: Money::from_paise(price_paise * 2 / 3),
            selling_price: Money::from_paise(price_paise),
            gst_rate: GstRate::from_percent(28),
        }
    }

    #[test]
    fn test_end_to_end_sale() {
        let shop = shop_2024();
        let pads = shop
            .create_product(part("Brake Pad Set", "Maruti Swift", "BP-MS-001", 25, 65000))
            .unwrap();

        // Build the cart the way the billing screen does
        let mut cart = Cart::new();
        cart.add_product(&pads, 2).unwrap();

        let outcome = shop.checkout(&cart.lines, &CustomerInfo::default()).unwrap();
        assert_eq!(outcome.invoice.invoice_number, "INV-2024-0001");
        assert_eq!(outcome.invoice.grand_total.paise(), 130000);

        assert_eq!(shop.get_product(pads.id).unwrap().stock, 23);
        assert_eq!(shop.list_invoices().len(), 1);
    }

    #[test]
    fn test_search_products() {
        let shop = shop_2024();
        shop.create_product(part("Brake Pad Set", "Maruti Swift", "BP-MS-001", 25, 65000))
            .unwrap();
        shop.create_product(part("Air Filter", "Hyundai i20", "AF-HI-002", 15, 40000))
            .unwrap();

        assert_eq!(shop.search_products("brake").len(), 1);
        assert_eq!(shop.search_products("HYUNDAI").len(), 1);
        assert_eq!(shop.search_products("af-hi").len(), 1);
        assert_eq!(shop.search_products("  ").len(), 2);
        assert!(shop.search_products("clutch").is_empty());
    }

    #[test]
    fn test_stats() {
        let shop = shop_2024();
        shop.create_product(part("Brake Pad Set", "Maruti Swift", "BP-MS-001", 25, 65000))
            .unwrap();
        let filter = shop
            .create_product(part("Air Filter", "Hyundai i20", "AF-HI-002", 4, 40000))
            .unwrap();

        let stats = shop.stats();
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.low_stock_count(), 1);
        assert_eq!(stats.low_stock[0].id, filter.id);

        let expected_value = 65000 * 2 / 3 * 25 + 40000 * 2 / 3 * 4;
        assert_eq!(stats.total_stock_value.paise(), expected_value);
    }

    #[test]
    fn test_invoice_survives_product_deletion() {
        let shop = shop_2024();
        let pads = shop
            .create_product(part("Brake Pad Set", "Maruti Swift", "BP-MS-001", 25, 65000))
            .unwrap();

        let mut cart = Cart::new();
        cart.add_product(&pads, 1).unwrap();
        let outcome = shop.checkout(&cart.lines, &CustomerInfo::default()).unwrap();

        shop.delete_product(pads.id);

        // The frozen line snapshot keeps the sale history intact
        let invoices = shop.list_invoices();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].id, outcome.invoice.id);
        assert_eq!(invoices[0].items[0].name, "Brake Pad Set");
        assert_eq!(invoices[0].items[0].unit_price.paise(), 65000);
    }

    #[test]
    fn test_sequencer_state_survives_store_reset() {
        let shop = shop_2024();
        let pads = shop
            .create_product(part("Brake Pad Set", "Maruti Swift", "BP-MS-001", 25, 65000))
            .unwrap();
        let mut cart = Cart::new();
        cart.add_product(&pads, 1).unwrap();
        shop.checkout(&cart.lines, &CustomerInfo::default()).unwrap();

        // Simulate a fresh store restored against the persisted sequencer
        let rebuilt = Shop::from_parts(
            EntityStore::new(),
            InvoiceSequencer::from_state(shop.sequencer_state()),
        );
        let pads = rebuilt
            .create_product(part("Brake Pad Set", "Maruti Swift", "BP-MS-001", 25, 65000))
            .unwrap();
        let mut cart = Cart::new();
        cart.add_product(&pads, 1).unwrap();
        let outcome = rebuilt
            .checkout(&cart.lines, &CustomerInfo::default())
            .unwrap();

        // The number series continues; nothing repeats
        assert_eq!(outcome.invoice.invoice_number, "INV-2024-0002");
    }

    #[test]
    fn test_roll_billing_period() {
        let shop = shop_2024();
        shop.roll_billing_period("2025");
        assert_eq!(shop.sequencer_state().period, "2025");
        assert_eq!(shop.sequencer_state().next_seq, 1);
    }

    #[test]
    fn test_concurrent_checkouts_never_double_sell_silently() {
        let shop = shop_2024();
        let bulb = shop
            .create_product(part("Headlight Bulb", "Maruti Alto", "HB-MA-004", 1, 15000))
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..2 {
            let shop = shop.clone();
            let line = CartLine::from_product(&bulb, 1);
            handles.push(std::thread::spawn(move || {
                shop.checkout(&[line], &CustomerInfo::default()).unwrap()
            }));
        }

        let outcomes: Vec<CheckoutOutcome> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Whichever order the lock granted, exactly one checkout saw the
        // last unit and exactly one raised a shortfall warning.
        let total_warnings: usize = outcomes.iter().map(|o| o.warnings.len()).sum();
        assert_eq!(total_warnings, 1);
        assert_eq!(shop.get_product(bulb.id).unwrap().stock, 0);
        assert_eq!(shop.list_invoices().len(), 2);
    }
}
