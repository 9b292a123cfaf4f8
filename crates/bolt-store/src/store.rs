//! # Entity Store
//!
//! In-memory keyed collections for products and invoices.
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Id Assignment                                 │
//! │                                                                     │
//! │  Each collection carries its own monotone counter, starting at 1:   │
//! │                                                                     │
//! │    create ──► id = next_id ──► next_id += 1                         │
//! │    delete ──► entry removed, counter UNCHANGED                      │
//! │                                                                     │
//! │  Ids are never reused, so a deleted product's id stays dead and     │
//! │  invoice history keeps pointing at a unique identity.               │
//! │                                                                     │
//! │  Listings iterate the BTreeMap in key order, which for monotone     │
//! │  ids is exactly insertion order.                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Discipline
//! The store is a plain synchronous struct; callers serialize access through
//! the [`Shop`](crate::shop::Shop) facade's transaction lock. Invoices are
//! write-once: there is no update or delete operation for them.

use std::collections::BTreeMap;

use tracing::debug;

use bolt_core::validation::{validate_new_product, validate_product_patch};
use bolt_core::{Invoice, NewInvoice, NewProduct, Product, ProductPatch};

use crate::error::{StoreError, StoreResult};

/// In-memory store owning the canonical Product and Invoice collections.
///
/// ## Note on part codes
/// `code` (SKU) uniqueness is not enforced: two products may share a code
/// (same part, different batch). Callers that want unique codes must check
/// before creating.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    products: BTreeMap<u32, Product>,
    invoices: BTreeMap<u32, Invoice>,
    next_product_id: u32,
    next_invoice_id: u32,
}

impl EntityStore {
    /// Creates an empty store. Id counters start at 1.
    pub fn new() -> Self {
        EntityStore {
            products: BTreeMap::new(),
            invoices: BTreeMap::new(),
            next_product_id: 1,
            next_invoice_id: 1,
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Creates a product, assigning the next unused id.
    ///
    /// Fails only on malformed input; validation runs before any state
    /// changes, so a rejected payload leaves no trace.
    pub fn create_product(&mut self, data: NewProduct) -> StoreResult<Product> {
        validate_new_product(&data)?;

        let id = self.next_product_id;
        self.next_product_id += 1;

        let product = Product {
            id,
            name: data.name,
            brand: data.brand,
            code: data.code,
            hsn_code: data.hsn_code,
            stock: data.stock,
            purchase_price: data.purchase_price,
            selling_price: data.selling_price,
            gst_rate: data.gst_rate,
        };

        debug!(id, code = %product.code, "Creating product");
        self.products.insert(id, product.clone());
        Ok(product)
    }

    /// Gets a product by id.
    pub fn get_product(&self, id: u32) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Applies a validated patch to an existing product.
    ///
    /// Every provided field is validated before any field is merged, so a
    /// half-valid patch changes nothing. Used both for manual edits and for
    /// the stock write during checkout.
    pub fn update_product(&mut self, id: u32, patch: ProductPatch) -> StoreResult<Product> {
        validate_product_patch(&patch)?;

        let product = self
            .products
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        debug!(id, "Updating product");

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(brand) = patch.brand {
            product.brand = brand;
        }
        if let Some(code) = patch.code {
            product.code = code;
        }
        if let Some(hsn_code) = patch.hsn_code {
            product.hsn_code = hsn_code;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(price) = patch.purchase_price {
            product.purchase_price = price;
        }
        if let Some(price) = patch.selling_price {
            product.selling_price = price;
        }
        if let Some(rate) = patch.gst_rate {
            product.gst_rate = rate;
        }

        Ok(product.clone())
    }

    /// Removes a product. Idempotent: removing an absent id is a no-op.
    ///
    /// Committed invoices keep their frozen line snapshots, so deleting a
    /// product never rewrites sales history.
    pub fn delete_product(&mut self, id: u32) {
        if self.products.remove(&id).is_some() {
            debug!(id, "Deleted product");
        }
    }

    /// Lists products in insertion order.
    pub fn list_products(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    /// Number of products currently in the store.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    // =========================================================================
    // Invoices
    // =========================================================================

    /// Persists an invoice, assigning the next unused id.
    ///
    /// Invoices are immutable once created; there is no update or delete
    /// (audit-trail semantics). The payload is machine-built by the checkout
    /// orchestrator, so this write is infallible.
    pub fn create_invoice(&mut self, data: NewInvoice) -> Invoice {
        let id = self.next_invoice_id;
        self.next_invoice_id += 1;

        let invoice = Invoice {
            id,
            invoice_number: data.invoice_number,
            customer_name: data.customer_name,
            customer_phone: data.customer_phone,
            items: data.items,
            subtotal: data.subtotal,
            gst_amount: data.gst_amount,
            grand_total: data.grand_total,
            created_at: data.created_at,
        };

        debug!(id, number = %invoice.invoice_number, "Creating invoice");
        self.invoices.insert(id, invoice.clone());
        invoice
    }

    /// Lists invoices in insertion order.
    pub fn list_invoices(&self) -> Vec<Invoice> {
        self.invoices.values().cloned().collect()
    }

    /// Number of invoices on record.
    pub fn invoice_count(&self) -> usize {
        self.invoices.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bolt_core::{GstRate, Money};
    use chrono::Utc;

    fn new_product(code: &str) -> NewProduct {
        NewProduct {
            name: "Brake Pad Set".to_string(),
            brand: "Maruti Swift".to_string(),
            code: code.to_string(),
            hsn_code: "8708".to_string(),
            stock: 25,
            purchase_price: Money::from_paise(45000),
            selling_price: Money::from_paise(65000),
            gst_rate: GstRate::from_percent(28),
        }
    }

    fn new_invoice(number: &str) -> NewInvoice {
        NewInvoice {
            invoice_number: number.to_string(),
            customer_name: "Walk-in Customer".to_string(),
            customer_phone: String::new(),
            items: Vec::new(),
            subtotal: Money::zero(),
            gst_amount: Money::zero(),
            grand_total: Money::zero(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = EntityStore::new();
        let first = store.create_product(new_product("BP-MS-001")).unwrap();
        let second = store.create_product(new_product("AF-HI-002")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let mut store = EntityStore::new();
        store.create_product(new_product("BP-MS-001")).unwrap();
        let second = store.create_product(new_product("AF-HI-002")).unwrap();

        store.delete_product(second.id);
        let third = store.create_product(new_product("OF-TN-003")).unwrap();

        assert_eq!(third.id, 3);
        assert!(store.get_product(second.id).is_none());
    }

    #[test]
    fn test_create_rejects_malformed_input() {
        let mut store = EntityStore::new();
        let mut bad = new_product("BP-MS-001");
        bad.name = String::new();

        assert!(matches!(
            store.create_product(bad),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.product_count(), 0);

        // A rejected create must not consume an id
        let next = store.create_product(new_product("BP-MS-001")).unwrap();
        assert_eq!(next.id, 1);
    }

    #[test]
    fn test_update_merges_only_provided_fields() {
        let mut store = EntityStore::new();
        let created = store.create_product(new_product("BP-MS-001")).unwrap();

        let patch = ProductPatch {
            stock: Some(23),
            selling_price: Some(Money::from_paise(70000)),
            ..ProductPatch::default()
        };
        let updated = store.update_product(created.id, patch).unwrap();

        assert_eq!(updated.stock, 23);
        assert_eq!(updated.selling_price.paise(), 70000);
        // Untouched fields survive
        assert_eq!(updated.name, "Brake Pad Set");
        assert_eq!(updated.code, "BP-MS-001");
    }

    #[test]
    fn test_update_missing_product_is_not_found() {
        let mut store = EntityStore::new();
        let result = store.update_product(99, ProductPatch::set_stock(1));
        assert_eq!(result, Err(StoreError::not_found("Product", 99)));
    }

    #[test]
    fn test_invalid_patch_changes_nothing() {
        let mut store = EntityStore::new();
        let created = store.create_product(new_product("BP-MS-001")).unwrap();

        let patch = ProductPatch {
            stock: Some(5),
            code: Some("bad code!".to_string()),
            ..ProductPatch::default()
        };
        assert!(store.update_product(created.id, patch).is_err());

        // The valid half of the patch must not have been applied
        assert_eq!(store.get_product(created.id).unwrap().stock, 25);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = EntityStore::new();
        let created = store.create_product(new_product("BP-MS-001")).unwrap();

        store.delete_product(created.id);
        store.delete_product(created.id); // second delete is a no-op
        store.delete_product(12345); // unknown id is a no-op

        assert_eq!(store.product_count(), 0);
    }

    #[test]
    fn test_list_products_in_insertion_order() {
        let mut store = EntityStore::new();
        for code in ["BP-MS-001", "AF-HI-002", "OF-TN-003"] {
            store.create_product(new_product(code)).unwrap();
        }

        let codes: Vec<String> = store.list_products().into_iter().map(|p| p.code).collect();
        assert_eq!(codes, vec!["BP-MS-001", "AF-HI-002", "OF-TN-003"]);
    }

    #[test]
    fn test_duplicate_codes_allowed() {
        // SKU uniqueness is intentionally not enforced
        let mut store = EntityStore::new();
        store.create_product(new_product("BP-MS-001")).unwrap();
        assert!(store.create_product(new_product("BP-MS-001")).is_ok());
    }

    #[test]
    fn test_invoice_ids_independent_of_products() {
        let mut store = EntityStore::new();
        store.create_product(new_product("BP-MS-001")).unwrap();

        let first = store.create_invoice(new_invoice("INV-2024-0001"));
        let second = store.create_invoice(new_invoice("INV-2024-0002"));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let numbers: Vec<String> = store
            .list_invoices()
            .into_iter()
            .map(|i| i.invoice_number)
            .collect();
        assert_eq!(numbers, vec!["INV-2024-0001", "INV-2024-0002"]);
    }
}
