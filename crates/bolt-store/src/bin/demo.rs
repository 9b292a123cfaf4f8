//! # Demo Shop Walkthrough
//!
//! Seeds a shop with the default auto-parts catalog and walks one sale
//! end to end: build a cart, checkout, print the invoice.
//!
//! ## Usage
//! ```bash
//! cargo run -p bolt-store --bin demo
//!
//! # With store/checkout logs
//! RUST_LOG=debug cargo run -p bolt-store --bin demo
//! ```

use bolt_core::{Cart, CustomerInfo, GstRate, Money, NewProduct};
use bolt_store::{Shop, ShopConfig};
use tracing_subscriber::EnvFilter;

/// The default catalog: (name, brand, code, hsn, stock, purchase ₹, selling ₹, gst %)
const CATALOG: &[(&str, &str, &str, &str, u32, i64, i64, u32)] = &[
    ("Brake Pad Set", "Maruti Swift", "BP-MS-001", "8708", 25, 450, 650, 28),
    ("Air Filter", "Hyundai i20", "AF-HI-002", "8708", 15, 250, 400, 28),
    ("Oil Filter", "Tata Nexon", "OF-TN-003", "8708", 30, 180, 300, 28),
    ("Headlight Bulb", "Maruti Alto", "HB-MA-004", "8708", 50, 80, 150, 18),
    ("Wiper Blade", "Honda City", "WB-HC-005", "8708", 20, 200, 350, 28),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🔩 Bolt POS Demo Shop");
    println!("=====================");
    println!();

    let shop = Shop::new(ShopConfig::default());

    // Seed the catalog
    for &(name, brand, code, hsn, stock, purchase, selling, gst) in CATALOG {
        shop.create_product(NewProduct {
            name: name.to_string(),
            brand: brand.to_string(),
            code: code.to_string(),
            hsn_code: hsn.to_string(),
            stock,
            purchase_price: Money::from_rupees(purchase, 0),
            selling_price: Money::from_rupees(selling, 0),
            gst_rate: GstRate::from_percent(gst),
        })?;
    }
    println!("✓ Seeded {} products", CATALOG.len());

    println!();
    println!("Inventory:");
    for product in shop.list_products() {
        println!(
            "  [{}] {:<16} {:<14} stock {:>3}  {}  GST {}%",
            product.code,
            product.name,
            product.brand,
            product.stock,
            product.selling_price,
            product.gst_rate.percent()
        );
    }

    // Build a cart: 2 × brake pads, 1 × headlight bulb
    let pads = shop
        .search_products("brake")
        .into_iter()
        .next()
        .ok_or("brake pads missing from catalog")?;
    let bulb = shop
        .search_products("HB-MA-004")
        .into_iter()
        .next()
        .ok_or("headlight bulb missing from catalog")?;

    let mut cart = Cart::new();
    cart.add_product(&pads, 2)?;
    cart.add_product(&bulb, 1)?;

    let totals = cart.totals();
    println!();
    println!("Cart ({} lines):", cart.line_count());
    println!("  Subtotal:    {}", totals.subtotal);
    println!("  GST:         {}", totals.gst_amount);
    println!("  Grand total: {}", totals.grand_total);

    // Checkout
    let customer = CustomerInfo {
        name: Some("Ramesh Kumar".to_string()),
        phone: Some("98765 43210".to_string()),
    };
    let outcome = shop.checkout(&cart.lines, &customer)?;

    println!();
    println!("✓ Invoice {} committed", outcome.invoice.invoice_number);
    for warning in &outcome.warnings {
        println!(
            "  ⚠ shortfall on {}: requested {}, available {}",
            warning.code, warning.requested, warning.available
        );
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&outcome.invoice)?);

    // Dashboard after the sale
    let stats = shop.stats();
    println!();
    println!("Dashboard:");
    println!("  Total products:   {}", stats.total_products);
    println!("  Stock value:      {}", stats.total_stock_value);
    println!("  Low stock items:  {}", stats.low_stock_count());

    println!();
    println!(
        "Next invoice will be {}-{}-{:04}",
        shop.sequencer_state().prefix,
        shop.sequencer_state().period,
        shop.sequencer_state().next_seq
    );
    println!();
    println!("✓ Demo complete!");

    Ok(())
}
