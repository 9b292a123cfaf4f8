//! # Validation Module
//!
//! Input validation utilities for Bolt POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Frontend (TypeScript)                                     │
//! │  ├── Basic format checks (empty, length)                            │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (field-level business rules)                  │
//! │  ├── Run by the entity store before any write                       │
//! │  └── Run by the checkout orchestrator before any side effect        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Types (u32 stock/quantity cannot go negative)             │
//! │                                                                     │
//! │  Defense in depth: multiple layers catch different errors           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bolt_core::validation::{validate_code, validate_quantity};
//!
//! // Validate a part code before a store insert
//! assert!(validate_code("BP-MS-001").is_ok());
//!
//! // Validate a quantity before a cart operation
//! assert!(validate_quantity(5).is_ok());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{GstRate, NewProduct, ProductPatch};
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a brand/model string.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_brand(brand: &str) -> ValidationResult<()> {
    let brand = brand.trim();

    if brand.is_empty() {
        return Err(ValidationError::Required {
            field: "brand".to_string(),
        });
    }

    if brand.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "brand".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a part code (SKU).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Must contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use bolt_core::validation::validate_code;
///
/// assert!(validate_code("BP-MS-001").is_ok());
/// assert!(validate_code("").is_err());
/// assert!(validate_code("has space").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an HSN code.
///
/// ## Rules
/// - Must not be empty
/// - Must be 2-8 digits (GST classification codes)
pub fn validate_hsn_code(hsn: &str) -> ValidationResult<()> {
    let hsn = hsn.trim();

    if hsn.is_empty() {
        return Err(ValidationError::Required {
            field: "hsn code".to_string(),
        });
    }

    if !hsn.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "hsn code".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if hsn.len() < 2 || hsn.len() > 8 {
        return Err(ValidationError::OutOfRange {
            field: "hsn code length".to_string(),
            min: 2,
            max: 8,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a GST rate.
///
/// ## Rules
/// - Must be between 0 and 100 percent
pub fn validate_gst_rate(rate: GstRate) -> ValidationResult<()> {
    if rate.percent() > 100 {
        return Err(ValidationError::OutOfRange {
            field: "gst rate".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Compound Validators
// =============================================================================

/// Validates a full product creation payload, field by field.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_brand(&product.brand)?;
    validate_code(&product.code)?;
    validate_hsn_code(&product.hsn_code)?;
    validate_price("purchase price", product.purchase_price)?;
    validate_price("selling price", product.selling_price)?;
    validate_gst_rate(product.gst_rate)?;
    Ok(())
}

/// Validates a product patch: every provided field is checked with the same
/// rules as at creation, before any field is merged.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(brand) = &patch.brand {
        validate_brand(brand)?;
    }
    if let Some(code) = &patch.code {
        validate_code(code)?;
    }
    if let Some(hsn) = &patch.hsn_code {
        validate_hsn_code(hsn)?;
    }
    if let Some(price) = patch.purchase_price {
        validate_price("purchase price", price)?;
    }
    if let Some(price) = patch.selling_price {
        validate_price("selling price", price)?;
    }
    if let Some(rate) = patch.gst_rate {
        validate_gst_rate(rate)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product() -> NewProduct {
        NewProduct {
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
    fn test_validate_code() {
        assert!(validate_code("BP-MS-001").is_ok());
        assert!(validate_code("ABC123").is_ok());
        assert!(validate_code("part_1").is_ok());

        assert!(validate_code("").is_err());
        assert!(validate_code("   ").is_err());
        assert!(validate_code("has space").is_err());
        assert!(validate_code(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_hsn_code() {
        assert!(validate_hsn_code("8708").is_ok());
        assert!(validate_hsn_code("870830").is_ok());

        assert!(validate_hsn_code("").is_err());
        assert!(validate_hsn_code("87AB").is_err());
        assert!(validate_hsn_code("8").is_err());
        assert!(validate_hsn_code("123456789").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("selling price", Money::from_paise(0)).is_ok());
        assert!(validate_price("selling price", Money::from_paise(65000)).is_ok());
        assert!(validate_price("selling price", Money::from_paise(-100)).is_err());
    }

    #[test]
    fn test_validate_gst_rate() {
        assert!(validate_gst_rate(GstRate::from_percent(0)).is_ok());
        assert!(validate_gst_rate(GstRate::from_percent(28)).is_ok());
        assert!(validate_gst_rate(GstRate::from_percent(100)).is_ok());
        assert!(validate_gst_rate(GstRate::from_percent(101)).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        assert!(validate_new_product(&valid_product()).is_ok());

        let mut missing_name = valid_product();
        missing_name.name = "  ".to_string();
        assert!(matches!(
            validate_new_product(&missing_name),
            Err(ValidationError::Required { .. })
        ));

        let mut bad_rate = valid_product();
        bad_rate.gst_rate = GstRate::from_percent(120);
        assert!(matches!(
            validate_new_product(&bad_rate),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_product_patch() {
        assert!(validate_product_patch(&ProductPatch::default()).is_ok());
        assert!(validate_product_patch(&ProductPatch::set_stock(10)).is_ok());

        let bad_code = ProductPatch {
            code: Some("no spaces allowed".to_string()),
            ..ProductPatch::default()
        };
        assert!(validate_product_patch(&bad_code).is_err());

        let bad_price = ProductPatch {
            selling_price: Some(Money::from_paise(-1)),
            ..ProductPatch::default()
        };
        assert!(validate_product_patch(&bad_price).is_err());
    }
}
