//! # Validation Module
//!
//! Field rules derived from the database schema: required text, maximum
//! lengths and non-negative prices.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor                                               │
//! │  └── Type validation (JSON deserialization, UUID paths)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required text is non-blank                                        │
//! │  └── Max lengths match the column sizes                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sobripos_core::validation::Validate;
//! use sobripos_core::Category;
//!
//! let category = Category { name: "Beverages".into(), ..Default::default() };
//! assert!(category.validate().is_ok());
//!
//! let blank = Category::default();
//! assert!(blank.validate().is_err());
//! ```

use crate::entities::{
    Category, Customer, Product, Purchase, PurchaseItem, Supplier, Transaction, TransactionItem,
    User, UserActivityLog,
};
use crate::error::ValidationError;
use crate::types::Percentage;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Column Sizes
// =============================================================================

pub const CATEGORY_NAME_MAX: usize = 100;
pub const PRODUCT_NAME_MAX: usize = 200;
pub const SKU_MAX: usize = 100;
pub const BARCODE_MAX: usize = 100;
pub const PARTY_NAME_MAX: usize = 200;
pub const EMAIL_MAX: usize = 200;
pub const PHONE_MAX: usize = 50;
pub const USERNAME_MAX: usize = 100;
pub const FULL_NAME_MAX: usize = 200;
pub const DOCUMENT_NUMBER_MAX: usize = 50;
pub const ACTION_MAX: usize = 100;

// =============================================================================
// Field Validators
// =============================================================================

/// Required text: non-blank and at most `max` characters.
///
/// ## Example
/// ```rust
/// use sobripos_core::validation::validate_required;
///
/// assert!(validate_required("sku", "COLA-330", 100).is_ok());
/// assert!(validate_required("sku", "   ", 100).is_err());
/// ```
pub fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_max_len(field, value, max)
}

/// Optional text: when present, at most `max` characters.
pub fn validate_optional(field: &str, value: Option<&str>, max: usize) -> ValidationResult<()> {
    match value {
        Some(value) => validate_max_len(field, value, max),
        None => Ok(()),
    }
}

/// Length is counted in characters, not bytes.
pub fn validate_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

pub fn validate_non_negative(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// A discount must lie within 0.00% ..= 100.00%.
pub fn validate_percentage(field: &str, bps: Option<u32>) -> ValidationResult<()> {
    match bps {
        Some(bps) if bps > Percentage::MAX_BPS => Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: Percentage::MAX_BPS as i64,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Entity Validation
// =============================================================================

/// Checks an entity body before it is written.
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

impl Validate for Category {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name, CATEGORY_NAME_MAX)
    }
}

impl Validate for Product {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name, PRODUCT_NAME_MAX)?;
        validate_required("sku", &self.sku, SKU_MAX)?;
        validate_optional("barcode", self.barcode.as_deref(), BARCODE_MAX)?;
        validate_non_negative("priceCents", self.price_cents)?;
        validate_percentage("discountPercentageBps", self.discount_percentage_bps)
    }
}

impl Validate for Customer {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name, PARTY_NAME_MAX)?;
        validate_optional("email", self.email.as_deref(), EMAIL_MAX)?;
        validate_optional("phoneNumber", self.phone_number.as_deref(), PHONE_MAX)
    }
}

impl Validate for Supplier {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name, PARTY_NAME_MAX)?;
        validate_optional("email", self.email.as_deref(), EMAIL_MAX)?;
        validate_optional("phoneNumber", self.phone_number.as_deref(), PHONE_MAX)
    }
}

impl Validate for User {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("username", &self.username, USERNAME_MAX)?;
        validate_required("fullName", &self.full_name, FULL_NAME_MAX)?;
        validate_required("email", &self.email, EMAIL_MAX)
    }
}

impl Validate for UserActivityLog {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("action", &self.action, ACTION_MAX)
    }
}

impl Validate for Transaction {
    fn validate(&self) -> ValidationResult<()> {
        validate_required(
            "transactionNumber",
            &self.transaction_number,
            DOCUMENT_NUMBER_MAX,
        )
    }
}

impl Validate for TransactionItem {
    fn validate(&self) -> ValidationResult<()> {
        validate_percentage("discountPercentageBps", self.discount_percentage_bps)
    }
}

impl Validate for Purchase {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("purchaseNumber", &self.purchase_number, DOCUMENT_NUMBER_MAX)
    }
}

impl Validate for PurchaseItem {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            name: "Cola 330ml".to_string(),
            sku: "COLA-330".to_string(),
            price_cents: 150,
            ..Default::default()
        }
    }

    #[test]
    fn test_required_rejects_blank() {
        let err = validate_required("name", "  ", 100).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_max_len_counts_chars() {
        // 100 multibyte chars is within a 100-char column
        assert!(validate_max_len("name", &"é".repeat(100), 100).is_ok());
        assert!(validate_max_len("name", &"a".repeat(101), 100).is_err());
    }

    #[test]
    fn test_product_rules() {
        assert!(product().validate().is_ok());

        let mut p = product();
        p.price_cents = -1;
        assert!(matches!(p.validate(), Err(ValidationError::Negative { .. })));

        let mut p = product();
        p.sku = String::new();
        assert!(matches!(p.validate(), Err(ValidationError::Required { .. })));

        let mut p = product();
        p.barcode = Some("9".repeat(101));
        assert!(matches!(p.validate(), Err(ValidationError::TooLong { max: 100, .. })));

        let mut p = product();
        p.discount_percentage_bps = Some(10_001);
        assert!(matches!(p.validate(), Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_category_name_limit() {
        let category = Category {
            name: "x".repeat(CATEGORY_NAME_MAX + 1),
            ..Default::default()
        };
        assert!(category.validate().is_err());
    }

    #[test]
    fn test_user_requires_email() {
        let user = User {
            username: "cashier1".to_string(),
            full_name: "Till Operator".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            user.validate(),
            Err(ValidationError::Required { field }) if field == "email"
        ));
    }
}
