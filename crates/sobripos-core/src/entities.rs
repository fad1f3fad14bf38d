//! # Entity Schema
//!
//! The ten persisted entities of the back office plus the eager-loaded
//! "details" views returned by the specialized lookups.
//!
//! ## Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Entity Graph                                   │
//! │                                                                         │
//! │   Category ◄──── Product ◄──────┬──────────────┐                       │
//! │            restrict             │ restrict     │ restrict              │
//! │                                 │              │                       │
//! │   User ◄──── Transaction ◄── TransactionItem   │                       │
//! │   ▲  restrict   │       cascade                │                       │
//! │   │             │ restrict (optional)          │                       │
//! │   │             ▼                              │                       │
//! │   │          Customer                          │                       │
//! │   │                                            │                       │
//! │   │      Supplier ◄── Purchase ◄── PurchaseItem ┘                      │
//! │   │          restrict         cascade                                  │
//! │   │                                                                     │
//! │   └── cascade ── UserActivityLog                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Common Fields
//! Every entity flattens an [`EntityMeta`] into itself, both in JSON and in
//! database rows. `is_deleted = true` rows are invisible to every read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::types::{PaymentMethod, Percentage, PurchaseStatus, TransactionStatus, UserRole};

// =============================================================================
// Entity Metadata
// =============================================================================

/// Identity, lifecycle stamps and soft-delete flag shared by all entities.
///
/// All four fields default when absent from a request body: the repository
/// assigns `id` and `created_at` on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase", default)]
pub struct EntityMeta {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl EntityMeta {
    /// Metadata for a row about to be inserted.
    pub fn fresh() -> Self {
        EntityMeta {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: None,
            is_deleted: false,
        }
    }
}

/// Anything with an [`EntityMeta`].
pub trait Entity {
    /// Human-readable entity name used in errors and logs.
    const NAME: &'static str;

    fn meta(&self) -> &EntityMeta;

    fn meta_mut(&mut self) -> &mut EntityMeta;

    #[inline]
    fn id(&self) -> Uuid {
        self.meta().id
    }
}

macro_rules! impl_entity {
    ($($ty:ident => $name:literal),+ $(,)?) => {
        $(
            impl Entity for $ty {
                const NAME: &'static str = $name;

                #[inline]
                fn meta(&self) -> &EntityMeta {
                    &self.meta
                }

                #[inline]
                fn meta_mut(&mut self) -> &mut EntityMeta {
                    &mut self.meta
                }
            }
        )+
    };
}

impl_entity! {
    Category => "category",
    Product => "product",
    Customer => "customer",
    Supplier => "supplier",
    User => "user",
    UserActivityLog => "activity log",
    Transaction => "transaction",
    TransactionItem => "transaction item",
    Purchase => "purchase",
    PurchaseItem => "purchase item",
}

// =============================================================================
// Catalog
// =============================================================================

/// Product grouping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    pub name: String,

    pub description: Option<String>,
}

/// A product in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    pub description: Option<String>,

    /// Barcode (EAN-13, UPC-A, etc.).
    pub barcode: Option<String>,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Selling price in cents.
    pub price_cents: i64,

    /// Cost in cents (for margin reports).
    pub cost_price_cents: Option<i64>,

    /// Discount in basis points (1000 = 10.00%).
    pub discount_percentage_bps: Option<u32>,

    pub stock_quantity: i32,

    /// Reorder threshold: at or below this the product is "low stock".
    pub minimum_stock: i32,

    pub category_id: Uuid,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn cost_price(&self) -> Option<Money> {
        self.cost_price_cents.map(Money::from_cents)
    }

    #[inline]
    pub fn discount(&self) -> Percentage {
        Percentage::from_bps(self.discount_percentage_bps.unwrap_or(0))
    }

    /// True when stock has reached the reorder threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.minimum_stock
    }
}

// =============================================================================
// Parties
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    pub name: String,

    pub email: Option<String>,

    pub phone_number: Option<String>,

    pub address: Option<String>,

    /// Stored only. Nothing accrues points.
    pub loyalty_points: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    pub name: String,

    pub contact_person: Option<String>,

    pub email: Option<String>,

    pub phone_number: Option<String>,

    pub address: Option<String>,
}

/// A back-office or till user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    pub username: String,

    /// Opaque credential string, stored as given.
    pub password_hash: String,

    pub full_name: String,

    pub email: String,

    pub phone_number: Option<String>,

    pub role: UserRole,

    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct UserActivityLog {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    pub user_id: Uuid,

    pub action: String,

    pub description: Option<String>,

    pub timestamp: DateTime<Utc>,

    pub ip_address: Option<String>,
}

// =============================================================================
// Sales
// =============================================================================

/// A completed (or pending) sale at the till.
///
/// The amount columns are recorded as submitted; nothing recomputes them
/// from the line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    /// Human-facing receipt number.
    pub transaction_number: String,

    pub transaction_date: DateTime<Utc>,

    pub total_amount_cents: i64,

    pub discount_amount_cents: Option<i64>,

    pub tax_amount_cents: Option<i64>,

    pub final_amount_cents: i64,

    pub payment_method: PaymentMethod,

    pub status: TransactionStatus,

    pub cashier_id: Uuid,

    pub customer_id: Option<Uuid>,
}

impl Transaction {
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    #[inline]
    pub fn discount_amount(&self) -> Money {
        Money::from_cents(self.discount_amount_cents.unwrap_or(0))
    }

    #[inline]
    pub fn tax_amount(&self) -> Money {
        Money::from_cents(self.tax_amount_cents.unwrap_or(0))
    }

    #[inline]
    pub fn final_amount(&self) -> Money {
        Money::from_cents(self.final_amount_cents)
    }
}

/// One line of a [`Transaction`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    pub transaction_id: Uuid,

    pub product_id: Uuid,

    pub quantity: i32,

    /// Price at time of sale (snapshot of the product price).
    pub unit_price_cents: i64,

    pub discount_percentage_bps: Option<u32>,

    pub subtotal_cents: i64,
}

impl TransactionItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Purchasing
// =============================================================================

/// A purchase order placed with a supplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    pub purchase_number: String,

    pub purchase_date: DateTime<Utc>,

    pub total_amount_cents: i64,

    pub status: PurchaseStatus,

    pub supplier_id: Uuid,
}

impl Purchase {
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub meta: EntityMeta,

    pub purchase_id: Uuid,

    pub product_id: Uuid,

    pub quantity: i32,

    pub unit_price_cents: i64,

    pub subtotal_cents: i64,
}

// =============================================================================
// Eager-Loaded Views
// =============================================================================

/// A product with its category.
///
/// `category` is `None` when the category row is soft-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,

    pub category: Option<Category>,
}

/// A line item (transaction or purchase) with its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails<T> {
    #[serde(flatten)]
    pub item: T,

    pub product: Option<Product>,
}

/// A transaction with its cashier, customer and live line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    #[serde(flatten)]
    pub transaction: Transaction,

    pub cashier: Option<User>,

    pub customer: Option<Customer>,

    pub items: Vec<ItemDetails<TransactionItem>>,
}

/// A purchase with its supplier and live line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDetails {
    #[serde(flatten)]
    pub purchase: Purchase,

    pub supplier: Option<Supplier>,

    pub items: Vec<ItemDetails<PurchaseItem>>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_flattens_into_camel_case_json() {
        let category = Category {
            meta: EntityMeta::fresh(),
            name: "Beverages".to_string(),
            description: None,
        };

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["name"], "Beverages");
        assert_eq!(json["isDeleted"], false);
        assert!(json["id"].is_string());
        assert!(json["createdAt"].is_string());
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn test_body_without_meta_deserializes() {
        let category: Category = serde_json::from_str(r#"{"name":"Snacks"}"#).unwrap();
        assert_eq!(category.name, "Snacks");
        assert!(category.meta.id.is_nil());
        assert!(!category.meta.is_deleted);
    }

    #[test]
    fn test_product_money_accessors() {
        let product = Product {
            price_cents: 1099,
            discount_percentage_bps: Some(1000),
            stock_quantity: 5,
            minimum_stock: 10,
            ..Default::default()
        };

        assert_eq!(product.price().to_string(), "10.99");
        assert_eq!(product.price().apply_discount(product.discount()).cents(), 989);
        assert!(product.is_low_stock());
        assert_eq!(product.cost_price(), None);
    }

    #[test]
    fn test_fresh_meta_is_unique() {
        let a = EntityMeta::fresh();
        let b = EntityMeta::fresh();
        assert_ne!(a.id, b.id);
        assert!(a.updated_at.is_none());
    }

    #[test]
    fn test_details_flatten_parent() {
        let details = ProductDetails {
            product: Product {
                name: "Cola".to_string(),
                sku: "COLA-330".to_string(),
                ..Default::default()
            },
            category: None,
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["sku"], "COLA-330");
        assert!(json["category"].is_null());
    }
}
