//! # Record Mapping
//!
//! Binds each entity type to its table: the table name, the business
//! columns in insert order, and a binder that pushes the entity's values in
//! that same order.
//!
//! ```text
//!   Product ──► TABLE   = "products"
//!               COLUMNS = ["name", "description", "barcode", "sku", ...]
//!               bind_columns(&product) ──► (?, ?, ?, ?, ...)
//! ```
//!
//! The [`EntityMeta`](sobripos_core::EntityMeta) columns (`id`,
//! `created_at`, `updated_at`, `is_deleted`) are common to every table and
//! are written by the repository itself.

use sqlx::query_builder::Separated;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Sqlite};

use sobripos_core::{
    Category, Customer, Entity, Product, Purchase, PurchaseItem, Supplier, Transaction,
    TransactionItem, User, UserActivityLog,
};

/// An entity persisted in its own table.
pub trait Record:
    Entity + for<'r> FromRow<'r, SqliteRow> + Clone + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;

    /// Business columns, excluding the shared metadata columns.
    const COLUMNS: &'static [&'static str];

    /// Pushes one bind per entry of [`Record::COLUMNS`], in order.
    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Sqlite, &'static str>);
}

macro_rules! record {
    ($ty:ty => $table:literal { $($column:ident),+ $(,)? }) => {
        impl Record for $ty {
            const TABLE: &'static str = $table;

            const COLUMNS: &'static [&'static str] = &[$(stringify!($column)),+];

            fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Sqlite, &'static str>) {
                $( values.push_bind(self.$column.clone()); )+
            }
        }
    };
}

record!(Category => "categories" { name, description });

record!(Product => "products" {
    name,
    description,
    barcode,
    sku,
    price_cents,
    cost_price_cents,
    discount_percentage_bps,
    stock_quantity,
    minimum_stock,
    category_id,
});

record!(Customer => "customers" { name, email, phone_number, address, loyalty_points });

record!(Supplier => "suppliers" { name, contact_person, email, phone_number, address });

record!(User => "users" {
    username,
    password_hash,
    full_name,
    email,
    phone_number,
    role,
    is_active,
});

record!(UserActivityLog => "user_activity_logs" {
    user_id,
    action,
    description,
    timestamp,
    ip_address,
});

record!(Transaction => "transactions" {
    transaction_number,
    transaction_date,
    total_amount_cents,
    discount_amount_cents,
    tax_amount_cents,
    final_amount_cents,
    payment_method,
    status,
    cashier_id,
    customer_id,
});

record!(TransactionItem => "transaction_items" {
    transaction_id,
    product_id,
    quantity,
    unit_price_cents,
    discount_percentage_bps,
    subtotal_cents,
});

record!(Purchase => "purchases" {
    purchase_number,
    purchase_date,
    total_amount_cents,
    status,
    supplier_id,
});

record!(PurchaseItem => "purchase_items" {
    purchase_id,
    product_id,
    quantity,
    unit_price_cents,
    subtotal_cents,
});

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::QueryBuilder;

    #[test]
    fn test_columns_match_binds() {
        let mut qb = QueryBuilder::<Sqlite>::new("VALUES (");
        {
            let mut values = qb.separated(", ");
            Product::default().bind_columns(&mut values);
        }
        qb.push(")");

        let placeholders = qb.sql().matches('?').count();
        assert_eq!(placeholders, Product::COLUMNS.len());
    }

    #[test]
    fn test_tables() {
        assert_eq!(Category::TABLE, "categories");
        assert_eq!(UserActivityLog::TABLE, "user_activity_logs");
        assert_eq!(Customer::COLUMNS.last(), Some(&"loyalty_points"));
    }
}
