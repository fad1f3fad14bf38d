//! # Product Repository
//!
//! Product lookups. Every result eager-loads the product's category.
//!
//! ## Low Stock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Low Stock Listing                                    │
//! │                                                                         │
//! │  WHERE is_deleted = 0 AND stock_quantity <= minimum_stock              │
//! │                                                                         │
//! │  ┌────────────┬────────────────┬───────────────┬─────────┐             │
//! │  │ sku        │ stock_quantity │ minimum_stock │ listed? │             │
//! │  ├────────────┼────────────────┼───────────────┼─────────┤             │
//! │  │ COLA-330   │        5       │      10       │   yes   │             │
//! │  │ WATER-500  │       10       │      10       │   yes   │             │
//! │  │ CHIPS-150  │       20       │      10       │   no    │             │
//! │  └────────────┴────────────────┴───────────────┴─────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;
use uuid::Uuid;

use sobripos_core::{Category, Product, ProductDetails};

use super::Repository;
use crate::error::DbResult;
use crate::filter::Filter;

pub type ProductRepository = Repository<Product>;

impl Repository<Product> {
    /// Gets the product with this barcode.
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<ProductDetails>> {
        let product = self.find_first(Filter::new().eq("barcode", barcode)).await?;
        self.details_of(product).await
    }

    /// Gets the product with this SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<ProductDetails>> {
        let product = self.find_first(Filter::new().eq("sku", sku)).await?;
        self.details_of(product).await
    }

    /// Products whose stock has reached their reorder threshold.
    pub async fn get_low_stock(&self) -> DbResult<Vec<ProductDetails>> {
        let products = self
            .find(Filter::new().column_le("stock_quantity", "minimum_stock"))
            .await?;

        debug!(count = products.len(), "Low stock products");
        self.with_categories(products).await
    }

    pub async fn get_by_category(&self, category_id: Uuid) -> DbResult<Vec<ProductDetails>> {
        let products = self
            .find(Filter::new().eq("category_id", category_id))
            .await?;
        self.with_categories(products).await
    }

    async fn details_of(&self, product: Option<Product>) -> DbResult<Option<ProductDetails>> {
        match product {
            Some(product) => Ok(Some(self.details(product).await?)),
            None => Ok(None),
        }
    }

    /// Attaches the live category, if any.
    pub(crate) async fn details(&self, product: Product) -> DbResult<ProductDetails> {
        let category = self
            .related::<Category>()
            .get(product.category_id)
            .await?;
        Ok(ProductDetails { product, category })
    }

    async fn with_categories(&self, products: Vec<Product>) -> DbResult<Vec<ProductDetails>> {
        let mut details = Vec::with_capacity(products.len());
        for product in products {
            details.push(self.details(product).await?);
        }
        Ok(details)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
