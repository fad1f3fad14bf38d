//! # Purchase Repository
//!
//! Supplier order lookups. Results include the supplier and the live line
//! items with their products.

use uuid::Uuid;

use sobripos_core::{
    Entity, ItemDetails, Product, Purchase, PurchaseDetails, PurchaseItem, Supplier,
};

use super::Repository;
use crate::error::DbResult;
use crate::filter::Filter;

pub type PurchaseRepository = Repository<Purchase>;

impl Repository<Purchase> {
    pub async fn get_by_supplier(&self, supplier_id: Uuid) -> DbResult<Vec<PurchaseDetails>> {
        let purchases = self
            .find(Filter::new().eq("supplier_id", supplier_id))
            .await?;

        let mut details = Vec::with_capacity(purchases.len());
        for purchase in purchases {
            details.push(self.details(purchase).await?);
        }
        Ok(details)
    }

    pub async fn get_by_purchase_number(&self, number: &str) -> DbResult<Option<PurchaseDetails>> {
        match self
            .find_first(Filter::new().eq("purchase_number", number))
            .await?
        {
            Some(purchase) => Ok(Some(self.details(purchase).await?)),
            None => Ok(None),
        }
    }

    async fn details(&self, purchase: Purchase) -> DbResult<PurchaseDetails> {
        let supplier = self.related::<Supplier>().get(purchase.supplier_id).await?;

        let products = self.related::<Product>();
        let lines = self
            .related::<PurchaseItem>()
            .find(Filter::new().eq("purchase_id", purchase.id()))
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        for item in lines {
            let product = products.get(item.product_id).await?;
            items.push(ItemDetails { item, product });
        }

        Ok(PurchaseDetails {
            purchase,
            supplier,
            items,
        })
    }
}
