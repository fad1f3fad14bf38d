//! # Transaction Repository
//!
//! Sale lookups. Every result eager-loads the full receipt graph:
//!
//! ```text
//! TransactionDetails
//! ├── transaction     (the row itself)
//! ├── cashier         User      (None if soft-deleted)
//! ├── customer        Customer  (None if absent or soft-deleted)
//! └── items[]         live TransactionItem rows
//!     └── product     Product   (None if soft-deleted)
//! ```
//!
//! The date range is inclusive on both ends.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use sobripos_core::{
    Customer, Entity, ItemDetails, Product, Transaction, TransactionDetails, TransactionItem, User,
};

use super::Repository;
use crate::error::DbResult;
use crate::filter::Filter;

pub type TransactionRepository = Repository<Transaction>;

impl Repository<Transaction> {
    /// Transactions dated within `start ..= end`.
    pub async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<TransactionDetails>> {
        debug!(%start, %end, "Transactions by date range");

        let transactions = self
            .find(
                Filter::new()
                    .ge("transaction_date", start)
                    .le("transaction_date", end),
            )
            .await?;
        self.with_details(transactions).await
    }

    pub async fn get_by_cashier(&self, cashier_id: Uuid) -> DbResult<Vec<TransactionDetails>> {
        let transactions = self.find(Filter::new().eq("cashier_id", cashier_id)).await?;
        self.with_details(transactions).await
    }

    pub async fn get_by_customer(&self, customer_id: Uuid) -> DbResult<Vec<TransactionDetails>> {
        let transactions = self
            .find(Filter::new().eq("customer_id", customer_id))
            .await?;
        self.with_details(transactions).await
    }

    pub async fn get_by_transaction_number(
        &self,
        number: &str,
    ) -> DbResult<Option<TransactionDetails>> {
        match self
            .find_first(Filter::new().eq("transaction_number", number))
            .await?
        {
            Some(transaction) => Ok(Some(self.details(transaction).await?)),
            None => Ok(None),
        }
    }

    async fn details(&self, transaction: Transaction) -> DbResult<TransactionDetails> {
        let cashier = self.related::<User>().get(transaction.cashier_id).await?;

        let customer = match transaction.customer_id {
            Some(id) => self.related::<Customer>().get(id).await?,
            None => None,
        };

        let products = self.related::<Product>();
        let lines = self
            .related::<TransactionItem>()
            .find(Filter::new().eq("transaction_id", transaction.id()))
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        for item in lines {
            let product = products.get(item.product_id).await?;
            items.push(ItemDetails { item, product });
        }

        Ok(TransactionDetails {
            transaction,
            cashier,
            customer,
            items,
        })
    }

    async fn with_details(
        &self,
        transactions: Vec<Transaction>,
    ) -> DbResult<Vec<TransactionDetails>> {
        let mut details = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            details.push(self.details(transaction).await?);
        }
        Ok(details)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::repository::test_support::*;
    use sobripos_core::{Customer, Entity, TransactionItem, UserRole};

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let db = database().await;
        let uow = db.unit_of_work();

        let cashier = uow.users().add(user("joao", UserRole::Cashier)).await.unwrap();
        for (number, day) in [("T-1", 1), ("T-2", 2), ("T-3", 3), ("T-4", 4)] {
            uow.transactions()
                .add(transaction(number, cashier.id(), at(day, 12)))
                .await
                .unwrap();
        }

        let found = uow
            .transactions()
            .get_by_date_range(at(2, 12), at(3, 12))
            .await
            .unwrap();
        let numbers: Vec<_> = found
            .iter()
            .map(|d| d.transaction.transaction_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["T-2", "T-3"]);
    }

    #[tokio::test]
    async fn test_details_graph() {
        let db = database().await;
        let uow = db.unit_of_work();

        let cashier = uow.users().add(user("rita", UserRole::Cashier)).await.unwrap();
        let customer = uow
            .customers()
            .add(Customer {
                name: "Ana".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let drinks = uow.categories().add(category("Beverages")).await.unwrap();
        let cola = uow
            .products()
            .add(product("COLA-330", drinks.id(), 50, 10))
            .await
            .unwrap();

        let mut sale = transaction("T-100", cashier.id(), at(5, 9));
        sale.customer_id = Some(customer.id());
        let sale = uow.transactions().add(sale).await.unwrap();

        let line = |quantity| TransactionItem {
            transaction_id: sale.id(),
            product_id: cola.id(),
            quantity,
            unit_price_cents: 250,
            subtotal_cents: 250 * quantity as i64,
            ..Default::default()
        };
        uow.transaction_items().add(line(2)).await.unwrap();
        let removed = uow.transaction_items().add(line(1)).await.unwrap();
        uow.transaction_items().delete(removed.id()).await.unwrap();

        let details = uow
            .transactions()
            .get_by_transaction_number("T-100")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.cashier.unwrap().username, "rita");
        assert_eq!(details.customer.unwrap().name, "Ana");
        assert_eq!(details.items.len(), 1);
        assert_eq!(details.items[0].item.quantity, 2);
        assert_eq!(details.items[0].product.as_ref().unwrap().sku, "COLA-330");

        let by_customer = uow
            .transactions()
            .get_by_customer(customer.id())
            .await
            .unwrap();
        assert_eq!(by_customer.len(), 1);

        let by_cashier = uow.transactions().get_by_cashier(cashier.id()).await.unwrap();
        assert_eq!(by_cashier[0].transaction.meta.id, sale.id());
    }
}
