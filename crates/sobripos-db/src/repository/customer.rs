//! # Customer Repository
//!
//! Till-side customer lookup by phone number or email.

use sobripos_core::Customer;

use super::Repository;
use crate::error::DbResult;
use crate::filter::Filter;

pub type CustomerRepository = Repository<Customer>;

impl Repository<Customer> {
    pub async fn get_by_phone_number(&self, phone_number: &str) -> DbResult<Option<Customer>> {
        self.find_first(Filter::new().eq("phone_number", phone_number))
            .await
    }

    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        self.find_first(Filter::new().eq("email", email)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::*;
    use sobripos_core::{Customer, Entity};

    #[tokio::test]
    async fn test_lookup_by_phone_and_email() {
        let db = database().await;
        let uow = db.unit_of_work();

        let ana = uow
            .customers()
            .add(Customer {
                name: "Ana".to_string(),
                email: Some("ana@example.com".to_string()),
                phone_number: Some("+351910000000".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let by_phone = uow
            .customers()
            .get_by_phone_number("+351910000000")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_phone.id(), ana.id());

        let by_email = uow
            .customers()
            .get_by_email("ana@example.com")
            .await
            .unwrap();
        assert!(by_email.is_some());

        uow.customers().delete(ana.id()).await.unwrap();
        assert!(uow
            .customers()
            .get_by_email("ana@example.com")
            .await
            .unwrap()
            .is_none());
    }
}
