//! # User Repository
//!
//! Lookups by login name, email and role. `password_hash` is stored and
//! returned as given; nothing here checks credentials.

use sobripos_core::{User, UserRole};

use super::Repository;
use crate::error::DbResult;
use crate::filter::Filter;

pub type UserRepository = Repository<User>;

impl Repository<User> {
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        self.find_first(Filter::new().eq("username", username)).await
    }

    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        self.find_first(Filter::new().eq("email", email)).await
    }

    /// All live users with this role, active or not.
    pub async fn get_by_role(&self, role: UserRole) -> DbResult<Vec<User>> {
        self.find(Filter::new().eq("role", role.as_str())).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::*;
    use sobripos_core::{Entity, UserRole};

    #[tokio::test]
    async fn test_role_round_trips_as_text() {
        let db = database().await;
        let uow = db.unit_of_work();

        uow.users().add(user("maria", UserRole::Manager)).await.unwrap();
        let joao = uow.users().add(user("joao", UserRole::Cashier)).await.unwrap();
        uow.users().add(user("rita", UserRole::Cashier)).await.unwrap();

        let cashiers = uow.users().get_by_role(UserRole::Cashier).await.unwrap();
        assert_eq!(cashiers.len(), 2);
        assert!(cashiers.iter().all(|u| u.role == UserRole::Cashier));

        let by_name = uow.users().get_by_username("joao").await.unwrap().unwrap();
        assert_eq!(by_name.id(), joao.id());
        assert!(by_name.is_active);

        let by_email = uow
            .users()
            .get_by_email("maria@sobripos.test")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.role, UserRole::Manager);

        assert!(uow
            .users()
            .get_by_role(UserRole::Admin)
            .await
            .unwrap()
            .is_empty());
    }
}
