//! # Category Repository

use sobripos_core::Category;

use super::Repository;
use crate::error::DbResult;
use crate::filter::Filter;

pub type CategoryRepository = Repository<Category>;

impl Repository<Category> {
    /// Gets the category with this exact name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        self.find_first(Filter::new().eq("name", name)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::*;
    use sobripos_core::Entity;

    #[tokio::test]
    async fn test_get_by_name_is_exact() {
        let db = database().await;
        let uow = db.unit_of_work();

        let frozen = uow.categories().add(category("Frozen")).await.unwrap();

        let found = uow.categories().get_by_name("Frozen").await.unwrap().unwrap();
        assert_eq!(found.id(), frozen.id());
        assert!(uow.categories().get_by_name("Froz").await.unwrap().is_none());
    }
}
