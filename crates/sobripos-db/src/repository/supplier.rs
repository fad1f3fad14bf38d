//! # Supplier Repository

use sobripos_core::Supplier;

use super::Repository;
use crate::error::DbResult;
use crate::filter::Filter;

pub type SupplierRepository = Repository<Supplier>;

impl Repository<Supplier> {
    /// Gets the supplier with this exact name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Supplier>> {
        self.find_first(Filter::new().eq("name", name)).await
    }
}
