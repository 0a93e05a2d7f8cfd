use async_trait::async_trait;

use super::source::{CatalogError, CatalogSource};
use crate::models::{AddOnOption, Catalog, MotorCategoryOption, ServiceOption};

/// A [`CatalogSource`] over a catalog that is already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    catalog: Catalog,
}

impl InMemoryCatalogSource {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn list_services(&self) -> Result<Vec<ServiceOption>, CatalogError> {
        Ok(self.catalog.services.clone())
    }

    async fn list_motor_categories(&self) -> Result<Vec<MotorCategoryOption>, CatalogError> {
        Ok(self.catalog.motor_categories.clone())
    }

    async fn list_add_ons(&self) -> Result<Vec<AddOnOption>, CatalogError> {
        Ok(self.catalog.add_ons.clone())
    }
}
