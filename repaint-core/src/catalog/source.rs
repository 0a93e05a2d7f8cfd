use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AddOnOption, Catalog, MotorCategoryOption, ServiceOption};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog not found: {0}")]
    NotFound(String),

    #[error("Catalog parse error: {0}")]
    Parse(String),

    #[error("Catalog source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Somewhere the fixed option lists can be read from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_services(&self) -> Result<Vec<ServiceOption>, CatalogError>;
    async fn list_motor_categories(&self) -> Result<Vec<MotorCategoryOption>, CatalogError>;
    async fn list_add_ons(&self) -> Result<Vec<AddOnOption>, CatalogError>;

    /// Reads all three option lists.
    async fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        Ok(Catalog {
            services: self.list_services().await?,
            motor_categories: self.list_motor_categories().await?,
            add_ons: self.list_add_ons().await?,
        })
    }
}
