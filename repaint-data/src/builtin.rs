//! The catalog published on the site, embedded at compile time.

use async_trait::async_trait;
use repaint_core::catalog::{CatalogConfig, CatalogSourceFactory, InMemoryCatalogSource};
use repaint_core::{Catalog, CatalogError, CatalogSource};

use crate::loader::{CatalogLoader, CatalogLoaderError};

const SERVICES_CSV: &str = include_str!("../catalog/services.csv");
const MOTORS_CSV: &str = include_str!("../catalog/motors.csv");
const ADD_ONS_CSV: &str = include_str!("../catalog/add_ons.csv");

/// Parses the embedded catalog.
pub fn builtin_catalog() -> Result<Catalog, CatalogLoaderError> {
    Ok(Catalog {
        services: CatalogLoader::parse_services(SERVICES_CSV.as_bytes())?,
        motor_categories: CatalogLoader::parse_motor_categories(MOTORS_CSV.as_bytes())?,
        add_ons: CatalogLoader::parse_add_ons(ADD_ONS_CSV.as_bytes())?,
    })
}

/// Factory for the `builtin` backend. `location` is ignored.
pub struct BuiltinCatalogFactory;

#[async_trait]
impl CatalogSourceFactory for BuiltinCatalogFactory {
    fn backend_name(&self) -> &'static str {
        "builtin"
    }

    async fn create(
        &self,
        _config: &CatalogConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError> {
        Ok(Box::new(InMemoryCatalogSource::new(builtin_catalog()?)))
    }
}
