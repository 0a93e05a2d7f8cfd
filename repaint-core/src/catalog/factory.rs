use std::collections::BTreeMap;

use async_trait::async_trait;

use super::source::{CatalogError, CatalogSource};

/// Backend-agnostic catalog location.
///
/// `backend` must match the [`CatalogSourceFactory::backend_name`] of a
/// registered factory.  `location` is passed through to that factory
/// unchanged; its meaning is entirely backend-specific.
///
/// | backend    | location examples                   |
/// |------------|-------------------------------------|
/// | `builtin`  | ignored                             |
/// | `csv`      | `catalog/`, `/srv/site/catalog`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"csv"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub location: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: "builtin".to_string(),
            location: String::new(),
        }
    }
}

/// Opens one kind of catalog. `builtin` and `csv` ship with the site;
/// tests register their own.
#[async_trait]
pub trait CatalogSourceFactory: Send + Sync {
    /// Name used in `[catalog] backend` and `--catalog-backend`.
    fn backend_name(&self) -> &'static str;

    /// Checks `config.location` and returns a source ready to be read.
    async fn create(
        &self,
        config: &CatalogConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError>;
}

/// The catalog backends a binary knows about, by name.
#[derive(Default)]
pub struct CatalogRegistry {
    factories: BTreeMap<&'static str, Box<dyn CatalogSourceFactory>>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`; a later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn CatalogSourceFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the catalog named by `config.backend`.
    ///
    /// # Errors
    /// * [`CatalogError::Configuration`] naming the requested backend and the
    ///   registered ones when nothing matches.
    /// * Whatever the matching factory reports about `config.location`.
    pub async fn create(
        &self,
        config: &CatalogConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(CatalogError::Configuration(format!(
                "unknown catalog backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        tracing::debug!(backend = %config.backend, location = %config.location, "opening catalog");
        factory.create(config).await
    }
}
