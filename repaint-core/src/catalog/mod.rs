pub mod factory;
pub mod memory;
pub mod source;

pub use factory::{CatalogConfig, CatalogRegistry, CatalogSourceFactory};
pub use memory::InMemoryCatalogSource;
pub use source::{CatalogError, CatalogSource};
