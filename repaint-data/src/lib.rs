pub mod builtin;
pub mod loader;
pub mod source;

pub use builtin::BuiltinCatalogFactory;
pub use loader::{CatalogLoader, CatalogLoaderError, CatalogWarning};
pub use source::{CsvCatalogFactory, CsvCatalogSource};
