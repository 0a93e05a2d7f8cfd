pub mod calculations;
pub mod catalog;
pub mod models;

pub use catalog::{CatalogError, CatalogSource};
pub use models::*;
