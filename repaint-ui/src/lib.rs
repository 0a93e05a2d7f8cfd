pub mod app;
pub mod config;
pub mod form;
pub mod logging;

pub use config::AppConfig;
pub use form::{Cursor, FormError, Opacity, QuoteActionControl, QuoteForm};
