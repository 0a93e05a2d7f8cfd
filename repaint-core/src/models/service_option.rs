use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A repaint package offered on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOption {
    pub id: String,
    pub display_name: String,
    /// `None` when the catalog entry carries no price; such a service can
    /// never produce a valid quote.
    pub base_price: Option<Decimal>,
}

impl ServiceOption {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        base_price: Option<Decimal>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            base_price,
        }
    }
}
