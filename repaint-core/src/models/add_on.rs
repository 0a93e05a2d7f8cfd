use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An extra charge that can be toggled independently of everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnOption {
    pub id: String,
    pub display_name: String,
    pub price: Option<Decimal>,
}

impl AddOnOption {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        price: Option<Decimal>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            price,
        }
    }
}
