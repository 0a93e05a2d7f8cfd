use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A vehicle class. Its multiplier scales the selected service's base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorCategoryOption {
    pub id: String,
    pub display_name: String,
    pub multiplier: Option<Decimal>,
}

impl MotorCategoryOption {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        multiplier: Option<Decimal>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            multiplier,
        }
    }
}
