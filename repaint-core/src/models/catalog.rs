use serde::{Deserialize, Serialize};

use super::{AddOnOption, MotorCategoryOption, ServiceOption};

/// The fixed set of options the quote form offers, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub services: Vec<ServiceOption>,
    pub motor_categories: Vec<MotorCategoryOption>,
    pub add_ons: Vec<AddOnOption>,
}

impl Catalog {
    pub fn find_service(
        &self,
        id: &str,
    ) -> Option<&ServiceOption> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn find_motor_category(
        &self,
        id: &str,
    ) -> Option<&MotorCategoryOption> {
        self.motor_categories.iter().find(|m| m.id == id)
    }

    pub fn find_add_on(
        &self,
        id: &str,
    ) -> Option<&AddOnOption> {
        self.add_ons.iter().find(|a| a.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.motor_categories.is_empty() && self.add_ons.is_empty()
    }
}
