use serde::{Deserialize, Deserializer, Serialize};

use super::{AddOnOption, MotorCategoryOption, ServiceOption};

/// Snapshot of what the form controls currently hold.
///
/// `active_add_ons` behaves as a set keyed by id; insertion order is kept so
/// the order summary lists add-ons the way the form shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSelection {
    pub service: Option<ServiceOption>,
    pub motor: Option<MotorCategoryOption>,
    #[serde(default, deserialize_with = "deserialize_add_on_set")]
    active_add_ons: Vec<AddOnOption>,
}

/// Drops repeated ids so a deserialized selection keeps the set semantics.
fn deserialize_add_on_set<'de, D>(deserializer: D) -> Result<Vec<AddOnOption>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut selection = QuoteSelection::default();
    for add_on in Vec::<AddOnOption>::deserialize(deserializer)? {
        selection.set_add_on(add_on, true);
    }
    Ok(selection.active_add_ons)
}

impl QuoteSelection {
    /// Nothing selected: the state of a freshly loaded page.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_service(
        mut self,
        service: ServiceOption,
    ) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_motor(
        mut self,
        motor: MotorCategoryOption,
    ) -> Self {
        self.motor = Some(motor);
        self
    }

    pub fn with_add_on(
        mut self,
        add_on: AddOnOption,
    ) -> Self {
        self.set_add_on(add_on, true);
        self
    }

    /// Activates or deactivates an add-on. Activating one that is already
    /// active is a no-op.
    pub fn set_add_on(
        &mut self,
        add_on: AddOnOption,
        active: bool,
    ) {
        let position = self.active_add_ons.iter().position(|a| a.id == add_on.id);
        match (active, position) {
            (true, None) => self.active_add_ons.push(add_on),
            (false, Some(idx)) => {
                self.active_add_ons.remove(idx);
            }
            _ => {}
        }
    }

    pub fn clear_service(&mut self) {
        self.service = None;
    }

    pub fn clear_motor(&mut self) {
        self.motor = None;
    }

    /// Active add-ons in the order they were switched on.
    pub fn active_add_ons(&self) -> &[AddOnOption] {
        &self.active_add_ons
    }

    pub fn is_add_on_active(
        &self,
        id: &str,
    ) -> bool {
        self.active_add_ons.iter().any(|a| a.id == id)
    }
}
