use serde::{Deserialize, Serialize};

pub const DEFAULT_BUSINESS_NAME: &str = "MOTOR REPAINT PRO";
pub const DEFAULT_PHONE: &str = "6285782842306";
pub const DEFAULT_ENDPOINT: &str = "https://api.whatsapp.com/send";

/// Where the quote deep link points and who the greeting addresses.
///
/// None of these values are user-supplied; they come from static
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    pub business_name: String,
    /// International format, digits only (e.g. `6285782842306`).
    pub phone: String,
    /// Messaging endpoint without a query string.
    pub endpoint: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            phone: DEFAULT_PHONE.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}
