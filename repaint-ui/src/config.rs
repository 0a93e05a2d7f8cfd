//! TOML configuration for the quote front end.
//!
//! Every section and key is optional:
//!
//! ```toml
//! [contact]
//! business_name = "MOTOR REPAINT PRO"
//! phone = "6285782842306"
//! endpoint = "https://api.whatsapp.com/send"
//!
//! [catalog]
//! backend = "csv"
//! location = "catalog/"
//!
//! [logging]
//! level = "debug"
//! file = "repaint.log"
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use repaint_core::ContactConfig;
use repaint_core::catalog::CatalogConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub contact: ContactSection,
    pub catalog: CatalogSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactSection {
    pub business_name: String,
    pub phone: String,
    pub endpoint: String,
}

impl Default for ContactSection {
    fn default() -> Self {
        let contact = ContactConfig::default();
        Self {
            business_name: contact.business_name,
            phone: contact.phone,
            endpoint: contact.endpoint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub backend: String,
    pub location: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        let catalog = CatalogConfig::default();
        Self {
            backend: catalog.backend,
            location: catalog.location,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// EnvFilter directive. Ignored when `RUST_LOG` is set.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^[0-9]{8,15}$").expect("phone pattern is valid"))
}

fn endpoint_pattern() -> &'static Regex {
    static ENDPOINT: OnceLock<Regex> = OnceLock::new();
    ENDPOINT.get_or_init(|| Regex::new(r"^https?://[^\s?#]+$").expect("endpoint pattern is valid"))
}

impl AppConfig {
    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates config text.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that end up inside the deep link.
    ///
    /// The phone number must be 8 to 15 digits (international format, no
    /// `+`), and the endpoint must be an http(s) URL without a query string.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !phone_pattern().is_match(&self.contact.phone) {
            return Err(ConfigError::Invalid(format!(
                "contact.phone '{}' must be 8-15 digits",
                self.contact.phone
            )));
        }
        if !endpoint_pattern().is_match(&self.contact.endpoint) {
            return Err(ConfigError::Invalid(format!(
                "contact.endpoint '{}' must be an http(s) URL without a query string",
                self.contact.endpoint
            )));
        }
        if self.contact.business_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "contact.business_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn contact(&self) -> ContactConfig {
        ContactConfig {
            business_name: self.contact.business_name.clone(),
            phone: self.contact.phone.clone(),
            endpoint: self.contact.endpoint.clone(),
        }
    }

    pub fn catalog(&self) -> CatalogConfig {
        CatalogConfig {
            backend: self.catalog.backend.clone(),
            location: self.catalog.location.clone(),
        }
    }
}
