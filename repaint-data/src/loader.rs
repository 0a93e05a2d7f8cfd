//! CSV parsing for the quote form's option lists.
//!
//! ## CSV Format
//!
//! One file per option list. Headers are matched by name, whitespace around
//! values is trimmed, and an empty price or multiplier cell means the entry
//! carries no value (it stays selectable but never yields a valid quote).
//!
//! | File          | Columns                     |
//! |---------------|-----------------------------|
//! | `services.csv`| `id`, `name`, `base_price`  |
//! | `motors.csv`  | `id`, `name`, `multiplier`  |
//! | `add_ons.csv` | `id`, `name`, `price`       |
//!
//! ```csv
//! id,name,base_price
//! full-body,Repaint Full Body,1500000
//! ```
use std::collections::HashSet;
use std::fmt;
use std::io::Read;

use repaint_core::{AddOnOption, Catalog, CatalogError, MotorCategoryOption, ServiceOption};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when parsing catalog files.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("duplicate {kind} id '{id}' on row {row}")]
    DuplicateId {
        kind: &'static str,
        id: String,
        row: usize,
    },

    #[error("invalid {field} {value} for {kind} '{id}'")]
    InvalidValue {
        kind: &'static str,
        id: String,
        field: &'static str,
        value: Decimal,
    },
}

impl From<csv::Error> for CatalogLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogLoaderError::CsvParse(err.to_string())
    }
}

impl From<CatalogLoaderError> for CatalogError {
    fn from(err: CatalogLoaderError) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

/// A row of `services.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub base_price: Option<Decimal>,
}

/// A row of `motors.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MotorCategoryRecord {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub multiplier: Option<Decimal>,
}

/// A row of `add_ons.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AddOnRecord {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub price: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Something worth telling whoever maintains the catalog. None of these
/// stop the site from working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    NoServices,
    NoMotorCategories,
    ServiceWithoutPrice(String),
    MotorWithoutMultiplier(String),
    AddOnWithoutPrice(String),
}

impl fmt::Display for CatalogWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::NoServices => write!(f, "catalog has no services; no quote can ever be valid"),
            Self::NoMotorCategories => {
                write!(f, "catalog has no motor categories; no quote can ever be valid")
            }
            Self::ServiceWithoutPrice(id) => {
                write!(f, "service '{id}' has no base price and can never be quoted")
            }
            Self::MotorWithoutMultiplier(id) => {
                write!(f, "motor category '{id}' has no multiplier and can never be quoted")
            }
            Self::AddOnWithoutPrice(id) => write!(f, "add-on '{id}' has no price and adds nothing"),
        }
    }
}

/// Parser for the catalog CSV files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse `services.csv` content.
    pub fn parse_services<R: Read>(reader: R) -> Result<Vec<ServiceOption>, CatalogLoaderError> {
        let records: Vec<ServiceRecord> = read_records(reader)?;
        check_unique_ids("service", records.iter().map(|r| r.id.as_str()))?;

        records
            .into_iter()
            .map(|r| {
                if let Some(price) = r.base_price.filter(|p| !is_whole_amount(p)) {
                    return Err(CatalogLoaderError::InvalidValue {
                        kind: "service",
                        id: r.id,
                        field: "base_price",
                        value: price,
                    });
                }
                Ok(ServiceOption::new(r.id, r.name, r.base_price))
            })
            .collect()
    }

    /// Parse `motors.csv` content.
    pub fn parse_motor_categories<R: Read>(
        reader: R
    ) -> Result<Vec<MotorCategoryOption>, CatalogLoaderError> {
        let records: Vec<MotorCategoryRecord> = read_records(reader)?;
        check_unique_ids("motor category", records.iter().map(|r| r.id.as_str()))?;

        records
            .into_iter()
            .map(|r| {
                if let Some(multiplier) = r.multiplier.filter(|m| *m <= Decimal::ZERO) {
                    return Err(CatalogLoaderError::InvalidValue {
                        kind: "motor category",
                        id: r.id,
                        field: "multiplier",
                        value: multiplier,
                    });
                }
                Ok(MotorCategoryOption::new(r.id, r.name, r.multiplier))
            })
            .collect()
    }

    /// Parse `add_ons.csv` content.
    pub fn parse_add_ons<R: Read>(reader: R) -> Result<Vec<AddOnOption>, CatalogLoaderError> {
        let records: Vec<AddOnRecord> = read_records(reader)?;
        check_unique_ids("add-on", records.iter().map(|r| r.id.as_str()))?;

        records
            .into_iter()
            .map(|r| {
                if let Some(price) = r.price.filter(|p| !is_whole_amount(p)) {
                    return Err(CatalogLoaderError::InvalidValue {
                        kind: "add-on",
                        id: r.id,
                        field: "price",
                        value: price,
                    });
                }
                Ok(AddOnOption::new(r.id, r.name, r.price))
            })
            .collect()
    }

    /// Lists catalog entries that cannot contribute to a valid quote.
    pub fn lint(catalog: &Catalog) -> Vec<CatalogWarning> {
        let mut warnings = Vec::new();

        if catalog.services.is_empty() {
            warnings.push(CatalogWarning::NoServices);
        }
        if catalog.motor_categories.is_empty() {
            warnings.push(CatalogWarning::NoMotorCategories);
        }

        warnings.extend(
            catalog
                .services
                .iter()
                .filter(|s| s.base_price.is_none())
                .map(|s| CatalogWarning::ServiceWithoutPrice(s.id.clone())),
        );
        warnings.extend(
            catalog
                .motor_categories
                .iter()
                .filter(|m| m.multiplier.is_none())
                .map(|m| CatalogWarning::MotorWithoutMultiplier(m.id.clone())),
        );
        warnings.extend(
            catalog
                .add_ons
                .iter()
                .filter(|a| a.price.is_none())
                .map(|a| CatalogWarning::AddOnWithoutPrice(a.id.clone())),
        );

        warnings
    }
}

/// Prices are whole, non-negative Rupiah amounts.
fn is_whole_amount(price: &Decimal) -> bool {
    !price.is_sign_negative() && price.fract().is_zero()
}

fn read_records<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, CatalogLoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

/// Row numbers are 1-based, not counting the header.
fn check_unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogLoaderError> {
    let mut seen = HashSet::new();
    for (idx, id) in ids.enumerate() {
        if !seen.insert(id) {
            return Err(CatalogLoaderError::DuplicateId {
                kind,
                id: id.to_string(),
                row: idx + 1,
            });
        }
    }
    Ok(())
}
