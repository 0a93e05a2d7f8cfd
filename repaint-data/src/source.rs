use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use repaint_core::catalog::{CatalogConfig, CatalogSourceFactory};
use repaint_core::{AddOnOption, CatalogError, CatalogSource, MotorCategoryOption, ServiceOption};
use tracing::debug;

use crate::loader::CatalogLoader;

pub const SERVICES_FILE: &str = "services.csv";
pub const MOTORS_FILE: &str = "motors.csv";
pub const ADD_ONS_FILE: &str = "add_ons.csv";

/// Reads the catalog from a directory holding `services.csv`,
/// `motors.csv` and `add_ons.csv`.
///
/// Files are re-read on every call, so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    dir: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read(
        &self,
        file: &str,
    ) -> Result<String, CatalogError> {
        let path = self.dir.join(file);
        debug!(path = %path.display(), "reading catalog file");

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CatalogError::NotFound(path.display().to_string()),
                _ => CatalogError::Source(format!("cannot read '{}': {e}", path.display())),
            })
    }
}

/// Prefixes a parse error with the file it came from.
fn in_file(
    file: &str,
    err: impl std::fmt::Display,
) -> CatalogError {
    CatalogError::Parse(format!("{file}: {err}"))
}

#[async_trait]
impl CatalogSource for CsvCatalogSource {
    async fn list_services(&self) -> Result<Vec<ServiceOption>, CatalogError> {
        let contents = self.read(SERVICES_FILE).await?;
        CatalogLoader::parse_services(contents.as_bytes()).map_err(|e| in_file(SERVICES_FILE, e))
    }

    async fn list_motor_categories(&self) -> Result<Vec<MotorCategoryOption>, CatalogError> {
        let contents = self.read(MOTORS_FILE).await?;
        CatalogLoader::parse_motor_categories(contents.as_bytes())
            .map_err(|e| in_file(MOTORS_FILE, e))
    }

    async fn list_add_ons(&self) -> Result<Vec<AddOnOption>, CatalogError> {
        let contents = self.read(ADD_ONS_FILE).await?;
        CatalogLoader::parse_add_ons(contents.as_bytes()).map_err(|e| in_file(ADD_ONS_FILE, e))
    }
}

/// Factory for the `csv` backend. `location` is the catalog directory.
pub struct CsvCatalogFactory;

#[async_trait]
impl CatalogSourceFactory for CsvCatalogFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    async fn create(
        &self,
        config: &CatalogConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError> {
        if config.location.trim().is_empty() {
            return Err(CatalogError::Configuration(
                "csv backend needs a catalog directory".to_string(),
            ));
        }

        let dir = PathBuf::from(&config.location);
        match tokio::fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => Ok(Box::new(CsvCatalogSource::new(dir))),
            Ok(_) => Err(CatalogError::Configuration(format!(
                "'{}' is not a directory",
                dir.display()
            ))),
            Err(_) => Err(CatalogError::NotFound(dir.display().to_string())),
        }
    }
}
