//! Wiring shared by the binary and the integration tests.

use std::fmt;

use anyhow::Context;
use repaint_core::calculations::common::format_rupiah;
use repaint_core::catalog::{CatalogConfig, CatalogRegistry};
use repaint_core::Catalog;
use repaint_data::{BuiltinCatalogFactory, CatalogLoader, CsvCatalogFactory};
use tracing::{info, warn};

use crate::form::QuoteForm;

/// Registry with every catalog backend this binary knows about.
pub fn build_registry() -> CatalogRegistry {
    let mut registry = CatalogRegistry::new();
    registry.register(Box::new(BuiltinCatalogFactory));
    registry.register(Box::new(CsvCatalogFactory));
    registry
}

/// Opens the configured backend and reads the whole catalog.
///
/// Lint findings are logged as warnings and never fail the load.
pub async fn load_catalog(
    registry: &CatalogRegistry,
    config: &CatalogConfig,
) -> anyhow::Result<Catalog> {
    let source = registry
        .create(config)
        .await
        .with_context(|| format!("opening '{}' catalog backend", config.backend))?;
    let catalog = source
        .load_catalog()
        .await
        .with_context(|| format!("loading catalog from '{}' backend", config.backend))?;

    for warning in CatalogLoader::lint(&catalog) {
        warn!(%warning, "catalog");
    }
    info!(
        services = catalog.services.len(),
        motor_categories = catalog.motor_categories.len(),
        add_ons = catalog.add_ons.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Plain-text listing of a catalog, one option per line.
pub struct CatalogListing<'a>(pub &'a Catalog);

impl fmt::Display for CatalogListing<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let catalog = self.0;

        writeln!(f, "Services:")?;
        for service in &catalog.services {
            let price = service
                .base_price
                .map(format_rupiah)
                .unwrap_or_else(|| "-".to_string());
            writeln!(f, "  {:<16} {:<28} {}", service.id, service.display_name, price)?;
        }

        writeln!(f, "Motor categories:")?;
        for motor in &catalog.motor_categories {
            let multiplier = motor
                .multiplier
                .map(|m| format!("x{}", m.normalize()))
                .unwrap_or_else(|| "-".to_string());
            writeln!(f, "  {:<16} {:<28} {}", motor.id, motor.display_name, multiplier)?;
        }

        writeln!(f, "Add-ons:")?;
        for add_on in &catalog.add_ons {
            let price = add_on
                .price
                .map(|p| format!("+{}", format_rupiah(p)))
                .unwrap_or_else(|| "-".to_string());
            writeln!(f, "  {:<16} {:<28} {}", add_on.id, add_on.display_name, price)?;
        }
        Ok(())
    }
}

/// What the page shows under the form: the price, then the link or a notice.
pub struct QuoteReport<'a>(pub &'a QuoteForm);

impl fmt::Display for QuoteReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let form = self.0;
        writeln!(f, "Estimasi Harga: {}", form.price_text())?;
        match form.action().activate() {
            Some(link) => writeln!(f, "{link}"),
            None => writeln!(f, "Pilih layanan dan jenis motor untuk mendapatkan penawaran."),
        }
    }
}
