use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use repaint_ui::app::{self, CatalogListing, QuoteReport};
use repaint_ui::{AppConfig, QuoteForm, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Motorcycle repaint price estimator.
///
/// Loads the catalog, applies the given selection the way the quote form
/// does, and prints the estimated price together with the WhatsApp link
/// that sends the order summary.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML config file. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog backend (`builtin` or `csv`). Overrides the config file.
    #[arg(long)]
    catalog_backend: Option<String>,

    /// Catalog location; for `csv` the directory holding the CSV files.
    /// Implies `--catalog-backend csv` unless a backend is given.
    #[arg(long)]
    catalog: Option<String>,

    /// Service id.
    #[arg(long)]
    service: Option<String>,

    /// Motor category id.
    #[arg(long)]
    motor: Option<String>,

    /// Add-on id. Repeat for several add-ons.
    #[arg(long = "add-on")]
    add_ons: Vec<String>,

    /// Print the catalog before the quote.
    #[arg(long)]
    list: bool,

    /// Log filter directive (e.g. `warn` or `repaint_core=debug`).
    /// Overrides the config file and `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Suppress log output on stderr.
    #[arg(long)]
    quiet: bool,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => AppConfig::default(),
    };

    logging::init_logging(config.logging.level.as_deref());
    if let Some(directive) = &cli.log_level {
        logging::set_log_level(directive)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false);
    }
    if let Some(path) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }

    let mut catalog_config = config.catalog();
    if let Some(location) = cli.catalog {
        catalog_config.backend = "csv".to_string();
        catalog_config.location = location;
    }
    if let Some(backend) = cli.catalog_backend {
        catalog_config.backend = backend;
    }

    debug!(backend = %catalog_config.backend, "loading catalog");
    let registry = app::build_registry();
    let catalog = app::load_catalog(&registry, &catalog_config).await?;

    if cli.list {
        print!("{}", CatalogListing(&catalog));
        println!();
    }

    let mut form = QuoteForm::new(catalog, config.contact());
    form.select_service(cli.service.as_deref())?;
    form.select_motor(cli.motor.as_deref())?;
    for add_on in &cli.add_ons {
        form.set_add_on(add_on, true)?;
    }

    info!(
        total = %form.result().total,
        valid = form.result().is_valid,
        "quote computed"
    );
    print!("{}", QuoteReport(&form));

    logging::disable_file_logging();
    Ok(())
}
