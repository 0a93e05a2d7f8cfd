use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use repaint_core::CatalogSource;
use repaint_data::{CatalogLoader, CsvCatalogSource};

/// Check a catalog directory before publishing it.
///
/// The directory must contain:
/// - services.csv: id, name, base_price
/// - motors.csv: id, name, multiplier
/// - add_ons.csv: id, name, price
///
/// Empty price or multiplier cells are allowed but reported, since those
/// entries can never produce a valid quote.
#[derive(Parser, Debug)]
#[command(name = "catalog-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the catalog CSV files
    #[arg(short, long)]
    dir: PathBuf,

    /// Exit with an error when any warning is reported
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking catalog in: {}", args.dir.display());

    let source = CsvCatalogSource::new(&args.dir);
    let catalog = source
        .load_catalog()
        .await
        .with_context(|| format!("Failed to load catalog from: {}", args.dir.display()))?;

    println!(
        "Parsed {} services, {} motor categories, {} add-ons",
        catalog.services.len(),
        catalog.motor_categories.len(),
        catalog.add_ons.len()
    );

    let warnings = CatalogLoader::lint(&catalog);
    for warning in &warnings {
        println!("warning: {warning}");
    }

    if args.strict && !warnings.is_empty() {
        anyhow::bail!("{} warning(s) in strict mode", warnings.len());
    }

    println!("Catalog OK.");
    Ok(())
}
