use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quote_data::CatalogLoader;
use quote_db_sqlite::SqliteRepository;
use rust_decimal::Decimal;

/// Load pricing catalog data from CSV files into the database.
///
/// Each table has its own CSV shape:
/// - cabinets: name,area,room_name,measurement,handle_type,
///   price_l0..price_l10,str_addon (empty str_addon = no surcharge)
/// - surfaces: name,area,measurement,base_price (fenix is derived as
///   base_price × the fenix multiplier; every other material gets the base)
/// - addons: name,area,measurement,unit_price
/// - dependencies: parent,dependent,quantity_ratio,rounding
///
/// Measurement codes are LNFT/SQFT/QTY; handle codes are none/handle/profile;
/// rounding codes are none/round-up/round-down/round-nearest.
#[derive(Parser, Debug)]
#[command(name = "quote-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the cabinet prices CSV file
    #[arg(long)]
    cabinets: Option<PathBuf>,

    /// Path to the surface prices CSV file
    #[arg(long)]
    surfaces: Option<PathBuf>,

    /// Path to the addon prices CSV file
    #[arg(long)]
    addons: Option<PathBuf>,

    /// Path to the addon dependencies CSV file
    #[arg(long)]
    dependencies: Option<PathBuf>,

    /// SQLite database URL (e.g. sqlite:quotes.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:quotes.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,

    /// Multiplier applied to the base import price for the fenix material
    #[arg(long, default_value = "1.5")]
    fenix_multiplier: Decimal,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if let Some(seeds_dir) = &args.seeds {
        println!("Running seeds from: {}", seeds_dir.display());
        repo.run_seeds(seeds_dir)
            .await
            .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        println!("Seeds complete.");
    }

    if let Some(path) = &args.cabinets {
        println!("Loading cabinet prices from: {}", path.display());
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = CatalogLoader::parse_cabinets(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let inserted = CatalogLoader::load_cabinets(&repo, &records)
            .await
            .context("Failed to load cabinet prices into database")?;
        println!("Loaded {} cabinet price rows.", inserted);
    }

    if let Some(path) = &args.surfaces {
        println!("Loading surface prices from: {}", path.display());
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = CatalogLoader::parse_surfaces(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let inserted = CatalogLoader::load_surfaces(&repo, &records, args.fenix_multiplier)
            .await
            .context("Failed to load surface prices into database")?;
        println!("Loaded {} surface price rows.", inserted);
    }

    if let Some(path) = &args.addons {
        println!("Loading addon prices from: {}", path.display());
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = CatalogLoader::parse_addons(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let inserted = CatalogLoader::load_addons(&repo, &records)
            .await
            .context("Failed to load addon prices into database")?;
        println!("Loaded {} addon price rows.", inserted);
    }

    if let Some(path) = &args.dependencies {
        println!("Loading addon dependencies from: {}", path.display());
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = CatalogLoader::parse_dependencies(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let inserted = CatalogLoader::load_dependencies(&repo, &records)
            .await
            .context("Failed to load addon dependencies into database")?;
        println!("Loaded {} addon dependency rows.", inserted);
    }

    Ok(())
}
