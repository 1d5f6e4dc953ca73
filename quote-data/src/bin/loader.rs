use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quote_data::PriceEntryLoader;
use quote_db_sqlite::SqliteRepository;

/// Load a dakkapel price table from a CSV file into the database.
///
/// The CSV file should have the following columns:
/// - category: base_price, material, option, color, insulation,
///   frame_height or extra_window
/// - key: the member of the category (e.g. small, wood, zinc_gutter)
/// - amount: euros excluding VAT (a multiplier for material)
///
/// The file must list every entry; the stored table is replaced as a whole.
#[derive(Parser, Debug)]
#[command(name = "quote-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the price table
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL or path (created if missing)
    #[arg(short, long, default_value = "sqlite:quotes.db")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
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

    println!("Loading price table from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = PriceEntryLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let stored = PriceEntryLoader::load(&repo, &records)
        .await
        .context("Failed to load price table into database")?;

    println!("Successfully stored {} price entries.", stored);

    Ok(())
}
