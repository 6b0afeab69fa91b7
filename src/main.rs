//! location-loader: load an administrative-location hierarchy from JSON
//! into PostgreSQL.
//!
//! Usage examples
//! --------------
//!
//! - Load (or resume loading) a document
//!   $ location-loader --input rwanda.json
//!
//! - Inspect what is stored and where an interrupted run stopped
//!   $ location-loader stats
//!   $ location-loader progress
//!   $ location-loader last-inserted
//!
//! - Forget the resume cursor
//!   $ location-loader reset
//!
//! Configuration comes from the environment (and a `.env` file):
//! `DATABASE_URL`, `DB_*` pool settings, `LOCATIONS_FILE`, `PROGRESS_FILE`.
mod args;
mod core;
mod features;
mod shared;

use crate::args::{CliArgs, Commands};
use crate::core::config::{DatabaseConfig, LoaderConfig};
use crate::core::database;
use crate::core::error::AppError;
use crate::features::locations::models::Level;
use crate::features::locations::services::LocationRepository;
use crate::features::locations::{
    LocationLoader, LocationTree, PgLocationRepository, ProgressStore,
};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // One statement in flight at a time
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = LoaderConfig::from_env().with_overrides(args.input, args.progress);
    let progress = ProgressStore::new(config.progress_path.clone());

    match args.command.unwrap_or(Commands::Load) {
        Commands::Load => run_load(&config, progress).await?,

        Commands::Stats => {
            let repository = connect().await?;
            let counts = repository.counts().await?;
            println!("Database statistics:");
            for level in Level::ALL {
                println!("  {:<8} {}", level, counts.get(level));
            }
        }

        Commands::Progress => {
            let cursor = progress.load().await?;
            println!("Progress file: {}", progress.path().display());
            if cursor.is_empty() {
                println!("  No interrupted run recorded");
            } else {
                for level in Level::ALL {
                    println!("  {:<8} {}", level, cursor.get(level).unwrap_or("-"));
                }
            }
        }

        Commands::Reset => {
            if progress.reset().await? {
                println!("Removed {}", progress.path().display());
            } else {
                println!("No progress file at {}", progress.path().display());
            }
        }

        Commands::LastInserted => {
            let repository = connect().await?;
            match repository.last_inserted_path().await? {
                Some(path) => println!("{} (created {})", path, path.created_at),
                None => println!("No villages stored yet"),
            }
        }
    }

    Ok(())
}

async fn run_load(config: &LoaderConfig, progress: ProgressStore) -> anyhow::Result<()> {
    // Parse before connecting so a bad document fails fast
    let tree = LocationTree::from_path(&config.input_path).await?;
    let counts = tree.counts();
    tracing::info!(
        "Read {}: provinces={}, districts={}, sectors={}, cells={}, villages={}",
        config.input_path.display(),
        counts.provinces,
        counts.districts,
        counts.sectors,
        counts.cells,
        counts.villages
    );
    if tree.is_empty() {
        tracing::warn!("Input contains no provinces, nothing to load");
    }

    let repository = connect().await?;
    let loader = LocationLoader::new(Arc::new(repository), progress);
    let summary = loader.load(&tree).await?;

    summary.log();
    tracing::info!(
        "Load finished: {} rows inserted",
        summary.total_inserted()
    );

    Ok(())
}

async fn connect() -> anyhow::Result<PgLocationRepository> {
    let db_config = DatabaseConfig::from_env().map_err(AppError::Config)?;

    let pool = database::create_pool(&db_config).await?;
    tracing::info!("Database connection pool created");

    database::run_migrations(&pool).await?;

    Ok(PgLocationRepository::new(pool))
}
