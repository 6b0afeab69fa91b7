use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments for location-loader
#[derive(Debug, Parser)]
#[command(
    name = "location-loader",
    version,
    about = "Load provinces, districts, sectors, cells and villages from JSON into PostgreSQL"
)]
pub struct CliArgs {
    /// Path to the input JSON document (default: $LOCATIONS_FILE or locations.json)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Path to the resume cursor file (default: $PROGRESS_FILE or progress.json)
    #[arg(short = 'p', long = "progress", global = true)]
    pub progress: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upsert every entry of the input document, resuming an interrupted run
    Load,

    /// Show the number of stored rows per level
    Stats,

    /// Show the stored resume cursor
    Progress,

    /// Delete the resume cursor so the next load starts from the beginning
    Reset,

    /// Show the chain of the most recently created village
    LastInserted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_is_the_default_command() {
        let args = CliArgs::parse_from(["location-loader", "--input", "rwanda.json"]);
        assert!(args.command.is_none());
        assert_eq!(args.input, Some(PathBuf::from("rwanda.json")));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["location-loader", "reset", "-p", "/tmp/cursor.json"]);
        assert!(matches!(args.command, Some(Commands::Reset)));
        assert_eq!(args.progress, Some(PathBuf::from("/tmp/cursor.json")));
    }
}
