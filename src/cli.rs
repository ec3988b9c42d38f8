// src/cli.rs
use crate::collections::SeedCollection;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Seed MongoDB collections with sample data from JSON fixture files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Comma-separated list of collections to load sample data into
    #[arg(short, long, value_delimiter = ',')]
    pub items: Option<Vec<String>>,

    /// Clear all collections before inserting. [WARNING] Use carefully.
    #[arg(short, long)]
    pub format: bool,

    #[arg(long, env = "MONGO_DB_URL", default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    /// Database name; defaults to the one in the connection string
    #[arg(long, env = "MONGO_DB_NAME")]
    pub db: Option<String>,

    /// Directory holding `<collection>.json` fixtures
    #[arg(long, env = "SAMPLE_DATA_DIR", default_value = "sample_data")]
    pub data_dir: PathBuf,

    /// Insert at most this many documents per round trip
    #[arg(long)]
    pub batch_size: Option<NonZeroUsize>,

    /// Parse fixtures and report counts without touching the database
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long)]
    pub debug: bool,

    /// Exit with a non-zero status when seeding fails
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Requested fixture names, trimmed. An absent or blank list means the
    /// built-in defaults.
    pub fn collections(&self) -> Vec<String> {
        let requested: Vec<String> = self
            .items
            .iter()
            .flatten()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();

        if requested.is_empty() {
            SeedCollection::default_items()
        } else {
            requested
        }
    }
}
