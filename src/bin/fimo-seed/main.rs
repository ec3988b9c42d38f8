use anyhow::{Context, Result};
use clap::Parser;
use fimo_seed::cli::Cli;
use fimo_seed::mongo::connect;
use fimo_seed::{seed, FixtureLoader, MemoryStore, SeedOptions, SeedReport};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    init_tracing(args.debug);

    let code = match run(&args).await {
        Ok(report) => {
            if let Ok(summary) = serde_json::to_string(&report) {
                debug!(%summary, "seed report");
            }
            0
        }
        Err(e) => {
            eprintln!("Error adding collections: {e:#}");
            // Without --strict a failed run still exits 0; check the log.
            i32::from(args.strict)
        }
    };

    std::process::exit(code);
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: &Cli) -> Result<SeedReport> {
    let items = args.collections();
    let loader = FixtureLoader::new(&args.data_dir);
    let options = SeedOptions {
        format: args.format,
        batch_size: args.batch_size,
        debug: args.debug,
        dry_run: args.dry_run,
    };
    info!(data_dir = %loader.dir().display(), items = ?items, format = args.format, "seeding");

    if args.dry_run {
        println!("Dry run: nothing will be written to MongoDB");
        let store = MemoryStore::new();
        return Ok(seed(&store, &loader, &items, options).await?);
    }

    let db = connect(&args.mongo_uri, args.db.as_deref())
        .await
        .context("failed to connect to MongoDB")?;
    info!(database = db.name(), "connected");

    Ok(seed(&db, &loader, &items, options).await?)
}
