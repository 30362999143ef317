//! menu-sync CLI
//!
//! Local entry point for running the refresh pipeline and inspecting
//! the cache.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use menu_sync::{
    error::Result,
    models::{Config, MenuDocument},
    parser::MenuParser,
    pipeline::{MenuRefresher, RefreshOutcome, RenderSink, content_digest},
    services::MenuFetcher,
    storage::{LocalCache, MenuCache},
};

/// menu-sync - published menu document ingestion
#[derive(Parser, Debug)]
#[command(name = "menu-sync", version, about = "Fetches and parses a published menu document")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "menu_sync.toml")]
    config: PathBuf,

    /// Directory holding the cached menu payload
    #[arg(long, default_value = "cache")]
    cache_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the refresh pipeline once and print the menu
    Sync,

    /// Print the cached menu without touching the network
    Show {
        /// Print the parsed document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a local text file and print the result
    Parse {
        /// Path to a raw text file
        file: PathBuf,

        /// Print the parsed document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Show cache status
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Renderer printing the structured menu to stdout.
struct ConsoleRenderer;

impl ConsoleRenderer {
    fn print(doc: &MenuDocument) {
        for section in &doc.sections {
            println!();
            println!("== {} ==", section.title);
            for item in &section.items {
                match &item.price {
                    Some(price) => println!("  {} ({})", item.name, price),
                    None => println!("  {}", item.name),
                }
                if let Some(ingredients) = &item.ingredients {
                    println!("      {ingredients}");
                }
                for addon in &item.addons {
                    println!("      + {addon}");
                }
            }
        }
    }
}

impl RenderSink for ConsoleRenderer {
    fn cache_shown(&mut self, doc: &MenuDocument) {
        println!("[cached copy]");
        Self::print(doc);
    }

    fn rendered(&mut self, doc: &MenuDocument) {
        println!("[live copy]");
        Self::print(doc);
    }

    fn fallback(&mut self) {
        println!("Menu is unavailable right now. Try again later.");
    }
}

fn print_document(doc: &MenuDocument, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(doc)?);
    } else {
        ConsoleRenderer::print(doc);
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    let cache = LocalCache::new(&cli.cache_dir);

    match cli.command {
        Command::Sync => {
            config.validate()?;

            let fetcher = MenuFetcher::new(&config.source, &config.fetch)?;
            log::info!("Fetching menu via {}", fetcher.base_url());

            let refresher =
                MenuRefresher::new(&config, Arc::new(fetcher), Arc::new(cache))?;

            println!("Loading menu...");
            let outcome = refresher.run(&mut ConsoleRenderer).await?;

            match outcome {
                RefreshOutcome::Refreshed => log::info!("Menu refreshed and cached"),
                RefreshOutcome::Unchanged => log::info!("Menu unchanged"),
                RefreshOutcome::FellBack => log::warn!("Fetch failed with no cache available"),
            }
        }

        Command::Show { json } => match cache.read().await? {
            Some(raw) => {
                let parser = MenuParser::new(&config.parser)?;
                print_document(&parser.parse(&raw), json)?;
            }
            None => {
                log::warn!("No cached menu at {}", cache.path().display());
                println!("Nothing cached yet. Run 'menu-sync sync' first.");
            }
        },

        Command::Parse { file, json } => {
            let raw = std::fs::read_to_string(&file)?;
            let parser = MenuParser::new(&config.parser)?;
            print_document(&parser.parse(&raw), json)?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK");
        }

        Command::Info => {
            log::info!("Cache directory: {}", cli.cache_dir.display());
            match cache.read().await {
                Ok(Some(raw)) => {
                    log::info!("Cache entry: {}", cache.path().display());
                    log::info!("Size: {} bytes", raw.len());
                    log::info!("Digest: {}", content_digest(&raw));
                }
                Ok(None) => log::info!("No cache entry yet."),
                Err(e) => {
                    log::error!("Cache inspect failed: {}", e);
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
