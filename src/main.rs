use clap::{Parser, Subcommand};
use marketplace_listings::catalog::{Catalog, ListingQuery, SortOrder};
use marketplace_listings::config::{load_config, AppConfig};
use marketplace_listings::display::format_price;
use marketplace_listings::model::{ConfigError, FetchError};
use marketplace_listings::source::{ApiClient, InMemorySource, ListingSource};
use serde::Serialize;
use std::fs;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("cannot load dump {0}: {1}")]
    Dump(String, String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("cannot encode output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Debug, Parser)]
#[command(
    name = "marketplace-listings",
    about = "Browse marketplace listings from the upstream API"
)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = "config.json")]
    config: String,

    /// Read listings from a JSON dump instead of the API
    #[arg(long)]
    input: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one page of listings
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value_t = SortOrder::Newest)]
        sort: SortOrder,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one or more listings by id
    Show {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show a seller and their listings
    Seller { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli.config)?;
    match &cli.input {
        Some(path) => run(load_dump(path)?, &config, cli.command).await,
        None => run(ApiClient::new(&config)?, &config, cli.command).await,
    }
}

fn load_dump(path: &str) -> Result<InMemorySource, CliError> {
    info!("Loading listings from {}", path);
    let dump_error = |e: &dyn std::fmt::Display| CliError::Dump(path.to_string(), e.to_string());
    let content = fs::read_to_string(path).map_err(|e| dump_error(&e))?;
    let body: serde_json::Value = serde_json::from_str(&content).map_err(|e| dump_error(&e))?;
    Ok(InMemorySource::from_json(body)?)
}

async fn run<S: ListingSource>(
    source: S,
    config: &AppConfig,
    command: Command,
) -> Result<(), CliError> {
    let catalog = Catalog::new(source, config.storage_base_url.clone());

    match command {
        Command::List {
            search,
            category,
            sort,
            page,
        } => {
            let query = ListingQuery {
                search,
                category,
                seller_id: None,
                sort,
                page,
                page_size: config.page_size,
            };
            let page = catalog.browse(&query).await?;
            for item in &page.items {
                info!("{} | {}", item.listing.title, format_price(item.listing.price));
            }
            print_json(&page)
        }
        Command::Show { ids } => {
            let mut found = Vec::new();
            for (id, result) in ids.iter().zip(catalog.listings(&ids).await) {
                match result {
                    Ok(Some(view)) => found.push(view),
                    Ok(None) => warn!("No listing with id {}", id),
                    Err(e) => warn!("Failed to fetch {}: {}", id, e),
                }
            }
            if found.is_empty() {
                return Err(CliError::NotFound("listings".to_string()));
            }
            print_json(&found)
        }
        Command::Seller { id } => match catalog.seller_profile(&id).await? {
            Some(profile) => print_json(&profile),
            None => Err(CliError::NotFound(format!("seller {}", id))),
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{}", out);
    Ok(())
}
