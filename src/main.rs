use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use wishlist_sync::app::{ReconcileReport, WishlistUseCase};
use wishlist_sync::catalog::CatalogFetcher;
use wishlist_sync::config::Config;
use wishlist_sync::infra::ReqwestHttp;
use wishlist_sync::observability::{self, metrics};
use wishlist_sync::server;
use wishlist_sync::{SourceTag, WishlistIds};

#[derive(Parser)]
#[command(name = "wishlist_sync")]
#[command(about = "Reconcile a traveller's wishlist against the live travel catalogs")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all catalogs and print the wishlisted items
    Reconcile {
        /// Wishlist ids (comma-separated)
        #[arg(long, conflicts_with = "ids_file")]
        ids: Option<String>,
        /// JSON session export: an array or { "wishlist": [...] }
        #[arg(long)]
        ids_file: Option<PathBuf>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch catalogs and print record counts per source
    Catalog {
        /// Single source to fetch: package, holiday, destination, fixed-departure, adventure
        #[arg(long)]
        source: Option<String>,
    },
    /// Serve the wishlist endpoint over HTTP
    Serve {
        /// Port to listen on (defaults to server.port from config)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn build_fetcher(config: &Config) -> anyhow::Result<CatalogFetcher> {
    let http = ReqwestHttp::new(config.api.timeout_seconds).context("building HTTP client")?;
    Ok(CatalogFetcher::new(Arc::new(http), config.api.clone()))
}

fn print_report(report: &ReconcileReport) {
    println!("\n🧳 Wishlist ({} items)", report.items.len());
    for routed in &report.items {
        let item = &routed.item;
        println!(
            "   - [{}] {} | {} | {} | ₹{} -> {}",
            item.source, item.title, item.destination, item.duration, item.price, routed.route
        );
    }
    println!(
        "\n   Catalog records fetched: {} | duplicates collapsed: {}",
        report.fetched_records, report.duplicates_collapsed
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;

    match cli.command {
        Commands::Reconcile { ids, ids_file, json } => {
            let wishlist = match (ids, ids_file) {
                (Some(list), _) => WishlistIds::from_csv(&list),
                (None, Some(path)) => WishlistIds::load_from_file(&path)
                    .with_context(|| format!("reading wishlist from {}", path.display()))?,
                (None, None) => bail!("pass either --ids or --ids-file"),
            };
            if wishlist.is_empty() {
                warn!("Wishlist is empty; nothing to reconcile");
            }

            let use_case = WishlistUseCase::new(build_fetcher(&config)?);
            let report = use_case.reconcile(&wishlist).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Catalog { source } => {
            let fetcher = build_fetcher(&config)?;
            let records = match source {
                Some(name) => {
                    let tag: SourceTag = name.parse()?;
                    fetcher.fetch_source(tag).await
                }
                None => fetcher.fetch_all_catalogs().await,
            };

            println!("\n📚 Catalog records");
            for tag in SourceTag::ALL {
                let count = records.iter().filter(|r| r.source == tag).count();
                println!("   {:<16} {}", tag.as_str(), count);
            }
            println!("   {:<16} {}", "total", records.len());
        }
        Commands::Serve { port } => {
            if let Err(e) = metrics::init() {
                warn!("Metrics disabled: {}", e);
            }
            let port = port.unwrap_or(config.server.port);
            let use_case = Arc::new(WishlistUseCase::new(build_fetcher(&config)?));
            info!(port, "Starting wishlist server");
            server::start_server(use_case, port).await?;
        }
    }

    Ok(())
}
