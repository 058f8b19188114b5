//! Periodic-table catalog browser.
//!
//! Loads the element catalog from a SQLite snapshot, enriches it with
//! Wikipedia thumbnails in sequential batches, and serves it either as an
//! interactive TUI with live search or as a one-shot listing.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod catalog;
mod db;
mod enrich;
mod render;
mod search;
mod tui;
mod wiki;

use catalog::Catalog;
use render::TableRenderer;
use wiki::WikiClient;

#[derive(Parser, Debug)]
#[command(
    name = "ptable",
    version,
    about = "Periodic-table catalog browser with Wikipedia thumbnails"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse the catalog interactively with live search
    Browse(BrowseArgs),
    /// Print the catalog (optionally filtered) and exit
    List(ListArgs),
}

#[derive(Parser, Debug)]
struct BrowseArgs {
    /// Path to the element snapshot database
    #[arg(long, value_name = "PATH")]
    db: PathBuf,

    /// Skip thumbnail enrichment entirely
    #[arg(long)]
    offline: bool,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Path to the element snapshot database
    #[arg(long, value_name = "PATH")]
    db: PathBuf,

    /// Filter and rank as if this had been typed in the search box
    #[arg(long, value_name = "QUERY")]
    query: Option<String>,

    /// Fetch thumbnails before printing
    #[arg(long)]
    thumbs: bool,

    /// Emit machine-readable JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Browse(args) => run_browse(args),
        Commands::List(args) => run_list(args),
    }
}

fn run_browse(args: BrowseArgs) -> Result<()> {
    let records = db::load_records(&args.db)?;
    let mut renderer = TableRenderer::new();
    let catalog = Catalog::build(records, &mut renderer);
    let events = if args.offline {
        None
    } else {
        Some(enrich::spawn(catalog.names_in_order(), WikiClient::new()))
    };
    tui::run(catalog, renderer, events)
}

fn run_list(args: ListArgs) -> Result<()> {
    let records = db::load_records(&args.db)?;
    let mut renderer = TableRenderer::new();
    let mut catalog = Catalog::build(records, &mut renderer);
    if args.thumbs {
        let client = WikiClient::new();
        match enrich::run(&mut catalog, &mut renderer, &client) {
            Ok(summary) => tracing::info!(
                batches = summary.batches,
                thumbnails = summary.thumbnails,
                "enrichment complete"
            ),
            // Degraded operation: print with whatever thumbnails merged.
            Err(err) => tracing::warn!(error = %format!("{err:#}"), "enrichment halted early"),
        }
    }
    let query = args.query.unwrap_or_default();
    search::apply(&query, &mut catalog, &mut renderer);
    if args.json {
        println!("{}", renderer.to_json()?);
    } else {
        print!("{}", renderer.to_text());
    }
    Ok(())
}
