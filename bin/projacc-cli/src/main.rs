//! projacc CLI - player data inspection
//!
//! Looks up players the same way the site build does: names from the
//! manifest, full records from lazily loaded chunks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use projacc_common::Config;
use projacc_players::{DataSource, PlayerLoader};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "projacc-cli")]
#[command(about = "Inspect projacc player data")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "projacc.toml")]
    config: PathBuf,

    /// Directory holding manifest.json and the chunk files
    #[arg(short, long, env = "PROJACC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List players with their display names
    List {
        /// Show at most this many players
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print a player's full record as JSON
    Show {
        /// Player ID
        player_id: String,
    },
    /// Print a player's display name
    Name {
        /// Player ID
        player_id: String,
    },
    /// Cross-check the manifest against the chunk files
    Audit,
}

/// Merge CLI args with the config file (CLI takes precedence)
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config file {}", args.config.display()))?;
    if let Some(dir) = &args.data_dir {
        config.data.data_dir.clone_from(dir);
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    Ok(config)
}

fn list<S: DataSource>(loader: &PlayerLoader<S>, limit: Option<usize>) {
    let players = loader.players();
    let shown = limit.unwrap_or(players.len());
    for (id, name) in players.iter().take(shown) {
        println!("{:<12} {name}", id.as_str());
    }
    if shown < players.len() {
        println!("... {} more", players.len() - shown);
    }
}

fn show<S: DataSource>(loader: &PlayerLoader<S>, player_id: &str) -> Result<()> {
    match loader.get_player(player_id) {
        Some(record) => {
            let json = serde_json::to_string_pretty(&record.to_value())
                .context("Failed to encode player record")?;
            println!("{json}");
        }
        None => println!("No record found for player '{player_id}'"),
    }
    Ok(())
}

fn audit<S: DataSource>(loader: &PlayerLoader<S>) {
    println!("Player Data Audit");
    println!("=================");
    println!("Manifest: {}", loader.manifest_status());

    let report = loader.audit();
    println!("Players:  {}/{} resolved", report.resolved, report.players);
    for id in &report.dangling {
        println!(
            "  missing record: {id} (expected in chunk {})",
            describe_chunk(loader, id.as_str())
        );
    }
    for (chunk, status) in &report.failed_chunks {
        println!("  chunk {chunk}: {status}");
    }
    for (chunk, id) in &report.unreferenced {
        println!("  unindexed record: {id} in chunk {chunk}");
    }

    let stats = loader.cache().stats();
    println!(
        "Chunks:   {} loaded, {} failed, {} records resident",
        loader.cache().len(),
        stats.failures.load(Ordering::Relaxed),
        loader.cache().record_count()
    );
    println!(
        "Cache:    {} hits, {} misses ({:.1}% hit ratio)",
        stats.hits.load(Ordering::Relaxed),
        stats.misses.load(Ordering::Relaxed),
        stats.hit_ratio() * 100.0
    );
    println!(
        "Status:   {}",
        if report.is_consistent() {
            "consistent"
        } else {
            "inconsistent"
        }
    );
}

fn describe_chunk<S: DataSource>(loader: &PlayerLoader<S>, player_id: &str) -> String {
    loader
        .manifest()
        .get(player_id)
        .map_or_else(|| "?".to_string(), |info| info.chunk.to_string())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    let config = resolve_config(&args)?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Data directory: {}", config.data.data_dir.display());
    let loader = PlayerLoader::open(&config.data);

    match args.command {
        Commands::List { limit } => list(&loader, limit),
        Commands::Show { player_id } => show(&loader, &player_id)?,
        Commands::Name { player_id } => println!("{}", loader.get_player_name(&player_id)),
        Commands::Audit => audit(&loader),
    }

    Ok(())
}
