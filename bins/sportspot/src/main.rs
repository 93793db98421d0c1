//! sportspot - find sports facilities near you
//!
//! Ranks places by distance from a fixed position, filters them by text and
//! radius, and manages favorites and reviews.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use sportspot_core::config::Config;
use sportspot_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;
mod output;

use commands::{favorites, maps, nearby, reviews, show};
use context::{AppContext, PositionArgs, SourceArgs};

/// Find sports facilities near you
#[derive(Parser)]
#[command(name = "sportspot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./sportspot.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List places, closest first
    Nearby {
        #[command(flatten)]
        position: PositionArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Only places whose name or category contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only places within the configured nearby radius
        #[arg(short, long)]
        nearby: bool,

        /// Maximum number of places to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one place
    Show {
        /// Place id
        id: String,

        #[command(flatten)]
        position: PositionArgs,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage saved places
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Read and write place reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewsAction,
    },

    /// Print a maps link for a place
    Maps {
        /// Place id
        id: String,

        #[command(flatten)]
        position: PositionArgs,

        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List saved places
    List,

    /// Save a place, or unsave it if already saved
    Toggle {
        /// Place id
        id: String,

        #[command(flatten)]
        position: PositionArgs,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Unsave a place
    Remove {
        /// Place id
        id: String,
    },
}

#[derive(Subcommand)]
enum ReviewsAction {
    /// Reviews of a place, newest first
    List {
        /// Place id
        place: String,
    },

    /// Review a place
    Add {
        /// Place id
        place: String,
        /// Stars, 1 to 5
        rating: u8,
        /// Review text
        comment: String,
    },

    /// Change a review
    Update {
        /// Review id
        id: String,
        /// Stars, 1 to 5
        rating: u8,
        /// Review text
        comment: String,
    },

    /// Delete a review
    Delete {
        /// Review id
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let log_level = if cli.verbose {
        "sportspot=debug,sportspot_places=debug,sportspot_api_client=debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    sportspot_telemetry::init_with_config(TelemetryConfig {
        log_level,
        json: config.schema.logging.json,
        show_target: cli.verbose,
    })?;
    if let Some(ref path) = config.path {
        tracing::debug!(path = %path.display(), "loaded configuration");
    }

    let ctx = AppContext::new(config, cli.json);

    let result = match cli.command {
        Commands::Nearby { position, source, search, nearby, limit } => {
            nearby::run(&ctx, &position, &source, nearby::Filters { search, nearby, limit }).await
        }

        Commands::Show { id, position, source } => show::run(&ctx, &id, &position, &source).await,

        Commands::Favorites { action } => match action {
            FavoritesAction::List => favorites::list(&ctx).await,
            FavoritesAction::Toggle { id, position, source } => {
                favorites::toggle(&ctx, &id, &position, &source).await
            }
            FavoritesAction::Remove { id } => favorites::remove(&ctx, &id).await,
        },

        Commands::Reviews { action } => match action {
            ReviewsAction::List { place } => reviews::list(&ctx, &place).await,
            ReviewsAction::Add { place, rating, comment } => {
                reviews::add(&ctx, &place, rating, &comment).await
            }
            ReviewsAction::Update { id, rating, comment } => {
                reviews::update(&ctx, &id, rating, &comment).await
            }
            ReviewsAction::Delete { id } => reviews::delete(&ctx, &id).await,
        },

        Commands::Maps { id, position, source } => maps::run(&ctx, &id, &position, &source).await,
    };

    tracing::debug!(metrics = %sportspot_telemetry::metrics().export_json(), "run finished");
    result
}
