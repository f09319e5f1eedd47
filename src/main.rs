use anyhow::Context;
use api_client::{AnalyticsSource, FileSource, HttpSource};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use configuration::{Config, SourceKind, init_tracing, load_config};
use core_types::RangeSelector;
use engine::{InsightsEngine, RangeController, Selection};
use std::path::PathBuf;
use std::sync::Arc;

mod render;

/// The main entry point for the license insights dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&config.logging)?;

    let source = build_source(&config)?;
    let engine = InsightsEngine::new(source);

    match cli.command {
        Commands::Adoption(args) => handle_adoption(args, &config, engine, cli.json).await,
        Commands::Stats => {
            let stats = engine.load_stats().await?;
            emit(cli.json, &stats, || render::stats_table(&stats))
        }
        Commands::Inactive => {
            let breakdown = engine.load_breakdown().await?;
            emit(cli.json, &breakdown, || render::breakdown_table(&breakdown))
        }
        Commands::Overview => {
            let overview = engine.load_overview().await?;
            emit(cli.json, &overview, || {
                format!(
                    "{}\n{}",
                    render::stats_table(&overview.stats),
                    render::breakdown_table(&overview.breakdown)
                )
            })
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// License and software-asset analytics for the terminal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults to ./config.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override where snapshots are read from.
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,

    /// Override the snapshot server base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the snapshot directory for the file source.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print raw values as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(kind) = self.source {
            config.source.kind = kind;
        }
        if let Some(base_url) = &self.base_url {
            config.source.base_url = base_url.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.source.data_dir = data_dir.clone();
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compare app adoption in a range with the equally long range before it.
    Adoption(AdoptionArgs),
    /// Show the summary cards.
    Stats,
    /// Show inactive and abandoned seats in paid apps.
    Inactive,
    /// Show the summary cards and the seat table together.
    Overview,
}

#[derive(Parser)]
struct AdoptionArgs {
    /// The range to compare: "1 month", "3 months", "6 months" (or 1m, 3m, 6m).
    /// Defaults to `dashboard.default_range`.
    #[arg(long)]
    range: Option<RangeSelector>,

    /// The last day of the current window (format: YYYY-MM-DD). Defaults to
    /// today's UTC date.
    #[arg(long)]
    today: Option<NaiveDate>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn build_source(config: &Config) -> anyhow::Result<Arc<dyn AnalyticsSource>> {
    let source: Arc<dyn AnalyticsSource> = match config.source.kind {
        SourceKind::Http => {
            tracing::info!(base_url = %config.source.base_url, "Using HTTP snapshot source.");
            Arc::new(HttpSource::new(&config.source)?)
        }
        SourceKind::File => {
            let source = FileSource::new(&config.source);
            tracing::info!(data_dir = %source.data_dir().display(), "Using file snapshot source.");
            Arc::new(source)
        }
    };
    Ok(source)
}

async fn handle_adoption(
    args: AdoptionArgs,
    config: &Config,
    engine: InsightsEngine,
    json: bool,
) -> anyhow::Result<()> {
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    let controller = RangeController::new(engine, config.dashboard.default_range);

    let selection = match args.range {
        Some(range) => controller.select(range, today).await?,
        None => controller.refresh(today).await?,
    };

    match selection {
        Selection::Applied(outcome) => emit(json, &outcome, || render::adoption_table(&outcome)),
        // Only one selection is ever made here.
        Selection::Superseded => anyhow::bail!("Comparison was superseded by a newer selection"),
    }
}

fn emit<T: serde::Serialize>(
    json: bool,
    value: &T,
    table: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", table());
    }
    Ok(())
}
