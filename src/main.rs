use analytics::{parse_sales_data, SalesAggregator, ScoringOptions};
use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{load_config_from, Config, OutputFormat};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;

/// The main entry point for the seller report application.
fn main() -> anyhow::Result<()> {
    // Load SALES_* overrides from a .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &mut config)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Builds a seller performance report from raw sales records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a sales data document into a ranked seller report.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// The JSON document with `sellers`, `products` and `purchase_records`.
    #[arg(long, short)]
    input: PathBuf,

    /// Output format; overrides `report.output` from the configuration.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Number of best-selling products listed per seller.
    #[arg(long)]
    top: Option<usize>,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Handles loading, aggregation and rendering of the report.
fn handle_report(args: ReportArgs, config: &mut Config) -> anyhow::Result<()> {
    if let Some(top) = args.top {
        config
            .override_top_products_limit(top)
            .context("Invalid --top value")?;
    }

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read sales data from {}", args.input.display()))?;
    let data = parse_sales_data(&raw)?;

    let aggregator = SalesAggregator::from_settings(&config.report);
    let options = ScoringOptions::from_bonus_tiers(config.bonus.clone());

    let rows = aggregator.run(&data, &options)?;
    info!(sellers = rows.len(), input = %args.input.display(), "report generated");

    match args.format.unwrap_or(config.report.output) {
        OutputFormat::Table => println!("{}", render::report_table(&rows)),
        OutputFormat::Json => println!("{}", render::report_json(&rows)?),
    }

    Ok(())
}
