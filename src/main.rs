use clap::{Parser, ValueEnum};
use lume_compat::config::Settings;
use lume_compat::core::{Matcher, SelectionOrder};
use lume_compat::error::{LoadError, MatchError};
use lume_compat::services::{build_report, load_profiles, to_json};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Errors that abort a run
#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "lume-compat", version, about = "Rank profile pairs by question-based compatibility")]
struct Cli {
    /// Input document with a "profiles" list (default: input.json)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of pairs to report (default: 10)
    #[arg(short = 'k', long = "matches")]
    matches: Option<usize>,

    /// Which end of the score range to report
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Score pairs on all cores
    #[arg(long)]
    parallel: bool,

    /// Drop pairs with no possible points or no common questions instead of failing
    #[arg(long)]
    skip_unscorable: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Path to a config file (default: config/default.toml, config/local.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Lowest,
    Highest,
}

impl From<OrderArg> for SelectionOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Lowest => SelectionOrder::Lowest,
            OrderArg::Highest => SelectionOrder::Highest,
        }
    }
}

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    // Initialize logging; env vars win over the config file
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(logging.level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(logging.format);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    let settings = settings.unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = run(cli, settings) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, settings: Settings) -> Result<(), RunError> {
    // CLI flags override config values
    let input = cli.input.unwrap_or(settings.input.path);
    let k = cli.matches.unwrap_or(settings.matching.match_count);

    let mut options = settings.matching.matcher_options();
    if let Some(order) = cli.order {
        options.order = order.into();
    }
    options.parallel |= cli.parallel;
    options.skip_unscorable |= cli.skip_unscorable;

    info!("Matcher initialized with options: {:?}, k = {}", options, k);

    let loaded = load_profiles(&input)?;
    if !loaded.issues.is_empty() {
        warn!(
            "{} answer records had defects; continuing with the rest",
            loaded.issues.len()
        );
    }

    let matcher = Matcher::new(options);
    let selected = matcher.rank(&loaded.profiles, k)?;

    let report = build_report(&selected);
    println!("{}", to_json(&report, cli.pretty)?);

    Ok(())
}
