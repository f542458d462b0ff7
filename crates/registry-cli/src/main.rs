//! registry-cli: run one company analysis against a JSON registry snapshot.
//!
//! Usage:
//!   registry-cli --data snapshot.json risk 12
//!   registry-cli --data snapshot.json watchlist 3
//!   registry-cli --data snapshot.json financial 12
//!   registry-cli --data snapshot.json compare 12,14,20
//!   registry-cli --data snapshot.json benchmark 12
//!
//! The dataset path can also come from REGISTRY_DATA_PATH. Results are
//! printed as JSON on stdout, logs go to stderr.

mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use config::RegistryConfig;
use registry_core::RegistryError;
use registry_service::{Dataset, InMemoryStore, RegistryService};

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Risk(i64),
    Watchlist(i64),
    Financial(i64),
    Compare(String),
    Benchmark(i64),
}

#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    data_path: Option<PathBuf>,
    command: Command,
}

fn parse_id(name: &str, value: Option<&String>) -> Result<i64> {
    let raw = value.ok_or_else(|| anyhow!("{name} requires an id"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("invalid id for {name}: {raw}"))
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut data_path = None;
    let mut positional: Vec<&String> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--data" {
            let path = iter.next().ok_or_else(|| anyhow!("--data requires a path"))?;
            data_path = Some(PathBuf::from(path));
        } else {
            positional.push(arg);
        }
    }

    let Some(name) = positional.first() else {
        bail!("missing command");
    };
    let value = positional.get(1).copied();
    let command = match name.as_str() {
        "risk" => Command::Risk(parse_id("risk", value)?),
        "watchlist" => Command::Watchlist(parse_id("watchlist", value)?),
        "financial" => Command::Financial(parse_id("financial", value)?),
        "benchmark" => Command::Benchmark(parse_id("benchmark", value)?),
        // id validation belongs to the service so its error messages apply
        "compare" => Command::Compare(
            value
                .cloned()
                .ok_or_else(|| anyhow!("compare requires a comma-separated id list"))?,
        ),
        other => bail!("unknown command: {other}"),
    };

    Ok(CliArgs { data_path, command })
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse dataset {}", path.display()))
}

async fn run(service: &RegistryService, command: &Command) -> Result<serde_json::Value, RegistryError> {
    let value = match command {
        Command::Risk(id) => serde_json::to_value(service.risk_analysis(*id).await?),
        Command::Watchlist(user_id) => serde_json::to_value(service.watchlist_overview(*user_id).await?),
        Command::Financial(id) => serde_json::to_value(service.financial_analysis(*id).await?),
        Command::Compare(ids) => serde_json::to_value(service.compare(ids).await?),
        Command::Benchmark(id) => serde_json::to_value(service.benchmark(*id).await?),
    };
    value.map_err(|e| RegistryError::Storage(format!("result serialization failed: {e}")))
}

fn init_tracing(json_logging: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "registry_cli=info,registry_service=info".into());
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  registry-cli [--data PATH] risk <company_id>");
    eprintln!("  registry-cli [--data PATH] watchlist <user_id>");
    eprintln!("  registry-cli [--data PATH] financial <company_id>");
    eprintln!("  registry-cli [--data PATH] compare <id,id[,...]>   (2-5 companies)");
    eprintln!("  registry-cli [--data PATH] benchmark <company_id>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  REGISTRY_DATA_PATH        dataset used when --data is absent");
    eprintln!("  REGISTRY_EVALUATION_DATE  fixed YYYY-MM-DD date for the company-age rule");
    eprintln!("  RUST_LOG_FORMAT=json      JSON log output");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = RegistryConfig::from_env()?;
    init_tracing(config.json_logging);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            std::process::exit(1);
        }
    };

    let data_path = cli
        .data_path
        .or(config.data_path.clone())
        .context("no dataset given: pass --data or set REGISTRY_DATA_PATH")?;
    let dataset = load_dataset(&data_path)?;
    tracing::info!(
        path = %data_path.display(),
        companies = dataset.companies.len(),
        reports = dataset.reports.len(),
        "Dataset loaded"
    );

    let mut service = RegistryService::new(Arc::new(InMemoryStore::from_dataset(dataset)));
    if let Some(date) = config.evaluation_date {
        tracing::info!(%date, "Using fixed evaluation date");
        service = service.with_evaluation_date(date);
    }

    match run(&service, &cli.command).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!(status = e.status_code(), "{e}");
            eprintln!("{e}");
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
