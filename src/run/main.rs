//! Batch export runner.
//!
//! Loads feature collections, filters and projects them, and submits one
//! export job per configured job. Jobs run one after another; a failed job
//! is logged and the rest still run.

mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use featex::export::{DirectoryExporter, Exporter, RemoteExporter};
use featex::jobs::{builtin_jobs, run_job, JobSpec};
use featex::source::{DirectorySource, RemoteSource, Source};

use crate::config::{Config, DestinationConfig, SourceConfig};

#[derive(Parser, Debug)]
#[command(name = "featex")]
#[command(about = "Filter geospatial feature collections and export them as GeoJSON or CSV")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read datasets from this directory
    #[arg(long, conflicts_with = "source_url")]
    source_dir: Option<PathBuf>,

    /// Read datasets from this feature service
    #[arg(long)]
    source_url: Option<String>,

    /// Write exports into this directory
    #[arg(long, conflicts_with = "export_url")]
    out_dir: Option<PathBuf>,

    /// Submit exports to this export service
    #[arg(long)]
    export_url: Option<String>,

    /// Bearer token for remote services
    #[arg(long, env = "FEATEX_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Timeout for each remote request, in seconds
    #[arg(long, default_value = "120")]
    timeout_secs: u64,

    /// Run only the named job (repeatable)
    #[arg(short, long = "job")]
    jobs: Vec<String>,

    /// List configured jobs and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &args);

    let jobs = select_jobs(&config, &args.jobs)?;

    if args.list {
        for job in &jobs {
            println!("{}\t{}\t{}", job.name, job.dataset, job.format);
        }
        return Ok(());
    }

    let timeout = Duration::from_secs(args.timeout_secs);
    let source = build_source(&config.source, args.token.clone(), timeout)?;
    let exporter = build_exporter(&config.destination, args.token.clone(), timeout)?;

    info!("featex export run");
    info!("Source: {}", source.describe());
    info!("Destination: {}", exporter.describe());

    let mut failed = 0usize;
    for job in &jobs {
        match run_job(&source, &exporter, job).await {
            Ok(handle) => info!("{} -> job {} ({:?})", job.name, handle.id, handle.state),
            Err(e) => {
                error!("{} failed: {}", job.name, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} jobs failed", failed, jobs.len());
    }

    info!("Submitted {} export jobs", jobs.len());
    Ok(())
}

/// CLI flags win over the config file
fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(path) = &args.source_dir {
        config.source = SourceConfig::Directory { path: path.clone() };
    } else if let Some(url) = &args.source_url {
        config.source = SourceConfig::Remote { url: url.clone() };
    }

    if let Some(path) = &args.out_dir {
        config.destination = DestinationConfig::Directory { path: path.clone() };
    } else if let Some(url) = &args.export_url {
        config.destination = DestinationConfig::Remote { url: url.clone() };
    }
}

/// Configured jobs (or the built-in ones), narrowed to `names` if given
fn select_jobs(config: &Config, names: &[String]) -> Result<Vec<JobSpec>> {
    let all = if config.jobs.is_empty() {
        builtin_jobs()
    } else {
        config.jobs.clone()
    };

    if names.is_empty() {
        return Ok(all);
    }

    names
        .iter()
        .map(|name| {
            all.iter()
                .find(|job| &job.name == name)
                .cloned()
                .with_context(|| format!("No job named '{}'", name))
        })
        .collect()
}

fn build_source(
    config: &SourceConfig,
    token: Option<String>,
    timeout: Duration,
) -> Result<Source> {
    Ok(match config {
        SourceConfig::Directory { path } => Source::Directory(DirectorySource::new(path)),
        SourceConfig::Remote { url } => Source::Remote(
            RemoteSource::new(url, token, timeout).context("Failed to set up feature source")?,
        ),
    })
}

fn build_exporter(
    config: &DestinationConfig,
    token: Option<String>,
    timeout: Duration,
) -> Result<Exporter> {
    Ok(match config {
        DestinationConfig::Directory { path } => {
            Exporter::Directory(DirectoryExporter::new(path))
        }
        DestinationConfig::Remote { url } => Exporter::Remote(
            RemoteExporter::new(url, token, timeout).context("Failed to set up export service")?,
        ),
    })
}
