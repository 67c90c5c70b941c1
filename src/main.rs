//! Log crawler.
//!
//! Calls every configured service of a module in order, times each call and
//! reconciles the client timing with the proxy timing headers of the response.
//!
//! ```text
//!   data/<module>.json
//!          │
//!          ▼
//!   ┌──────────────┐   request    ┌─────────────────┐
//!   │ orchestrator │─────────────▶│ downstream/proxy│
//!   │              │◀─────────────│                 │
//!   └──────┬───────┘  + timing    └─────────────────┘
//!          │           headers
//!          ▼
//!   stdout: client-start, client-end, proxy-start, proxy-end, [extended log]
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::Instrument;
use uuid::Uuid;

use log_crawler::config::{load_config, module_config_path, RunConfig};
use log_crawler::observability::{logging, metrics};
use log_crawler::Orchestrator;

#[derive(Parser)]
#[command(name = "log-crawler")]
#[command(about = "Run a module's service list and emit correlated client/proxy timing logs", long_about = None)]
struct Cli {
    /// Module name; the config is read from <DATA_DIR>/<MODULE>.json
    module: String,

    /// Directory holding module configs
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Explicit config file (.json or .toml), overrides the module lookup
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pause between services in milliseconds
    #[arg(long)]
    pacing_ms: Option<u64>,

    /// Connect timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    connect_timeout_secs: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Do not fetch the extended server-side log
    #[arg(long)]
    no_extended_log: bool,

    /// Log level for diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write a Prometheus text snapshot of run metrics to this file
    #[arg(long)]
    metrics_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    tracing::info!(module = %cli.module, "Starting log crawler");

    let metrics_handle = match &cli.metrics_out {
        Some(_) => Some(metrics::install_recorder()?),
        None => None,
    };

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => module_config_path(&cli.data_dir, &cli.module)?,
    };

    let mut config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %config_path.display(), error = %e, "Error reading config");
            return Err(e.into());
        }
    };

    apply_overrides(&cli, &mut config.run);

    tracing::info!(
        url_prefix = %config.url_prefix,
        services = config.services.len(),
        pacing_delay_ms = config.run.pacing_delay_ms,
        connect_timeout_secs = config.run.connect_timeout_secs,
        request_timeout_secs = config.run.request_timeout_secs,
        "Configuration loaded"
    );

    let span = tracing::info_span!("crawl", run_id = %Uuid::new_v4(), module = %cli.module);
    let mut orchestrator = Orchestrator::new(config, io::stdout())?;
    let report = orchestrator.run().instrument(span).await?;

    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        skipped = report.skipped(),
        "Run complete"
    );

    if let (Some(path), Some(handle)) = (&cli.metrics_out, metrics_handle) {
        fs::write(path, handle.render())?;
        tracing::info!(path = %path.display(), "Metrics snapshot written");
    }

    Ok(())
}

/// Apply command-line overrides on top of the file's run settings.
fn apply_overrides(cli: &Cli, run: &mut RunConfig) {
    if let Some(pacing_ms) = cli.pacing_ms {
        run.pacing_delay_ms = pacing_ms;
    }
    if let Some(connect_timeout_secs) = cli.connect_timeout_secs {
        run.connect_timeout_secs = connect_timeout_secs;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        run.request_timeout_secs = timeout_secs;
    }
    if cli.no_extended_log {
        run.fetch_extended_log = false;
    }
}
