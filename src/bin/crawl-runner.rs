use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use log_crawler::launcher::{launch, LaunchOptions};
use log_crawler::observability::logging;

#[derive(Parser)]
#[command(name = "crawl-runner")]
#[command(about = "Run the log crawler for a module and append its output to result/<module>.log", long_about = None)]
struct Cli {
    /// Module to crawl
    module: String,

    /// Directory for per-module log files
    #[arg(long, default_value = "result")]
    result_dir: PathBuf,

    /// Crawler binary; defaults to `log-crawler` next to this executable
    #[arg(long)]
    crawler_bin: Option<PathBuf>,

    /// Extra arguments forwarded to the crawler after `--`
    #[arg(last = true)]
    crawler_args: Vec<OsString>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging("info");

    let crawler_bin = match cli.crawler_bin {
        Some(path) => path,
        None => sibling_crawler()?,
    };

    let options = LaunchOptions {
        module: cli.module,
        result_dir: cli.result_dir,
        crawler_bin,
        extra_args: cli.crawler_args,
    };

    match launch(&options).await {
        Ok(log_path) => {
            tracing::info!(log_file = %log_path.display(), "Crawler finished");
            Ok(())
        }
        Err(e) => {
            eprintln!("Error running crawler: {}", e);
            std::process::exit(1);
        }
    }
}

fn sibling_crawler() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let name = format!("log-crawler{}", std::env::consts::EXE_SUFFIX);
    Ok(exe.with_file_name(name))
}
