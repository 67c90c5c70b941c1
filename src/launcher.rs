//! Crawler process launcher.
//!
//! # Responsibilities
//! - Create the result directory
//! - Open `<result_dir>/<module>.log` in append mode
//! - Run the crawler binary for the module with stdout redirected to that file
//! - Report setup and child failures as errors
//!
//! # Design Decisions
//! - stderr is inherited so diagnostics stay on the operator's terminal
//! - The log file is never truncated; runs accumulate

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;

use crate::config::loader::is_valid_module_name;

/// Errors raised while launching a crawler run.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("invalid module name '{0}': must be a single path component")]
    InvalidModule(String),

    #[error("failed to create result directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: std::io::Error },

    #[error("failed to open log file {}: {source}", .path.display())]
    OpenLog { path: PathBuf, source: std::io::Error },

    #[error("failed to start {}: {source}", .program.display())]
    Spawn { program: PathBuf, source: std::io::Error },

    #[error("crawler exited with {0}")]
    Failed(ExitStatus),
}

/// What to run and where its output goes.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub module: String,
    pub result_dir: PathBuf,
    pub crawler_bin: PathBuf,
    /// Extra arguments passed after the module name.
    pub extra_args: Vec<OsString>,
}

/// `<result_dir>/<module>.log`
pub fn log_file_path(result_dir: &Path, module: &str) -> PathBuf {
    result_dir.join(format!("{module}.log"))
}

/// Create the result directory if needed and open the module log for appending.
pub fn open_log_file(result_dir: &Path, module: &str) -> Result<(PathBuf, File), LaunchError> {
    if !is_valid_module_name(module) {
        return Err(LaunchError::InvalidModule(module.to_string()));
    }

    fs::create_dir_all(result_dir).map_err(|source| LaunchError::CreateDir {
        path: result_dir.to_path_buf(),
        source,
    })?;

    let path = log_file_path(result_dir, module);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LaunchError::OpenLog {
            path: path.clone(),
            source,
        })?;

    Ok((path, file))
}

/// Run the crawler for one module and wait for it to finish.
pub async fn launch(options: &LaunchOptions) -> Result<PathBuf, LaunchError> {
    let (log_path, file) = open_log_file(&options.result_dir, &options.module)?;

    tracing::info!(
        module = %options.module,
        crawler = %options.crawler_bin.display(),
        log_file = %log_path.display(),
        "Launching crawler"
    );

    let status = Command::new(&options.crawler_bin)
        .arg(&options.module)
        .args(&options.extra_args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(file))
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|source| LaunchError::Spawn {
            program: options.crawler_bin.clone(),
            source,
        })?;

    if !status.success() {
        return Err(LaunchError::Failed(status));
    }

    Ok(log_path)
}
