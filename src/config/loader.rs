//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::CrawlerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    Toml(toml::de::Error),
    InvalidModule(String),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config file {}: {}", path.display(), source)
            }
            ConfigError::Json(e) => write!(f, "failed to parse JSON: {}", e),
            ConfigError::Toml(e) => write!(f, "failed to parse TOML: {}", e),
            ConfigError::InvalidModule(name) => {
                write!(f, "invalid module name '{}': must be a single path component", name)
            }
            ConfigError::Validation(errors) => {
                write!(f, "validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json(e) => Some(e),
            ConfigError::Toml(e) => Some(e),
            _ => None,
        }
    }
}

/// Returns true when `module` can be used as a file stem inside a directory.
pub fn is_valid_module_name(module: &str) -> bool {
    !module.is_empty()
        && module != "."
        && module != ".."
        && !module.contains(['/', '\\'])
}

/// Default config location for a module: `<data_dir>/<module>.json`.
pub fn module_config_path(data_dir: &Path, module: &str) -> Result<PathBuf, ConfigError> {
    if !is_valid_module_name(module) {
        return Err(ConfigError::InvalidModule(module.to_string()));
    }
    Ok(data_dir.join(format!("{module}.json")))
}

/// Load and validate configuration. `.toml` files are parsed as TOML, anything else as JSON.
pub fn load_config(path: &Path) -> Result<CrawlerConfig, ConfigError> {
    tracing::info!(path = %path.display(), "Reading config file");

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let config: CrawlerConfig = if is_toml {
        toml::from_str(&content).map_err(ConfigError::Toml)?
    } else {
        serde_json::from_str(&content).map_err(ConfigError::Json)?
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
