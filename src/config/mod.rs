//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! data/<module>.json (or .toml)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → CrawlerConfig (validated, immutable)
//!     → handed to the orchestrator for a single run
//! ```
//!
//! # Design Decisions
//! - Config is loaded once per run; there is no reload
//! - Run tuning fields have defaults so minimal documents stay valid
//! - Validation separates syntactic (serde) from semantic checks
//! - Any load failure is fatal before the first service runs

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, module_config_path, ConfigError};
pub use schema::{CrawlerConfig, RunConfig, ServiceSpec};
