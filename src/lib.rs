//! Request orchestration and log correlation for performance tuning runs.

pub mod config;
pub mod correlation;
pub mod dispatch;
pub mod launcher;
pub mod observability;
pub mod orchestrator;

pub use config::schema::CrawlerConfig;
pub use orchestrator::{Orchestrator, RunReport};
