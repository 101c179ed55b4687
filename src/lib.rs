pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod output;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpFetcher, storage::LocalStorage};
pub use config::toml_config::TomlConfig;
pub use crate::core::{health::HealthCheck, page_load::PageLoader};
pub use domain::model::{DashboardState, LoadOutcome};
pub use utils::error::{DashError, Result};
