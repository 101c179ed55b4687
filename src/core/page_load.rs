use crate::core::alerts_loader::AlertsLoader;
use crate::core::state_loader::StateLoader;
use crate::domain::model::DashboardState;
use crate::domain::ports::{ConfigProvider, Fetcher};
use crate::utils::error::Result;
use chrono::Utc;
use std::sync::Arc;

/// Page-load entry point: checker states first, then alerts.
pub struct PageLoader<F: Fetcher> {
    state_loader: StateLoader<F>,
    alerts_loader: AlertsLoader<F>,
}

impl<F: Fetcher> PageLoader<F> {
    pub fn new(state_loader: StateLoader<F>, alerts_loader: AlertsLoader<F>) -> Self {
        Self {
            state_loader,
            alerts_loader,
        }
    }

    pub fn from_config<C: ConfigProvider>(fetcher: Arc<F>, config: &C) -> Self {
        Self::new(
            StateLoader::new(fetcher.clone(), config.checker_states_path()),
            AlertsLoader::new(fetcher, config.state_path()),
        )
    }

    /// Runs both loads in sequence. A failed request leaves its field
    /// unloaded without stopping the other; a malformed body aborts the run.
    pub async fn run(&self) -> Result<DashboardState> {
        tracing::info!("Loading checker states...");
        let checker_states = self.state_loader.load().await?;
        if let Some(states) = checker_states.loaded() {
            tracing::info!("Loaded {} checker groups", states.len());
        }

        tracing::info!("Loading alerts...");
        let alerts = self.alerts_loader.load().await?;
        if let Some(count) = alerts.loaded().and_then(|a| a.count()) {
            tracing::info!("Loaded {} alerts", count);
        }

        let state = DashboardState {
            checker_states,
            alerts,
            loaded_at: Utc::now(),
        };
        if state.is_empty() {
            tracing::warn!("Neither checker states nor alerts could be loaded");
        }

        Ok(state)
    }
}
