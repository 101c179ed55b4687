pub mod alerts_loader;
pub mod columns;
pub mod health;
pub mod page_load;
pub mod request;
pub mod state_loader;

pub use crate::domain::model::{AlertsSummary, CheckerStates, DashboardState, LoadOutcome};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Storage};
pub use crate::utils::error::Result;
