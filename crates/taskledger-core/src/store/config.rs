//! Store configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`TaskStore`](super::TaskStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Look-ahead window, in days, for `upcoming_tasks_default`.
    pub upcoming_horizon_days: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            upcoming_horizon_days: 7,
        }
    }
}
