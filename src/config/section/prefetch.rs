//! `[prefetch]` section configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefetchConfig {
    /// Fetch neighbouring articles in the background after each load.
    pub enable: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}
