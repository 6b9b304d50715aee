//! `[content]` section configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigIssues;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content directory (relative to the config file).
    pub dir: PathBuf,
    /// Catalog file name inside `dir`.
    pub index: String,
    /// Feed file name inside `dir`.
    pub feed: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "content".into(),
            index: "index.json".into(),
            feed: "feed.xml".into(),
        }
    }
}

impl ContentConfig {
    pub(crate) fn normalize(&mut self, root: &Path) {
        if self.dir.is_relative() {
            self.dir = root.join(&self.dir);
        }
    }

    pub(crate) fn validate(&self, issues: &mut ConfigIssues) {
        if !self.dir.is_dir() {
            issues.error(
                "content.dir",
                format!("directory `{}` not found", self.dir.display()),
            );
        }
        for (field, name) in [("content.index", &self.index), ("content.feed", &self.feed)] {
            if name.is_empty() || name.contains(['/', '\\']) {
                issues.error(field, format!("`{name}` must be a plain file name"));
            }
        }
    }
}
