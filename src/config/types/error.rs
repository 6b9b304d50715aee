//! Configuration error types.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Validation problems collected across sections.
#[derive(Debug, Default)]
pub struct ConfigIssues {
    errors: Vec<(&'static str, String)>,
}

impl ConfigIssues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with a config field (e.g. `site.base_path`).
    pub fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Convert to Result, folding every problem into one validation error.
    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let message = self
            .errors
            .iter()
            .map(|(field, message)| format!("\n{} {} {}", field.cyan(), "→".red(), message))
            .collect::<String>();
        Err(ConfigError::Validation(message))
    }
}
