//! Reader configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site], [content], [prefetch]
//! ├── types/         # ConfigError, global handle
//! └── mod.rs         # ReaderConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[site]`     | Title, public URL, base path                   |
//! | `[content]`  | Content directory, index and feed file names   |
//! | `[prefetch]` | Background fetch of neighbouring articles      |
//!
//! The file is optional: without one, defaults apply and paths resolve
//! against the current directory.

pub mod section;
pub mod types;

pub use section::{ContentConfig, PrefetchConfig, SiteConfig};
pub use types::{ConfigError, ConfigIssues, cfg, init_config};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::coordinator::CoordinatorOptions;
use crate::core::BasePath;
use crate::log;
use crate::transport::FsTransport;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Absolute path to the config file, empty when none was found
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths resolve against
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub prefetch: PrefetchConfig,
}

impl ReaderConfig {
    /// Load configuration, searching upward from cwd, then apply CLI flags.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cwd, &cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                crate::debug!("config"; "{} not found, using defaults", cli.config.display());
                Self::default()
            }
        };

        config.finalize(cli, &cwd);
        config.validate()?;
        Ok(config)
    }

    /// Resolve paths and apply command-line overrides.
    fn finalize(&mut self, cli: &Cli, cwd: &Path) {
        self.root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());

        self.site.sync_base_path_from_url();
        self.apply_cli(cli);
        self.content.normalize(&self.root);
    }

    /// CLI flags override config values.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref dir) = cli.content {
            self.content.dir = dir.clone();
        }
        if let Some(ref base_path) = cli.base_path {
            self.site.base_path = base_path.clone();
        }
        if cli.no_prefetch {
            self.prefetch.enable = false;
        }
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = ConfigIssues::new();
        self.site.validate(&mut issues);
        self.content.validate(&mut issues);
        issues.into_result()
    }

    // ========================================================================
    // accessors
    // ========================================================================

    pub fn base(&self) -> BasePath {
        self.site.base()
    }

    /// Filesystem transport over the content directory.
    pub fn transport(&self) -> FsTransport {
        FsTransport::new(&self.content.dir)
            .with_index(&self.content.index)
            .with_feed(&self.content.feed)
    }

    pub fn coordinator_options(&self) -> CoordinatorOptions {
        CoordinatorOptions {
            base: self.base(),
            prefetch: self.prefetch.enable,
        }
    }
}

/// Find config file by searching upward from `start`.
///
/// ```text
/// /home/user/notes/content/   ← start
/// /home/user/notes/folio.toml ← found!
/// ```
fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }
    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ReaderConfig {
    let (parsed, ignored) = ReaderConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("folio").chain(args.iter().copied()))
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(ReaderConfig::parse_with_ignored("[site\ntitle = \"Notes\"").is_err());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Notes\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = ReaderConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.site.title, "Notes");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_find_config_file_upward() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("content/posts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("folio.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("folio.toml")).unwrap();
        assert_eq!(found, dir.path().join("folio.toml"));
        assert!(find_config_file(&nested, Path::new("missing.toml")).is_none());
    }

    #[test]
    fn test_finalize_applies_cli_overrides() {
        let mut config = test_parse_config(
            "[site]\nurl = \"https://example.com/notes\"\n[prefetch]\nenable = true",
        );
        config.config_path = PathBuf::from("/site/folio.toml");
        config.finalize(
            &cli(&["--content", "posts", "--no-prefetch", "list"]),
            Path::new("/cwd"),
        );

        assert_eq!(config.root, PathBuf::from("/site"));
        assert_eq!(config.content.dir, PathBuf::from("/site/posts"));
        assert_eq!(config.base().as_str(), "/notes");
        assert!(!config.prefetch.enable);
    }

    #[test]
    fn test_cli_base_path_wins_over_url() {
        let mut config = test_parse_config("[site]\nurl = \"https://example.com/notes\"");
        config.finalize(&cli(&["--base-path", "/journal", "list"]), Path::new("/cwd"));
        assert_eq!(config.base().as_str(), "/journal");
        assert_eq!(config.root, PathBuf::from("/cwd"));
    }

    #[test]
    fn test_validate_missing_content_dir() {
        let mut config = ReaderConfig::default();
        config.finalize(&cli(&["list"]), Path::new("/nonexistent-folio-root"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_transport_and_options() {
        let config = test_parse_config("[prefetch]\nenable = false");
        let options = config.coordinator_options();
        assert!(!options.prefetch);
        assert_eq!(options.base.as_str(), "/blog");
        assert_eq!(config.transport().dir(), Path::new("content"));
    }
}
