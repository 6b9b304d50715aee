//! `[site]` section configuration.

use serde::{Deserialize, Serialize};

use crate::config::ConfigIssues;
use crate::core::{BasePath, DEFAULT_BASE_PATH};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, used when an article has none.
    pub title: String,
    /// Public URL. Its path component, when non-empty, becomes `base_path`.
    pub url: Option<String>,
    /// Path prefix under which articles are addressed.
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "folio".into(),
            url: None,
            base_path: DEFAULT_BASE_PATH.into(),
        }
    }
}

impl SiteConfig {
    /// Normalized base path.
    pub fn base(&self) -> BasePath {
        BasePath::new(&self.base_path)
    }

    /// Derive `base_path` from `url`.
    pub(crate) fn sync_base_path_from_url(&mut self) {
        if let Some(ref url) = self.url
            && let Some(path) = extract_url_path(url)
            && !path.is_empty()
        {
            self.base_path = format!("/{path}");
        }
    }

    pub(crate) fn validate(&self, issues: &mut ConfigIssues) {
        if !self.base_path.starts_with('/') {
            issues.error(
                "site.base_path",
                format!("`{}` must start with `/`", self.base_path),
            );
        }
        if let Some(ref url) = self.url
            && extract_url_path(url).is_none()
        {
            issues.error("site.url", format!("`{url}` is not a valid URL"));
        }
    }
}

/// Path component of a URL without surrounding slashes.
///
/// ```ignore
/// extract_url_path("https://example.github.io/notes/") -> Some("notes")
/// extract_url_path("https://example.com")              -> Some("")
/// extract_url_path("invalid")                          -> None
/// ```
fn extract_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    Some(parsed.path().trim_matches('/').to_string())
}
