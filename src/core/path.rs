//! Base path handling for article addresses.
//!
//! Every article lives at `{base}/{id}` except the first catalog entry,
//! which is served at the bare base path `{base}/` (landing-page alias).

use std::borrow::Cow;
use std::sync::Arc;

use percent_encoding::percent_decode_str;

/// Base path used when none (or only separators) is configured.
pub const DEFAULT_BASE_PATH: &str = "/blog";

/// Normalized base path.
///
/// Invariants:
/// - Always starts with `/`
/// - Never ends with `/`
/// - Contains no repeated separators
/// - Never empty (falls back to [`DEFAULT_BASE_PATH`])
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(Arc<str>);

impl BasePath {
    /// Normalize a configured base path.
    pub fn new(raw: &str) -> Self {
        let segments: Vec<&str> = raw
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.is_empty() {
            return Self(Arc::from(DEFAULT_BASE_PATH));
        }
        Self(Arc::from(format!("/{}", segments.join("/"))))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bare base path with trailing separator, the landing-page address.
    pub fn landing(&self) -> String {
        format!("{}/", self.0)
    }

    /// Concrete address for an article id.
    pub fn join(&self, id: &str) -> String {
        format!("{}/{}", self.0, id)
    }

    /// Check whether a location path addresses the landing page itself.
    ///
    /// `/`, the empty path and the base path (with or without trailing
    /// separators) all count as the root marker.
    pub fn is_root(&self, path: &str) -> bool {
        let trimmed = path.trim().trim_end_matches('/');
        trimmed.is_empty() || trimmed == self.as_str()
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PATH)
    }
}

impl std::fmt::Display for BasePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BasePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BasePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Percent-decode one address component, keeping the input on invalid UTF-8.
pub fn decode_component(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}
