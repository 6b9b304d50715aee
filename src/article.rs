//! Article record as delivered by the transport.

use serde::{Deserialize, Serialize};

/// A single article. Immutable once stored in the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Markdown source of the body.
    #[serde(default, alias = "body")]
    pub markdown: String,
}

impl Article {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        markdown: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            markdown: markdown.into(),
        }
    }

    /// Title if non-blank.
    pub fn title(&self) -> Option<&str> {
        Some(self.title.as_str()).filter(|t| !t.trim().is_empty())
    }
}
