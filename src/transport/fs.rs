//! Filesystem-backed transport.
//!
//! # Layout
//!
//! ```text
//! content/
//! ├── index.json     # ["first", "second"] or {"ids": [...], "primed": [...]}
//! ├── first.json     # {"id": "first", "title": "...", "markdown": "..."}
//! ├── second.md      # plain markdown, title = first heading
//! └── feed.xml       # optional RSS feed
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{CatalogResponse, Transport};
use crate::article::Article;
use crate::error::TransportError;

const LIST_FAILED: &str = "failed to fetch article list";
const LIST_EMPTY: &str = "no articles found";
const ARTICLE_FAILED: &str = "failed to fetch article";
const FEED_FAILED: &str = "failed to fetch feed";

/// Index file contents.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndexFile {
    Ids(Vec<String>),
    Full {
        ids: Vec<String>,
        #[serde(default)]
        primed: Vec<Article>,
    },
}

/// Reads articles from a content directory.
#[derive(Debug, Clone)]
pub struct FsTransport {
    dir: PathBuf,
    index: String,
    feed: String,
}

impl FsTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            index: "index.json".to_string(),
            feed: "feed.xml".to_string(),
        }
    }

    /// Override the index file name.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// Override the feed file name.
    pub fn with_feed(mut self, feed: impl Into<String>) -> Self {
        self.feed = feed.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read(&self, name: &str) -> io::Result<String> {
        tokio::fs::read_to_string(self.dir.join(name)).await
    }

    async fn read_article(&self, id: &str) -> Result<Article, TransportError> {
        match self.read(&format!("{id}.json")).await {
            Ok(content) => {
                let mut article: Article = serde_json::from_str(&content).map_err(|e| {
                    crate::debug!("transport"; "{}.json: {}", id, e);
                    TransportError::new(ARTICLE_FAILED)
                })?;
                if article.id.is_empty() {
                    article.id = id.to_string();
                }
                Ok(article)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let markdown = self.read(&format!("{id}.md")).await.map_err(|e| {
                    crate::debug!("transport"; "{}: {}", id, e);
                    TransportError::new(ARTICLE_FAILED)
                })?;
                let title = first_heading(&markdown).unwrap_or_default();
                Ok(Article::new(id, title, markdown))
            }
            Err(e) => {
                crate::debug!("transport"; "{}.json: {}", id, e);
                Err(TransportError::new(ARTICLE_FAILED))
            }
        }
    }
}

impl Transport for FsTransport {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, TransportError> {
        let content = self.read(&self.index).await.map_err(|e| {
            crate::debug!("transport"; "{}: {}", self.index, e);
            TransportError::new(LIST_FAILED)
        })?;
        parse_index(&content)
    }

    async fn fetch_article(&self, id: &str) -> Result<Article, TransportError> {
        if !is_safe_id(id) {
            crate::debug!("transport"; "rejected article id `{}`", id);
            return Err(TransportError::new(ARTICLE_FAILED));
        }
        self.read_article(id).await
    }

    async fn fetch_feed(&self) -> Result<String, TransportError> {
        self.read(&self.feed).await.map_err(|e| {
            crate::debug!("transport"; "{}: {}", self.feed, e);
            TransportError::new(FEED_FAILED)
        })
    }
}

/// Parse index JSON; `null` and empty lists count as "no articles".
fn parse_index(content: &str) -> Result<CatalogResponse, TransportError> {
    let parsed: Option<IndexFile> = serde_json::from_str(content).map_err(|e| {
        crate::debug!("transport"; "index: {}", e);
        TransportError::new(LIST_FAILED)
    })?;

    let response = match parsed {
        None => CatalogResponse::default(),
        Some(IndexFile::Ids(ids)) => CatalogResponse::from_ids(ids),
        Some(IndexFile::Full { ids, primed }) => CatalogResponse { ids, primed },
    };

    if response.ids.is_empty() {
        return Err(TransportError::new(LIST_EMPTY));
    }
    Ok(response)
}

/// Ids map to file names; anything that could escape the directory is refused.
fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains(['/', '\\', '\0'])
        && id != "."
        && id != ".."
}

/// Text of the first heading in a markdown document.
fn first_heading(markdown: &str) -> Option<String> {
    use pulldown_cmark::{Event, Parser, Tag, TagEnd};

    let mut heading: Option<String> = None;
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { .. }) => heading = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(ref mut content) = heading {
                    content.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = heading.take() {
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn content_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_parse_index_list() {
        let response = parse_index(r#"["a", "b"]"#).unwrap();
        assert_eq!(response.ids, ["a", "b"]);
        assert!(response.primed.is_empty());
    }

    #[test]
    fn test_parse_index_full() {
        let response = parse_index(
            r#"{"ids": ["a"], "primed": [{"id": "a", "title": "A", "markdown": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(response.ids, ["a"]);
        assert_eq!(response.primed, [Article::new("a", "A", "x")]);
    }

    #[test]
    fn test_parse_index_empty_or_null() {
        assert_eq!(parse_index("[]").unwrap_err().message(), LIST_EMPTY);
        assert_eq!(parse_index("null").unwrap_err().message(), LIST_EMPTY);
    }

    #[test]
    fn test_parse_index_invalid() {
        assert_eq!(parse_index("{oops").unwrap_err().message(), LIST_FAILED);
    }

    #[test]
    fn test_safe_id() {
        assert!(is_safe_id("hello-world"));
        assert!(is_safe_id("2024.01.01"));
        assert!(!is_safe_id(""));
        assert!(!is_safe_id(".."));
        assert!(!is_safe_id("../secret"));
        assert!(!is_safe_id("a\\b"));
    }

    #[test]
    fn test_first_heading() {
        assert_eq!(
            first_heading("intro\n\n## Hello `world`\n\n# Later").as_deref(),
            Some("Hello world")
        );
        assert_eq!(first_heading("no heading here"), None);
    }

    #[tokio::test]
    async fn test_fetch_catalog_from_dir() {
        let dir = content_dir(&[("index.json", r#"["first", "second"]"#)]);
        let transport = FsTransport::new(dir.path());
        let response = transport.fetch_catalog().await.unwrap();
        assert_eq!(response.ids, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_fetch_catalog_missing_index() {
        let dir = content_dir(&[]);
        let err = FsTransport::new(dir.path()).fetch_catalog().await.unwrap_err();
        assert_eq!(err.message(), LIST_FAILED);
    }

    #[tokio::test]
    async fn test_fetch_catalog_custom_index_name() {
        let dir = content_dir(&[("list.json", r#"["x"]"#)]);
        let transport = FsTransport::new(dir.path()).with_index("list.json");
        assert_eq!(transport.fetch_catalog().await.unwrap().ids, ["x"]);
    }

    #[tokio::test]
    async fn test_fetch_article_json() {
        let dir = content_dir(&[(
            "first.json",
            r##"{"id": "first", "title": "Title 1", "markdown": "# Content 1"}"##,
        )]);
        let article = FsTransport::new(dir.path())
            .fetch_article("first")
            .await
            .unwrap();
        assert_eq!(article, Article::new("first", "Title 1", "# Content 1"));
    }

    #[tokio::test]
    async fn test_fetch_article_json_without_id() {
        let dir = content_dir(&[("first.json", r#"{"title": "T", "markdown": ""}"#)]);
        // `id` is required by the record; a missing field is a fetch failure
        let err = FsTransport::new(dir.path())
            .fetch_article("first")
            .await
            .unwrap_err();
        assert_eq!(err.message(), ARTICLE_FAILED);
    }

    #[tokio::test]
    async fn test_fetch_article_markdown_fallback() {
        let dir = content_dir(&[("second.md", "# Second\n\nbody")]);
        let article = FsTransport::new(dir.path())
            .fetch_article("second")
            .await
            .unwrap();
        assert_eq!(article.id, "second");
        assert_eq!(article.title, "Second");
        assert!(article.markdown.contains("body"));
    }

    #[tokio::test]
    async fn test_fetch_article_missing() {
        let dir = content_dir(&[]);
        let err = FsTransport::new(dir.path())
            .fetch_article("nope")
            .await
            .unwrap_err();
        assert_eq!(err.message(), ARTICLE_FAILED);
    }

    #[tokio::test]
    async fn test_fetch_article_rejects_traversal() {
        let dir = content_dir(&[]);
        let err = FsTransport::new(dir.path())
            .fetch_article("../index")
            .await
            .unwrap_err();
        assert_eq!(err.message(), ARTICLE_FAILED);
    }

    #[tokio::test]
    async fn test_fetch_feed() {
        let dir = content_dir(&[("feed.xml", "<rss></rss>")]);
        let transport = FsTransport::new(dir.path());
        assert_eq!(transport.fetch_feed().await.unwrap(), "<rss></rss>");

        let missing = FsTransport::new(dir.path()).with_feed("atom.xml");
        assert_eq!(missing.fetch_feed().await.unwrap_err().message(), FEED_FAILED);
    }
}
