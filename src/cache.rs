//! Session-scoped article cache.
//!
//! Maps article id to the fetched [`Article`]. Nothing is ever evicted: the
//! cache lives as long as the session that owns it and is bounded by the
//! catalog size. Writes are single key inserts, so readers never observe a
//! partially stored article.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::article::Article;

/// Thread-safe id → article store.
#[derive(Debug, Default)]
pub struct ArticleCache {
    articles: RwLock<FxHashMap<String, Arc<Article>>>,
}

impl ArticleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached article.
    pub fn get(&self, id: &str) -> Option<Arc<Article>> {
        self.articles.read().get(id).cloned()
    }

    /// Insert or overwrite an article (last write wins).
    pub fn put(&self, id: impl Into<String>, article: impl Into<Arc<Article>>) {
        self.articles.write().insert(id.into(), article.into());
    }

    pub fn has(&self, id: &str) -> bool {
        self.articles.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.articles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.read().is_empty()
    }

    /// Drop every entry (session teardown).
    pub fn clear(&self) {
        self.articles.write().clear();
    }
}
