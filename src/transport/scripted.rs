//! Scripted transport for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::Notify;

use super::{CatalogResponse, Transport};
use crate::article::Article;
use crate::error::TransportError;

/// Transport whose answers are fixed up front.
///
/// Counts every call; when a gate is installed, article fetches park until
/// the gate is notified so tests can hold a load in flight.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    catalog: Mutex<Option<Result<CatalogResponse, TransportError>>>,
    articles: Mutex<FxHashMap<String, Result<Article, TransportError>>>,
    feed: Mutex<Option<Result<String, TransportError>>>,
    catalog_calls: AtomicUsize,
    feed_calls: AtomicUsize,
    article_calls: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    /// Catalog of ids, each served as an article titled `Title {id}`.
    pub fn with_articles(ids: &[&str]) -> Self {
        let transport = Self::default();
        transport.set_catalog(Ok(CatalogResponse::from_ids(ids.iter().copied())));
        for id in ids {
            transport.set_article(
                id,
                Ok(Article::new(*id, format!("Title {id}"), format!("# Content {id}"))),
            );
        }
        transport
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_catalog(&self, response: Result<CatalogResponse, TransportError>) {
        *self.catalog.lock() = Some(response);
    }

    pub fn set_article(&self, id: &str, article: Result<Article, TransportError>) {
        self.articles.lock().insert(id.to_string(), article);
    }

    pub fn set_feed(&self, feed: Result<String, TransportError>) {
        *self.feed.lock() = Some(feed);
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub fn feed_calls(&self) -> usize {
        self.feed_calls.load(Ordering::SeqCst)
    }

    pub fn article_calls(&self) -> Vec<String> {
        self.article_calls.lock().clone()
    }

    /// Number of fetches issued for one id.
    pub fn calls_for(&self, id: &str) -> usize {
        self.article_calls.lock().iter().filter(|c| *c == id).count()
    }
}

impl Transport for ScriptedTransport {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, TransportError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.catalog.lock().clone();
        scripted.unwrap_or_else(|| Err(TransportError::new("no catalog scripted")))
    }

    async fn fetch_article(&self, id: &str) -> Result<Article, TransportError> {
        self.article_calls.lock().push(id.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let scripted = self.articles.lock().get(id).cloned();
        scripted.unwrap_or_else(|| Err(TransportError::new(format!("no article `{id}`"))))
    }

    async fn fetch_feed(&self) -> Result<String, TransportError> {
        self.feed_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.feed.lock().clone();
        scripted.unwrap_or_else(|| Err(TransportError::new("feed not available")))
    }
}
