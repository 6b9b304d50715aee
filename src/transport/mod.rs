//! Transport capability: where catalogs, articles and feeds come from.
//!
//! The coordinator only ever talks to [`Transport`]. The filesystem
//! implementation backs the CLI; tests plug in scripted transports.

mod fs;
#[cfg(test)]
mod scripted;

use std::future::Future;

use crate::article::Article;
use crate::error::TransportError;

pub use fs::FsTransport;
#[cfg(test)]
pub(crate) use scripted::ScriptedTransport;

/// Catalog as delivered by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogResponse {
    /// Ordered article ids.
    pub ids: Vec<String>,
    /// Articles delivered alongside the list, ready for the cache.
    pub primed: Vec<Article>,
}

impl CatalogResponse {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            primed: Vec::new(),
        }
    }
}

/// Source of catalog, article and feed data.
///
/// These calls are the only suspension points of a load.
pub trait Transport: Send + Sync + 'static {
    /// Fetch the ordered catalog. Fails when the call fails or yields no ids.
    fn fetch_catalog(
        &self,
    ) -> impl Future<Output = Result<CatalogResponse, TransportError>> + Send;

    /// Fetch one article by id.
    fn fetch_article(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Article, TransportError>> + Send;

    /// Fetch the raw site feed.
    fn fetch_feed(&self) -> impl Future<Output = Result<String, TransportError>> + Send {
        async { Err(TransportError::new("feed not available")) }
    }
}
