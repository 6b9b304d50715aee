//! Site feed loader.
//!
//! The feed is fetched at most once per session. Failures are logged and
//! leave the feed absent; a later `load()` may try again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rss::Channel;
use rss::validation::Validate;
use thiserror::Error;

use crate::transport::Transport;

/// Feed parsing errors.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed not loaded")]
    NotLoaded,

    #[error("invalid feed: {0}")]
    Parse(#[from] rss::Error),

    #[error("feed validation failed: {0}")]
    Invalid(#[from] rss::validation::ValidationError),
}

/// One-shot feed fetcher.
pub struct FeedLoader<T> {
    transport: Arc<T>,
    xml: Mutex<Option<Arc<str>>>,
    fetching: AtomicBool,
}

impl<T: Transport> FeedLoader<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            xml: Mutex::new(None),
            fetching: AtomicBool::new(false),
        }
    }

    /// Fetch the feed unless it is cached or already being fetched.
    pub async fn load(&self) {
        let cached = self.xml.lock().is_some();
        if cached || self.fetching.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.transport.fetch_feed().await {
            Ok(xml) => {
                crate::debug!("feed"; "loaded {} bytes", xml.len());
                *self.xml.lock() = Some(xml.into());
            }
            Err(e) => crate::log!("feed"; "failed to fetch feed: {}", e),
        }
        self.fetching.store(false, Ordering::SeqCst);
    }

    /// Raw feed XML, if loaded.
    pub fn xml(&self) -> Option<Arc<str>> {
        self.xml.lock().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.xml.lock().is_some()
    }

    /// Parse the loaded feed.
    pub fn channel(&self) -> Result<Channel, FeedError> {
        let xml = self.xml().ok_or(FeedError::NotLoaded)?;
        parse(&xml)
    }
}

/// Parse RSS 2.0 XML.
pub fn parse(xml: &str) -> Result<Channel, FeedError> {
    Ok(Channel::read_from(xml.as_bytes())?)
}

/// Check a parsed channel against the RSS 2.0 rules.
pub fn validate(channel: &Channel) -> Result<(), FeedError> {
    Ok(channel.validate()?)
}
