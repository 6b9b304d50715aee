//! Error types surfaced by the reader.
//!
//! Every failure the coordinator can observe collapses into a single
//! `LoadState::Error` carrying [`ReaderError::user_message`]. None of them
//! is fatal: the next navigation event may recover.

use thiserror::Error;

/// Message shown when a failure carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "failed to load";

/// Failure reported by the transport capability.
///
/// The message is optional because some transports fail without one; it
/// is never propagated as an empty string.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq)]
#[error("{}", self.message())]
pub struct TransportError {
    message: Option<String>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Failure without any message.
    pub const fn silent() -> Self {
        Self { message: None }
    }

    /// Message to show, falling back to [`FALLBACK_MESSAGE`] when blank.
    pub fn message(&self) -> &str {
        match self.message.as_deref() {
            Some(msg) if !msg.trim().is_empty() => msg,
            _ => FALLBACK_MESSAGE,
        }
    }
}

/// Catalog construction errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no articles found")]
    Empty,

    #[error("duplicate article id `{0}` in catalog")]
    Duplicate(String),
}

/// Errors that move the coordinator into `LoadState::Error`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReaderError {
    /// Transport failure or unusable catalog.
    #[error("{0}")]
    CatalogUnavailable(String),

    /// Transport failure fetching a specific article.
    #[error("{message}")]
    ArticleUnavailable { id: String, message: String },

    /// Catalog present but nothing addressable (guarded, normally unreachable).
    #[error("no article found")]
    NoResolvableArticle,
}

impl ReaderError {
    pub fn article(id: impl Into<String>, err: &TransportError) -> Self {
        Self::ArticleUnavailable {
            id: id.into(),
            message: err.message().to_string(),
        }
    }

    /// Human-readable message for the presentation layer.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            msg
        }
    }
}

impl From<TransportError> for ReaderError {
    fn from(err: TransportError) -> Self {
        Self::CatalogUnavailable(err.message().to_string())
    }
}

impl From<CatalogError> for ReaderError {
    fn from(err: CatalogError) -> Self {
        Self::CatalogUnavailable(err.to_string())
    }
}
