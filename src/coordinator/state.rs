//! Load state and the snapshot handed to the presentation layer.

use std::sync::Arc;

use crate::article::Article;
use crate::error::ReaderError;
use crate::navigation::NavigationLinks;

/// Load state machine.
///
/// ```text
/// Idle ──► Loading ──► Ready(article)
///             │  ▲          │
///             ▼  └──────────┤
///          Error(message) ──┘
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<Article>),
    Error(String),
}

impl LoadState {
    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Ready or Error: a load has finished and nothing is in flight.
    #[inline]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Error(_))
    }

    pub fn article(&self) -> Option<&Arc<Article>> {
        match self {
            Self::Ready(article) => Some(article),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderView {
    pub state: LoadState,
    /// Id of the last successfully loaded article.
    pub current_id: String,
    pub links: NavigationLinks,
}

impl ReaderView {
    pub fn article(&self) -> Option<&Arc<Article>> {
        self.state.article()
    }
}

/// What a single navigation event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A load was already in flight; the event was ignored.
    Dropped,
    /// Root address; the host was asked to go to this id.
    Redirected(String),
    /// The requested article is already displayed.
    Unchanged(String),
    Loaded(String),
    Failed(ReaderError),
}
