//! Sibling navigation over the ordered catalog.

use serde::Serialize;

use crate::cache::ArticleCache;
use crate::catalog::Catalog;
use crate::core::BasePath;

/// Previous/next article ids and their addresses.
///
/// All fields empty means "no navigation available", which is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationLinks {
    pub prev_id: String,
    pub next_id: String,
    pub prev_link: String,
    pub next_link: String,
    /// Filled only when the sibling is cached.
    pub prev_title: String,
    pub next_title: String,
}

impl NavigationLinks {
    pub fn is_empty(&self) -> bool {
        self.prev_id.is_empty() && self.next_id.is_empty()
    }

    /// Non-empty sibling ids (previous first).
    pub fn sibling_ids(&self) -> impl Iterator<Item = &str> {
        [self.prev_id.as_str(), self.next_id.as_str()]
            .into_iter()
            .filter(|id| !id.is_empty())
    }

    /// Fill sibling titles from cached articles.
    pub fn with_titles(mut self, cache: &ArticleCache) -> Self {
        self.prev_title = cached_title(cache, &self.prev_id);
        self.next_title = cached_title(cache, &self.next_id);
        self
    }
}

fn cached_title(cache: &ArticleCache, id: &str) -> String {
    if id.is_empty() {
        return String::new();
    }
    cache
        .get(id)
        .map(|article| article.title.clone())
        .unwrap_or_default()
}

/// Compute sibling links for `current_id`.
pub fn compute(catalog: &Catalog, current_id: &str, base: &BasePath) -> NavigationLinks {
    let Some(index) = catalog.position(current_id) else {
        return NavigationLinks::default();
    };

    let prev_id = index
        .checked_sub(1)
        .and_then(|i| catalog.get(i))
        .unwrap_or_default();
    let next_id = catalog.get(index + 1).unwrap_or_default();

    NavigationLinks {
        prev_link: link_for(catalog, prev_id, base),
        next_link: link_for(catalog, next_id, base),
        prev_id: prev_id.to_string(),
        next_id: next_id.to_string(),
        ..Default::default()
    }
}

/// Address of an article; the landing article maps to the bare base path.
pub fn link_for(catalog: &Catalog, id: &str, base: &BasePath) -> String {
    if id.is_empty() {
        String::new()
    } else if catalog.is_first(id) {
        base.landing()
    } else {
        base.join(id)
    }
}
