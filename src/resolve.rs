//! Location resolution: pick the article a location asks for.
//!
//! # Precedence
//!
//! | Order | Source                 | Example          |
//! |-------|------------------------|------------------|
//! | 1     | fragment               | `/blog/#second`  |
//! | 2     | trailing path segment  | `/blog/second`   |
//! | 3     | `id` query parameter   | `/blog?id=second`|
//! | 4     | first catalog entry    | `/blog/`         |
//!
//! A candidate that is not in the catalog falls through to the next level.
//! An empty catalog resolves to the empty id.

use std::borrow::Cow;

use regex::Regex;

use crate::catalog::Catalog;
use crate::core::{BasePath, Location, decode_component};

/// Which part of the location produced the resolved id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBy {
    Fragment,
    Path,
    Query,
    /// Nothing matched; the landing article was chosen.
    Fallback,
}

/// Outcome of resolving a location against a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved id, empty when nothing is resolvable.
    pub id: String,
    pub by: ResolvedBy,
}

impl Resolution {
    fn new(id: impl Into<String>, by: ResolvedBy) -> Self {
        Self { id: id.into(), by }
    }

    fn none() -> Self {
        Self::new(String::new(), ResolvedBy::Fallback)
    }

    /// Check if no article could be resolved.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Maps a location to a single article id with fixed precedence.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    base: BasePath,
    /// `{base}/(.+)$`, matched against the path without trailing separators.
    pattern: Regex,
}

impl LocationResolver {
    pub fn new(base: BasePath) -> Self {
        let pattern = Regex::new(&format!("{}/(.+)$", regex::escape(base.as_str())))
            .expect("escaped base path is a valid pattern");
        Self { base, pattern }
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    /// Resolve a location. Total: never fails, falls through instead.
    pub fn resolve(&self, catalog: &Catalog, location: &Location) -> Resolution {
        let Some(first) = catalog.first() else {
            return Resolution::none();
        };

        if let Some(id) = self.from_fragment(catalog, location) {
            return Resolution::new(id, ResolvedBy::Fragment);
        }
        if let Some(id) = self.from_path(catalog, location) {
            return Resolution::new(id, ResolvedBy::Path);
        }
        if let Some(id) = location
            .query_param("id")
            .filter(|id| catalog.contains(id))
        {
            return Resolution::new(id, ResolvedBy::Query);
        }
        Resolution::new(first, ResolvedBy::Fallback)
    }

    /// Shorthand returning only the id (empty when unresolvable).
    pub fn resolve_id(&self, catalog: &Catalog, location: &Location) -> String {
        self.resolve(catalog, location).id
    }

    fn from_fragment(&self, catalog: &Catalog, location: &Location) -> Option<String> {
        let fragment = location.fragment.trim_start_matches('#');
        if fragment.is_empty() {
            return None;
        }
        lookup(catalog, fragment)
    }

    fn from_path(&self, catalog: &Catalog, location: &Location) -> Option<String> {
        let path = location.path.trim_end_matches('/');
        let captures = self.pattern.captures(path)?;
        lookup(catalog, captures.get(1)?.as_str())
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new(BasePath::default())
    }
}

/// Find a candidate in the catalog, as written or percent-decoded.
fn lookup(catalog: &Catalog, candidate: &str) -> Option<String> {
    if catalog.contains(candidate) {
        return Some(candidate.to_string());
    }
    match decode_component(candidate) {
        Cow::Owned(decoded) if catalog.contains(&decoded) => Some(decoded),
        _ => None,
    }
}
