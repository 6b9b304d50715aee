//! Ordered catalog of article identifiers.
//!
//! Order is semantic: it defines previous/next and the landing article
//! (the first entry). Identifiers are unique.

use rustc_hash::FxHashMap;

use crate::error::CatalogError;

/// Ordered, duplicate-free list of article ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    ids: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// An empty list is accepted here; the transport boundary is what
    /// treats an empty catalog as a failure.
    pub fn new<I, S>(ids: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for id in ids {
            let id = id.into();
            if catalog.index.contains_key(&id) {
                return Err(CatalogError::Duplicate(id));
            }
            catalog.index.insert(id.clone(), catalog.ids.len());
            catalog.ids.push(id);
        }
        Ok(catalog)
    }

    /// Build a catalog that must contain at least one id.
    pub fn non_empty<I, S>(ids: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let catalog = Self::new(ids)?;
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Landing article id.
    #[inline]
    pub fn first(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    #[inline]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Check whether `id` is the landing article.
    #[inline]
    pub fn is_first(&self, id: &str) -> bool {
        self.first() == Some(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved() {
        let catalog = Catalog::new(["c", "a", "b"]).unwrap();
        assert_eq!(catalog.iter().collect::<Vec<_>>(), ["c", "a", "b"]);
        assert_eq!(catalog.first(), Some("c"));
        assert_eq!(catalog.position("b"), Some(2));
    }

    #[test]
    fn test_duplicate_rejected() {
        assert_eq!(
            Catalog::new(["a", "b", "a"]),
            Err(CatalogError::Duplicate("a".into()))
        );
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(Vec::<String>::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.first(), None);
        assert_eq!(
            Catalog::non_empty(Vec::<String>::new()),
            Err(CatalogError::Empty)
        );
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::new(["a", "b"]).unwrap();
        assert!(catalog.contains("a"));
        assert!(!catalog.contains("c"));
        assert!(catalog.is_first("a"));
        assert!(!catalog.is_first("b"));
        assert_eq!(catalog.get(1), Some("b"));
        assert_eq!(catalog.get(2), None);
    }
}
