//! Location descriptor supplied by the host on every navigation event.
//!
//! All three parts are always present (empty string when absent), so the
//! resolver never branches on missing fields.

use std::sync::OnceLock;

/// Address the host is currently showing.
///
/// Invariants:
/// - `query` never carries the leading `?`
/// - `fragment` never carries the leading `#`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl Location {
    pub fn new(
        path: impl Into<String>,
        query: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        let query = query.into();
        let fragment = fragment.into();
        Self {
            path: path.into(),
            query: query.strip_prefix('?').map(str::to_string).unwrap_or(query),
            fragment: fragment
                .strip_prefix('#')
                .map(str::to_string)
                .unwrap_or(fragment),
        }
    }

    /// Location that only carries a path.
    pub fn at_path(path: impl Into<String>) -> Self {
        Self::new(path, "", "")
    }

    /// Parse an address such as `/blog/post?id=a#c`.
    ///
    /// Uses the url crate against a dummy base so relative addresses,
    /// dot segments and stray whitespace are handled like a browser would.
    pub fn parse(address: &str) -> Self {
        static BASE: OnceLock<url::Url> = OnceLock::new();
        let base = BASE.get_or_init(|| url::Url::parse("http://x").expect("static base url"));

        match base.join(address.trim()) {
            Ok(parsed) => Self::new(
                parsed.path(),
                parsed.query().unwrap_or_default(),
                parsed.fragment().unwrap_or_default(),
            ),
            Err(_) => Self::split(address.trim()),
        }
    }

    /// Fallback split when the url crate rejects the input.
    fn split(address: &str) -> Self {
        let (rest, fragment) = address.split_once('#').unwrap_or((address, ""));
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        Self::new(path, query, fragment)
    }

    /// First value of a query parameter (percent/`+` decoded).
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Render back to an address string.
    pub fn to_address(&self) -> String {
        let mut out = self.path.clone();
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }
        out
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_address())
    }
}
