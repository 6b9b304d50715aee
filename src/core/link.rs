//! Link classification utilities.

/// Syntactic classification of links found in article bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, tel:, etc.)
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Site-root-relative path (/blog/post).
    SiteRoot(&'a str),
    /// Relative path (post, ./post).
    Relative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::Relative(link.strip_prefix("./").unwrap_or(link))
        }
    }
}

/// Check if a link carries a URL scheme (`https:`, `mailto:`, ...).
fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external() {
        assert!(matches!(
            LinkKind::parse("https://example.com"),
            LinkKind::External("https://example.com")
        ));
        assert!(matches!(
            LinkKind::parse("mailto:user@example.com"),
            LinkKind::External("mailto:user@example.com")
        ));
    }

    #[test]
    fn test_parse_fragment() {
        assert!(matches!(
            LinkKind::parse("#section"),
            LinkKind::Fragment("section")
        ));
        assert!(matches!(LinkKind::parse("#"), LinkKind::Fragment("")));
    }

    #[test]
    fn test_parse_site_root() {
        assert!(matches!(
            LinkKind::parse("/blog/first"),
            LinkKind::SiteRoot("/blog/first")
        ));
    }

    #[test]
    fn test_parse_relative() {
        assert!(matches!(LinkKind::parse("first"), LinkKind::Relative("first")));
        assert!(matches!(
            LinkKind::parse("./first/"),
            LinkKind::Relative("first/")
        ));
    }

    #[test]
    fn test_colon_in_path_is_not_external() {
        assert!(matches!(
            LinkKind::parse("/a:b"),
            LinkKind::SiteRoot("/a:b")
        ));
        assert!(matches!(
            LinkKind::parse(":nothing"),
            LinkKind::Relative(":nothing")
        ));
    }
}
