//! Markdown rendering for article bodies.
//!
//! The landing article is served at the bare base path, so links inside
//! bodies that point at it by id are rewritten to that alias.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::catalog::Catalog;
use crate::core::{BasePath, LinkKind};

/// Rewrites links that address the landing article by id.
#[derive(Debug, Clone)]
pub struct LandingAlias {
    base: BasePath,
    /// Concrete address of the landing article, `{base}/{first}`.
    concrete: String,
    first: String,
}

impl LandingAlias {
    pub fn new(base: BasePath, first: impl Into<String>) -> Self {
        let first = first.into();
        Self {
            concrete: base.join(&first),
            base,
            first,
        }
    }

    /// Alias for a catalog's first article (no-op for an empty catalog).
    pub fn for_catalog(base: BasePath, catalog: &Catalog) -> Self {
        Self::new(base, catalog.first().unwrap_or_default())
    }

    /// Aliased destination, or `None` when the link stays as written.
    pub fn rewrite(&self, dest: &str) -> Option<String> {
        if self.first.is_empty() {
            return None;
        }

        let split = dest.find(['?', '#']).unwrap_or(dest.len());
        let (path, suffix) = dest.split_at(split);
        let path = path.trim_end_matches('/');

        let hit = match LinkKind::parse(path) {
            LinkKind::SiteRoot(p) => p == self.concrete,
            LinkKind::Relative(p) => p == self.first,
            LinkKind::External(_) | LinkKind::Fragment(_) => false,
        };
        hit.then(|| format!("{}{suffix}", self.base.landing()))
    }

    fn apply<'a>(&self, dest: CowStr<'a>) -> CowStr<'a> {
        match self.rewrite(&dest) {
            Some(aliased) => aliased.into(),
            None => dest,
        }
    }
}

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

/// Render markdown to HTML, aliasing links to the landing article.
pub fn render_article(markdown: &str, alias: &LandingAlias) -> String {
    let events = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: alias.apply(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: alias.apply(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias() -> LandingAlias {
        LandingAlias::new(BasePath::default(), "first")
    }

    fn render(markdown: &str) -> String {
        render_article(markdown, &alias())
    }

    #[test]
    fn test_rewrite_landing_addresses() {
        let alias = alias();
        assert_eq!(alias.rewrite("/blog/first").as_deref(), Some("/blog/"));
        assert_eq!(alias.rewrite("/blog/first/").as_deref(), Some("/blog/"));
        assert_eq!(alias.rewrite("first").as_deref(), Some("/blog/"));
        assert_eq!(alias.rewrite("./first/").as_deref(), Some("/blog/"));
    }

    #[test]
    fn test_rewrite_keeps_suffix() {
        assert_eq!(
            alias().rewrite("/blog/first#intro").as_deref(),
            Some("/blog/#intro")
        );
    }

    #[test]
    fn test_other_links_untouched() {
        let alias = alias();
        assert_eq!(alias.rewrite("/blog/second"), None);
        assert_eq!(alias.rewrite("/other/first"), None);
        assert_eq!(alias.rewrite("https://example.com/blog/first"), None);
        assert_eq!(alias.rewrite("#first"), None);
        assert_eq!(alias.rewrite("firstly"), None);
    }

    #[test]
    fn test_empty_catalog_alias_is_noop() {
        let alias = LandingAlias::for_catalog(BasePath::default(), &Catalog::default());
        assert_eq!(alias.rewrite("/blog/"), None);
        assert_eq!(alias.rewrite(""), None);
    }

    #[test]
    fn test_render_rewrites_link() {
        let html = render("see [the start](/blog/first) and [more](/blog/second)");
        assert!(html.contains(r#"href="/blog/""#));
        assert!(html.contains(r#"href="/blog/second""#));
    }

    #[test]
    fn test_render_rewrites_image() {
        let html = render("![cover](first)");
        assert!(html.contains(r#"src="/blog/""#));
    }

    #[test]
    fn test_render_extensions() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n\n- [x] done\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains(r#"type="checkbox""#));
    }

    #[test]
    fn test_render_footnote() {
        let html = render("text[^1]\n\n[^1]: note\n");
        assert!(html.contains("footnote-definition"));
    }

    #[test]
    fn test_render_heading() {
        assert_eq!(render("# Title"), "<h1>Title</h1>\n");
    }
}
