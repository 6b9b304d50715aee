//! Configuration section definitions.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Notes"
//! url = "https://example.github.io/notes"
//!
//! [content]
//! dir = "content"
//! index = "index.json"
//! feed = "feed.xml"
//!
//! [prefetch]
//! enable = true
//! ```

mod content;
mod prefetch;
mod site;

pub use content::ContentConfig;
pub use prefetch::PrefetchConfig;
pub use site::SiteConfig;
