//! Common utilities shared across CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::cache::ArticleCache;
use crate::config::ReaderConfig;
use crate::coordinator::{LoadCoordinator, ReaderView, Transition};
use crate::render::{LandingAlias, render_article};
use crate::session::{self, ChannelHost, Session};
use crate::transport::FsTransport;

pub type FsCoordinator = LoadCoordinator<FsTransport, ChannelHost>;

/// A running reader session over the configured content directory.
pub struct Reader {
    pub host: Arc<ChannelHost>,
    pub coordinator: Arc<FsCoordinator>,
    running: JoinHandle<Vec<Transition>>,
}

impl Reader {
    /// Wire transport, host and coordinator, then start the session loop.
    pub fn start(config: &ReaderConfig) -> Self {
        let (tx, rx) = session::channel();
        let host = Arc::new(ChannelHost::new(config.base(), tx));
        let coordinator = Arc::new(LoadCoordinator::new(
            Arc::new(config.transport()),
            Arc::clone(&host),
            Arc::new(ArticleCache::new()),
            config.coordinator_options(),
        ));
        let running = tokio::spawn(Session::new(Arc::clone(&coordinator), rx).run());
        Self {
            host,
            coordinator,
            running,
        }
    }

    /// Stop the session and wait for in-flight loads and prefetches.
    pub async fn stop(self) -> Result<Vec<Transition>> {
        self.host.shutdown();
        self.running.await.context("session task failed")
    }

    /// Landing-alias rewriter for the loaded catalog.
    pub fn alias(&self) -> Option<LandingAlias> {
        let catalog = self.coordinator.catalog()?;
        Some(LandingAlias::for_catalog(
            self.coordinator.base().clone(),
            &catalog,
        ))
    }
}

/// Print a ready view: title, rendered body, sibling links.
pub fn print_view(view: &ReaderView, alias: Option<&LandingAlias>, site_title: &str) {
    let Some(article) = view.article() else {
        return;
    };

    let title = article.title().unwrap_or(site_title);
    println!("{}", title.bold());
    println!();
    match alias {
        Some(alias) => print!("{}", render_article(&article.markdown, alias)),
        None => println!("{}", article.markdown),
    }
    println!();

    let links = &view.links;
    if !links.prev_link.is_empty() {
        println!(
            "{} {} {}",
            "←".dimmed(),
            label(&links.prev_title, &links.prev_id),
            links.prev_link.cyan()
        );
    }
    if !links.next_link.is_empty() {
        println!(
            "{} {} {}",
            "→".dimmed(),
            label(&links.next_title, &links.next_id),
            links.next_link.cyan()
        );
    }
}

/// JSON form of a ready view.
pub fn view_json(view: &ReaderView, alias: Option<&LandingAlias>) -> serde_json::Value {
    let article = view.article();
    json!({
        "id": view.current_id,
        "title": article.map(|a| a.title.as_str()).unwrap_or_default(),
        "html": article
            .zip(alias)
            .map(|(a, alias)| render_article(&a.markdown, alias))
            .unwrap_or_default(),
        "links": view.links,
    })
}

fn label<'a>(title: &'a str, id: &'a str) -> &'a str {
    if title.is_empty() { id } else { title }
}
