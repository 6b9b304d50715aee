//! `folio feed`: load the site feed and print its items.

use std::sync::Arc;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use crate::config::cfg;
use crate::feed::{FeedLoader, validate};

pub async fn feed() -> Result<()> {
    let config = cfg();
    let loader = FeedLoader::new(Arc::new(config.transport()));
    loader.load().await;
    if !loader.is_loaded() {
        bail!("feed not available");
    }

    let channel = loader.channel()?;
    if let Err(e) = validate(&channel) {
        crate::log!("feed"; "{}", e);
    }

    println!("{}", channel.title().bold());
    for item in channel.items() {
        let title = item.title().unwrap_or("(untitled)");
        match item.link() {
            Some(link) => println!("- {} {}", title, link.cyan()),
            None => println!("- {}", title),
        }
    }
    Ok(())
}
