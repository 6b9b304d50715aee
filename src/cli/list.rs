//! `folio list`: print the catalog in order.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::catalog::Catalog;
use crate::config::cfg;
use crate::navigation::link_for;
use crate::transport::Transport;

pub async fn list() -> Result<()> {
    let config = cfg();
    let response = config
        .transport()
        .fetch_catalog()
        .await?;
    let catalog = Catalog::non_empty(response.ids)?;
    let base = config.base();

    for line in catalog_lines(&catalog, &base) {
        println!("{line}");
    }
    crate::debug_do! {
        let primed: Vec<&str> = response.primed.iter().map(|a| a.id.as_str()).collect();
        crate::debug!("list"; "{} articles, primed: {:?}", catalog.len(), primed);
    }
    Ok(())
}

/// One line per article: marker, id, address.
fn catalog_lines(catalog: &Catalog, base: &crate::core::BasePath) -> Vec<String> {
    catalog
        .iter()
        .map(|id| {
            let marker = if catalog.is_first(id) { "*" } else { " " };
            format!("{} {} {}", marker.green(), id, link_for(catalog, id, base).dimmed())
        })
        .collect()
}
