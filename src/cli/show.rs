//! `folio show`: load one location and print it.

use anyhow::{Context, Result, bail};

use super::common::{Reader, print_view, view_json};
use crate::config::cfg;
use crate::coordinator::LoadState;
use crate::core::Location;

pub async fn show(address: &str, json: bool) -> Result<()> {
    let config = cfg();
    let location = Location::parse(address);
    crate::debug!("show"; "{}", location);

    let reader = Reader::start(&config);
    let mut view_rx = reader.coordinator.subscribe();
    reader.host.navigate(location);

    // A root address redirects first; wait for the load that follows
    view_rx
        .wait_for(|view| view.state.is_settled())
        .await
        .context("reader stopped before the article loaded")?;

    let alias = reader.alias();
    let site_title = config.site.title.clone();
    let coordinator = reader.coordinator.clone();
    reader.stop().await?;

    // Re-read after prefetch so sibling titles are filled
    let view = coordinator.view();
    if let LoadState::Error(message) = &view.state {
        bail!("{message}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&view_json(&view, alias.as_ref()))?);
    } else {
        print_view(&view, alias.as_ref(), &site_title);
    }
    Ok(())
}
