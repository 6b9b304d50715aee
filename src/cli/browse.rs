//! `folio browse`: follow locations read from stdin.
//!
//! Every line is a navigation event. Lines arriving while an article is
//! still loading are dropped by the coordinator, exactly like rapid clicks.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::common::{Reader, print_view};
use crate::config::cfg;
use crate::coordinator::{LoadState, ReaderView};
use crate::core::Location;
use crate::logger::StatusLine;
use crate::render::LandingAlias;

pub async fn browse() -> Result<()> {
    let config = cfg();
    let reader = Reader::start(&config);
    let mut view_rx = reader.coordinator.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut status = StatusLine::new();
    let mut shown = Shown::default();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Command::Skip => {}
                    Command::Quit => break,
                    Command::Go(location) => {
                        crate::debug!("browse"; "{}", location);
                        reader.host.navigate(location);
                    }
                }
            }
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = view_rx.borrow_and_update().clone();
                if shown.update(&view) {
                    print_settled(&view, reader.alias().as_ref(), &mut status, &config.site.title);
                }
            }
        }
    }

    let coordinator = reader.coordinator.clone();
    let alias = reader.alias();
    let transitions = reader.stop().await?;
    let view = coordinator.view();
    if shown.update(&view) {
        print_settled(&view, alias.as_ref(), &mut status, &config.site.title);
    }
    crate::debug!("browse"; "{} events handled", transitions.len());
    Ok(())
}

fn print_settled(
    view: &ReaderView,
    alias: Option<&LandingAlias>,
    status: &mut StatusLine,
    site_title: &str,
) {
    match &view.state {
        LoadState::Ready(_) => {
            print_view(view, alias, site_title);
            status.success(&format!("loaded: {}", view.current_id));
        }
        LoadState::Error(message) => status.error("failed", message),
        LoadState::Idle | LoadState::Loading => {}
    }
}

/// One line of input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Skip,
    Quit,
    Go(Location),
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Self::Skip,
            "q" | "quit" | "exit" => Self::Quit,
            address => Self::Go(Location::parse(address)),
        }
    }
}

/// Last settled view that was printed, to skip repeats.
#[derive(Debug, Default)]
struct Shown {
    last: Option<(String, Option<String>)>,
}

impl Shown {
    /// Record a settled view; true when it differs from the last one shown.
    fn update(&mut self, view: &ReaderView) -> bool {
        if !view.state.is_settled() {
            return false;
        }
        let key = (
            view.current_id.clone(),
            view.state.error().map(str::to_string),
        );
        if self.last.as_ref() == Some(&key) {
            return false;
        }
        self.last = Some(key);
        true
    }
}
