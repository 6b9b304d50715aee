//! Folio - a terminal reader for ordered article collections.

#![allow(dead_code)]

mod article;
mod cache;
mod catalog;
mod cli;
mod config;
mod coordinator;
mod core;
mod error;
mod feed;
mod host;
mod logger;
mod navigation;
mod render;
mod resolve;
mod session;
mod transport;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{ReaderConfig, cfg, init_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    init_config(ReaderConfig::load(&cli)?);
    let config = cfg();
    debug!("config"; "content: {}, base: {}", config.content.dir.display(), config.base());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        match &cli.command {
            Commands::Show { location, json } => cli::show::show(location, *json).await,
            Commands::Browse => cli::browse::browse().await,
            Commands::List => cli::list::list().await,
            Commands::Feed => cli::feed::feed().await,
        }
    })
}
