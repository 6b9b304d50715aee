//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Folio article reader CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Content directory path (relative to the config file)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Path prefix articles are addressed under (default: /blog)
    #[arg(short = 'B', long = "base-path", global = true)]
    pub base_path: Option<String>,

    /// Do not fetch neighbouring articles in the background
    #[arg(long = "no-prefetch", global = true)]
    pub no_prefetch: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load one location and print the article
    #[command(visible_alias = "s")]
    Show {
        /// Address such as `/blog/second`, `/blog?id=second` or `/blog/#second`
        location: String,

        /// Print the view as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Read locations from stdin, one per line, and follow them
    #[command(visible_alias = "b")]
    Browse,

    /// List the catalog in order
    #[command(visible_alias = "l")]
    List,

    /// Print the site feed
    #[command(visible_alias = "f")]
    Feed,
}
