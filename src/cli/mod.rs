//! Command-line interface module.

mod args;
pub mod browse;
pub mod common;
pub mod feed;
pub mod list;
pub mod show;

pub use args::{Cli, Commands};
