//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads; the CLI installs the loaded config
//! once at startup and every command reads it through `cfg()`.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::config::ReaderConfig;

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<ReaderConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(ReaderConfig::default()));

#[inline]
pub fn cfg() -> Arc<ReaderConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: ReaderConfig) -> Arc<ReaderConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
