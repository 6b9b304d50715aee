//! Core types - pure abstractions shared across the codebase.

mod link;
mod location;
mod path;

pub use link::LinkKind;
pub use location::Location;
pub use path::{BasePath, DEFAULT_BASE_PATH, decode_component};
