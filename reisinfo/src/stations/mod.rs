//! Station directory.
//!
//! Persists the full NS station list as a local snapshot and resolves
//! free-text station names (long, medium, short name or code) against it.

mod error;
mod store;

pub use error::StationError;
pub use store::{DEFAULT_SNAPSHOT_PATH, StationStore, to_snapshot_json};
