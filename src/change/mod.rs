//! Change detection: field snapshots and the layout root cache.

pub mod cache;
pub mod snapshot;

pub use cache::ChangeCache;
pub use snapshot::{Field, FieldTracker, FieldValue, Snapshot, Tracked};
