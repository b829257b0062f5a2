//! Catalog module
//!
//! Rate card snapshots and where they come from:
//! - CatalogStore: holds the active snapshot, swapped atomically
//! - RateCardSource: loads a full snapshot (builtin or JSON file)

pub mod source;
pub mod store;

pub use source::{BuiltinSource, FileSource, RateCardSource};
pub use store::CatalogStore;
