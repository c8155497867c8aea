//! Object Store Implementations
//!
//! Destinations that deployment units are transferred into.

mod index;
mod local;

pub use index::{InvalidationRecord, ObjectEntry, ObjectIndex, INDEX_VERSION};
pub use local::{LocalObjectStore, META_DIR};
