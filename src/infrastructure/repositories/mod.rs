//! Repository Implementations
//!
//! Concrete implementations of domain source ports.

mod asset;

pub use asset::FsAssetSource;
