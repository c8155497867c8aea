//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod cache_tier;
mod extensions;
mod hash;
mod key_prefix;

pub use cache_tier::{CacheControl, CacheTier};
pub use extensions::LongCacheExtensions;
pub use hash::ContentHash;
pub use key_prefix::KeyPrefix;
