//! Cache tier value object
//!
//! A tier is a named Cache-Control policy bucket. The set of tiers is
//! closed; every asset is classified into exactly one of them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::LongCacheExtensions;

/// Cache-control policy bucket.
///
/// Declaration order is plan order: `LongCache` units are emitted before
/// `NoCache` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheTier {
    /// Content-hashed assets: cached for a year, never revalidated.
    LongCache,
    /// Everything else: always revalidated with the origin.
    NoCache,
}

impl CacheTier {
    /// All tiers, in plan order.
    pub const ALL: [CacheTier; 2] = [CacheTier::LongCache, CacheTier::NoCache];

    /// Classify an extension into its tier.
    ///
    /// Total: every extension string (including empty or odd ones) maps to
    /// exactly one tier.
    pub fn classify(extension: &str, long_cache: &LongCacheExtensions) -> CacheTier {
        if long_cache.contains(extension) {
            CacheTier::LongCache
        } else {
            CacheTier::NoCache
        }
    }

    pub fn max_age_seconds(self) -> u32 {
        match self {
            CacheTier::LongCache => 31_536_000,
            CacheTier::NoCache => 0,
        }
    }

    pub fn directive(self) -> &'static str {
        match self {
            CacheTier::LongCache => "immutable",
            CacheTier::NoCache => "must-revalidate",
        }
    }

    /// Cache-Control header for objects in this tier.
    pub fn cache_control(self) -> CacheControl {
        CacheControl::new(self.max_age_seconds(), self.directive())
    }

    /// Suffix appended to the deployment id to name this tier's unit.
    pub fn unit_suffix(self) -> &'static str {
        match self {
            CacheTier::LongCache => "LongCache",
            CacheTier::NoCache => "NoCache",
        }
    }
}

impl fmt::Display for CacheTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheTier::LongCache => write!(f, "long-cache"),
            CacheTier::NoCache => write!(f, "no-cache"),
        }
    }
}

/// Rendered `Cache-Control` header value.
///
/// Wire format is `max-age=<int>,public,<directive>`, byte-exact, no spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheControl(String);

impl CacheControl {
    pub fn new(max_age_seconds: u32, directive: &str) -> Self {
        Self(format!("max-age={},public,{}", max_age_seconds, directive))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
