//! Destination key prefix value object

use std::fmt;

use serde::Serialize;

use crate::error::{SiteshipError, SiteshipResult};

/// Key prefix under which a site is published in the destination store.
///
/// Stored without leading or trailing `/`. Empty means the store root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> SiteshipResult<Self> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        for segment in trimmed.split('/') {
            let reason = match segment {
                "" => Some("empty path segment"),
                "." | ".." => Some("relative path segment"),
                s if s.contains('\\') => Some("backslash in path segment"),
                _ => None,
            };
            if let Some(reason) = reason {
                return Err(SiteshipError::InvalidKeyPrefix {
                    prefix: raw.to_string(),
                    reason: reason.to_string(),
                });
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Object key for an asset path relative to the content root.
    pub fn object_key(&self, asset_path: &str) -> String {
        if self.is_root() {
            asset_path.to_string()
        } else {
            format!("{}/{}", self.0, asset_path)
        }
    }

    /// Inverse of [`object_key`](Self::object_key); `None` for keys outside the prefix.
    pub fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        if self.is_root() {
            return Some(key);
        }
        key.strip_prefix(self.0.as_str())?.strip_prefix('/')
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}
