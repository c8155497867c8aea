//! Long-cache extension allow-list

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{SiteshipError, SiteshipResult};

/// Validated set of file extensions that receive long-cache treatment.
///
/// Entries are lowercase, non-empty and contain no dot. An empty
/// set is legal and sends every asset to the no-cache tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LongCacheExtensions(BTreeSet<String>);

impl LongCacheExtensions {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new<I, S>(extensions: I) -> SiteshipResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for ext in extensions {
            let ext = ext.as_ref();
            validate(ext)?;
            set.insert(ext.to_string());
        }
        Ok(Self(set))
    }

    /// Byte-exact membership test.
    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(extension)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Glob-style description, e.g. `*.{css,js}`.
    pub fn glob(&self) -> String {
        match self.0.len() {
            0 => String::new(),
            1 => format!("*.{}", self.iter().collect::<String>()),
            _ => format!("*.{{{}}}", self.iter().collect::<Vec<_>>().join(",")),
        }
    }
}

fn validate(ext: &str) -> SiteshipResult<()> {
    let reason = if ext.is_empty() {
        Some("extension is empty")
    } else if ext.starts_with('.') {
        Some("extension must not start with '.'")
    } else if ext.contains('.') {
        Some("extension must not contain '.'; only the part after the last dot is matched")
    } else if ext.contains('/') {
        Some("extension must not contain '/'")
    } else if ext.chars().any(char::is_uppercase) {
        Some("extension must be lowercase")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SiteshipError::InvalidExtension {
            extension: ext.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
