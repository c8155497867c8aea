//! Edge request rewriting
//!
//! Resolves clean (extension-less) request paths to the index document stored
//! in the destination. Runs once per viewer request: pure string work, no I/O,
//! no state kept between calls.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{SiteshipError, SiteshipResult};

/// Index document appended to clean routes.
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

/// How a path is judged to "have an extension".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionMatch {
    /// Any `.` anywhere in the path. `/v1.2/docs` is treated as a resource.
    #[default]
    AnySegment,
    /// Only a `.` in the final segment counts.
    FinalSegment,
}

impl ExtensionMatch {
    pub const ALL: [Self; 2] = [Self::AnySegment, Self::FinalSegment];
}

/// Result of classifying a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Concrete file; served as requested
    Resource,
    /// Directory-style route; resolved to its index document
    CleanRoute,
}

/// Viewer request as delivered by the edge platform.
///
/// Only `uri` is read or written; any other fields survive untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub uri: String,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl EdgeRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            other: serde_json::Map::new(),
        }
    }
}

/// Edge event wrapper: `{ "request": { "uri": ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEvent {
    pub request: EdgeRequest,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// Stateless request path rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRequestRewriter {
    index_document: String,
    extension_match: ExtensionMatch,
}

impl Default for EdgeRequestRewriter {
    fn default() -> Self {
        Self {
            index_document: DEFAULT_INDEX_DOCUMENT.to_string(),
            extension_match: ExtensionMatch::default(),
        }
    }
}

impl EdgeRequestRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different index document.
    ///
    /// The name must contain a `.` and no `/` so that rewritten paths classify
    /// as resources on a second pass.
    pub fn with_index_document(mut self, name: &str) -> SiteshipResult<Self> {
        let reason = if name.contains('/') {
            Some("must not contain '/'")
        } else if !name.contains('.') || name.ends_with('.') {
            Some("must have a file extension")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(SiteshipError::InvalidIndexDocument {
                name: name.to_string(),
                reason: reason.to_string(),
            });
        }
        self.index_document = name.to_string();
        Ok(self)
    }

    pub fn with_extension_match(mut self, mode: ExtensionMatch) -> Self {
        self.extension_match = mode;
        self
    }

    pub fn index_document(&self) -> &str {
        &self.index_document
    }

    pub fn extension_match(&self) -> ExtensionMatch {
        self.extension_match
    }

    pub fn classify(&self, uri: &str) -> RouteKind {
        let haystack = match self.extension_match {
            ExtensionMatch::AnySegment => uri,
            ExtensionMatch::FinalSegment => uri.rsplit('/').next().unwrap_or(uri),
        };
        if haystack.contains('.') {
            RouteKind::Resource
        } else {
            RouteKind::CleanRoute
        }
    }

    /// Rewrite a request path. Borrowed when passed through unchanged.
    pub fn rewrite<'a>(&self, uri: &'a str) -> Cow<'a, str> {
        match self.classify(uri) {
            RouteKind::Resource => Cow::Borrowed(uri),
            RouteKind::CleanRoute if uri.ends_with('/') => {
                Cow::Owned(format!("{}{}", uri, self.index_document))
            }
            RouteKind::CleanRoute => Cow::Owned(format!("{}/{}", uri, self.index_document)),
        }
    }

    /// Apply the rewrite to a request object, leaving every other field alone.
    pub fn rewrite_request(&self, mut request: EdgeRequest) -> EdgeRequest {
        if let Cow::Owned(uri) = self.rewrite(&request.uri) {
            request.uri = uri;
        }
        request
    }

    /// Edge-platform entry point: event in, request out.
    pub fn handle(&self, event: EdgeEvent) -> EdgeRequest {
        self.rewrite_request(event.request)
    }
}

/// Rewrite with the default rewriter (`index.html`, any-segment matching).
pub fn rewrite_uri(uri: &str) -> Cow<'_, str> {
    EdgeRequestRewriter::default().rewrite(uri)
}
