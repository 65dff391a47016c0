//! Type-safe identifiers.
//!
//! Newtype wrappers prevent mixing a request correlation ID with an
//! extension ID at compile time.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{Error, Result};

// ============================================================================
// RequestId
// ============================================================================

/// Identifier attached to each capture request a frame posts.
///
/// Purely diagnostic: the parent does not correlate responses by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ExtensionId
// ============================================================================

/// Identity of the installed helper extension.
///
/// Derived from the install URL and cached in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionId(String);

impl ExtensionId {
    /// Wraps an already known extension ID.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the extension ID from a web-store install URL.
    ///
    /// The ID is the last non-empty path segment. URLs without a path
    /// fall back to their host, so `https://test.example` yields
    /// `test.example`.
    ///
    /// # Errors
    ///
    /// - [`Error::Url`] if the URL does not parse
    /// - [`Error::Config`] if neither a path segment nor a host exists
    pub fn from_install_url(install_url: &str) -> Result<Self> {
        let url = Url::parse(install_url)?;

        let segment = url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_string);

        segment
            .or_else(|| url.host_str().map(str::to_string))
            .map(Self)
            .ok_or_else(|| {
                Error::config(format!("Cannot derive extension ID from: {install_url}"))
            })
    }

    /// Returns the ID as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }

    #[test]
    fn test_request_id_serializes_as_string() {
        let id = RequestId::generate();
        let json = serde_json::to_value(id).expect("serialize");
        assert_eq!(json.as_str(), Some(id.to_string().as_str()));
    }

    #[test]
    fn test_extension_id_from_last_segment() {
        let id = ExtensionId::from_install_url(
            "https://chrome.google.com/webstore/detail/screen-share/abcdefghijklmnop",
        )
        .expect("derive");
        assert_eq!(id.as_str(), "abcdefghijklmnop");
    }

    #[test]
    fn test_extension_id_ignores_trailing_slash() {
        let id = ExtensionId::from_install_url("https://test.example/test/id-asdlfkjasdkd/")
            .expect("derive");
        assert_eq!(id.as_str(), "id-asdlfkjasdkd");
    }

    #[test]
    fn test_extension_id_falls_back_to_host() {
        let id = ExtensionId::from_install_url("https://test.example").expect("derive");
        assert_eq!(id.as_str(), "test.example");
    }

    #[test]
    fn test_extension_id_rejects_garbage() {
        let err = ExtensionId::from_install_url("no scheme here").unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    proptest! {
        #[test]
        fn prop_extension_id_is_final_segment(
            dirs in proptest::collection::vec("[a-z]{1,8}", 0..4),
            last in "[a-p]{32}",
        ) {
            let mut url = String::from("https://chrome.google.com/");
            for dir in &dirs {
                url.push_str(dir);
                url.push('/');
            }
            url.push_str(&last);

            let id = ExtensionId::from_install_url(&url).expect("derive");
            prop_assert_eq!(id.as_str(), last.as_str());
        }
    }
}
