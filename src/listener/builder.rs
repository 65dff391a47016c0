//! Builder pattern for listener configuration.
//!
//! Provides a fluent API for configuring and creating
//! [`ScreenShareListener`] instances.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use frame_screenshare::ScreenShareListener;
//!
//! let listener = ScreenShareListener::builder()
//!     .install_url("https://chrome.google.com/webstore/detail/abcdefghijklmnop")
//!     .platform(Arc::new(platform))
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::host::{ExtensionPlatform, FixedDelay, MemoryStore, ReadinessWait, SessionStore};
use crate::identifiers::ExtensionId;

use super::core::ScreenShareListener;
use super::options::ListenerOptions;

// ============================================================================
// ListenerBuilder
// ============================================================================

/// Builder for configuring a [`ScreenShareListener`].
///
/// Use [`ScreenShareListener::builder()`] to create a new builder.
#[derive(Default, Clone)]
pub struct ListenerBuilder {
    /// Web-store URL of the helper extension.
    install_url: Option<String>,
    /// Extension install and messaging.
    platform: Option<Arc<dyn ExtensionPlatform>>,
    /// Identity cache.
    store: Option<Arc<dyn SessionStore>>,
    /// Custom readiness strategy.
    readiness: Option<Arc<dyn ReadinessWait>>,
    /// Plain settings.
    options: ListenerOptions,
}

impl fmt::Debug for ListenerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerBuilder")
            .field("install_url", &self.install_url)
            .field("platform", &self.platform.is_some())
            .field("store", &self.store.is_some())
            .field("readiness", &self.readiness.is_some())
            .field("options", &self.options)
            .finish()
    }
}

// ============================================================================
// ListenerBuilder Implementation
// ============================================================================

impl ListenerBuilder {
    /// Creates a new builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the web-store URL the extension is installed from.
    ///
    /// The extension ID is derived from its last path segment.
    #[inline]
    #[must_use]
    pub fn install_url(mut self, url: impl Into<String>) -> Self {
        self.install_url = Some(url.into());
        self
    }

    /// Sets the extension platform.
    #[inline]
    #[must_use]
    pub fn platform(mut self, platform: Arc<dyn ExtensionPlatform>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the session store. Defaults to a fresh [`MemoryStore`].
    #[inline]
    #[must_use]
    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets a custom readiness strategy, replacing the settle delay.
    #[inline]
    #[must_use]
    pub fn readiness(mut self, readiness: Arc<dyn ReadinessWait>) -> Self {
        self.readiness = Some(readiness);
        self
    }

    /// Sets the fixed settle delay.
    #[inline]
    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.options.settle_delay = delay;
        self
    }

    /// Replaces all plain settings.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ListenerOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the listener with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the install URL or platform is not set
    /// - [`Error::Url`] if the install URL does not parse
    /// - [`Error::Config`] if no extension ID can be derived from it
    pub fn build(self) -> Result<ScreenShareListener> {
        let (install_url, extension_id) = self.validate_install_url()?;

        let platform = self.platform.ok_or_else(|| {
            Error::config(
                "Extension platform is required. Use .platform() to set it.\n\
                 Hosts without one should skip the listener entirely.",
            )
        })?;

        let store: Arc<dyn SessionStore> = match self.store {
            Some(store) => store,
            None => Arc::new(MemoryStore::new()),
        };

        let readiness: Arc<dyn ReadinessWait> = match self.readiness {
            Some(readiness) => readiness,
            None => Arc::new(FixedDelay(self.options.settle_delay)),
        };

        Ok(ScreenShareListener::new(
            install_url,
            extension_id,
            platform,
            store,
            readiness,
            self.options,
        ))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ListenerBuilder {
    /// Validates the install URL and derives the extension ID.
    fn validate_install_url(&self) -> Result<(String, ExtensionId)> {
        let install_url = self.install_url.clone().ok_or_else(|| {
            Error::config(
                "Install URL is required. Use .install_url() to set it.\n\
                 Example: .install_url(\"https://chrome.google.com/webstore/detail/<id>\")",
            )
        })?;

        let extension_id = ExtensionId::from_install_url(&install_url)?;
        Ok((install_url, extension_id))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::Value;

    struct NoopPlatform;

    #[async_trait]
    impl ExtensionPlatform for NoopPlatform {
        async fn install(&self, _webstore_url: &str) -> Result<()> {
            Ok(())
        }

        async fn send_message(&self, _id: &ExtensionId, payload: Value) -> Result<Value> {
            Ok(payload)
        }
    }

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ListenerBuilder::new();
        assert!(builder.install_url.is_none());
        assert!(builder.platform.is_none());
        assert_eq!(builder.options, ListenerOptions::default());
    }

    #[test]
    fn test_build_fails_without_install_url() {
        let err = ListenerBuilder::new()
            .platform(Arc::new(NoopPlatform))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Install URL"));
    }

    #[test]
    fn test_build_fails_without_platform() {
        let err = ListenerBuilder::new()
            .install_url("https://test.example/ext")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("platform"));
    }

    #[test]
    fn test_build_fails_with_invalid_url() {
        let err = ListenerBuilder::new()
            .install_url("::not a url::")
            .platform(Arc::new(NoopPlatform))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_build_derives_extension_id() {
        let listener = ListenerBuilder::new()
            .install_url("https://test.example/test/id-asdlfkjasdkd")
            .platform(Arc::new(NoopPlatform))
            .build()
            .expect("build");
        assert_eq!(listener.extension_id().as_str(), "id-asdlfkjasdkd");
        assert_eq!(
            listener.install_url(),
            "https://test.example/test/id-asdlfkjasdkd"
        );
    }

    #[test]
    fn test_settle_delay_sets_option() {
        let builder = ListenerBuilder::new().settle_delay(Duration::from_millis(10));
        assert_eq!(builder.options.settle_delay, Duration::from_millis(10));
    }
}
