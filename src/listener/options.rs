//! Listener configuration.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use frame_screenshare::ListenerOptions;
//!
//! let options = ListenerOptions::new()
//!     .with_settle_delay(Duration::from_secs(1))
//!     .with_target_origin("https://frame.example");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::host::{EXTENSION_ID_KEY, SETTLE_DELAY};
use crate::transport::WILDCARD_ORIGIN;

// ============================================================================
// ListenerOptions
// ============================================================================

/// Parent listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Session store key for the cached extension identity.
    pub storage_key: String,

    /// Target origin used for every reply.
    pub target_origin: String,

    /// Wait between the install callback and the replayed request.
    ///
    /// Ignored when a custom readiness strategy is configured.
    pub settle_delay: Duration,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ListenerOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage_key: EXTENSION_ID_KEY.to_string(),
            target_origin: WILDCARD_ORIGIN.to_string(),
            settle_delay: SETTLE_DELAY,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ListenerOptions {
    /// Sets the session store key.
    #[inline]
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the reply target origin.
    #[inline]
    #[must_use]
    pub fn with_target_origin(mut self, origin: impl Into<String>) -> Self {
        self.target_origin = origin.into();
        self
    }

    /// Sets the post-install settle delay.
    #[inline]
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ListenerOptions::default();
        assert_eq!(options.storage_key, "getScreenMediaJSExtensionId");
        assert_eq!(options.target_origin, "*");
        assert_eq!(options.settle_delay, Duration::from_millis(2500));
    }

    #[test]
    fn test_builder_methods() {
        let options = ListenerOptions::new()
            .with_storage_key("ext")
            .with_target_origin("https://frame.example")
            .with_settle_delay(Duration::ZERO);

        assert_eq!(options.storage_key, "ext");
        assert_eq!(options.target_origin, "https://frame.example");
        assert_eq!(options.settle_delay, Duration::ZERO);
    }
}
