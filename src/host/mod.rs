//! Host capabilities the handshake depends on.
//!
//! The browser primitives around the protocol are modelled as injected
//! collaborators so each side can run against a real host binding or a
//! test double.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ExtensionPlatform`] | Extension install and runtime messaging |
//! | [`MediaDevices`] | Native capture API |
//! | [`NoMediaDevices`] | Host without a capture API |
//! | [`SessionStore`] | Session-scoped key-value storage |
//! | [`ReadinessWait`] | Wait between install and first message |
//! | [`Screen`] | Reported screen resolution |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::identifiers::ExtensionId;
use crate::protocol::MediaConstraints;

// ============================================================================
// Submodules
// ============================================================================

/// Post-install readiness strategies.
pub mod readiness;

/// Session-scoped storage.
pub mod storage;

// ============================================================================
// Re-exports
// ============================================================================

pub use readiness::{FixedDelay, Immediate, ReadinessWait, SETTLE_DELAY};
pub use storage::{EXTENSION_ID_KEY, MemoryStore, SessionStore};

// ============================================================================
// ExtensionPlatform
// ============================================================================

/// Extension install and messaging, available on the parent side.
///
/// A host without this capability gets no listener at all.
#[async_trait]
pub trait ExtensionPlatform: Send + Sync {
    /// Installs the extension from a web-store URL.
    ///
    /// Resolves once the install callback fires.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Install`] if the platform refuses the
    /// install, e.g. because no user gesture triggered it.
    async fn install(&self, webstore_url: &str) -> Result<()>;

    /// Sends a payload to the extension and returns its reply.
    ///
    /// The reply is opaque and forwarded unmodified to the requester.
    async fn send_message(&self, extension_id: &ExtensionId, payload: Value) -> Result<Value>;
}

// ============================================================================
// MediaDevices
// ============================================================================

/// The native capture API, available on the child side.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Captured media handed back to the caller.
    type Stream: Send + 'static;

    /// Starts a capture with the given constraints.
    ///
    /// Errors pass through to the caller unmodified.
    async fn get_user_media(&self, constraints: MediaConstraints) -> Result<Self::Stream>;
}

/// Stand-in for hosts that expose no capture API.
///
/// Every call fails with [`crate::Error::UnsupportedEnvironment`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoMediaDevices;

#[async_trait]
impl MediaDevices for NoMediaDevices {
    type Stream = ();

    async fn get_user_media(&self, _constraints: MediaConstraints) -> Result<Self::Stream> {
        Err(crate::Error::unsupported("no media capture API"))
    }
}

// ============================================================================
// Screen
// ============================================================================

/// Screen resolution as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Screen {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Screen {
    /// Creates a screen description.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
