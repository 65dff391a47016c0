//! Install and relay state machine.
//!
//! Every accepted request runs through these states, driven by a single
//! transition function in the listener:
//!
//! ```text
//! AwaitingExtensionCheck ──cached──────────────────────────► Relaying ──► Idle
//!        │                                                      ▲
//!        └─missing─► Installing ─► AwaitingInstallCallback ─────┘ (replay)
//!                        │                   │
//!                        ▼                   └─installOnly─► Acknowledging ─► Idle
//!                     Failed ─► Idle
//! ```
//!
//! A replay re-enters `AwaitingExtensionCheck` at most [`MAX_REPLAYS`]
//! times.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tokio::sync::OwnedMutexGuard;

use crate::error::Error;
use crate::identifiers::ExtensionId;
use crate::protocol::CaptureRequest;
use crate::transport::WindowProxy;

// ============================================================================
// Constants
// ============================================================================

/// How often a request may be replayed after an install.
pub const MAX_REPLAYS: u8 = 1;

// ============================================================================
// RelayState
// ============================================================================

/// State of one request inside the listener.
#[derive(Debug)]
pub enum RelayState {
    /// Nothing in flight.
    Idle,
    /// Looking up the cached extension identity.
    AwaitingExtensionCheck,
    /// Calling the platform's install.
    Installing,
    /// Install done, waiting for the extension to settle.
    AwaitingInstallCallback,
    /// Forwarding the request to the extension.
    Relaying(ExtensionId),
    /// Echoing an install-only request back.
    Acknowledging,
    /// Reporting a failure to the requester.
    Failed(Error),
}

impl RelayState {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingExtensionCheck => "awaiting_extension_check",
            Self::Installing => "installing",
            Self::AwaitingInstallCallback => "awaiting_install_callback",
            Self::Relaying(_) => "relaying",
            Self::Acknowledging => "acknowledging",
            Self::Failed(_) => "failed",
        }
    }
}

// ============================================================================
// RelayOutcome
// ============================================================================

/// How the listener disposed of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Not a capture request, or nobody to answer.
    Ignored,
    /// Extension reply forwarded.
    Relayed,
    /// Install-only request acknowledged.
    Acknowledged,
    /// Error response posted.
    Failed,
}

// ============================================================================
// PendingRequest
// ============================================================================

/// The request slot carried through the state machine.
pub struct PendingRequest {
    /// Parsed request.
    pub request: CaptureRequest,
    /// Raw payload, forwarded to the extension unmodified.
    pub data: Value,
    /// Where replies go.
    pub reply_to: WindowProxy,
    /// Replays performed so far.
    pub replays: u8,
    /// Held while this request installs the extension.
    pub install_guard: Option<OwnedMutexGuard<()>>,
    /// Set by the terminal transition.
    pub outcome: Option<RelayOutcome>,
}

impl PendingRequest {
    /// Creates a fresh slot.
    #[must_use]
    pub fn new(request: CaptureRequest, data: Value, reply_to: WindowProxy) -> Self {
        Self {
            request,
            data,
            reply_to,
            replays: 0,
            install_guard: None,
            outcome: None,
        }
    }

    /// Returns `true` if only provisioning was asked for.
    #[inline]
    #[must_use]
    pub fn install_only(&self) -> bool {
        self.request.install_only
    }

    /// Returns `true` if another replay is allowed.
    #[inline]
    #[must_use]
    pub fn can_replay(&self) -> bool {
        self.replays < MAX_REPLAYS
    }
}

// ============================================================================
// Tests
// ============================================================================
