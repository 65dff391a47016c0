//! Readiness strategies applied after an extension install.
//!
//! The extension's background service needs time to come up after the
//! install callback fires. By default the listener waits a fixed
//! [`SETTLE_DELAY`] before replaying the request.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::trace;

use crate::identifiers::ExtensionId;

// ============================================================================
// Constants
// ============================================================================

/// Default wait between the install callback and the replayed request.
pub const SETTLE_DELAY: Duration = Duration::from_millis(2500);

// ============================================================================
// ReadinessWait
// ============================================================================

/// Waits until a freshly installed extension can receive messages.
#[async_trait]
pub trait ReadinessWait: Send + Sync {
    /// Resolves once the extension is considered ready.
    async fn wait_ready(&self, extension_id: &ExtensionId);
}

// ============================================================================
// FixedDelay
// ============================================================================

/// Sleeps for a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        Self(SETTLE_DELAY)
    }
}

#[async_trait]
impl ReadinessWait for FixedDelay {
    async fn wait_ready(&self, extension_id: &ExtensionId) {
        trace!(%extension_id, delay_ms = self.0.as_millis() as u64, "Waiting for extension to settle");
        sleep(self.0).await;
    }
}

// ============================================================================
// Immediate
// ============================================================================

/// Treats the extension as ready as soon as the install completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Immediate;

#[async_trait]
impl ReadinessWait for Immediate {
    async fn wait_ready(&self, _extension_id: &ExtensionId) {}
}

// ============================================================================
// Tests
// ============================================================================
