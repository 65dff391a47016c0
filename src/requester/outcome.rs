//! Result of a capture request.

// ============================================================================
// Imports
// ============================================================================

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::error::Result;

// ============================================================================
// Types
// ============================================================================

/// Capture that resolves once the handshake and native call finish.
pub type PendingCapture<S> = BoxFuture<'static, Result<CaptureOutcome<S>>>;

// ============================================================================
// CaptureOutcome
// ============================================================================

/// What a successful capture request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome<S> {
    /// Media captured by the native API.
    Stream(S),

    /// The extension is installed; nothing was captured.
    ///
    /// Carries the acknowledgement payload as received.
    Installed(Value),

    /// Install-only request on a host that needs no extension.
    NotRequired,
}

impl<S> CaptureOutcome<S> {
    /// Returns the stream, if one was captured.
    #[inline]
    #[must_use]
    pub fn into_stream(self) -> Option<S> {
        match self {
            Self::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    /// Returns `true` for an install acknowledgement.
    #[inline]
    #[must_use]
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_into_stream() {
        assert_eq!(CaptureOutcome::Stream(7).into_stream(), Some(7));
        assert_eq!(CaptureOutcome::<u8>::NotRequired.into_stream(), None);
    }

    #[test]
    fn test_is_installed() {
        assert!(CaptureOutcome::<()>::Installed(json!({ "installOnly": true })).is_installed());
        assert!(!CaptureOutcome::Stream(()).is_installed());
    }
}
