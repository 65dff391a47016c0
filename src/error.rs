//! Error types for frame screen sharing.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use frame_screenshare::{CaptureOutcome, Result};
//!
//! async fn example(requester: &Requester<Devices>) -> Result<()> {
//!     match requester.request_capture(None, false)?.await? {
//!         CaptureOutcome::Stream(stream) => attach(stream),
//!         _ => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! Errors are classified by where they come from, not by code path:
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::Url`] |
//! | Environment | [`Error::UnsupportedEnvironment`] |
//! | Extension | [`Error::Extension`], [`Error::Install`] |
//! | Cancellation | [`Error::UserCancellation`] |
//! | Native capture | [`Error::Capture`] |
//! | Channel | [`Error::ChannelClosed`] |
//! | External | [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use serde_json::{Value, json};
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when a listener or requester builder is misconfigured.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Install URL could not be parsed.
    #[error("Invalid install URL: {0}")]
    Url(#[from] url::ParseError),

    // ========================================================================
    // Environment Errors
    // ========================================================================
    /// The host exposes no media capture API.
    ///
    /// Returned synchronously when the host has no asynchronous primitive
    /// either, otherwise as the result of the pending capture.
    #[error("Unsupported environment: {message}")]
    UnsupportedEnvironment {
        /// Which capability is missing.
        message: String,
    },

    // ========================================================================
    // Extension Errors
    // ========================================================================
    /// The extension, or the parent on its behalf, reported a failure.
    ///
    /// The detail is the opaque payload carried by the response message.
    #[error("Extension error: {}", describe_detail(.detail))]
    Extension {
        /// Error payload exactly as received.
        detail: Value,
    },

    /// The extension install call was refused.
    ///
    /// Raised on the parent side and posted to the child as an error
    /// response; it never escapes the listener.
    #[error("Install failed: {message}")]
    Install {
        /// Reason reported by the platform.
        message: String,
    },

    // ========================================================================
    // Cancellation
    // ========================================================================
    /// The parent answered without a source, error or acknowledgement.
    ///
    /// Interpreted as the user dismissing the capture permission prompt.
    #[error("User Cancellation")]
    UserCancellation,

    // ========================================================================
    // Native Capture Errors
    // ========================================================================
    /// The native capture call failed.
    #[error("Capture failed: {message}")]
    Capture {
        /// Message reported by the capture API.
        message: String,
    },

    // ========================================================================
    // Channel Errors
    // ========================================================================
    /// The message channel closed before a response arrived.
    #[error("Channel closed")]
    ChannelClosed,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an unsupported environment error.
    #[inline]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedEnvironment {
            message: message.into(),
        }
    }

    /// Creates an extension error from a received payload.
    #[inline]
    pub fn extension(detail: Value) -> Self {
        Self::Extension { detail }
    }

    /// Creates an install error.
    #[inline]
    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
        }
    }

    /// Creates a native capture error.
    #[inline]
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the user dismissed the capture prompt.
    #[inline]
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::UserCancellation)
    }

    /// Returns `true` if this error came from the extension or its install.
    #[inline]
    #[must_use]
    pub fn is_extension_error(&self) -> bool {
        matches!(self, Self::Extension { .. } | Self::Install { .. })
    }

    /// Returns `true` if the host cannot capture at all.
    #[inline]
    #[must_use]
    pub fn is_environment_error(&self) -> bool {
        matches!(self, Self::UnsupportedEnvironment { .. })
    }
}

// ============================================================================
// Wire Rendering
// ============================================================================

impl Error {
    /// Renders this error as the detail carried by an error response.
    ///
    /// Extension payloads are forwarded verbatim; everything else becomes
    /// `{ "name": ..., "message": ... }`.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Extension { detail } => detail.clone(),
            Self::Install { message } => json!({ "name": "InstallError", "message": message }),
            other => json!({ "name": "Error", "message": other.to_string() }),
        }
    }
}

/// Best-effort human readable form of an opaque error payload.
fn describe_detail(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| detail.to_string()),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
