//! Child-side requester module.
//!
//! Runs inside the embedded frame and produces one capture result per
//! call: a media stream, an install acknowledgement, or an error.
//!
//! # Capture Paths
//!
//! | Host | Behaviour |
//! |------|-----------|
//! | No capture API | Fails, synchronously if the host has no async support |
//! | Native capture | Calls the capture API directly |
//! | Extension-capable | Asks the parent for a source, then captures it |
//!
//! # Example
//!
//! ```ignore
//! use frame_screenshare::{CaptureOutcome, Requester};
//!
//! let pending = requester.request_capture(None, false)?;
//! if let CaptureOutcome::Stream(stream) = pending.await? {
//!     attach(stream);
//! }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for requester configuration.
pub mod builder;

/// Requester and response handling.
pub mod core;

/// Capture results.
pub mod outcome;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::Requester;
pub use builder::RequesterBuilder;
pub use outcome::{CaptureOutcome, PendingCapture};
