//! Cross-document message types.
//!
//! This module defines the payloads exchanged between an embedded frame
//! (child) and the frame that embeds it (parent).
//!
//! # Protocol Overview
//!
//! | Message | Direction | Purpose |
//! |---------|-----------|---------|
//! | `CaptureRequest` | Child → Parent | Ask for a capture source or provisioning |
//! | `CaptureResponse` | Parent → Child | Source ID, error, or install acknowledgement |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `constraints` | Native capture constraints for both paths |
//! | `message` | Request and response payloads |

// ============================================================================
// Submodules
// ============================================================================

/// Native capture constraints.
pub mod constraints;

/// Request and response payloads.
pub mod message;

// ============================================================================
// Re-exports
// ============================================================================

pub use constraints::{
    CaptureConstraints, DesktopCapture, MAX_FRAME_RATE, MediaConstraints, VideoConstraints,
};
pub use message::{CaptureRequest, CaptureResponse, GET_SCREEN, ResponseKind};
