//! Cross-document messaging layer.
//!
//! This module is an in-process rendition of the browser's
//! `window.postMessage` primitive: browsing contexts, the proxies used to
//! post into them, and the listeners that receive what was posted.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   post_message(data, "*")  ┌──────────────────────┐
//! │  Frame (parent)      │◄──────────────────────────│  Frame (child)       │
//! │                      │                            │                      │
//! │  MessageListener ──► │  event.source              │  MessageListener ──► │
//! │  ScreenShareListener │──────────────────────────►│  Requester           │
//! └──────────────────────┘                            └──────────────────────┘
//! ```
//!
//! # Delivery Rules
//!
//! - Delivery happens only when the target origin is `"*"` or matches the
//!   receiving frame's origin
//! - Every registered listener receives its own copy of each event
//! - Dropping a [`MessageListener`] unregisters it
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `frame` | Frames, window proxies and listeners |

// ============================================================================
// Submodules
// ============================================================================

/// Frames, window proxies and listeners.
pub mod frame;

// ============================================================================
// Re-exports
// ============================================================================

pub use frame::{Frame, MessageEvent, MessageListener, WILDCARD_ORIGIN, WindowProxy};
