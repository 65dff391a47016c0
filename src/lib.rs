//! Frame screen sharing - screen capture for embedded iframes.
//!
//! Some browsers only allow screen capture from an embedded, non-top-level
//! frame through a helper extension. This library brokers that capture
//! through the parent frame using cross-document messages.
//!
//! # Architecture
//!
//! Two roles run in two browsing contexts that only talk via messages:
//!
//! - **Parent (listener)**: Receives capture requests, installs the helper
//!   extension on demand, relays the request to it and posts the reply back
//! - **Child (requester)**: Decides between native and extension-mediated
//!   capture, posts the request and resolves a single result
//!
//! ```text
//! child ──getScreen──► parent ──(install)──► extension RPC
//!   ▲                                              │
//!   └──────────── sourceId / error / ack ◄─────────┘
//!   │
//!   └──► native capture ──► stream
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use frame_screenshare::{Frame, Requester, Result, Screen, initialize_listener};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let top = Frame::top("https://host.example");
//!     let _listener = initialize_listener(&top, WEBSTORE_URL, Some(platform))?;
//!
//!     let requester = Requester::builder()
//!         .frame(top.embed("https://frame.example"))
//!         .media_devices(Arc::new(devices))
//!         .extension_capable(true)
//!         .screen(Screen::new(1920, 1080))
//!         .build()?;
//!
//!     let outcome = requester.request_capture(None, false)?.await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`listener`] | Parent side: install and relay |
//! | [`requester`] | Child side: capability probe and capture |
//! | [`host`] | Injected host capabilities |
//! | [`protocol`] | Message and constraint types |
//! | [`transport`] | Cross-document messaging |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//!
//! # Security
//!
//! Replies are posted with the wildcard target origin `"*"`. Any frame
//! holding the same window reference can read them.

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Injected host capabilities.
///
/// Extension platform, native capture, session storage, readiness.
pub mod host;

/// Type-safe identifiers.
pub mod identifiers;

/// Parent-side install-and-relay listener.
pub mod listener;

/// Capture request and response payloads.
pub mod protocol;

/// Child-side capture requester.
pub mod requester;

/// Cross-document messaging layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Error types
pub use error::{Error, Result};

// Host capabilities
pub use host::{
    ExtensionPlatform, FixedDelay, Immediate, MediaDevices, MemoryStore, NoMediaDevices,
    ReadinessWait, Screen, SessionStore,
};

// Identifier types
pub use identifiers::{ExtensionId, RequestId};

// Listener types
pub use listener::{
    ListenerBuilder, ListenerHandle, ListenerOptions, RelayOutcome, ScreenShareListener,
    initialize_listener,
};

// Protocol types
pub use protocol::{CaptureConstraints, CaptureRequest, CaptureResponse, MediaConstraints};

// Requester types
pub use requester::{CaptureOutcome, PendingCapture, Requester, RequesterBuilder};

// Transport types
pub use transport::{Frame, MessageEvent, WindowProxy};
