//! Parent-side listener module.
//!
//! Runs in the frame that embeds the requesting iframe. Installs the
//! helper extension on demand and relays capture requests to it.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ScreenShareListener`] | Install-and-relay handler |
//! | [`ListenerBuilder`] | Fluent configuration builder |
//! | [`ListenerOptions`] | Storage key, reply origin, settle delay |
//! | [`ListenerHandle`] | Attached event loop |
//! | [`RelayState`] | Per-request state machine |
//!
//! # Example
//!
//! ```ignore
//! use frame_screenshare::{Frame, initialize_listener};
//!
//! let top = Frame::top("https://host.example");
//! let handle = initialize_listener(&top, WEBSTORE_URL, host.extension_platform())?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for listener configuration.
pub mod builder;

/// Listener and event loop.
pub mod core;

/// Plain listener settings.
pub mod options;

/// Install and relay state machine.
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ListenerBuilder;
pub use self::core::{ListenerHandle, ScreenShareListener, initialize_listener};
pub use options::ListenerOptions;
pub use state::{RelayOutcome, RelayState};
