//! Builder pattern for requester configuration.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use frame_screenshare::{Requester, Screen};
//!
//! let requester = Requester::builder()
//!     .frame(iframe)
//!     .media_devices(Arc::new(devices))
//!     .extension_capable(true)
//!     .screen(Screen::new(1920, 1080))
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::host::{MediaDevices, Screen};
use crate::transport::Frame;

use super::core::Requester;

// ============================================================================
// RequesterBuilder
// ============================================================================

/// Builder for configuring a [`Requester`].
///
/// Defaults describe a host with async support, no capture API and no
/// extension platform.
pub struct RequesterBuilder<M> {
    /// Frame the requester runs in.
    frame: Option<Frame>,
    /// Native capture API.
    media_devices: Option<Arc<M>>,
    /// Host can report failures asynchronously.
    async_support: bool,
    /// Host is the extension-capable platform.
    extension_capable: bool,
    /// Reported screen resolution.
    screen: Screen,
}

impl<M> Default for RequesterBuilder<M> {
    fn default() -> Self {
        Self {
            frame: None,
            media_devices: None,
            async_support: true,
            extension_capable: false,
            screen: Screen::default(),
        }
    }
}

impl<M> fmt::Debug for RequesterBuilder<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequesterBuilder")
            .field("frame", &self.frame)
            .field("media_devices", &self.media_devices.is_some())
            .field("async_support", &self.async_support)
            .field("extension_capable", &self.extension_capable)
            .field("screen", &self.screen)
            .finish()
    }
}

// ============================================================================
// RequesterBuilder Implementation
// ============================================================================

impl<M: MediaDevices + 'static> RequesterBuilder<M> {
    /// Creates a builder with default capabilities.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame the requester runs in.
    #[inline]
    #[must_use]
    pub fn frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Sets the native capture API.
    #[inline]
    #[must_use]
    pub fn media_devices(mut self, devices: Arc<M>) -> Self {
        self.media_devices = Some(devices);
        self
    }

    /// Declares whether failures can be reported asynchronously.
    #[inline]
    #[must_use]
    pub fn async_support(mut self, supported: bool) -> Self {
        self.async_support = supported;
        self
    }

    /// Declares whether capture must go through the helper extension.
    #[inline]
    #[must_use]
    pub fn extension_capable(mut self, capable: bool) -> Self {
        self.extension_capable = capable;
        self
    }

    /// Sets the reported screen resolution.
    #[inline]
    #[must_use]
    pub fn screen(mut self, screen: Screen) -> Self {
        self.screen = screen;
        self
    }

    /// Builds the requester.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no frame is set.
    pub fn build(self) -> Result<Requester<M>> {
        let frame = self.frame.ok_or_else(|| {
            Error::config(
                "Frame is required. Use .frame() to set it.\n\
                 Example: Requester::builder().frame(top.embed(\"https://frame.example\"))",
            )
        })?;

        Ok(Requester::new(
            frame,
            self.media_devices,
            self.async_support,
            self.extension_capable,
            self.screen,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
