//! Child-side requester.
//!
//! Probes what the host can do, then either captures natively or asks the
//! parent frame for an extension-provided source and captures that.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::ready;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::host::{MediaDevices, Screen};
use crate::protocol::{
    CaptureConstraints, CaptureRequest, CaptureResponse, MediaConstraints, ResponseKind,
};
use crate::transport::{Frame, MessageListener, WILDCARD_ORIGIN};

use super::builder::RequesterBuilder;
use super::outcome::{CaptureOutcome, PendingCapture};

// ============================================================================
// Requester
// ============================================================================

/// Issues capture requests from inside an embedded frame.
pub struct Requester<M> {
    frame: Frame,
    media_devices: Option<Arc<M>>,
    async_support: bool,
    extension_capable: bool,
    screen: Screen,
}

impl<M> fmt::Debug for Requester<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requester")
            .field("frame", &self.frame)
            .field("media_devices", &self.media_devices.is_some())
            .field("async_support", &self.async_support)
            .field("extension_capable", &self.extension_capable)
            .field("screen", &self.screen)
            .finish()
    }
}

impl<M: MediaDevices + 'static> Requester<M> {
    /// Creates a builder.
    #[inline]
    #[must_use]
    pub fn builder() -> RequesterBuilder<M> {
        RequesterBuilder::new()
    }

    pub(crate) fn new(
        frame: Frame,
        media_devices: Option<Arc<M>>,
        async_support: bool,
        extension_capable: bool,
        screen: Screen,
    ) -> Self {
        Self {
            frame,
            media_devices,
            async_support,
            extension_capable,
            screen,
        }
    }

    /// Returns the frame this requester runs in.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns `true` if capture goes through the helper extension.
    #[inline]
    #[must_use]
    pub fn is_extension_capable(&self) -> bool {
        self.extension_capable
    }

    /// Returns the reported screen resolution.
    #[inline]
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Requests a capture, or only provisions the extension when
    /// `install_only` is set.
    ///
    /// On the extension path the response listener is registered and the
    /// request posted before this returns. There is no timeout: a parent
    /// that never answers leaves the capture pending.
    ///
    /// Async support is only consulted when the host has no capture API.
    /// A host with a capture API proceeds normally even when
    /// `async_support` is off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEnvironment`] synchronously when the host
    /// has neither a capture API nor async support. All other failures
    /// surface through the returned [`PendingCapture`]:
    ///
    /// - [`Error::UnsupportedEnvironment`] if there is no capture API
    /// - [`Error::Extension`] if the parent reported an error
    /// - [`Error::UserCancellation`] if the parent answered with nothing
    /// - whatever the native capture call fails with
    pub fn request_capture(
        &self,
        constraints: Option<CaptureConstraints>,
        install_only: bool,
    ) -> Result<PendingCapture<M::Stream>> {
        let Some(devices) = self.media_devices.clone() else {
            if !self.async_support {
                return Err(Error::unsupported(
                    "request_capture called in unsupported browser",
                ));
            }
            return Ok(ready(Err(Error::unsupported("Unsupported"))).boxed());
        };

        let constraints = constraints.unwrap_or_default();

        if !self.extension_capable {
            if install_only {
                debug!("Install-only request on a host that needs no extension");
                return Ok(ready(Ok(CaptureOutcome::NotRequired)).boxed());
            }

            let native = constraints
                .native_path
                .unwrap_or_else(MediaConstraints::direct);
            debug!(?native, "Capturing natively");

            return Ok(async move {
                devices
                    .get_user_media(native)
                    .await
                    .map(CaptureOutcome::Stream)
            }
            .boxed());
        }

        // Listen first so the parent's answer cannot be missed.
        let responses = self.frame.add_listener();

        let request = CaptureRequest::new(install_only, self.frame.origin());
        let data = request.to_value()?;

        let parent = self.frame.parent();
        let self_posted = parent.target().same_frame(&self.frame);
        parent.post_message(data.clone(), WILDCARD_ORIGIN);

        debug!(
            request_id = ?request.id,
            install_only,
            parent = %parent.origin(),
            "Capture request posted to parent"
        );

        let echo = self_posted.then_some(data);
        let screen = self.screen;
        let extension_path = constraints.extension_path;

        Ok(async move {
            let response = await_response(responses, echo).await?;
            resolve_response(response, devices, extension_path, screen).await
        }
        .boxed())
    }
}

// ============================================================================
// Response Handling
// ============================================================================

/// Waits for the first message that answers the request.
///
/// A top-level frame is its own parent, so its own request arrives back
/// first; that single echo is skipped.
async fn await_response(mut responses: MessageListener, mut echo: Option<Value>) -> Result<Value> {
    loop {
        let event = responses.recv().await.ok_or(Error::ChannelClosed)?;

        if echo.as_ref().is_some_and(|posted| *posted == event.data) {
            trace!("Skipping own request echo");
            echo = None;
            continue;
        }

        trace!(origin = %event.origin, "Response received");
        return Ok(event.data);
    }
}

/// Turns the parent's response into the final capture result.
async fn resolve_response<M: MediaDevices>(
    data: Value,
    devices: Arc<M>,
    extension_path: Option<MediaConstraints>,
    screen: Screen,
) -> Result<CaptureOutcome<M::Stream>> {
    match CaptureResponse::parse(&data).classify() {
        ResponseKind::Failed(detail) => Err(Error::extension(detail)),

        ResponseKind::Installed => {
            debug!("Extension install acknowledged");
            Ok(CaptureOutcome::Installed(data))
        }

        ResponseKind::Cancelled => Err(Error::UserCancellation),

        ResponseKind::Source(source_id) => {
            let constraints = match extension_path {
                Some(custom) => custom.bind_source(&source_id),
                None => MediaConstraints::desktop(source_id.as_str(), screen),
            };
            debug!(%source_id, "Capturing extension-provided source");

            devices
                .get_user_media(constraints)
                .await
                .map(CaptureOutcome::Stream)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
