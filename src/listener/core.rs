//! Parent-side listener.
//!
//! Answers capture requests from embedded frames: makes sure the helper
//! extension is installed, relays the request to it and posts the reply
//! back to the requesting frame.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::host::{ExtensionPlatform, ReadinessWait, SessionStore};
use crate::identifiers::ExtensionId;
use crate::protocol::{CaptureRequest, CaptureResponse};
use crate::transport::{Frame, MessageEvent};

use super::builder::ListenerBuilder;
use super::options::ListenerOptions;
use super::state::{PendingRequest, RelayOutcome, RelayState};

// ============================================================================
// Entry Point
// ============================================================================

/// Registers a parent-side listener on `frame`.
///
/// Returns `Ok(None)` without registering anything when the host has no
/// extension platform. Calling this twice registers two listeners.
///
/// The identity cache is a fresh [`MemoryStore`](crate::host::MemoryStore)
/// per call. Listeners that must share a session store are built with
/// [`ScreenShareListener::builder()`] and [`ListenerBuilder::store`].
///
/// # Errors
///
/// - [`Error::Url`] if the install URL does not parse
/// - [`Error::Config`] if no extension ID can be derived from it
pub fn initialize_listener(
    frame: &Frame,
    install_url: &str,
    platform: Option<Arc<dyn ExtensionPlatform>>,
) -> Result<Option<ListenerHandle>> {
    let Some(platform) = platform else {
        debug!(origin = %frame.origin(), "No extension platform, listener not registered");
        return Ok(None);
    };

    let listener = ScreenShareListener::builder()
        .install_url(install_url)
        .platform(platform)
        .build()?;

    Ok(Some(listener.attach(frame)))
}

// ============================================================================
// ScreenShareListener
// ============================================================================

/// Install-and-relay handler for capture requests.
///
/// Cheap to clone; clones share the identity cache and install lock.
#[derive(Clone)]
pub struct ScreenShareListener {
    inner: Arc<ListenerInner>,
}

struct ListenerInner {
    install_url: String,
    extension_id: ExtensionId,
    platform: Arc<dyn ExtensionPlatform>,
    store: Arc<dyn SessionStore>,
    readiness: Arc<dyn ReadinessWait>,
    options: ListenerOptions,
    /// Serializes installs so concurrent requests share one.
    install_lock: Arc<AsyncMutex<()>>,
}

impl fmt::Debug for ScreenShareListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenShareListener")
            .field("install_url", &self.inner.install_url)
            .field("extension_id", &self.inner.extension_id)
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}

impl ScreenShareListener {
    /// Creates a builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ListenerBuilder {
        ListenerBuilder::new()
    }

    pub(crate) fn new(
        install_url: String,
        extension_id: ExtensionId,
        platform: Arc<dyn ExtensionPlatform>,
        store: Arc<dyn SessionStore>,
        readiness: Arc<dyn ReadinessWait>,
        options: ListenerOptions,
    ) -> Self {
        Self {
            inner: Arc::new(ListenerInner {
                install_url,
                extension_id,
                platform,
                store,
                readiness,
                options,
                install_lock: Arc::new(AsyncMutex::new(())),
            }),
        }
    }

    /// Returns the configured install URL.
    #[inline]
    #[must_use]
    pub fn install_url(&self) -> &str {
        &self.inner.install_url
    }

    /// Returns the extension ID derived from the install URL.
    #[inline]
    #[must_use]
    pub fn extension_id(&self) -> &ExtensionId {
        &self.inner.extension_id
    }

    /// Returns the cached extension identity, if any.
    #[must_use]
    pub fn cached_extension_id(&self) -> Option<ExtensionId> {
        self.inner
            .store
            .get(&self.inner.options.storage_key)
            .filter(|id| !id.is_empty())
            .map(ExtensionId::new)
    }

    /// Registers on `frame` and spawns the event loop.
    ///
    /// The listener is registered before this returns. Each accepted
    /// request is handled on its own task so a pending install never
    /// blocks other messages.
    #[must_use]
    pub fn attach(&self, frame: &Frame) -> ListenerHandle {
        let mut messages = frame.add_listener();
        let listener = self.clone();
        let origin = frame.origin().to_string();

        let task = tokio::spawn(async move {
            while let Some(event) = messages.recv().await {
                if listener.accepts(&event) {
                    let listener = listener.clone();
                    tokio::spawn(async move {
                        listener.handle_message(event).await;
                    });
                }
            }
            debug!(%origin, "Listener event loop terminated");
        });

        info!(
            origin = %frame.origin(),
            extension_id = %self.inner.extension_id,
            "Screen share listener attached"
        );
        ListenerHandle { task }
    }

    /// Returns `true` if the event is a capture request.
    #[must_use]
    pub fn accepts(&self, event: &MessageEvent) -> bool {
        CaptureRequest::parse(&event.data).is_some()
    }

    /// Handles one message to completion.
    ///
    /// Anything that is not a capture request is ignored without side
    /// effects.
    pub async fn handle_message(&self, event: MessageEvent) -> RelayOutcome {
        let Some(request) = CaptureRequest::parse(&event.data) else {
            trace!(origin = %event.origin, "Ignoring message that is not a capture request");
            return RelayOutcome::Ignored;
        };

        let Some(reply_to) = event.source else {
            warn!(origin = %event.origin, "Capture request without a source, cannot reply");
            return RelayOutcome::Ignored;
        };

        debug!(
            request_id = ?request.id,
            origin = %event.origin,
            install_only = request.install_only,
            "Capture request received"
        );

        let mut slot = PendingRequest::new(request, event.data, reply_to);
        let mut state = RelayState::AwaitingExtensionCheck;

        loop {
            trace!(request_id = ?slot.request.id, state = state.name(), "Relay transition");
            match self.transition(state, &mut slot).await {
                RelayState::Idle => break,
                next => state = next,
            }
        }

        slot.outcome.unwrap_or(RelayOutcome::Ignored)
    }

    /// Advances one request by one state.
    async fn transition(&self, state: RelayState, slot: &mut PendingRequest) -> RelayState {
        match state {
            RelayState::Idle => RelayState::Idle,

            RelayState::AwaitingExtensionCheck => match self.cached_extension_id() {
                Some(extension_id) => RelayState::Relaying(extension_id),
                None if !slot.can_replay() => RelayState::Failed(Error::install(
                    "extension identity missing after install",
                )),
                None => RelayState::Installing,
            },

            RelayState::Installing => {
                let guard = Arc::clone(&self.inner.install_lock).lock_owned().await;

                // Another request may have finished installing while we waited.
                if self.cached_extension_id().is_some() {
                    drop(guard);
                    return self.after_install(slot);
                }

                debug!(install_url = %self.inner.install_url, "Installing extension");
                match self.inner.platform.install(&self.inner.install_url).await {
                    Ok(()) => {
                        slot.install_guard = Some(guard);
                        RelayState::AwaitingInstallCallback
                    }
                    Err(err) => RelayState::Failed(into_install_error(err)),
                }
            }

            RelayState::AwaitingInstallCallback => {
                let extension_id = &self.inner.extension_id;
                self.inner.readiness.wait_ready(extension_id).await;

                self.inner
                    .store
                    .set(&self.inner.options.storage_key, extension_id.to_string());
                slot.install_guard = None;

                info!(%extension_id, "Extension installed");
                self.after_install(slot)
            }

            RelayState::Relaying(extension_id) => {
                debug!(%extension_id, request_id = ?slot.request.id, "Relaying to extension");
                match self
                    .inner
                    .platform
                    .send_message(&extension_id, slot.data.clone())
                    .await
                {
                    Ok(reply) => {
                        self.reply(slot, reply);
                        slot.outcome = Some(RelayOutcome::Relayed);
                        RelayState::Idle
                    }
                    Err(err) => RelayState::Failed(err),
                }
            }

            RelayState::Acknowledging => {
                self.reply(slot, slot.data.clone());
                slot.outcome = Some(RelayOutcome::Acknowledged);
                RelayState::Idle
            }

            RelayState::Failed(err) => {
                warn!(request_id = ?slot.request.id, error = %err, "Capture request failed");
                self.reply(slot, CaptureResponse::failure(&err));
                slot.outcome = Some(RelayOutcome::Failed);
                RelayState::Idle
            }
        }
    }

    /// Picks the state that follows a completed install.
    fn after_install(&self, slot: &mut PendingRequest) -> RelayState {
        if slot.install_only() {
            return RelayState::Acknowledging;
        }

        slot.replays += 1;
        RelayState::AwaitingExtensionCheck
    }

    fn reply(&self, slot: &PendingRequest, data: serde_json::Value) {
        let delivered = slot
            .reply_to
            .post_message(data, &self.inner.options.target_origin);
        trace!(request_id = ?slot.request.id, delivered, "Reply posted");
    }
}

fn into_install_error(err: Error) -> Error {
    match err {
        Error::Install { .. } => err,
        other => Error::install(other.to_string()),
    }
}

// ============================================================================
// ListenerHandle
// ============================================================================

/// Handle to an attached listener's event loop.
#[derive(Debug)]
pub struct ListenerHandle {
    task: JoinHandle<()>,
}

impl ListenerHandle {
    /// Stops receiving new messages.
    ///
    /// Requests already being handled run to completion.
    pub fn detach(self) {
        self.task.abort();
    }

    /// Returns `true` while the event loop is running.
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.task.is_finished()
    }
}

// ============================================================================
// Tests
// ============================================================================
