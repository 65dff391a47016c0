//! Browsing contexts and message delivery.
//!
//! A [`Frame`] owns an origin, an optional parent and its registered
//! listeners. Messages are posted through a [`WindowProxy`], which
//! remembers which frame is sending so the receiver can answer through
//! `event.source`.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::trace;

// ============================================================================
// Constants
// ============================================================================

/// Target origin that matches any receiving frame.
///
/// Responses go out with this target because the parent cannot know the
/// embedded frame's origin in general. Any frame holding the same window
/// reference can read them; restricting the origin would break
/// cross-origin embedding.
pub const WILDCARD_ORIGIN: &str = "*";

// ============================================================================
// MessageEvent
// ============================================================================

/// A message delivered to a frame.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// Posted payload.
    pub data: Value,

    /// Origin of the sending frame.
    pub origin: String,

    /// Proxy for answering the sender. `None` for host-injected events.
    pub source: Option<WindowProxy>,
}

impl MessageEvent {
    /// Creates an event with no source to reply to.
    #[inline]
    #[must_use]
    pub fn detached(data: Value, origin: impl Into<String>) -> Self {
        Self {
            data,
            origin: origin.into(),
            source: None,
        }
    }
}

// ============================================================================
// Frame
// ============================================================================

/// A browsing context that can send and receive messages.
///
/// Cheap to clone; clones refer to the same frame.
#[derive(Clone)]
pub struct Frame {
    inner: Arc<FrameInner>,
}

struct FrameInner {
    origin: String,
    parent: Option<Frame>,
    listeners: Mutex<Vec<mpsc::UnboundedSender<MessageEvent>>>,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("origin", &self.inner.origin)
            .field("is_top", &self.is_top())
            .finish_non_exhaustive()
    }
}

impl Frame {
    /// Creates a top-level frame.
    #[must_use]
    pub fn top(origin: impl Into<String>) -> Self {
        Self::with_parent(origin.into(), None)
    }

    /// Embeds a new child frame inside this one.
    #[must_use]
    pub fn embed(&self, origin: impl Into<String>) -> Self {
        Self::with_parent(origin.into(), Some(self.clone()))
    }

    fn with_parent(origin: String, parent: Option<Frame>) -> Self {
        Self {
            inner: Arc::new(FrameInner {
                origin,
                parent,
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns this frame's origin.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.inner.origin
    }

    /// Returns `true` if this frame has no parent.
    #[inline]
    #[must_use]
    pub fn is_top(&self) -> bool {
        self.inner.parent.is_none()
    }

    /// Returns a proxy for posting to the parent frame.
    ///
    /// A top-level frame is its own parent.
    #[must_use]
    pub fn parent(&self) -> WindowProxy {
        let target = self.inner.parent.clone().unwrap_or_else(|| self.clone());
        WindowProxy::new(target, self.clone())
    }

    /// Returns a proxy for posting to this frame from itself.
    #[must_use]
    pub fn proxy(&self) -> WindowProxy {
        WindowProxy::new(self.clone(), self.clone())
    }

    /// Registers a message listener.
    ///
    /// The listener receives every message delivered after this call.
    #[must_use]
    pub fn add_listener(&self) -> MessageListener {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.listeners.lock().push(tx);
        trace!(origin = %self.origin(), "Listener registered");
        MessageListener { rx }
    }

    /// Returns the number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        let mut listeners = self.inner.listeners.lock();
        listeners.retain(|tx| !tx.is_closed());
        listeners.len()
    }

    /// Returns `true` if both handles refer to the same frame.
    #[inline]
    #[must_use]
    pub fn same_frame(&self, other: &Frame) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Delivers an event to every live listener.
    ///
    /// Returns the number of listeners reached.
    fn dispatch(&self, event: MessageEvent) -> usize {
        let mut listeners = self.inner.listeners.lock();
        listeners.retain(|tx| tx.send(event.clone()).is_ok());
        listeners.len()
    }
}

// ============================================================================
// WindowProxy
// ============================================================================

/// Handle for posting messages into a frame.
#[derive(Clone)]
pub struct WindowProxy {
    /// Frame receiving the messages.
    target: Frame,
    /// Frame the messages come from.
    sender: Frame,
}

impl fmt::Debug for WindowProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowProxy")
            .field("target", &self.target.origin())
            .field("sender", &self.sender.origin())
            .finish()
    }
}

impl WindowProxy {
    fn new(target: Frame, sender: Frame) -> Self {
        Self { target, sender }
    }

    /// Returns the origin of the frame this proxy posts into.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        self.target.origin()
    }

    /// Returns the frame this proxy posts into.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &Frame {
        &self.target
    }

    /// Posts a message to the target frame.
    ///
    /// The message is dropped unless `target_origin` is
    /// [`WILDCARD_ORIGIN`] or equals the target's origin. Returns the
    /// number of listeners that received it.
    pub fn post_message(&self, data: Value, target_origin: &str) -> usize {
        if target_origin != WILDCARD_ORIGIN && target_origin != self.target.origin() {
            trace!(
                target_origin,
                actual = %self.target.origin(),
                "Target origin mismatch, message dropped"
            );
            return 0;
        }

        let event = MessageEvent {
            data,
            origin: self.sender.origin().to_string(),
            source: Some(WindowProxy::new(self.sender.clone(), self.target.clone())),
        };

        let delivered = self.target.dispatch(event);
        trace!(
            from = %self.sender.origin(),
            to = %self.target.origin(),
            delivered,
            "Message posted"
        );
        delivered
    }
}

// ============================================================================
// MessageListener
// ============================================================================

/// Receiving end of a frame's message listener.
///
/// Dropping it unregisters the listener.
#[derive(Debug)]
pub struct MessageListener {
    rx: mpsc::UnboundedReceiver<MessageEvent>,
}

impl MessageListener {
    /// Waits for the next message.
    ///
    /// Returns `None` once the frame is gone.
    pub async fn recv(&mut self) -> Option<MessageEvent> {
        self.rx.recv().await
    }

    /// Returns a queued message without waiting.
    pub fn try_recv(&mut self) -> Option<MessageEvent> {
        self.rx.try_recv().ok()
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
    fn test_top_frame_is_its_own_parent() {
        let top = Frame::top("https://host.example");
        assert!(top.is_top());
        assert!(top.parent().target().same_frame(&top));
    }

    #[test]
    fn test_child_posts_to_parent() {
        let top = Frame::top("https://host.example");
        let child = top.embed("https://frame.example");
        let mut listener = top.add_listener();

        let delivered = child.parent().post_message(json!({ "hello": 1 }), WILDCARD_ORIGIN);
        assert_eq!(delivered, 1);

        let event = listener.try_recv().expect("event");
        assert_eq!(event.data["hello"], 1);
        assert_eq!(event.origin, "https://frame.example");

        let source = event.source.expect("source");
        assert!(source.target().same_frame(&child));
    }

    #[test]
    fn test_reply_through_source() {
        let top = Frame::top("https://host.example");
        let child = top.embed("https://frame.example");
        let mut parent_listener = top.add_listener();
        let mut child_listener = child.add_listener();

        child.parent().post_message(json!("ping"), WILDCARD_ORIGIN);
        let event = parent_listener.try_recv().expect("event");
        event
            .source
            .expect("source")
            .post_message(json!("pong"), WILDCARD_ORIGIN);

        let reply = child_listener.try_recv().expect("reply");
        assert_eq!(reply.data, json!("pong"));
        assert_eq!(reply.origin, "https://host.example");
    }

    #[test]
    fn test_origin_mismatch_drops_message() {
        let top = Frame::top("https://host.example");
        let child = top.embed("https://frame.example");
        let mut listener = top.add_listener();

        assert_eq!(child.parent().post_message(json!(1), "https://other.example"), 0);
        assert!(listener.try_recv().is_none());

        assert_eq!(child.parent().post_message(json!(2), "https://host.example"), 1);
        assert_eq!(listener.try_recv().expect("event").data, json!(2));
    }

    #[test]
    fn test_every_listener_gets_a_copy() {
        let top = Frame::top("https://host.example");
        let mut a = top.add_listener();
        let mut b = top.add_listener();

        assert_eq!(top.proxy().post_message(json!("x"), WILDCARD_ORIGIN), 2);
        assert!(a.try_recv().is_some());
        assert!(b.try_recv().is_some());
    }

    #[test]
    fn test_dropped_listener_unregisters() {
        let top = Frame::top("https://host.example");
        let listener = top.add_listener();
        assert_eq!(top.listener_count(), 1);

        drop(listener);
        assert_eq!(top.listener_count(), 0);
        assert_eq!(top.proxy().post_message(json!("x"), WILDCARD_ORIGIN), 0);
    }

    #[tokio::test]
    async fn test_recv_waits_for_message() {
        let top = Frame::top("https://host.example");
        let mut listener = top.add_listener();
        let proxy = top.proxy();

        tokio::spawn(async move {
            proxy.post_message(json!("later"), WILDCARD_ORIGIN);
        });

        let event = listener.recv().await.expect("event");
        assert_eq!(event.data, json!("later"));
    }
}
