//! End-to-end handshake between an embedded frame and its parent.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use frame_screenshare::host::EXTENSION_ID_KEY;
use frame_screenshare::protocol::VideoConstraints;
use frame_screenshare::{
    CaptureOutcome, Error, ExtensionId, ExtensionPlatform, Frame, ListenerHandle,
    MediaConstraints, MediaDevices, MemoryStore, Requester, Result, Screen, ScreenShareListener,
    SessionStore,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Test Doubles
// ============================================================================

const INSTALL_URL: &str = "https://chrome.google.com/webstore/detail/screenshare/ext-from-url";

#[derive(Default)]
struct Extension {
    installs: AtomicUsize,
    sends: AtomicUsize,
    refuse_install: bool,
}

#[async_trait]
impl ExtensionPlatform for Extension {
    async fn install(&self, _webstore_url: &str) -> Result<()> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        if self.refuse_install {
            return Err(Error::install("installations can only be initiated by a user gesture"));
        }
        Ok(())
    }

    async fn send_message(&self, _extension_id: &ExtensionId, _payload: Value) -> Result<Value> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "sourceId": "abc" }))
    }
}

#[derive(Default)]
struct Devices {
    calls: Mutex<Vec<MediaConstraints>>,
}

#[async_trait]
impl MediaDevices for Devices {
    type Stream = String;

    async fn get_user_media(&self, constraints: MediaConstraints) -> Result<Self::Stream> {
        let source = constraints.source_id().unwrap_or("native").to_string();
        self.calls.lock().push(constraints);
        Ok(format!("stream:{source}"))
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Page {
    extension: Arc<Extension>,
    store: Arc<MemoryStore>,
    devices: Arc<Devices>,
    requester: Requester<Devices>,
    _listener: ListenerHandle,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn page(extension: Extension, store: MemoryStore) -> Page {
    init_tracing();

    let extension = Arc::new(extension);
    let store = Arc::new(store);
    let devices = Arc::new(Devices::default());

    let top = Frame::top("https://host.example");
    let listener = ScreenShareListener::builder()
        .install_url(INSTALL_URL)
        .platform(extension.clone())
        .store(store.clone())
        .build()
        .expect("listener");
    let handle = listener.attach(&top);

    let requester = Requester::builder()
        .frame(top.embed("https://frame.example"))
        .media_devices(devices.clone())
        .extension_capable(true)
        .screen(Screen::new(1280, 720))
        .build()
        .expect("requester");

    Page {
        extension,
        store,
        devices,
        requester,
        _listener: handle,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn captures_through_cached_extension() {
    let page = page(
        Extension::default(),
        MemoryStore::with_entry(EXTENSION_ID_KEY, "ext-123"),
    );

    let pending = page.requester.request_capture(None, false).expect("pending");
    let outcome = timeout(Duration::from_secs(1), pending)
        .await
        .expect("resolved in time")
        .expect("captured");

    assert_eq!(outcome, CaptureOutcome::Stream("stream:abc".to_string()));
    assert_eq!(page.extension.installs.load(Ordering::SeqCst), 0);
    assert_eq!(page.extension.sends.load(Ordering::SeqCst), 1);

    let calls = page.devices.calls.lock().clone();
    assert_eq!(calls.len(), 1);
    let VideoConstraints::Desktop { mandatory } = &calls[0].video else {
        panic!("expected desktop constraints");
    };
    assert_eq!(mandatory.chrome_media_source_id, "abc");
    assert_eq!(mandatory.max_width, 1280);
    assert_eq!(mandatory.max_height, 720);
    assert_eq!(mandatory.max_frame_rate, 15);
    assert!(!calls[0].audio);
}

#[tokio::test(start_paused = true)]
async fn install_only_provisions_without_capture() {
    let page = page(Extension::default(), MemoryStore::new());

    let outcome = page
        .requester
        .request_capture(None, true)
        .expect("pending")
        .await
        .expect("acknowledged");

    let CaptureOutcome::Installed(ack) = outcome else {
        panic!("expected install acknowledgement");
    };
    assert_eq!(ack["installOnly"], true);

    assert_eq!(page.extension.installs.load(Ordering::SeqCst), 1);
    assert_eq!(page.extension.sends.load(Ordering::SeqCst), 0);
    assert_eq!(
        page.store.get(EXTENSION_ID_KEY).as_deref(),
        Some("ext-from-url")
    );
    assert!(page.devices.calls.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn installs_then_captures() {
    let page = page(Extension::default(), MemoryStore::new());

    let outcome = page
        .requester
        .request_capture(None, false)
        .expect("pending")
        .await
        .expect("captured");

    assert_eq!(outcome.into_stream().as_deref(), Some("stream:abc"));
    assert_eq!(page.extension.installs.load(Ordering::SeqCst), 1);
    assert_eq!(page.extension.sends.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn refused_install_rejects_child() {
    let extension = Extension {
        refuse_install: true,
        ..Extension::default()
    };
    let page = page(extension, MemoryStore::new());

    let err = timeout(
        Duration::from_secs(1),
        page.requester.request_capture(None, false).expect("pending"),
    )
    .await
    .expect("resolved in time")
    .unwrap_err();

    assert!(err.is_extension_error());
    assert!(err.to_string().contains("user gesture"));
    assert_eq!(page.extension.sends.load(Ordering::SeqCst), 0);
    assert!(page.store.is_empty());
}

#[tokio::test]
async fn top_level_frame_can_host_both_roles() {
    init_tracing();

    let top = Frame::top("https://host.example");
    let extension = Arc::new(Extension::default());
    let _handle = ScreenShareListener::builder()
        .install_url(INSTALL_URL)
        .platform(extension.clone())
        .store(Arc::new(MemoryStore::with_entry(EXTENSION_ID_KEY, "ext-123")))
        .build()
        .expect("listener")
        .attach(&top);

    let requester = Requester::builder()
        .frame(top.clone())
        .media_devices(Arc::new(Devices::default()))
        .extension_capable(true)
        .build()
        .expect("requester");

    let outcome = timeout(
        Duration::from_secs(1),
        requester.request_capture(None, false).expect("pending"),
    )
    .await
    .expect("resolved in time")
    .expect("captured");

    assert_eq!(outcome.into_stream().as_deref(), Some("stream:abc"));
}

#[tokio::test]
async fn unrelated_messages_get_no_answer() {
    init_tracing();

    let top = Frame::top("https://host.example");
    let extension = Arc::new(Extension::default());
    let store = Arc::new(MemoryStore::new());
    let _handle = ScreenShareListener::builder()
        .install_url(INSTALL_URL)
        .platform(extension.clone())
        .store(store.clone())
        .build()
        .expect("listener")
        .attach(&top);

    let child = top.embed("https://frame.example");
    let mut inbox = child.add_listener();
    child
        .parent()
        .post_message(json!({ "type": "chat", "text": "hi" }), "*");

    assert!(
        timeout(Duration::from_millis(100), inbox.recv())
            .await
            .is_err()
    );
    assert_eq!(extension.installs.load(Ordering::SeqCst), 0);
    assert_eq!(extension.sends.load(Ordering::SeqCst), 0);
    assert!(store.is_empty());
}
