//! Embedded capture walkthrough.
//!
//! Wires a parent page and an embedded frame together with simulated host
//! capabilities, provisions the extension, then captures a source.
//!
//! Run with: RUST_LOG=frame_screenshare=debug cargo run --example embedded_capture

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use frame_screenshare::{
    CaptureOutcome, ExtensionId, ExtensionPlatform, Frame, MediaConstraints, MediaDevices,
    Requester, Screen, ScreenShareListener,
};
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Configuration
// ============================================================================

const WEBSTORE_URL: &str =
    "https://chrome.google.com/webstore/detail/screen-share/abcdefghijklmnopabcdefghijklmnop";

// ============================================================================
// Simulated Host
// ============================================================================

/// Extension that always picks the first screen.
struct DemoExtension;

#[async_trait]
impl ExtensionPlatform for DemoExtension {
    async fn install(&self, webstore_url: &str) -> frame_screenshare::Result<()> {
        info!(webstore_url, "Installing helper extension");
        Ok(())
    }

    async fn send_message(
        &self,
        extension_id: &ExtensionId,
        payload: Value,
    ) -> frame_screenshare::Result<Value> {
        info!(%extension_id, %payload, "Extension picking a source");
        Ok(json!({ "sourceId": "screen:0:0" }))
    }
}

/// Capture API that describes what it would capture.
struct DemoDevices;

#[async_trait]
impl MediaDevices for DemoDevices {
    type Stream = String;

    async fn get_user_media(
        &self,
        constraints: MediaConstraints,
    ) -> frame_screenshare::Result<Self::Stream> {
        Ok(serde_json::to_string(&constraints)?)
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let top = Frame::top("https://host.example");
    let listener = ScreenShareListener::builder()
        .install_url(WEBSTORE_URL)
        .platform(Arc::new(DemoExtension))
        .settle_delay(Duration::from_millis(250))
        .build()?;
    let handle = listener.attach(&top);

    let requester = Requester::builder()
        .frame(top.embed("https://frame.example"))
        .media_devices(Arc::new(DemoDevices))
        .extension_capable(true)
        .screen(Screen::new(1920, 1080))
        .build()?;

    if let CaptureOutcome::Installed(ack) = requester.request_capture(None, true)?.await? {
        println!("Extension ready: {ack}");
    }

    if let CaptureOutcome::Stream(stream) = requester.request_capture(None, false)?.await? {
        println!("Captured with constraints: {stream}");
    }

    handle.detach();
    Ok(())
}
