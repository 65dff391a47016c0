//! Relay round-trip benchmark.
//!
//! Measures one capture request from the embedded frame through the parent
//! listener and back, with the extension identity already cached.
//!
//! Run with: cargo bench --bench relay
//! Results saved to: target/criterion/

use std::sync::Arc;

use async_trait::async_trait;
use criterion::{Criterion, criterion_group, criterion_main};
use frame_screenshare::host::EXTENSION_ID_KEY;
use frame_screenshare::{
    ExtensionId, ExtensionPlatform, Frame, MediaConstraints, MediaDevices, MemoryStore, Requester,
    Result, Screen, ScreenShareListener,
};
use serde_json::{Value, json};
use tokio::runtime::Runtime;

// ============================================================================
// Host Doubles
// ============================================================================

struct InstantExtension;

#[async_trait]
impl ExtensionPlatform for InstantExtension {
    async fn install(&self, _webstore_url: &str) -> Result<()> {
        Ok(())
    }

    async fn send_message(&self, _extension_id: &ExtensionId, _payload: Value) -> Result<Value> {
        Ok(json!({ "sourceId": "screen:0:0" }))
    }
}

struct NullDevices;

#[async_trait]
impl MediaDevices for NullDevices {
    type Stream = ();

    async fn get_user_media(&self, _constraints: MediaConstraints) -> Result<Self::Stream> {
        Ok(())
    }
}

// ============================================================================
// Benchmark: Relay Round Trip
// ============================================================================

fn bench_relay_round_trip(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let requester = rt.block_on(async {
        let top = Frame::top("https://host.example");
        // Dropping the handle leaves the event loop running.
        let _ = ScreenShareListener::builder()
            .install_url("https://chrome.google.com/webstore/detail/ext")
            .platform(Arc::new(InstantExtension))
            .store(Arc::new(MemoryStore::with_entry(EXTENSION_ID_KEY, "ext")))
            .build()
            .unwrap()
            .attach(&top);

        Requester::builder()
            .frame(top.embed("https://frame.example"))
            .media_devices(Arc::new(NullDevices))
            .extension_capable(true)
            .screen(Screen::new(1920, 1080))
            .build()
            .unwrap()
    });

    c.bench_function("relay_round_trip", |b| {
        b.to_async(&rt).iter(|| async {
            requester
                .request_capture(None, false)
                .unwrap()
                .await
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_relay_round_trip);
criterion_main!(benches);
