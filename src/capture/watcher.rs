//! Passive subtitle-response watcher.
//!
//! Subscribes to `Network.responseReceived` events on the page and resolves a
//! write-once capture slot with the body of the first response whose URL
//! looks like a subtitle file. Installed strictly before navigation so an
//! early caption request cannot be missed; once the slot is resolved (with a
//! payload or a body-read failure) every later match is ignored.

use anyhow::anyhow;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chromiumoxide::cdp::browser_protocol::network::{
    EventResponseReceived, GetResponseBodyParams, RequestId,
};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::core::error::CaptureError;

/// URL fragment that marks a subtitle-track response.
pub const SUBTITLE_MARKER: &str = ".vtt";

/// Returns `true` when a response URL carries a subtitle track.
pub fn is_subtitle_url(url: &str) -> bool {
    url.contains(SUBTITLE_MARKER)
}

type SlotResult = Result<String, CaptureError>;

/// Producer half of the capture slot. First `resolve` wins; the sender is
/// consumed on the first call and later calls are no-ops.
pub struct SlotWriter {
    tx: Option<oneshot::Sender<SlotResult>>,
}

impl SlotWriter {
    /// Write the slot. Returns `false` when the slot was already resolved
    /// (or the waiting side has gone away).
    pub fn resolve(&mut self, result: SlotResult) -> bool {
        match self.tx.take() {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.tx.is_none()
    }
}

/// Consumer half of the capture slot.
pub struct CaptureSlot {
    rx: oneshot::Receiver<SlotResult>,
}

impl CaptureSlot {
    /// Single-assignment rendezvous between the response watcher and the
    /// waiting orchestrator.
    pub fn channel() -> (SlotWriter, CaptureSlot) {
        let (tx, rx) = oneshot::channel();
        (SlotWriter { tx: Some(tx) }, CaptureSlot { rx })
    }

    /// Wait for the slot to resolve, bounded by `timeout`.
    ///
    /// Distinguishes "no subtitle response ever arrived" (capture timeout)
    /// from "a response arrived but reading it failed" (the watcher's error
    /// passes through unchanged).
    pub async fn wait(self, timeout: Duration) -> SlotResult {
        match tokio::time::timeout(timeout, self.rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CaptureError::Browser(anyhow!(
                "response watcher stopped before resolving the capture slot"
            ))),
            Err(_) => Err(CaptureError::CaptureTimeout(timeout)),
        }
    }
}

/// Install the watcher on `page` and return the slot to wait on.
///
/// Must run before navigation begins. The spawned task stays subscribed for
/// the life of the page but does no further work after first resolution.
pub async fn install(page: &Page) -> Result<CaptureSlot, CaptureError> {
    let mut events = page
        .event_listener::<EventResponseReceived>()
        .await
        .map_err(|e| anyhow!("Failed to subscribe to network responses: {}", e))?;

    let (mut writer, slot) = CaptureSlot::channel();
    let body_page = page.clone();

    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            if writer.is_resolved() {
                break;
            }
            if !is_subtitle_url(&event.response.url) {
                continue;
            }

            info!("Intercepted subtitle file: {}", event.response.url);
            let result = read_response_body(&body_page, &event.request_id).await;
            writer.resolve(result);
            break;
        }
    });

    Ok(slot)
}

/// Fetch a response body over CDP.
///
/// `Network.getResponseBody` can fail when the body has not been committed
/// yet (the event fires on headers), so a few short retries are allowed
/// before the failure is written into the slot.
async fn read_response_body(page: &Page, request_id: &RequestId) -> SlotResult {
    const ATTEMPTS: u32 = 4;
    let mut last_err = String::new();

    for attempt in 0..ATTEMPTS {
        if attempt > 0 {
            tokio::time::sleep(Duration::from_millis(250)).await;
        }

        match page
            .execute(GetResponseBodyParams::new(request_id.clone()))
            .await
        {
            Ok(resp) => {
                let body = &resp.result;
                if body.base64_encoded {
                    return BASE64
                        .decode(body.body.as_bytes())
                        .map_err(|e| CaptureError::BodyRead(format!("base64 decode: {}", e)))
                        .and_then(|bytes| {
                            String::from_utf8(bytes).map_err(|e| {
                                CaptureError::BodyRead(format!("invalid utf-8: {}", e))
                            })
                        });
                }
                return Ok(body.body.clone());
            }
            Err(e) => {
                last_err = e.to_string();
                debug!(
                    "getResponseBody attempt {}/{} failed: {}",
                    attempt + 1,
                    ATTEMPTS,
                    last_err
                );
            }
        }
    }

    warn!("Could not read subtitle body: {}", last_err);
    Err(CaptureError::BodyRead(last_err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtitle_marker_matches_vtt_urls() {
        assert!(is_subtitle_url(
            "https://archive.granicus.com/captions/meeting_2024.vtt"
        ));
        assert!(is_subtitle_url("https://cdn.viebit.com/t/en.vtt?sig=abc"));
        assert!(!is_subtitle_url("https://example.com/player.js"));
        assert!(!is_subtitle_url("https://example.com/meeting.mp4"));
    }

    #[tokio::test]
    async fn first_resolution_wins() {
        let (mut writer, slot) = CaptureSlot::channel();

        assert!(writer.resolve(Ok("first".to_string())));
        assert!(writer.is_resolved());
        // Second write is ignored, not an overwrite.
        assert!(!writer.resolve(Ok("second".to_string())));

        let got = slot.wait(Duration::from_secs(1)).await.unwrap();
        assert_eq!(got, "first");
    }

    #[tokio::test]
    async fn failure_resolution_passes_through() {
        let (mut writer, slot) = CaptureSlot::channel();
        writer.resolve(Err(CaptureError::BodyRead("boom".to_string())));

        match slot.wait(Duration::from_secs(1)).await {
            Err(CaptureError::BodyRead(msg)) => assert_eq!(msg, "boom"),
            other => panic!("expected BodyRead, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_slot_times_out_as_capture_timeout() {
        let (_writer, slot) = CaptureSlot::channel();
        let budget = Duration::from_millis(20);

        match slot.wait(budget).await {
            Err(CaptureError::CaptureTimeout(t)) => assert_eq!(t, budget),
            other => panic!("expected CaptureTimeout, got {:?}", other),
        }
    }
}
