//! Per-URL transcript capture pipeline.
//!
//! One URL, one isolated browser session: install the subtitle watcher,
//! navigate, classify the platform, run its caption trigger sequence, wait
//! (bounded) for the watcher to hand over the VTT payload, normalize it.
//! Teardown is unconditional — every exit path closes the session.

pub mod browser;
pub mod dom;
pub mod platforms;
pub mod watcher;

use tracing::info;

use crate::core::config::CaptureConfig;
use crate::core::error::CaptureError;
use crate::transcript::vtt::normalize_vtt;
use platforms::Platform;

/// A successfully captured and normalized transcript.
#[derive(Debug, Clone)]
pub struct CapturedTranscript {
    pub url: String,
    /// Page title as displayed, used to derive the output filename.
    pub title: String,
    pub transcript: String,
}

/// Capture the transcript for a single platform URL.
///
/// Errors carry enough distinction for the batch runner to log what went
/// wrong without inspecting the browser: unrecognized platform, a UI step
/// that never found its element, a capture window that closed with no
/// subtitle response, or a response whose body could not be read.
pub async fn capture_transcript(
    url: &str,
    cfg: &CaptureConfig,
) -> Result<CapturedTranscript, CaptureError> {
    let session = browser::BrowserSession::launch(cfg).await?;
    let result = run_pipeline(&session.page, url, cfg).await;
    session.close().await;
    result
}

async fn run_pipeline(
    page: &chromiumoxide::Page,
    url: &str,
    cfg: &CaptureConfig,
) -> Result<CapturedTranscript, CaptureError> {
    // The watcher must be live before navigation: some players request the
    // caption track during initial load.
    let slot = watcher::install(page).await?;

    browser::navigate(page, url, cfg.nav_timeout).await?;

    let platform = Platform::classify(url).ok_or_else(|| CaptureError::UnrecognizedPlatform {
        url: url.to_string(),
    })?;

    platform.trigger_captions(page, cfg).await?;

    info!("Waiting for subtitle file to be captured by the network watcher");
    let raw_vtt = slot.wait(cfg.capture_timeout).await?;

    let title = page
        .get_title()
        .await
        .ok()
        .flatten()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "transcript".to_string());

    let transcript = normalize_vtt(&raw_vtt);
    info!(
        "Captured transcript \"{}\" ({} lines)",
        title,
        transcript.lines().count()
    );

    Ok(CapturedTranscript {
        url: url.to_string(),
        title,
        transcript,
    })
}
