//! UI interaction primitives for the platform trigger sequences.
//!
//! Every primitive carries its own timeout; a step that cannot find or
//! operate its target within that budget fails with an interaction error and
//! the caller's whole sequence fails with it. There is no retry between
//! steps: each step assumes the previous step's visible effect.

use chromiumoxide::{Element, Page};
use std::time::Duration;
use tracing::debug;

use crate::core::error::CaptureError;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Poll for a selector until it appears or the budget runs out.
pub async fn wait_for(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<Element, CaptureError> {
    let start = std::time::Instant::now();
    loop {
        match page.find_element(selector).await {
            Ok(el) => return Ok(el),
            Err(e) => {
                if start.elapsed() >= timeout {
                    return Err(CaptureError::interaction(
                        selector,
                        format!("element not found within {:?}: {}", timeout, e),
                    ));
                }
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Wait for `selector`, then click it.
pub async fn click(page: &Page, selector: &str, timeout: Duration) -> Result<(), CaptureError> {
    let el = wait_for(page, selector, timeout).await?;
    debug!("Clicking '{}'", selector);
    el.click()
        .await
        .map_err(|e| CaptureError::interaction(selector, format!("click failed: {}", e)))?;
    Ok(())
}

/// Wait for `selector`, then hover it (moves the mouse to its center, which
/// is what makes video-player control bars reveal themselves).
pub async fn hover(page: &Page, selector: &str, timeout: Duration) -> Result<(), CaptureError> {
    let el = wait_for(page, selector, timeout).await?;
    debug!("Hovering '{}'", selector);
    el.hover()
        .await
        .map_err(|e| CaptureError::interaction(selector, format!("hover failed: {}", e)))?;
    Ok(())
}

/// Click the first element matching `selector` whose trimmed inner text
/// equals `text` exactly. Used for player menu entries ("On", "English")
/// that have no stable class of their own.
pub async fn click_by_text(
    page: &Page,
    selector: &str,
    text: &str,
    timeout: Duration,
) -> Result<(), CaptureError> {
    let start = std::time::Instant::now();
    loop {
        if let Ok(elements) = page.find_elements(selector).await {
            for el in elements {
                let label = el.inner_text().await.ok().flatten().unwrap_or_default();
                if label.trim() == text {
                    debug!("Clicking '{}' entry \"{}\"", selector, text);
                    return el.click().await.map(|_| ()).map_err(|e| {
                        CaptureError::interaction(
                            selector,
                            format!("click on \"{}\" failed: {}", text, e),
                        )
                    });
                }
            }
        }

        if start.elapsed() >= timeout {
            return Err(CaptureError::interaction(
                selector,
                format!("no entry with text \"{}\" within {:?}", text, timeout),
            ));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Fixed settle pause between steps whose effect is animated (menu fades,
/// control-bar reveals).
pub async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
