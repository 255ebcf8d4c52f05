//! Native browser session management using `chromiumoxide`.
//!
//! This module is the single source of truth for:
//! * Finding a usable Chromium-family executable (cross-platform).
//! * Building a headless `BrowserConfig` suitable for CI environments.
//! * `BrowserSession` — one browser process + one page, scoped to the
//!   processing of exactly one URL and closed on every exit path.
//!
//! Sessions are never reused across URLs: cookies and player state from one
//! meeting page must not leak into the next, and tearing the process down
//! between URLs bounds resource growth over long batch runs.

use anyhow::{anyhow, Result};
use chromiumoxide::browser::BrowserConfig;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use rand::seq::IndexedRandom;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::config::{chrome_executable_override, CaptureConfig};
use crate::core::error::CaptureError;

// ── Realistic User-Agent pool ────────────────────────────────────────────────
// Some municipal players refuse to start playback for obviously-headless UAs.

const DESKTOP_USER_AGENTS: &[&str] = &[
    // Chrome 132 – Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36",
    // Chrome 132 – macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36",
    // Chrome 131 – Linux
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    // Edge 132 – Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36 Edg/132.0.0.0",
];

/// Returns a randomly-chosen realistic desktop User-Agent string.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::rng();
    DESKTOP_USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(DESKTOP_USER_AGENTS[0])
}

// ── Browser executable discovery ─────────────────────────────────────────────

/// Find a usable Chromium-family browser executable.
///
/// Resolution order:
/// 1. `CHROME_EXECUTABLE` env var (explicit override)
/// 2. PATH scan — finds package-manager installs on all platforms.
/// 3. OS-specific well-known install paths.
pub fn find_chrome_executable() -> Option<String> {
    if let Some(p) = chrome_executable_override() {
        if Path::new(&p).exists() {
            return Some(p);
        }
    }

    if let Ok(path_var) = std::env::var("PATH") {
        let candidates = [
            "google-chrome",
            "chromium",
            "chromium-browser",
            "chrome",
            "brave-browser",
        ];
        for dir in std::env::split_paths(&path_var) {
            for exe in candidates {
                let full = dir.join(exe);
                if full.exists() {
                    return Some(full.to_string_lossy().to_string());
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        let candidates = [
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
        ];
        for c in candidates {
            if Path::new(c).exists() {
                return Some(c.to_string());
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        let candidates = [
            "/usr/bin/google-chrome",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/usr/bin/brave-browser",
            "/usr/local/bin/chromium",
        ];
        for c in candidates {
            if Path::new(c).exists() {
                return Some(c.to_string());
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        let candidates = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
        ];
        for c in candidates {
            if Path::new(c).exists() {
                return Some(c.to_string());
            }
        }
    }

    None
}

// ── Headless browser config builder ──────────────────────────────────────────

/// Build a `BrowserConfig` for headless operation.
///
/// Flags chosen for compatibility with CI / restricted environments
/// (`--no-sandbox`, `--disable-dev-shm-usage`). Audio is muted so autoplaying
/// meeting video does not leak sound on workstation runs.
pub fn build_headless_config(exe: &str, width: u32, height: u32) -> Result<BrowserConfig> {
    let ua = random_user_agent();

    BrowserConfig::builder()
        .chrome_executable(exe)
        .viewport(Viewport {
            width,
            height,
            device_scale_factor: Some(1.0),
            emulating_mobile: false,
            is_landscape: true,
            has_touch: false,
        })
        .window_size(width, height)
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-setuid-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--disable-extensions")
        .arg("--disable-background-networking")
        .arg("--disable-sync")
        .arg("--disable-translate")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--hide-scrollbars")
        .arg("--mute-audio")
        .arg("--autoplay-policy=no-user-gesture-required")
        .arg(format!("--user-agent={}", ua))
        .build()
        .map_err(|e| anyhow!("Failed to build browser config: {}", e))
}

// ── Per-URL browser session ──────────────────────────────────────────────────

/// One browser process + CDP handler task + one page.
///
/// Acquired at the start of processing a URL, closed on every exit path.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    pub page: Page,
}

impl BrowserSession {
    /// Launch an isolated headless session with a blank page.
    pub async fn launch(cfg: &CaptureConfig) -> Result<Self, CaptureError> {
        let exe = find_chrome_executable().ok_or_else(|| {
            anyhow!(
                "No browser found. Install Chrome, Chromium, or Brave, \
                 or set CHROME_EXECUTABLE."
            )
        })?;

        debug!("Launching headless session (browser: {})", exe);

        let config = build_headless_config(&exe, cfg.viewport_width, cfg.viewport_height)?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| anyhow!("Failed to launch browser ({}): {}", exe, e))?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("CDP handler error: {}", e);
                }
            }
        });

        // Same teardown as `close()`: never leave a headless process behind
        // just because the first page failed to open.
        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(ce) = browser.close().await {
                    warn!("Browser close error (non-fatal): {}", ce);
                }
                handle.abort();
                return Err(anyhow!("Failed to create page: {}", e).into());
            }
        };

        Ok(Self {
            browser,
            handler: handle,
            page,
        })
    }

    /// Best-effort teardown. Never fails the capture result it follows.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close error (non-fatal): {}", e);
        }
        self.handler.abort();
    }
}

/// Navigate the session page and wait for a loaded document.
///
/// Polls `document.readyState` every 250 ms until `complete` or until the
/// navigation budget runs out. The subtitle watcher must already be installed
/// before calling this — caption requests can fire during initial load.
pub async fn navigate(page: &Page, url: &str, timeout: Duration) -> Result<(), CaptureError> {
    info!("Navigating and listening for network traffic: {}", url);

    page.goto(url)
        .await
        .map_err(|e| anyhow!("Failed to navigate to {}: {}", url, e))?;

    let poll = Duration::from_millis(250);
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() >= timeout {
            return Err(CaptureError::NavigationTimeout(timeout));
        }

        let ready: bool = page
            .evaluate("document.readyState")
            .await
            .ok()
            .and_then(|v| v.into_value::<serde_json::Value>().ok())
            .and_then(|j| j.as_str().map(|s| s == "complete"))
            .unwrap_or(false);

        if ready {
            debug!("Document loaded after {}ms", start.elapsed().as_millis());
            return Ok(());
        }

        tokio::time::sleep(poll).await;
    }
}
