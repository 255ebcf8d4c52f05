use std::time::Duration;

// ---------------------------------------------------------------------------
// CaptureConfig — env-var driven tunables with sensible defaults
// ---------------------------------------------------------------------------

const ENV_NAV_TIMEOUT: &str = "CIVICSCRIBE_NAV_TIMEOUT_SECS";
const ENV_CAPTURE_TIMEOUT: &str = "CIVICSCRIBE_CAPTURE_TIMEOUT_SECS";
const ENV_STEP_TIMEOUT: &str = "CIVICSCRIBE_STEP_TIMEOUT_SECS";
const ENV_VIEWPORT_WIDTH: &str = "CIVICSCRIBE_VIEWPORT_WIDTH";
const ENV_VIEWPORT_HEIGHT: &str = "CIVICSCRIBE_VIEWPORT_HEIGHT";
const ENV_CHROME_EXECUTABLE: &str = "CHROME_EXECUTABLE";
const ENV_RAPIDAPI_KEY: &str = "RAPIDAPI_KEY";

fn env_secs(key: &str, default_secs: u64) -> Duration {
    let secs = std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

/// Per-URL capture tunables. Navigation and capture budgets are deliberately
/// separate: a page that loads fine can still never serve captions.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Budget for reaching a loaded document after `goto`.
    pub nav_timeout: Duration,
    /// Budget for the subtitle response to arrive once the UI sequence ran.
    pub capture_timeout: Duration,
    /// Default budget for a single UI interaction step.
    pub step_timeout: Duration,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            nav_timeout: Duration::from_secs(45),
            capture_timeout: Duration::from_secs(20),
            step_timeout: Duration::from_secs(10),
            viewport_width: 1280,
            viewport_height: 800,
        }
    }
}

impl CaptureConfig {
    /// Defaults overridden by `CIVICSCRIBE_*` env vars.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            nav_timeout: env_secs(ENV_NAV_TIMEOUT, defaults.nav_timeout.as_secs()),
            capture_timeout: env_secs(ENV_CAPTURE_TIMEOUT, defaults.capture_timeout.as_secs()),
            step_timeout: env_secs(ENV_STEP_TIMEOUT, defaults.step_timeout.as_secs()),
            viewport_width: env_u32(ENV_VIEWPORT_WIDTH, defaults.viewport_width),
            viewport_height: env_u32(ENV_VIEWPORT_HEIGHT, defaults.viewport_height),
        }
    }
}

/// Explicit browser executable override, if set and non-empty.
pub fn chrome_executable_override() -> Option<String> {
    std::env::var(ENV_CHROME_EXECUTABLE)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// RapidAPI key for the YouTube caption endpoint. Never logged.
pub fn rapidapi_key() -> Option<String> {
    std::env::var(ENV_RAPIDAPI_KEY)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
