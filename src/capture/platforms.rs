//! Platform classification and per-platform caption trigger sequences.
//!
//! The set of supported platforms is closed and small, so it is a plain enum
//! with one linear UI sequence per variant rather than any kind of plugin
//! registry. Adding a platform means adding a marker to the table and a new
//! sequence below.

use chromiumoxide::Page;
use std::time::Duration;
use tracing::info;

use super::dom;
use crate::core::config::CaptureConfig;
use crate::core::error::CaptureError;

/// Streaming platforms whose player UI we know how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Granicus,
    Viebit,
    Vimeo,
}

/// Marker table for URL classification. Longest matching marker wins.
const PLATFORM_MARKERS: &[(&str, Platform)] = &[
    ("granicus.com", Platform::Granicus),
    ("viebit.com", Platform::Viebit),
    ("vimeo.com", Platform::Vimeo),
];

impl Platform {
    /// Classify a URL by substring containment against the marker table.
    /// Returns `None` for anything we do not know how to drive.
    pub fn classify(url: &str) -> Option<Platform> {
        PLATFORM_MARKERS
            .iter()
            .filter(|(marker, _)| url.contains(marker))
            .max_by_key(|(marker, _)| marker.len())
            .map(|(_, platform)| *platform)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Granicus => "Granicus",
            Platform::Viebit => "Viebit",
            Platform::Vimeo => "Vimeo",
        }
    }

    /// Drive the loaded page's player so it requests an English caption
    /// track over the network. The response watcher picks the track up
    /// concurrently; these sequences never look at network traffic.
    /// Per-step budgets derive from `cfg.step_timeout`.
    pub async fn trigger_captions(&self, page: &Page, cfg: &CaptureConfig) -> Result<(), CaptureError> {
        info!("Detected {} platform, executing trigger sequence", self.name());
        let budgets = StepBudgets::from_config(cfg);
        match self {
            Platform::Granicus => trigger_granicus(page, &budgets).await,
            Platform::Viebit => trigger_viebit(page, &budgets).await,
            Platform::Vimeo => trigger_vimeo(page, &budgets).await,
        }
    }
}

/// Step budgets scaled off the configured per-step timeout. The observed
/// sequences use three tiers: half budget for hover reveals, the full budget
/// for ordinary clicks, double for first-play buttons that wait on the
/// player to finish booting. Defaults land on 5 s / 10 s / 20 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepBudgets {
    pub short: Duration,
    pub step: Duration,
    pub long: Duration,
}

impl StepBudgets {
    pub(crate) fn from_config(cfg: &CaptureConfig) -> Self {
        Self {
            short: cfg.step_timeout / 2,
            step: cfg.step_timeout,
            long: cfg.step_timeout * 2,
        }
    }
}

/// Granicus embeds Flowplayer. Two clicks start playback (the first only
/// focuses the player on some skins), then the CC menu lives behind a
/// hover-revealed control bar.
async fn trigger_granicus(page: &Page, b: &StepBudgets) -> Result<(), CaptureError> {
    dom::click(page, ".flowplayer", b.step).await?;
    dom::settle(500).await;
    dom::click(page, ".flowplayer", b.step).await?;
    dom::settle(500).await;
    dom::hover(page, ".flowplayer", b.short).await?;
    dom::click(page, ".fp-cc", b.step).await?;
    dom::settle(500).await;
    dom::click_by_text(page, ".fp-menu a, .fp-menu li", "On", b.step).await
}

/// Viebit runs video.js: big play button, transport play control, then the
/// subtitles/captions menu.
async fn trigger_viebit(page: &Page, b: &StepBudgets) -> Result<(), CaptureError> {
    dom::click(page, ".vjs-big-play-button", b.long).await?;
    dom::click(page, ".vjs-play-control", b.step).await?;
    dom::settle(500).await;
    dom::click(page, "button.vjs-subs-caps-button", b.step).await?;
    dom::click_by_text(page, ".vjs-menu-item", "English", b.step).await
}

/// Vimeo's native player: start playback, open the CC panel, pick English.
async fn trigger_vimeo(page: &Page, b: &StepBudgets) -> Result<(), CaptureError> {
    dom::click(page, "button[data-play-button], .vp-controls button.play", b.long).await?;
    dom::settle(500).await;
    dom::click(page, ".vp-cc-button, button.vp-cc", b.step).await?;
    dom::click_by_text(page, ".vp-panel--cc li, .vp-menu-option", "English", b.step).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granicus_urls_select_granicus() {
        for url in [
            "https://dublin.granicus.com/player/clip/1234",
            "http://archive.granicus.com/MediaPlayer.php?view_id=2",
        ] {
            assert_eq!(Platform::classify(url), Some(Platform::Granicus));
        }
    }

    #[test]
    fn viebit_urls_select_viebit() {
        assert_eq!(
            Platform::classify("https://fremont.viebit.com/player?hash=abc"),
            Some(Platform::Viebit)
        );
    }

    #[test]
    fn vimeo_urls_select_vimeo() {
        assert_eq!(
            Platform::classify("https://vimeo.com/123456789"),
            Some(Platform::Vimeo)
        );
    }

    #[test]
    fn unknown_urls_fail_classification() {
        assert_eq!(
            Platform::classify("https://example.com/unknownplatform/video"),
            None
        );
        assert_eq!(Platform::classify(""), None);
    }

    #[test]
    fn step_budgets_scale_off_configured_timeout() {
        let mut cfg = CaptureConfig::default();
        let defaults = StepBudgets::from_config(&cfg);
        assert_eq!(defaults.short, Duration::from_secs(5));
        assert_eq!(defaults.step, Duration::from_secs(10));
        assert_eq!(defaults.long, Duration::from_secs(20));

        cfg.step_timeout = Duration::from_secs(30);
        let scaled = StepBudgets::from_config(&cfg);
        assert_eq!(scaled.short, Duration::from_secs(15));
        assert_eq!(scaled.step, Duration::from_secs(30));
        assert_eq!(scaled.long, Duration::from_secs(60));
    }
}
