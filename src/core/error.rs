use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while capturing one URL's transcript.
///
/// The four capture-specific kinds are kept distinct so a batch runner can
/// tell "the UI never triggered playback" apart from "the UI worked but no
/// caption stream ever appeared". None of these abort a batch run; they are
/// logged per URL and the loop moves on.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The URL matched none of the known platform markers. Raised before any
    /// UI interaction takes place.
    #[error("unrecognized platform for URL: {url}")]
    UnrecognizedPlatform { url: String },

    /// A UI step could not find or operate its target element within the
    /// step's own budget. Fails the whole platform sequence.
    #[error("interaction failed on '{selector}': {reason}")]
    Interaction { selector: String, reason: String },

    /// Navigation did not reach a loaded document within its budget.
    #[error("navigation timed out after {0:?}")]
    NavigationTimeout(Duration),

    /// The platform sequence completed but no subtitle response arrived
    /// within the capture budget.
    #[error("transcript capture timed out after {0:?}")]
    CaptureTimeout(Duration),

    /// A matching subtitle response was observed but its body could not be
    /// read back over CDP.
    #[error("failed to read subtitle response body: {0}")]
    BodyRead(String),

    /// Browser launch / CDP transport failures outside the kinds above.
    #[error(transparent)]
    Browser(#[from] anyhow::Error),
}

impl CaptureError {
    pub fn interaction(selector: impl Into<String>, reason: impl ToString) -> Self {
        Self::Interaction {
            selector: selector.into(),
            reason: reason.to_string(),
        }
    }
}
