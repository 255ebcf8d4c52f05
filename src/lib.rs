pub mod capture;
pub mod core;
pub mod transcript;

// --- Primary core exports ---
pub use core::config::CaptureConfig;
pub use core::error::CaptureError;

// --- Pipeline surface ---
pub use capture::platforms::Platform;
pub use capture::{capture_transcript, CapturedTranscript};
pub use transcript::store::sanitize_filename;
pub use transcript::vtt::normalize_vtt;
