pub mod config;
pub mod error;

pub use config::CaptureConfig;
pub use error::CaptureError;
