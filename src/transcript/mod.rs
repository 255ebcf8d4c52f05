pub mod store;
pub mod vtt;
pub mod youtube;

pub use store::{sanitize_filename, write_transcript};
pub use vtt::normalize_vtt;
