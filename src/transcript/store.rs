//! Writing normalized transcripts to disk.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Characters that are invalid in filenames on at least one supported OS.
static INVALID_FILENAME_CHARS: OnceLock<Regex> = OnceLock::new();

fn invalid_filename_chars() -> &'static Regex {
    INVALID_FILENAME_CHARS.get_or_init(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("valid pattern"))
}

const MAX_FILENAME_CHARS: usize = 150;

/// Strip filesystem-invalid characters from a page title and cap the length,
/// marking truncation with `...`.
pub fn sanitize_filename(name: &str) -> String {
    let stripped = invalid_filename_chars().replace_all(name, "");
    let trimmed = stripped.trim();
    if trimmed.chars().count() > MAX_FILENAME_CHARS {
        let capped: String = trimmed.chars().take(MAX_FILENAME_CHARS).collect();
        format!("{}...", capped)
    } else {
        trimmed.to_string()
    }
}

/// Write `body` to `<dir>/<sanitized title>.txt`, creating `dir` as needed.
/// An existing file of the same name is overwritten.
pub async fn write_transcript(dir: &Path, title: &str, body: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let mut name = sanitize_filename(title);
    if name.is_empty() {
        name = "transcript".to_string();
    }
    let path = dir.join(format!("{}.txt", name));

    if tokio::fs::metadata(&path).await.is_ok() {
        warn!("Transcript file '{}' already exists, overwriting", path.display());
    }

    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("writing transcript to {}", path.display()))?;

    info!("Transcript saved to '{}'", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_invalid_characters() {
        assert_eq!(
            sanitize_filename(r#"City Council: "Special" Meeting 6/12?"#),
            "City Council Special Meeting 612"
        );
    }

    #[test]
    fn caps_length_with_marker() {
        let long = "a".repeat(200);
        let out = sanitize_filename(&long);
        assert_eq!(out.chars().count(), 153);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn short_names_pass_through_trimmed() {
        assert_eq!(sanitize_filename("  Planning Commission  "), "Planning Commission");
    }

    #[tokio::test]
    async fn writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_transcript(dir.path(), "Budget Hearing", "first")
            .await
            .unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "first");

        let path2 = write_transcript(dir.path(), "Budget Hearing", "second")
            .await
            .unwrap();
        assert_eq!(path, path2);
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn empty_title_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_transcript(dir.path(), "???", "text").await.unwrap();
        assert!(path.ends_with("transcript.txt"));
    }
}
