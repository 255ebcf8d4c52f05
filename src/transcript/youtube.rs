//! YouTube caption fetch via the RapidAPI youtube-captions endpoint.
//!
//! No browser involved: a single authenticated GET returns the caption
//! segments as JSON. The joined text goes through the same normalizer as the
//! VTT path so both sources produce identically-shaped transcripts.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use url::Url;

use super::vtt::normalize_vtt;

const RAPIDAPI_HOST: &str = "youtube-captions.p.rapidapi.com";

/// One caption segment as returned by the RapidAPI endpoint. Fields other
/// than `text` (offsets, durations) are ignored.
#[derive(Debug, Deserialize)]
pub struct CaptionSegment {
    #[serde(default)]
    pub text: String,
}

/// Extract a YouTube video id from a watch URL, short URL, shorts/embed
/// path, or a bare 11-character id.
pub fn extract_video_id(input: &str) -> Option<String> {
    let looks_like_id =
        |s: &str| s.len() == 11 && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if looks_like_id(input) {
        return Some(input.to_string());
    }

    let url = Url::parse(input).ok()?;
    let host = url.host_str()?;

    // Exact host or a subdomain of it; a bare ends_with would also accept
    // lookalikes such as "evilyoutu.be".
    let host_is = |domain: &str| host == domain || host.ends_with(&format!(".{}", domain));

    if host_is("youtu.be") {
        let id = url.path_segments()?.next()?.to_string();
        return looks_like_id(&id).then_some(id);
    }

    if host_is("youtube.com") {
        if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
            let v = v.to_string();
            return looks_like_id(&v).then_some(v);
        }
        let mut segments = url.path_segments()?;
        if let Some(first) = segments.next() {
            if matches!(first, "shorts" | "embed" | "live") {
                let id = segments.next()?.to_string();
                return looks_like_id(&id).then_some(id);
            }
        }
    }

    None
}

/// Fetch and normalize the caption track for a video id.
pub async fn fetch_transcript(
    client: &reqwest::Client,
    video_id: &str,
    api_key: &str,
) -> Result<String> {
    let api_url = format!("https://{}/transcript?videoId={}", RAPIDAPI_HOST, video_id);

    let response = client
        .get(&api_url)
        .header("x-rapidapi-host", RAPIDAPI_HOST)
        .header("x-rapidapi-key", api_key)
        .send()
        .await
        .context("caption API request failed")?
        .error_for_status()
        .context("caption API returned an error status")?;

    let segments: Vec<CaptionSegment> = response
        .json()
        .await
        .map_err(|e| anyhow!("expected a list of caption segments: {}", e))?;

    let joined = segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(normalize_vtt(&joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_ids() {
        assert_eq!(
            extract_video_id("dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(extract_video_id("too-short"), None);
    }

    #[test]
    fn parses_watch_and_short_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn rejects_non_youtube_urls() {
        assert_eq!(extract_video_id("https://vimeo.com/123456789"), None);
        assert_eq!(extract_video_id("not a url at all"), None);
    }

    #[test]
    fn rejects_lookalike_hosts_but_keeps_subdomains() {
        assert_eq!(extract_video_id("https://evilyoutu.be/dQw4w9WgXcQ"), None);
        assert_eq!(
            extract_video_id("https://notyoutube.com/watch?v=dQw4w9WgXcQ"),
            None
        );
        assert_eq!(
            extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn segment_shape_parses_and_tolerates_extra_fields() {
        let body = r#"[{"text":"hello","dur":"1.2","start":"0.0"},{"text":"world"},{}]"#;
        let segments: Vec<CaptionSegment> = serde_json::from_str(body).unwrap();
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "world", ""]);
    }
}
