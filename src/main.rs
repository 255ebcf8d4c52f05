use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use civicscribe::capture::capture_transcript;
use civicscribe::core::config::{self, CaptureConfig};
use civicscribe::transcript::{store, youtube};

#[derive(Parser)]
#[command(
    name = "civicscribe",
    version,
    about = "Capture municipal-meeting video transcripts by driving the player UI and intercepting the caption track"
)]
struct Cli {
    /// File with one video URL per line; blank lines and '#' comments are skipped
    #[arg(long, default_value = "videos.txt")]
    urls: PathBuf,

    /// Capture a single URL instead of reading the list file
    #[arg(long)]
    url: Option<String>,

    /// Output directory for transcript .txt files
    #[arg(long, default_value = "transcripts")]
    out: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a YouTube transcript via the RapidAPI captions endpoint
    Youtube {
        /// Video URL or bare 11-character video id
        video: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Some(Command::Youtube { video }) = &cli.command {
        return fetch_youtube(video, &cli.out).await;
    }

    let cfg = CaptureConfig::from_env();
    let urls = match &cli.url {
        Some(single) => vec![single.clone()],
        None => read_url_list(&cli.urls).await?,
    };

    if urls.is_empty() {
        warn!("No URLs to process in '{}'", cli.urls.display());
        return Ok(());
    }

    // Strictly sequential, one isolated browser session per URL. A failure
    // on one URL never aborts the rest of the batch.
    let mut failed = 0usize;
    for url in &urls {
        info!("Processing: {}", url);
        match capture_transcript(url, &cfg).await {
            Ok(captured) => {
                if let Err(e) =
                    store::write_transcript(&cli.out, &captured.title, &captured.transcript).await
                {
                    error!("Failed to write transcript for {}: {:#}", url, e);
                    failed += 1;
                }
            }
            Err(e) => {
                error!("Failed to capture {}: {}", url, e);
                failed += 1;
            }
        }
    }

    info!(
        "Batch complete: {} succeeded, {} failed",
        urls.len() - failed,
        failed
    );
    Ok(())
}

async fn fetch_youtube(video: &str, out: &Path) -> Result<()> {
    let api_key =
        config::rapidapi_key().ok_or_else(|| anyhow!("RAPIDAPI_KEY environment variable not set"))?;
    let video_id = youtube::extract_video_id(video)
        .ok_or_else(|| anyhow!("could not extract a YouTube video id from '{}'", video))?;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let transcript = youtube::fetch_transcript(&client, &video_id, &api_key).await?;
    store::write_transcript(out, &format!("youtube-{}", video_id), &transcript).await?;
    Ok(())
}

async fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let raw = tokio::fs::read_to_string(path).await.with_context(|| {
        format!(
            "URL file '{}' not found; add one video URL per line",
            path.display()
        )
    })?;
    Ok(parse_url_list(&raw))
}

fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_list_skips_blanks_and_comments() {
        let raw = "# supported: granicus, viebit, vimeo\n\n\
                   https://dublin.granicus.com/player/clip/1\n   \n\
                   https://fremont.viebit.com/player?hash=x\n# done\n";
        assert_eq!(
            parse_url_list(raw),
            vec![
                "https://dublin.granicus.com/player/clip/1",
                "https://fremont.viebit.com/player?hash=x",
            ]
        );
    }

    #[test]
    fn url_list_trims_whitespace() {
        assert_eq!(parse_url_list("  https://vimeo.com/1  \n"), vec!["https://vimeo.com/1"]);
    }
}
