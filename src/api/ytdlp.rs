//! `yt-dlp` subprocess client.
//!
//! Video search and audio extraction are delegated to the `yt-dlp`
//! executable. Each call spawns one process and waits for it to exit.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::config::Config;
use crate::converters;
use crate::error::{Result, TrackfetchError};
use crate::models::VideoCandidate;

/// Output file name template, relative to the output directory.
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Wrapper around the `yt-dlp` executable.
///
/// # Example
///
/// ```rust,no_run
/// use trackfetch::{Config, YtDlp};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let ytdlp = YtDlp::new(&Config::default());
///     for video in ytdlp.search("Strobe").await? {
///         println!("{} ({:?}s) {}", video.title, video.duration_secs, video.url);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    search_results: usize,
    audio_format: String,
    audio_quality: String,
}

impl YtDlp {
    /// Create a client from the pipeline configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.ytdlp_program.clone(),
            search_results: config.search_results,
            audio_format: config.audio_format.clone(),
            audio_quality: config.audio_quality.clone(),
        }
    }

    /// Executable being invoked.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for a metadata-only search.
    pub fn search_args(&self, query: &str) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--no-download".to_string(),
            "--quiet".to_string(),
            format!("ytsearch{}:{}", self.search_results, query),
        ]
    }

    /// Arguments for downloading one URL as audio into `output_dir`.
    pub fn download_args(&self, url: &str, output_dir: &Path) -> Vec<String> {
        vec![
            "-f".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            self.audio_format.clone(),
            "--audio-quality".to_string(),
            self.audio_quality.clone(),
            "-o".to_string(),
            output_dir.join(OUTPUT_TEMPLATE).to_string_lossy().into_owned(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            "--".to_string(),
            url.to_string(),
        ]
    }

    /// Search the platform and return the reported results in order.
    pub async fn search(&self, query: &str) -> Result<Vec<VideoCandidate>> {
        let stdout = self.run(&self.search_args(query)).await?;
        Ok(converters::parse_search_output(&stdout))
    }

    /// Download a video as audio.
    ///
    /// Returns the final file path when `yt-dlp` reports one.
    pub async fn download_audio(&self, url: &str, output_dir: &Path) -> Result<Option<PathBuf>> {
        let stdout = self.run(&self.download_args(url, output_dir)).await?;

        Ok(stdout
            .lines()
            .map(str::trim)
            .rev()
            .find(|line| !line.is_empty())
            .map(PathBuf::from))
    }

    /// Run the executable and return its standard output.
    async fn run(&self, args: &[String]) -> Result<String> {
        debug!("Running {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    TrackfetchError::CommandNotFound(self.program.display().to_string())
                }
                _ => TrackfetchError::IoError(e),
            })?;

        if !output.status.success() {
            return Err(TrackfetchError::CommandFailed {
                program: self.program.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
