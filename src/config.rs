//! Pipeline configuration and file layout.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::models::Source;

/// Browser user agent sent with catalog requests.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Settings shared by every pipeline stage.
///
/// File locations are derived from `data_dir`; downloaded audio goes to
/// `output_dir`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding input and intermediate files.
    pub data_dir: PathBuf,
    /// Directory receiving downloaded audio.
    pub output_dir: PathBuf,
    /// Pause between consecutive requests or searches.
    pub request_delay: Duration,
    /// Timeout for a single catalog page request.
    pub request_timeout: Duration,
    /// User agent for catalog requests.
    pub user_agent: String,
    /// Path or name of the `yt-dlp` executable.
    pub ytdlp_program: PathBuf,
    /// Number of search results requested per track.
    pub search_results: usize,
    /// Audio format passed to `yt-dlp --audio-format`.
    pub audio_format: String,
    /// Audio quality passed to `yt-dlp --audio-quality`.
    pub audio_quality: String,
    /// Whether to write catalog metadata into downloaded files.
    pub embed_tags: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            request_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ytdlp_program: PathBuf::from("yt-dlp"),
            search_results: 5,
            audio_format: "mp3".to_string(),
            audio_quality: "192K".to_string(),
            embed_tags: true,
        }
    }
}

impl Config {
    /// Catalog URLs, one per line.
    pub fn tracklist_txt(&self) -> PathBuf {
        self.data_dir.join("tracklist.txt")
    }

    /// Spotify playlist export.
    pub fn spotify_csv(&self) -> PathBuf {
        self.data_dir.join("spotify_track.csv")
    }

    /// Scraped catalog tracks as JSON.
    pub fn extracted_tracks_json(&self) -> PathBuf {
        self.data_dir.join("extracted_tracks.json")
    }

    /// Scraped catalog tracks as CSV.
    pub fn extracted_tracks_csv(&self) -> PathBuf {
        self.data_dir.join("extracted_tracks.csv")
    }

    /// Search results for a source.
    pub fn matched_tracks_json(&self, source: Source) -> PathBuf {
        match source {
            Source::Beatport => self.data_dir.join("tracks_with_youtube.json"),
            Source::Spotify => self.data_dir.join("spotify_tracks_with_youtube.json"),
        }
    }

    /// Create the data and output directories if missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Set the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the pause between requests.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Set the `yt-dlp` executable.
    pub fn with_ytdlp_program<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.ytdlp_program = program.as_ref().to_path_buf();
        self
    }

    /// Enable or disable tag embedding.
    pub fn with_embed_tags(mut self, embed: bool) -> Self {
        self.embed_tags = embed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = Config::default();
        assert_eq!(config.tracklist_txt(), PathBuf::from("data/tracklist.txt"));
        assert_eq!(config.spotify_csv(), PathBuf::from("data/spotify_track.csv"));
        assert_eq!(
            config.matched_tracks_json(Source::Beatport),
            PathBuf::from("data/tracks_with_youtube.json")
        );
        assert_eq!(
            config.matched_tracks_json(Source::Spotify),
            PathBuf::from("data/spotify_tracks_with_youtube.json")
        );
        assert_eq!(config.search_results, 5);
        assert_eq!(config.request_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_paths_follow_data_dir() {
        let config = Config::default().with_data_dir("/tmp/run");
        assert_eq!(
            config.extracted_tracks_json(),
            PathBuf::from("/tmp/run/extracted_tracks.json")
        );
    }

    #[test]
    fn test_ensure_dirs_creates_both() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default()
            .with_data_dir(dir.path().join("data"))
            .with_output_dir(dir.path().join("out"));
        config.ensure_dirs().unwrap();
        assert!(dir.path().join("data").is_dir());
        assert!(dir.path().join("out").is_dir());
    }
}
