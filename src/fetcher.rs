//! Unified pipeline interface.
//!
//! This module ties the catalog client, the `yt-dlp` wrapper and the flat
//! files together into the three pipeline stages: extract, search and
//! download.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::api::{CatalogClient, YtDlp};
use crate::config::Config;
use crate::error::Result;
use crate::matching;
use crate::models::{Source, Track};
use crate::storage;
use crate::tagging::{self, AudioMetadata};

/// Result of a single audio download.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadResult {
    /// Video URL that was downloaded.
    pub url: String,
    /// Final file path, when `yt-dlp` reported one.
    pub path: Option<PathBuf>,
}

/// Result of a batch download.
#[derive(Debug, Default)]
pub struct BatchDownloadResult {
    /// Output directory.
    pub directory: PathBuf,
    /// Successfully downloaded URLs.
    pub successful: Vec<DownloadResult>,
    /// Failed URLs with error messages.
    pub failed: Vec<(String, String)>,
}

impl BatchDownloadResult {
    /// Total number of URLs attempted.
    pub fn total(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    /// Check if every URL was downloaded successfully.
    pub fn all_successful(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome of a search stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// Source that was searched.
    pub source: Source,
    /// Number of tracks processed.
    pub total: usize,
    /// Number of tracks with a duration match.
    pub matched: usize,
    /// File the enriched tracks were written to.
    pub output: PathBuf,
}

impl SearchReport {
    /// Share of tracks with a duration match, as a percentage.
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64 * 100.0
        }
    }
}

/// Main pipeline interface.
///
/// # Example
///
/// ```rust,no_run
/// use trackfetch::{Config, Source, TrackFetcher};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let fetcher = TrackFetcher::new(Config::default())?;
///
///     fetcher.extract_tracklist().await?;
///     let report = fetcher.search_source(Source::Beatport).await?;
///     println!("Matched {}/{}", report.matched, report.total);
///
///     let result = fetcher.download_source(Source::Beatport).await?;
///     println!("Downloaded {}/{}", result.successful.len(), result.total());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TrackFetcher {
    config: Config,
    catalog: CatalogClient,
    ytdlp: YtDlp,
}

impl TrackFetcher {
    /// Create a pipeline from its configuration.
    pub fn new(config: Config) -> Result<Self> {
        let catalog = CatalogClient::new(&config)?;
        let ytdlp = YtDlp::new(&config);

        Ok(Self {
            config,
            catalog,
            ytdlp,
        })
    }

    /// Get the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================
    // EXTRACT
    // ==================

    /// Scrape every catalog URL in the tracklist.
    ///
    /// Writes `extracted_tracks.json` and `extracted_tracks.csv` and returns
    /// the records in tracklist order. Pages that fail are kept as
    /// placeholder records.
    pub async fn extract_tracklist(&self) -> Result<Vec<Track>> {
        self.config.ensure_dirs()?;

        let urls = storage::load_tracklist(self.config.tracklist_txt())?;
        info!("Found {} tracks to process", urls.len());

        let mut tracks = Vec::with_capacity(urls.len());

        for (idx, url) in urls.iter().enumerate() {
            if idx > 0 {
                self.pause().await;
            }

            info!("Processing track {}/{}: {}", idx + 1, urls.len(), url);
            let track = self
                .catalog
                .extract_track(url)
                .await
                .with_track_number(idx as u32 + 1);
            tracks.push(track);
        }

        storage::save_tracks_json(&tracks, self.config.extracted_tracks_json())?;
        storage::save_tracks_csv(&tracks, self.config.extracted_tracks_csv())?;

        Ok(tracks)
    }

    // ==================
    // SEARCH
    // ==================

    /// Search for one track and store the result on it.
    ///
    /// Returns whether a duration match was found. Search failures are
    /// logged and leave the track without a match.
    pub async fn search_track(&self, track: &mut Track) -> bool {
        info!(
            "Title: {} | Artist: {} | Duration: {}",
            track.title, track.artist, track.duration
        );

        let query = track.title.clone();
        info!("Searching YouTube for: '{}'", query);

        let candidates = match self.ytdlp.search(&query).await {
            Ok(c) => c,
            Err(e) => {
                error!("Error searching for '{}': {}", query, e);
                Vec::new()
            }
        };

        let target = matching::duration_to_seconds(&track.duration);
        for candidate in &candidates {
            info!(
                "  Found: '{}' - Duration: {} ({}s) - Diff: {}s",
                candidate.title,
                matching::format_seconds(candidate.duration_secs),
                candidate.seconds(),
                candidate.seconds().abs_diff(target)
            );
        }

        match matching::select_match(&candidates, &track.duration, &query) {
            Some(found) => {
                if found.matched {
                    info!("Found matching track: {}", found.url);
                } else {
                    warn!("Found track but duration mismatch: {}", found.url);
                }
                track.apply_match(found);
            }
            None => {
                warn!("No results found");
                track.clear_match();
            }
        }

        track.duration_match
    }

    /// Search every track of a source and save the enriched records.
    pub async fn search_source(&self, source: Source) -> Result<SearchReport> {
        self.config.ensure_dirs()?;

        let mut tracks = match source {
            Source::Beatport => storage::load_tracks_json(self.config.extracted_tracks_json())?,
            Source::Spotify => storage::load_spotify_csv(self.config.spotify_csv())?,
        };
        info!("Processing {} {} tracks...", tracks.len(), source.label());

        let total = tracks.len();
        let mut matched = 0;

        for (idx, track) in tracks.iter_mut().enumerate() {
            if idx > 0 {
                self.pause().await;
            }

            info!("--- {} track {}/{} ---", source.label(), idx + 1, total);
            if self.search_track(track).await {
                matched += 1;
            }
        }

        let output = self.config.matched_tracks_json(source);
        storage::save_tracks_json(&tracks, &output)?;

        Ok(SearchReport {
            source,
            total,
            matched,
            output,
        })
    }

    // ==================
    // DOWNLOAD
    // ==================

    /// Load the searched tracks of a source that carry a video URL.
    pub fn load_download_queue(&self, source: Source) -> Result<Vec<Track>> {
        self.config.ensure_dirs()?;

        let tracks = storage::load_tracks_json(self.config.matched_tracks_json(source))?;
        let queue: Vec<Track> = tracks.iter().filter(|t| t.has_video()).cloned().collect();

        info!(
            "Found {} {} tracks with YouTube URLs out of {} total tracks",
            queue.len(),
            source.label(),
            tracks.len()
        );

        Ok(queue)
    }

    /// Download video URLs as audio into the output directory.
    pub async fn download_urls(&self, urls: &[String]) -> Result<BatchDownloadResult> {
        let mut result = self.start_batch()?;

        for url in urls {
            self.download_one(url, None, &mut result).await;
        }

        Ok(result)
    }

    /// Download every matched track of a source.
    ///
    /// When tag embedding is enabled the catalog title and artist are
    /// written into each downloaded file.
    pub async fn download_source(&self, source: Source) -> Result<BatchDownloadResult> {
        let queue = self.load_download_queue(source)?;
        info!("Starting download of {} tracks from {}...", queue.len(), source);

        if !self.config.embed_tags {
            return self.download_urls(&storage::youtube_urls(&queue)).await;
        }

        let mut result = self.start_batch()?;

        for track in &queue {
            if let Some(url) = &track.youtube_url {
                self.download_one(url, Some(track), &mut result).await;
            }
        }

        Ok(result)
    }

    // ==================
    // INTERNAL HELPERS
    // ==================

    fn start_batch(&self) -> Result<BatchDownloadResult> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        Ok(BatchDownloadResult {
            directory: self.config.output_dir.clone(),
            ..Default::default()
        })
    }

    async fn download_one(
        &self,
        url: &str,
        track: Option<&Track>,
        result: &mut BatchDownloadResult,
    ) {
        info!("Downloading: {}", url);

        match self.ytdlp.download_audio(url, &self.config.output_dir).await {
            Ok(path) => {
                info!("Successfully downloaded: {}", url);

                if let (true, Some(track), Some(path)) = (self.config.embed_tags, track, &path) {
                    // Ignore tagging errors
                    let _ = tagging::write_metadata(path, &AudioMetadata::from_track(track));
                }

                result.successful.push(DownloadResult {
                    url: url.to_string(),
                    path,
                });
            }
            Err(e) => {
                error!("Failed to download {}: {}", url, e);
                result.failed.push((url.to_string(), e.to_string()));
            }
        }
    }

    async fn pause(&self) {
        if !self.config.request_delay.is_zero() {
            tokio::time::sleep(self.config.request_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoMatch;
    use std::time::Duration;

    fn fetcher_in(dir: &std::path::Path) -> TrackFetcher {
        let config = Config::default()
            .with_data_dir(dir.join("data"))
            .with_output_dir(dir.join("output"))
            .with_request_delay(Duration::ZERO)
            .with_ytdlp_program("/nonexistent/trackfetch-yt-dlp");
        TrackFetcher::new(config).unwrap()
    }

    #[test]
    fn test_match_rate() {
        let report = SearchReport {
            source: Source::Spotify,
            total: 8,
            matched: 6,
            output: PathBuf::from("out.json"),
        };
        assert_eq!(report.match_rate(), 75.0);

        let empty = SearchReport {
            total: 0,
            matched: 0,
            ..report
        };
        assert_eq!(empty.match_rate(), 0.0);
    }

    #[test]
    fn test_batch_result_counts() {
        let result = BatchDownloadResult {
            directory: PathBuf::from("output"),
            successful: vec![DownloadResult {
                url: "u1".to_string(),
                path: None,
            }],
            failed: vec![("u2".to_string(), "boom".to_string())],
        };
        assert_eq!(result.total(), 2);
        assert!(!result.all_successful());
    }

    #[test]
    fn test_download_queue_keeps_tracks_with_url() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher_in(dir.path());
        fetcher.config().ensure_dirs().unwrap();

        let mut with_video = Track::new("A", "X", "3:00");
        with_video.apply_match(VideoMatch {
            url: "https://www.youtube.com/watch?v=a".to_string(),
            ..Default::default()
        });
        let without_video = Track::new("B", "Y", "4:00");
        let mut empty_url = Track::new("C", "Z", "5:00");
        empty_url.apply_match(VideoMatch {
            url: String::new(),
            ..Default::default()
        });
        storage::save_tracks_json(
            &[with_video.clone(), without_video, empty_url],
            fetcher.config().matched_tracks_json(Source::Beatport),
        )
        .unwrap();

        let queue = fetcher.load_download_queue(Source::Beatport).unwrap();
        assert_eq!(queue, vec![with_video]);
    }

    #[test]
    fn test_download_queue_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher_in(dir.path());
        assert!(fetcher.load_download_queue(Source::Spotify).is_err());
    }

    #[test]
    fn test_search_failure_clears_match() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher_in(dir.path());

        let mut track = Track::new("Song", "Artist", "3:00");
        track.apply_match(VideoMatch {
            url: "stale".to_string(),
            matched: true,
            ..Default::default()
        });

        let matched = tokio_test::block_on(fetcher.search_track(&mut track));
        assert!(!matched);
        assert_eq!(track.video_match(), None);
        assert!(!track.has_video());
    }

    #[test]
    fn test_failed_downloads_are_collected() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher_in(dir.path());
        let urls = vec!["u1".to_string(), "u2".to_string()];

        let result = tokio_test::block_on(fetcher.download_urls(&urls)).unwrap();
        assert!(result.successful.is_empty());
        assert_eq!(result.failed.len(), 2);
        assert_eq!(result.failed[0].0, "u1");
        assert!(dir.path().join("output").is_dir());
    }
}
