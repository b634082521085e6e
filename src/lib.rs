//! # trackfetch
//!
//! Scrape track metadata from catalog pages, find the matching upload on
//! YouTube and download it as audio.
//!
//! ## Quick Start
//!
//! The easiest way to use this library is through the [`TrackFetcher`] struct:
//!
//! ```rust,no_run
//! use trackfetch::{Config, Source, TrackFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = TrackFetcher::new(Config::default())?;
//!
//!     // Scrape data/tracklist.txt
//!     let tracks = fetcher.extract_tracklist().await?;
//!     println!("Extracted {} tracks", tracks.len());
//!
//!     // Match each track to a video by duration
//!     let report = fetcher.search_source(Source::Beatport).await?;
//!     println!("Match rate: {:.1}%", report.match_rate());
//!
//!     // Download the matched videos as audio
//!     let result = fetcher.download_source(Source::Beatport).await?;
//!     println!("Downloaded {}/{}", result.successful.len(), result.total());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **extract**: catalog URLs → `extracted_tracks.json` / `.csv`
//! - **search**: tracks → `yt-dlp` search → closest result by duration,
//!   accepted as a match within 5 seconds
//! - **download**: matched video URLs → `yt-dlp` audio extraction
//!
//! ## Low-Level APIs
//!
//! - [`CatalogClient`] - catalog page fetching and parsing
//! - [`YtDlp`] - search and download through the `yt-dlp` executable
//! - [`matching`] - duration parsing and result selection
//! - [`storage`] - JSON, CSV and tracklist files

pub mod api;
pub mod config;
pub mod converters;
pub mod error;
mod fetcher;
pub mod matching;
pub mod models;
pub mod storage;
pub mod tagging;

// Main interface (recommended)
pub use fetcher::{BatchDownloadResult, DownloadResult, SearchReport, TrackFetcher};

// Low-level APIs
pub use api::{CatalogClient, YtDlp};
pub use config::Config;
pub use error::TrackfetchError;
pub use models::{Source, Track, VideoCandidate, VideoMatch};
