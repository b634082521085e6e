//! Track-related models.
//!
//! This module contains the flat track record passed between pipeline
//! stages and the search result types used to enrich it.

use serde::{Deserialize, Serialize};

use super::common::Source;

/// A single search result reported by the video platform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoCandidate {
    /// Watch page URL.
    pub url: String,

    /// Video title.
    pub title: String,

    /// Length in seconds, if reported.
    pub duration_secs: Option<u64>,

    /// Uploader name.
    pub channel: String,
}

impl VideoCandidate {
    /// Reported length, counting a missing length as zero.
    pub fn seconds(&self) -> u64 {
        self.duration_secs.unwrap_or(0)
    }
}

/// The candidate chosen for a track, with how well it matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoMatch {
    /// Watch page URL.
    pub url: String,

    /// Video title.
    pub title: String,

    /// Length formatted as `M:SS`, or `Unknown`.
    pub duration: String,

    /// Uploader name.
    pub channel: String,

    /// Whether the length is within the duration tolerance.
    pub matched: bool,

    /// Absolute length difference in seconds.
    pub difference: f64,

    /// Query that produced this result.
    pub query: String,
}

/// A flat track record.
///
/// Created by scraping or CSV loading, enriched by the search stage and
/// read by the download stage. The `youtube_*`, `duration_difference` and
/// `search_query` fields are either all set or all empty; use
/// [`Track::apply_match`] and [`Track::clear_match`] to change them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Track title.
    pub title: String,

    /// Artist names, comma separated.
    pub artist: String,

    /// Duration as `M:SS`.
    pub duration: String,

    /// Origin of the record.
    #[serde(default)]
    pub source: Option<Source>,

    /// Catalog page the record was scraped from.
    #[serde(default)]
    pub url: Option<String>,

    /// 1-based position in the input file.
    #[serde(default)]
    pub track_number: Option<u32>,

    #[serde(default)]
    pub youtube_url: Option<String>,

    #[serde(default)]
    pub youtube_title: Option<String>,

    #[serde(default)]
    pub youtube_duration: Option<String>,

    #[serde(default)]
    pub youtube_channel: Option<String>,

    /// Whether the matched video is within the duration tolerance.
    #[serde(default)]
    pub duration_match: bool,

    #[serde(default)]
    pub duration_difference: Option<f64>,

    #[serde(default)]
    pub search_query: Option<String>,
}

impl Track {
    /// Create a record with the catalog fields set.
    pub fn new<S1, S2, S3>(title: S1, artist: S2, duration: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            title: title.into(),
            artist: artist.into(),
            duration: duration.into(),
            ..Default::default()
        }
    }

    /// Set the origin of the record.
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the catalog URL.
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the 1-based position in the input file.
    pub fn with_track_number(mut self, number: u32) -> Self {
        self.track_number = Some(number);
        self
    }

    /// Placeholder recorded when a catalog page could not be processed.
    pub fn failed<S: Into<String>>(url: S) -> Self {
        Self::new("Error", "Error", "Error")
            .with_source(Source::Beatport)
            .with_url(url)
    }

    /// Copy every matched-video field from a search result.
    pub fn apply_match(&mut self, result: VideoMatch) {
        self.youtube_url = Some(result.url);
        self.youtube_title = Some(result.title);
        self.youtube_duration = Some(result.duration);
        self.youtube_channel = Some(result.channel);
        self.duration_match = result.matched;
        self.duration_difference = Some(result.difference);
        self.search_query = Some(result.query);
    }

    /// Reset every matched-video field.
    pub fn clear_match(&mut self) {
        self.youtube_url = None;
        self.youtube_title = None;
        self.youtube_duration = None;
        self.youtube_channel = None;
        self.duration_match = false;
        self.duration_difference = None;
        self.search_query = None;
    }

    /// The matched video, if every matched field is present.
    pub fn video_match(&self) -> Option<VideoMatch> {
        Some(VideoMatch {
            url: self.youtube_url.clone()?,
            title: self.youtube_title.clone()?,
            duration: self.youtube_duration.clone()?,
            channel: self.youtube_channel.clone()?,
            matched: self.duration_match,
            difference: self.duration_difference?,
            query: self.search_query.clone()?,
        })
    }

    /// Whether the record carries a downloadable video URL.
    pub fn has_video(&self) -> bool {
        self.youtube_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match() -> VideoMatch {
        VideoMatch {
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            title: "Artist - Song (Original Mix)".to_string(),
            duration: "6:12".to_string(),
            channel: "Label".to_string(),
            matched: true,
            difference: 2.0,
            query: "Song".to_string(),
        }
    }

    #[test]
    fn test_apply_then_read_match() {
        let mut track = Track::new("Song", "Artist", "6:10");
        track.apply_match(sample_match());
        assert!(track.has_video());
        assert!(track.duration_match);
        assert_eq!(track.video_match(), Some(sample_match()));
    }

    #[test]
    fn test_clear_match_resets_every_field() {
        let mut track = Track::new("Song", "Artist", "6:10");
        track.apply_match(sample_match());
        track.clear_match();
        assert_eq!(track, Track::new("Song", "Artist", "6:10"));
        assert_eq!(track.video_match(), None);
    }

    #[test]
    fn test_partial_match_fields_read_as_none() {
        let track = Track {
            youtube_url: Some("https://www.youtube.com/watch?v=abc".to_string()),
            ..Track::new("Song", "Artist", "6:10")
        };
        assert_eq!(track.video_match(), None);
    }

    #[test]
    fn test_empty_url_is_not_a_video() {
        let mut track = Track::new("Song", "Artist", "6:10");
        track.apply_match(VideoMatch {
            url: String::new(),
            ..sample_match()
        });
        assert!(!track.has_video());
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"title": "Song", "artist": "A, B", "duration": "3:05"}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.artist, "A, B");
        assert_eq!(track.source, None);
        assert!(!track.duration_match);
    }

    #[test]
    fn test_deserialize_with_nulls() {
        let json = r#"{
            "title": "Song", "artist": "Artist", "duration": "3:05",
            "source": "spotify", "url": null, "track_number": 4,
            "youtube_url": null, "duration_match": false, "search_query": null
        }"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.source, Some(Source::Spotify));
        assert_eq!(track.track_number, Some(4));
        assert!(!track.has_video());
    }

    #[test]
    fn test_failed_placeholder() {
        let track = Track::failed("https://www.beatport.com/track/x/1");
        assert_eq!(track.title, "Error");
        assert_eq!(track.artist, "Error");
        assert_eq!(track.duration, "Error");
        assert_eq!(track.url.as_deref(), Some("https://www.beatport.com/track/x/1"));
    }
}
