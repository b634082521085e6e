//! Audio metadata tagging utilities.
//!
//! Downloaded files are named after the video title, which rarely matches
//! the catalog. This module writes the catalog title and artist back into
//! the file's tags.

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::tag::{Accessor, Tag, TagExt};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::Track;

/// Metadata to embed in audio files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioMetadata {
    /// Track title.
    pub title: Option<String>,
    /// Track artist(s).
    pub artist: Option<String>,
    /// Free-form comment.
    pub comment: Option<String>,
}

impl AudioMetadata {
    /// Create new empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for a catalog track; the matched video URL goes in the comment.
    pub fn from_track(track: &Track) -> Self {
        let metadata = Self::new()
            .with_title(&track.title)
            .with_artist(&track.artist);

        match track.youtube_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => metadata.with_comment(url),
            None => metadata,
        }
    }

    /// Set title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set artist.
    pub fn with_artist<S: Into<String>>(mut self, artist: S) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set comment.
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Write metadata to an audio file.
///
/// Unreadable files and failed saves are logged and skipped so that a
/// tagging problem never fails a download.
///
/// # Errors
///
/// Currently always returns `Ok`.
pub fn write_metadata<P: AsRef<Path>>(path: P, metadata: &AudioMetadata) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing metadata to: {}", path.display());

    let mut tagged_file = match lofty::read_from_path(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Could not read file for tagging: {}", e);
            return Ok(());
        }
    };

    if tagged_file.primary_tag().is_none() {
        let tag_type = tagged_file.primary_tag_type();
        tagged_file.insert_tag(Tag::new(tag_type));
    }

    let Some(tag) = tagged_file.primary_tag_mut() else {
        warn!("No writable tag for {}", path.display());
        return Ok(());
    };

    if let Some(title) = &metadata.title {
        tag.set_title(title.clone());
    }

    if let Some(artist) = &metadata.artist {
        tag.set_artist(artist.clone());
    }

    if let Some(comment) = &metadata.comment {
        tag.set_comment(comment.clone());
    }

    if let Err(e) = tag.save_to_path(path, WriteOptions::default()) {
        warn!("Failed to save tags to {}: {}", path.display(), e);
    } else {
        debug!("Successfully wrote metadata to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoMatch;

    #[test]
    fn test_metadata_builder() {
        let meta = AudioMetadata::new()
            .with_title("Test Song")
            .with_artist("Test Artist")
            .with_comment("https://www.youtube.com/watch?v=abc");

        assert_eq!(meta.title, Some("Test Song".to_string()));
        assert_eq!(meta.artist, Some("Test Artist".to_string()));
        assert_eq!(
            meta.comment,
            Some("https://www.youtube.com/watch?v=abc".to_string())
        );
    }

    #[test]
    fn test_metadata_from_track() {
        let mut track = Track::new("Song", "Artist", "3:00");
        assert_eq!(AudioMetadata::from_track(&track).comment, None);

        track.apply_match(VideoMatch {
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            ..Default::default()
        });
        let meta = AudioMetadata::from_track(&track);
        assert_eq!(meta.title.as_deref(), Some("Song"));
        assert_eq!(meta.artist.as_deref(), Some("Artist"));
        assert_eq!(meta.comment.as_deref(), Some("https://www.youtube.com/watch?v=abc"));
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-audio.mp3");
        std::fs::write(&path, b"plain text").unwrap();

        let meta = AudioMetadata::new().with_title("Song");
        assert!(write_metadata(&path, &meta).is_ok());
    }
}
