//! Common types shared across all models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrackfetchError;

/// Where a track record originally came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Scraped from a Beatport track page.
    Beatport,
    /// Loaded from a Spotify playlist export.
    Spotify,
}

impl Source {
    /// Lowercase name used on the command line and in files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Beatport => "beatport",
            Source::Spotify => "spotify",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Beatport => "Beatport",
            Source::Spotify => "Spotify",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = TrackfetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beatport" => Ok(Source::Beatport),
            "spotify" => Ok(Source::Spotify),
            _ => Err(TrackfetchError::InvalidSource(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!("beatport".parse::<Source>().unwrap(), Source::Beatport);
        assert_eq!("Spotify".parse::<Source>().unwrap(), Source::Spotify);
    }

    #[test]
    fn test_parse_unknown_source() {
        let err = "soundcloud".parse::<Source>().unwrap_err();
        assert!(matches!(err, TrackfetchError::InvalidSource(s) if s == "soundcloud"));
    }

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Spotify).unwrap(), "\"spotify\"");
        let source: Source = serde_json::from_str("\"beatport\"").unwrap();
        assert_eq!(source, Source::Beatport);
    }

    #[test]
    fn test_display_matches_as_str() {
        for source in [Source::Beatport, Source::Spotify] {
            assert_eq!(source.to_string(), source.as_str());
        }
    }
}
