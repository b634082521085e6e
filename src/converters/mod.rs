//! Raw data to model converters.
//!
//! This module turns the JSON lines printed by `yt-dlp --dump-json` into
//! [`VideoCandidate`]s. Catalog HTML pages are handled by [`page`].

pub mod page;

use serde_json::Value;
use tracing::debug;

use crate::models::VideoCandidate;

pub use page::parse_track_page;

/// Get string from JSON, falling back to a default if not found.
fn get_str_or(json: &Value, key: &str, default: &str) -> String {
    json.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or(default)
        .to_string()
}

/// Read a length in seconds; yt-dlp reports either integers or floats.
fn get_seconds(json: &Value, key: &str) -> Option<u64> {
    let value = json.get(key)?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
}

/// Parse one yt-dlp info dictionary.
pub fn parse_video_candidate(json: &Value) -> VideoCandidate {
    VideoCandidate {
        url: get_str_or(json, "webpage_url", ""),
        title: get_str_or(json, "title", "Unknown"),
        duration_secs: get_seconds(json, "duration"),
        channel: get_str_or(json, "uploader", "Unknown"),
    }
}

/// Parse line-delimited yt-dlp output.
///
/// Blank lines, lines that are not JSON objects and results without a
/// watch page URL are skipped.
pub fn parse_search_output(output: &str) -> Vec<VideoCandidate> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(json) if json.is_object() => {
                let candidate = parse_video_candidate(&json);
                if candidate.url.is_empty() {
                    debug!("Skipping yt-dlp result without URL: {}", candidate.title);
                    None
                } else {
                    Some(candidate)
                }
            }
            Ok(_) => None,
            Err(e) => {
                debug!("Skipping undecodable yt-dlp line: {}", e);
                None
            }
        })
        .collect()
}
