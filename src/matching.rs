//! Duration-based selection of search results.

use crate::models::{VideoCandidate, VideoMatch};

/// Maximum length difference, in seconds, accepted as a true match.
pub const DURATION_TOLERANCE_SECS: u64 = 5;

/// Convert `M:SS` or `H:MM:SS` to total seconds.
///
/// Anything else, including non-numeric parts and totals that overflow,
/// yields `0`.
pub fn duration_to_seconds(duration: &str) -> u64 {
    let parts: Vec<&str> = duration.split(':').map(str::trim).collect();

    let numbers: Option<Vec<u64>> = parts.iter().map(|p| p.parse().ok()).collect();

    let total = match numbers.as_deref() {
        Some(&[minutes, seconds]) => minutes.checked_mul(60).and_then(|m| m.checked_add(seconds)),
        Some(&[hours, minutes, seconds]) => hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(seconds)),
        _ => None,
    };

    total.unwrap_or(0)
}

/// Format a length as `M:SS`, or `Unknown` when missing or zero.
pub fn format_seconds(seconds: Option<u64>) -> String {
    match seconds {
        Some(total) if total > 0 => format!("{}:{:02}", total / 60, total % 60),
        _ => "Unknown".to_string(),
    }
}

/// Pick the search result for a track.
///
/// Returns the first candidate within [`DURATION_TOLERANCE_SECS`] of
/// `target_duration` with `matched = true`. Otherwise the first candidate
/// is returned with `matched = false`. `None` only when there are no
/// candidates.
pub fn select_match(
    candidates: &[VideoCandidate],
    target_duration: &str,
    query: &str,
) -> Option<VideoMatch> {
    let target = duration_to_seconds(target_duration);

    let within = candidates
        .iter()
        .find(|c| c.seconds().abs_diff(target) <= DURATION_TOLERANCE_SECS);

    match within {
        Some(candidate) => Some(to_match(candidate, target, true, query)),
        None => candidates
            .first()
            .map(|candidate| to_match(candidate, target, false, query)),
    }
}

fn to_match(candidate: &VideoCandidate, target: u64, matched: bool, query: &str) -> VideoMatch {
    VideoMatch {
        url: candidate.url.clone(),
        title: candidate.title.clone(),
        duration: format_seconds(candidate.duration_secs),
        channel: candidate.channel.clone(),
        matched,
        difference: candidate.seconds().abs_diff(target) as f64,
        query: query.to_string(),
    }
}
