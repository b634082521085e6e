//! Flat-file reading and writing for track records.
//!
//! Three formats connect the pipeline stages:
//! - plain text with one catalog URL per line,
//! - JSON arrays of [`Track`] records,
//! - CSV, either the full [`Track`] header or a Spotify playlist export.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{Source, Track};

/// Read catalog URLs, skipping blank lines.
pub fn load_tracklist<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref())?;
    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!("Loaded {} URLs from {}", urls.len(), path.as_ref().display());
    Ok(urls)
}

/// Load tracks from a JSON array.
pub fn load_tracks_json<P: AsRef<Path>>(path: P) -> Result<Vec<Track>> {
    let file = File::open(path.as_ref())?;
    let tracks: Vec<Track> = serde_json::from_reader(BufReader::new(file))?;
    debug!("Loaded {} tracks from {}", tracks.len(), path.as_ref().display());
    Ok(tracks)
}

/// Save tracks as a pretty-printed JSON array.
pub fn save_tracks_json<P: AsRef<Path>>(tracks: &[Track], path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, tracks)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!("Saved {} tracks to {}", tracks.len(), path.as_ref().display());
    Ok(())
}

/// Load tracks from a CSV file written by [`save_tracks_csv`].
pub fn load_tracks_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Track>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let tracks = reader
        .deserialize()
        .collect::<std::result::Result<Vec<Track>, csv::Error>>()?;
    Ok(tracks)
}

/// Save tracks as CSV with one column per record field.
pub fn save_tracks_csv<P: AsRef<Path>>(tracks: &[Track], path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for track in tracks {
        writer.serialize(track)?;
    }
    writer.flush()?;
    debug!("Saved {} tracks to {}", tracks.len(), path.as_ref().display());
    Ok(())
}

/// Load a Spotify playlist export.
///
/// Rows are `title,artist...,duration` after a header row. Artist names
/// may themselves contain commas, so everything between the first and the
/// last cell is joined back together. Rows with fewer than three cells are
/// skipped.
pub fn load_spotify_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Track>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut tracks = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable Spotify row {}: {}", index + 1, e);
                continue;
            }
        };

        let cells: Vec<&str> = record.iter().collect();
        if cells.len() < 3 {
            warn!("Skipping short Spotify row {}: {:?}", index + 1, cells);
            continue;
        }

        let title = cells[0].trim();
        let duration = cells[cells.len() - 1].trim();
        let artist = cells[1..cells.len() - 1].join(",");

        tracks.push(
            Track::new(title, artist.trim(), duration)
                .with_source(Source::Spotify)
                .with_track_number(index as u32 + 1),
        );
    }

    info!("Loaded {} Spotify tracks from {}", tracks.len(), path.as_ref().display());
    Ok(tracks)
}

/// Video URLs of the tracks that have one, in order. Empty URLs are skipped.
pub fn youtube_urls(tracks: &[Track]) -> Vec<String> {
    tracks
        .iter()
        .filter_map(|t| t.youtube_url.clone())
        .filter(|url| !url.is_empty())
        .collect()
}
