//! Catalog track page extraction.
//!
//! Beatport track pages carry the title in the first `<h1>`, the artists
//! in `p.interior-track-artists` and the length in
//! `p.interior-track-length`. Older or partial pages fall back to the
//! `<title>` element, artist links and a raw `M:SS` pattern.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::models::{Source, Track};

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_DURATION: &str = "Unknown Duration";

/// Maximum number of artist links used when the artist paragraph is missing.
const MAX_FALLBACK_ARTISTS: usize = 3;

static H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static ARTISTS: Lazy<Selector> = Lazy::new(|| selector("p.interior-track-artists"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a"));
static ARTIST_LINK: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="/artist/"]"#));
static LENGTH: Lazy<Selector> = Lazy::new(|| selector("p.interior-track-length"));

static DURATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}:\d{2}\b").expect("valid duration pattern"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Build a track record from a catalog page.
pub fn parse_track_page(html: &str, url: &str) -> Track {
    let document = Html::parse_document(html);

    Track::new(
        extract_title(&document),
        extract_artist(&document),
        extract_duration(&document, html),
    )
    .with_source(Source::Beatport)
    .with_url(url)
}

fn extract_title(document: &Html) -> String {
    if let Some(h1) = document.select(&H1).next() {
        return collapse_featuring(&text_of(h1));
    }

    let Some(title) = document.select(&TITLE).next() else {
        return UNKNOWN_TITLE.to_string();
    };

    // "Artists - Track [Label] | Beatport"
    let page_title: String = title.text().collect();
    match page_title.split(" - ").nth(1) {
        Some(segment) => segment
            .split(" [")
            .next()
            .unwrap_or(segment)
            .trim()
            .to_string(),
        None => UNKNOWN_TITLE.to_string(),
    }
}

/// Drop the repeated "feat." credit some pages render twice.
fn collapse_featuring(title: &str) -> String {
    let parts: Vec<&str> = title.split("feat.").collect();
    if parts.len() > 2 {
        format!("{}feat.{}", parts[0], parts[1]).trim().to_string()
    } else {
        title.trim().to_string()
    }
}

fn extract_artist(document: &Html) -> String {
    if let Some(paragraph) = document.select(&ARTISTS).next() {
        let names: Vec<String> = paragraph.select(&LINK).map(text_of).collect();
        return if names.is_empty() {
            text_of(paragraph)
        } else {
            names.join(", ")
        };
    }

    let names: Vec<String> = document
        .select(&ARTIST_LINK)
        .take(MAX_FALLBACK_ARTISTS)
        .map(text_of)
        .collect();

    if names.is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        names.join(", ")
    }
}

fn extract_duration(document: &Html, raw: &str) -> String {
    if let Some(length) = document.select(&LENGTH).next() {
        return text_of(length);
    }

    DURATION_PATTERN
        .find(raw)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_DURATION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.beatport.com/track/song/123";

    #[test]
    fn test_full_page() {
        let html = r#"
            <html><head><title>Ignored</title></head><body>
              <h1> Song Name </h1>
              <p class="interior-track-artists">
                <a href="/artist/one/1">Artist One</a>
                <a href="/artist/two/2">Artist Two</a>
              </p>
              <p class="interior-track-length"> 6:12 </p>
            </body></html>
        "#;
        let track = parse_track_page(html, URL);
        assert_eq!(track.title, "Song Name");
        assert_eq!(track.artist, "Artist One, Artist Two");
        assert_eq!(track.duration, "6:12");
        assert_eq!(track.source, Some(Source::Beatport));
        assert_eq!(track.url.as_deref(), Some(URL));
    }

    #[test]
    fn test_duplicated_featuring_is_collapsed() {
        assert_eq!(
            collapse_featuring("Song feat. Singer feat. Singer"),
            "Song feat. Singer"
        );
        assert_eq!(collapse_featuring("Song feat. Singer"), "Song feat. Singer");
    }

    #[test]
    fn test_title_falls_back_to_page_title() {
        let html = "<html><head><title>Artist - Song Name [Label] | Beatport</title></head><body></body></html>";
        let track = parse_track_page(html, URL);
        assert_eq!(track.title, "Song Name");
    }

    #[test]
    fn test_title_without_separator_is_unknown() {
        let html = "<html><head><title>Beatport</title></head><body></body></html>";
        assert_eq!(parse_track_page(html, URL).title, "Unknown Title");
    }

    #[test]
    fn test_artist_paragraph_without_links() {
        let html = r#"<p class="interior-track-artists"> Solo Artist </p>"#;
        assert_eq!(parse_track_page(html, URL).artist, "Solo Artist");
    }

    #[test]
    fn test_artist_links_fallback_takes_three() {
        let html = r#"
            <a href="/artist/a/1">A</a>
            <a href="/label/x/9">Label</a>
            <a href="/artist/b/2">B</a>
            <a href="/artist/c/3">C</a>
            <a href="/artist/d/4">D</a>
        "#;
        assert_eq!(parse_track_page(html, URL).artist, "A, B, C");
    }

    #[test]
    fn test_missing_everything() {
        let track = parse_track_page("<html><body><p>nothing</p></body></html>", URL);
        assert_eq!(track.title, "Unknown Title");
        assert_eq!(track.artist, "Unknown Artist");
        assert_eq!(track.duration, "Unknown Duration");
    }

    #[test]
    fn test_duration_pattern_fallback() {
        let html = "<html><body><h1>Song</h1><span>Length 5:48 BPM 124</span></body></html>";
        assert_eq!(parse_track_page(html, URL).duration, "5:48");
    }
}
