//! Catalog page client.
//!
//! Fetches Beatport track pages over HTTP and turns them into
//! [`Track`] records.

use reqwest::Client;
use tracing::{debug, error};

use crate::config::Config;
use crate::converters;
use crate::error::Result;
use crate::models::Track;

/// HTTP client for catalog track pages.
///
/// # Example
///
/// ```rust,no_run
/// use trackfetch::{CatalogClient, Config};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let catalog = CatalogClient::new(&Config::default())?;
///     let track = catalog.extract_track("https://www.beatport.com/track/song/123").await;
///     println!("{} by {} ({})", track.title, track.artist, track.duration);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Create a client using the configured user agent and timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Download a page body, failing on non-success status codes.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Fetch and parse a track page.
    ///
    /// Never fails: when the page cannot be fetched the error is logged
    /// and a placeholder record is returned instead.
    pub async fn extract_track(&self, url: &str) -> Track {
        match self.fetch_page(url).await {
            Ok(html) => converters::parse_track_page(&html, url),
            Err(e) => {
                error!("Error processing {}: {}", url, e);
                Track::failed(url)
            }
        }
    }
}
