//! Clients for the external systems the pipeline talks to.
//!
//! This module provides two clients:
//! - [`CatalogClient`]: HTTP fetcher for catalog track pages
//! - [`YtDlp`]: subprocess wrapper for video search and audio download

pub mod catalog;
pub mod ytdlp;

pub use catalog::CatalogClient;
pub use ytdlp::YtDlp;
