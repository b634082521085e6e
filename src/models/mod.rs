//! Data models passed between pipeline stages.
//!
//! This module contains the flat track record and the video search
//! result types used to enrich it.

pub mod common;
pub mod track;

// Re-exports for convenience
pub use common::Source;
pub use track::{Track, VideoCandidate, VideoMatch};
