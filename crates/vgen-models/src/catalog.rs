//! Sample outputs used to complete simulated jobs.
//!
//! The catalog is built once at startup and never mutated afterwards.
//! Every style listed by [`StyleGroups::builtin`] has at least one sample,
//! and the [`FALLBACK_STYLE`] entry is used for any style the catalog does
//! not know.

use std::collections::BTreeMap;

use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::style::StyleGroups;

/// Style used when a job asks for one the catalog does not know.
pub const FALLBACK_STYLE: &str = "realistic";

/// A canned generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SampleVideo {
    pub video_url: String,
    pub thumbnail_url: String,
}

impl SampleVideo {
    pub fn new(video_url: impl Into<String>, thumbnail_url: impl Into<String>) -> Self {
        Self {
            video_url: video_url.into(),
            thumbnail_url: thumbnail_url.into(),
        }
    }

    /// A sample whose thumbnail is the same asset as the video.
    fn same(url: &str) -> Self {
        Self::new(url, url)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog has no 'realistic' fallback entry")]
    MissingFallback,

    #[error("Catalog has no samples for listed style: {0}")]
    MissingStyle(String),

    #[error("Catalog entry has no samples: {0}")]
    EmptyEntry(String),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable style → samples mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, Vec<SampleVideo>>,
}

impl Catalog {
    /// Build a catalog, checking that it can serve every listed style.
    pub fn new(entries: BTreeMap<String, Vec<SampleVideo>>) -> Result<Self, CatalogError> {
        if let Some((style, _)) = entries.iter().find(|(_, samples)| samples.is_empty()) {
            return Err(CatalogError::EmptyEntry(style.clone()));
        }
        if !entries.contains_key(FALLBACK_STYLE) {
            return Err(CatalogError::MissingFallback);
        }
        if let Some(style) = StyleGroups::builtin().ids().find(|id| !entries.contains_key(*id)) {
            return Err(CatalogError::MissingStyle(style.to_string()));
        }

        Ok(Self { entries })
    }

    /// Parse a catalog from a JSON object of `style -> [{video_url, thumbnail_url}]`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, Vec<SampleVideo>> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// The built-in sample set.
    pub fn builtin() -> Self {
        let entries = [
            (
                "realistic",
                vec![
                    SampleVideo::same("https://images.pexels.com/photos/11262264/pexels-photo-11262264.jpeg"),
                    SampleVideo::same("https://images.pexels.com/photos/7480538/pexels-photo-7480538.jpeg"),
                ],
            ),
            (
                "anime",
                vec![SampleVideo::same("https://images.pexels.com/photos/18069362/pexels-photo-18069362.png")],
            ),
            (
                "cartoon",
                vec![SampleVideo::same("https://images.unsplash.com/photo-1733590555923-2aa0e489300e")],
            ),
            (
                "surreal",
                vec![SampleVideo::same("https://images.pexels.com/photos/24182512/pexels-photo-24182512.jpeg")],
            ),
            (
                "talking_image",
                vec![SampleVideo::same("https://images.unsplash.com/photo-1717632464005-1f33909e484b")],
            ),
            (
                "character_animation",
                vec![SampleVideo::same("https://images.pexels.com/photos/17722043/pexels-photo-17722043.jpeg")],
            ),
            (
                "movement_overlay",
                vec![SampleVideo::same("https://images.pexels.com/photos/32539017/pexels-photo-32539017.jpeg")],
            ),
            (
                "talking_face",
                vec![SampleVideo::same("https://images.unsplash.com/photo-1483478550801-ceba5fe50e8e")],
            ),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(style, samples)| (style.to_string(), samples))
                .collect(),
        }
    }

    pub fn contains(&self, style: &str) -> bool {
        self.entries.contains_key(style)
    }

    /// Samples for a style, falling back to [`FALLBACK_STYLE`].
    ///
    /// Never empty: both constructors guarantee a non-empty fallback entry.
    pub fn samples_for(&self, style: &str) -> &[SampleVideo] {
        self.entries
            .get(style)
            .unwrap_or(&self.entries[FALLBACK_STYLE])
    }

    /// Pick a sample for a style uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, style: &str, rng: &mut R) -> &SampleVideo {
        let samples = self.samples_for(style);
        &samples[rng.random_range(0..samples.len())]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
