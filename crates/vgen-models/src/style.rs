//! Style descriptors exposed to clients.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which generation flow a style belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    TextToVideo,
    ImageToVideo,
}

impl StyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::TextToVideo => "text_to_video",
            StyleKind::ImageToVideo => "image_to_video",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// (id, name, description, kind)
const BUILTIN_STYLES: &[(&str, &str, &str, StyleKind)] = &[
    ("realistic", "Realistic", "Photorealistic video generation", StyleKind::TextToVideo),
    ("anime", "Anime", "Japanese animation style", StyleKind::TextToVideo),
    ("cartoon", "Cartoon", "Western cartoon style", StyleKind::TextToVideo),
    ("surreal", "Surreal", "Abstract and artistic style", StyleKind::TextToVideo),
    ("talking_image", "Talking Image", "Face animation from image", StyleKind::TextToVideo),
    (
        "character_animation",
        "Character Animation",
        "Animate characters in the image",
        StyleKind::ImageToVideo,
    ),
    ("movement_overlay", "Movement Overlay", "Add dynamic movement effects", StyleKind::ImageToVideo),
    ("talking_face", "Talking Face", "Make faces speak and move", StyleKind::ImageToVideo),
];

/// A selectable style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StyleInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Styles grouped by generation flow, as returned by `GET /styles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StyleGroups {
    pub text_to_video_styles: Vec<StyleInfo>,
    pub image_to_video_styles: Vec<StyleInfo>,
}

impl StyleGroups {
    /// The built-in style listing.
    pub fn builtin() -> Self {
        Self {
            text_to_video_styles: builtin_styles(StyleKind::TextToVideo),
            image_to_video_styles: builtin_styles(StyleKind::ImageToVideo),
        }
    }

    /// Iterate over every style ID in listing order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.text_to_video_styles
            .iter()
            .chain(self.image_to_video_styles.iter())
            .map(|s| s.id.as_str())
    }

    pub fn get(&self, kind: StyleKind) -> &[StyleInfo] {
        match kind {
            StyleKind::TextToVideo => &self.text_to_video_styles,
            StyleKind::ImageToVideo => &self.image_to_video_styles,
        }
    }
}

fn builtin_styles(kind: StyleKind) -> Vec<StyleInfo> {
    BUILTIN_STYLES
        .iter()
        .filter(|(_, _, _, k)| *k == kind)
        .map(|(id, name, description, _)| StyleInfo {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}
