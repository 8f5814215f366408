//! Generation request payloads and their validation rules.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Shortest video a client may request, in seconds.
pub const MIN_DURATION_SECS: i64 = 5;
/// Longest video a client may request, in seconds.
pub const MAX_DURATION_SECS: i64 = 10;
/// Duration used when the client omits one.
pub const DEFAULT_DURATION_SECS: i64 = 7;

fn default_duration() -> i64 {
    DEFAULT_DURATION_SECS
}

/// Body of `POST /generate-text-to-video`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct TextToVideoRequest {
    pub prompt: String,
    /// Free-form; unknown styles fall back to `realistic` at completion
    pub style: String,
    #[serde(default = "default_duration")]
    #[validate(range(min = "MIN_DURATION_SECS", max = "MAX_DURATION_SECS"))]
    pub duration: i64,
    #[serde(default)]
    pub nsfw_enabled: bool,
}

impl TextToVideoRequest {
    /// Validate and return the duration as stored on the job.
    pub fn checked_duration(&self) -> Result<u32, String> {
        self.validate().map_err(describe)?;
        Ok(self.duration as u32)
    }
}

/// Form fields of `POST /generate-image-to-video`, besides the file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct ImageToVideoParams {
    pub style: String,
    #[serde(default = "default_duration")]
    #[validate(range(min = "MIN_DURATION_SECS", max = "MAX_DURATION_SECS"))]
    pub duration: i64,
    #[serde(default)]
    pub nsfw_enabled: bool,
}

impl ImageToVideoParams {
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            duration: DEFAULT_DURATION_SECS,
            nsfw_enabled: false,
        }
    }

    /// Validate and return the duration as stored on the job.
    pub fn checked_duration(&self) -> Result<u32, String> {
        self.validate().map_err(describe)?;
        Ok(self.duration as u32)
    }
}

fn describe(errors: ValidationErrors) -> String {
    if errors.field_errors().contains_key("duration") {
        format!(
            "duration must be between {} and {} seconds",
            MIN_DURATION_SECS, MAX_DURATION_SECS
        )
    } else {
        errors.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_defaults_to_seven() {
        let req: TextToVideoRequest =
            serde_json::from_str(r#"{"prompt": "A dragon", "style": "realistic"}"#).unwrap();
        assert_eq!(req.checked_duration().unwrap(), 7);
        assert!(!req.nsfw_enabled);
    }

    #[test]
    fn test_duration_bounds_inclusive() {
        for duration in [5, 10] {
            let req = TextToVideoRequest {
                prompt: "p".to_string(),
                style: "anime".to_string(),
                duration,
                nsfw_enabled: false,
            };
            assert_eq!(req.checked_duration().unwrap(), duration as u32);
        }
    }

    #[test]
    fn test_duration_out_of_range() {
        for duration in [-1, 0, 4, 11, 60] {
            let mut params = ImageToVideoParams::new("talking_face");
            params.duration = duration;
            let err = params.checked_duration().unwrap_err();
            assert!(err.contains("between 5 and 10"), "{err}");
        }
    }
}
