//! Process request and response schemas.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::language::LanguageTag;
use crate::quality::QualityReport;

/// Speaker gender tag used in output filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerGender {
    Men,
    Women,
}

impl SpeakerGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeakerGender::Men => "men",
            SpeakerGender::Women => "women",
        }
    }
}

impl fmt::Display for SpeakerGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for `POST /process-audio`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProcessRequest {
    /// Source video URL.
    #[validate(url(message = "must be a valid URL"))]
    pub url: String,
    /// Target dataset language.
    pub language: LanguageTag,
    /// Human-readable title; becomes the output filename base.
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub title: String,
    /// Speaker gender tag.
    pub gender: SpeakerGender,
    /// Seconds removed from the start of the waveform.
    #[serde(default = "default_trim_secs")]
    pub trim_start: u32,
    /// Seconds removed from the end of the waveform (0 = no trailing trim).
    #[serde(default = "default_trim_secs")]
    pub trim_end: u32,
    /// Nominal segment length in minutes.
    #[serde(default = "default_segment_minutes")]
    #[validate(range(min = 0.1, max = 120.0, message = "must be between 0.1 and 120 minutes"))]
    pub segment_duration: f64,
    /// Run the advisory quality analysis.
    #[serde(default = "default_true")]
    pub check_quality: bool,
    /// Fetch captions from YouTube; placeholders are written when disabled.
    #[serde(default = "default_true")]
    pub fetch_transcript: bool,
}

fn default_trim_secs() -> u32 {
    20
}

fn default_segment_minutes() -> f64 {
    7.0
}

fn default_true() -> bool {
    true
}

/// Response body for `POST /process-audio`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub message: String,
    /// Audio segment filenames written for this job.
    pub files: Vec<String>,
    /// Advisory quality report; null when analysis was skipped.
    pub quality_report: Option<QualityReport>,
}

impl ProcessResponse {
    pub fn success(
        message: impl Into<String>,
        files: Vec<String>,
        quality_report: Option<QualityReport>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            files,
            quality_report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> &'static str {
        r#"{
            "url": "https://youtube.com/watch?v=dQw4w9WgXcQ",
            "language": "french",
            "title": "interview",
            "gender": "women"
        }"#
    }

    #[test]
    fn test_defaults_applied() {
        let req: ProcessRequest = serde_json::from_str(minimal_json()).unwrap();
        assert_eq!(req.trim_start, 20);
        assert_eq!(req.trim_end, 20);
        assert!((req.segment_duration - 7.0).abs() < f64::EPSILON);
        assert!(req.check_quality);
        assert!(req.fetch_transcript);
    }

    #[test]
    fn test_valid_request_passes_validation() {
        let req: ProcessRequest = serde_json::from_str(minimal_json()).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut req: ProcessRequest = serde_json::from_str(minimal_json()).unwrap();
        req.title = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_url_rejected() {
        let mut req: ProcessRequest = serde_json::from_str(minimal_json()).unwrap();
        req.url = "not a url".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_zero_segment_duration_rejected() {
        let mut req: ProcessRequest = serde_json::from_str(minimal_json()).unwrap();
        req.segment_duration = 0.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_unknown_language_fails_deserialization() {
        let json = minimal_json().replace("french", "latin");
        assert!(serde_json::from_str::<ProcessRequest>(&json).is_err());
    }
}
