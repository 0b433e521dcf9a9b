//! Audio quality report.
//!
//! Advisory metrics computed over the downloaded waveform. The report never
//! blocks the pipeline; a failed analysis carries an error message and null
//! metric fields instead.

use serde::{Deserialize, Serialize};

/// Perceptual recording-quality metrics for a waveform.
///
/// All metric fields are `None` when analysis failed, in which case `error`
/// holds a human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Average loudness in dBFS (0 = full scale, more negative = quieter).
    pub avg_loudness_dbfs: Option<f64>,
    /// Fraction of total duration classified as non-silent, in [0, 1].
    pub speech_ratio: Option<f64>,
    /// Average loudness above the background-noise floor.
    pub low_background_noise: Option<bool>,
    /// Speech ratio falls in the single-speaker heuristic band.
    pub likely_single_speaker: Option<bool>,
    /// Composite score in [0, 1].
    pub quality_score: Option<f64>,
    /// Set when analysis failed; all other fields are null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QualityReport {
    /// Build a successful report from computed metrics.
    pub fn ok(
        avg_loudness_dbfs: f64,
        speech_ratio: f64,
        low_background_noise: bool,
        likely_single_speaker: bool,
    ) -> Self {
        let quality_score = 0.5 * f64::from(u8::from(low_background_noise))
            + 0.5 * f64::from(u8::from(likely_single_speaker));
        Self {
            avg_loudness_dbfs: Some(avg_loudness_dbfs),
            speech_ratio: Some(speech_ratio),
            low_background_noise: Some(low_background_noise),
            likely_single_speaker: Some(likely_single_speaker),
            quality_score: Some(quality_score),
            error: None,
        }
    }

    /// Build an error-marked report with all metric fields null.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            avg_loudness_dbfs: None,
            speech_ratio: None,
            low_background_noise: None,
            likely_single_speaker: None,
            quality_score: None,
            error: Some(message.into()),
        }
    }

    /// Whether the report carries metrics.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
