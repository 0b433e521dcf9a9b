//! Advisory audio quality analysis.
//!
//! Computes average loudness (dBFS) and a speech-to-total ratio derived from
//! silence detection, then folds them into a composite quality score. The
//! analysis is advisory: it never fails the pipeline, and any internal error
//! degrades to an error-marked report.

use tracing::debug;

use voxset_models::QualityReport;

use crate::error::{MediaError, MediaResult};
use crate::waveform::Waveform;

/// Loudness floor representing digital silence, in dBFS.
///
/// A zero-RMS buffer has no defined logarithmic loudness; flooring keeps the
/// report JSON-serializable and lets fully silent frames register as silent
/// even though the relative threshold can never reach them.
const DIGITAL_SILENCE_DBFS: f64 = -120.0;

/// Tunable thresholds for quality analysis.
///
/// The defaults reproduce the empirical constants this heuristic was
/// calibrated with; they are configuration, not invariants.
#[derive(Debug, Clone)]
pub struct QualityConfig {
    /// Average loudness above this floor counts as low background noise.
    ///
    /// A higher loudness floor implies less relative background noise.
    pub noise_floor_dbfs: f64,

    /// Silence threshold, in dB below the waveform's own average loudness.
    pub silence_margin_db: f64,

    /// Minimum quiet run length before it counts as a silent gap.
    pub min_silence_ms: u64,

    /// Loudness measurement window.
    pub frame_ms: u64,

    /// Speech-ratio band (exclusive) treated as likely single-speaker.
    ///
    /// Below the band the recording is near-silent; above it, assumed
    /// multi-speaker or music.
    pub single_speaker_band: (f64, f64),
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            noise_floor_dbfs: -40.0,
            silence_margin_db: 16.0,
            min_silence_ms: 500,
            frame_ms: 10,
            single_speaker_band: (0.5, 0.95),
        }
    }
}

impl QualityConfig {
    /// Builder-style setter for the background-noise floor.
    pub fn with_noise_floor(mut self, dbfs: f64) -> Self {
        self.noise_floor_dbfs = dbfs;
        self
    }

    /// Builder-style setter for the silence margin.
    pub fn with_silence_margin(mut self, db: f64) -> Self {
        self.silence_margin_db = db;
        self
    }

    /// Builder-style setter for the minimum silence gap.
    pub fn with_min_silence_ms(mut self, ms: u64) -> Self {
        self.min_silence_ms = ms.max(1);
        self
    }
}

/// Analyze a waveform and produce a quality report.
///
/// Never returns an error: analysis failure yields a report carrying only an
/// error message, which callers treat as "analysis unavailable".
pub fn analyze_quality(waveform: &Waveform, config: &QualityConfig) -> QualityReport {
    match compute(waveform, config) {
        Ok(report) => report,
        Err(e) => {
            debug!(error = %e, "Quality analysis failed");
            QualityReport::failed(e.to_string())
        }
    }
}

fn compute(waveform: &Waveform, config: &QualityConfig) -> MediaResult<QualityReport> {
    if waveform.is_empty() {
        return Err(MediaError::EmptyWaveform);
    }

    let avg_loudness = dbfs(waveform.samples());
    let silence_threshold = avg_loudness - config.silence_margin_db;

    let speech_ratio = speech_ratio(waveform, silence_threshold, config);

    let low_background_noise = avg_loudness > config.noise_floor_dbfs;
    let (band_lo, band_hi) = config.single_speaker_band;
    let likely_single_speaker = speech_ratio > band_lo && speech_ratio < band_hi;

    debug!(
        avg_loudness_dbfs = avg_loudness,
        speech_ratio,
        low_background_noise,
        likely_single_speaker,
        "Quality analysis complete"
    );

    Ok(QualityReport::ok(
        avg_loudness,
        speech_ratio,
        low_background_noise,
        likely_single_speaker,
    ))
}

/// RMS loudness in dBFS, floored at the digital-silence level.
fn dbfs(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return DIGITAL_SILENCE_DBFS;
    }
    let sum_squares: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    let rms = (sum_squares / samples.len() as f64).sqrt();
    if rms <= 0.0 {
        DIGITAL_SILENCE_DBFS
    } else {
        (20.0 * rms.log10()).max(DIGITAL_SILENCE_DBFS)
    }
}

/// Fraction of sample frames lying outside qualifying silent gaps.
///
/// Walks the waveform in fixed loudness frames; a contiguous run of frames
/// quieter than the threshold (or at the digital-silence floor) lasting at
/// least `min_silence_ms` counts as a silent gap. Everything else is a
/// non-silent span.
fn speech_ratio(waveform: &Waveform, silence_threshold: f64, config: &QualityConfig) -> f64 {
    let total_frames = waveform.frames();
    if total_frames == 0 {
        return 0.0;
    }

    let channels = waveform.channels() as usize;
    let frame_len =
        ((config.frame_ms.max(1) * waveform.sample_rate() as u64 / 1000) as usize).max(1);
    let min_silence_frames =
        ((config.min_silence_ms * waveform.sample_rate() as u64 / 1000) as usize).max(1);

    let mut silent_frames_total = 0usize;
    let mut run_frames = 0usize;

    for chunk in waveform.samples().chunks(frame_len * channels) {
        let loudness = dbfs(chunk);
        let is_silent = loudness < silence_threshold || loudness <= DIGITAL_SILENCE_DBFS;

        if is_silent {
            run_frames += chunk.len() / channels;
        } else {
            if run_frames >= min_silence_frames {
                silent_frames_total += run_frames;
            }
            run_frames = 0;
        }
    }
    if run_frames >= min_silence_frames {
        silent_frames_total += run_frames;
    }

    1.0 - silent_frames_total as f64 / total_frames as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::Waveform;

    fn mono(samples: Vec<f32>) -> Waveform {
        Waveform::new(samples, 8000, 1).unwrap()
    }

    fn frames_for_ms(ms: u64) -> usize {
        (ms * 8000 / 1000) as usize
    }

    #[test]
    fn test_fully_silent_input_has_zero_speech_ratio() {
        let wf = mono(vec![0.0; frames_for_ms(2000)]);
        let report = analyze_quality(&wf, &QualityConfig::default());

        assert!(report.is_ok());
        assert_eq!(report.speech_ratio, Some(0.0));
        assert_eq!(report.low_background_noise, Some(false));
        assert_eq!(report.likely_single_speaker, Some(false));
        assert_eq!(report.quality_score, Some(0.0));
    }

    #[test]
    fn test_continuous_tone_has_full_speech_ratio() {
        let wf = mono(vec![0.5; frames_for_ms(2000)]);
        let report = analyze_quality(&wf, &QualityConfig::default());

        assert_eq!(report.speech_ratio, Some(1.0));
        // -6 dBFS is well above the -40 noise floor
        assert_eq!(report.low_background_noise, Some(true));
        // Continuous audio is outside the single-speaker band
        assert_eq!(report.likely_single_speaker, Some(false));
        assert_eq!(report.quality_score, Some(0.5));
    }

    #[test]
    fn test_long_gap_counts_as_silence() {
        // 1s tone, 1s digital silence, 1s tone
        let mut samples = vec![0.5f32; frames_for_ms(1000)];
        samples.extend(vec![0.0; frames_for_ms(1000)]);
        samples.extend(vec![0.5; frames_for_ms(1000)]);
        let wf = mono(samples);

        let report = analyze_quality(&wf, &QualityConfig::default());
        let ratio = report.speech_ratio.unwrap();
        assert!((ratio - 2.0 / 3.0).abs() < 0.02, "ratio = {ratio}");
    }

    #[test]
    fn test_short_gap_ignored() {
        // 300ms gap is below the 500ms minimum and stays "speech"
        let mut samples = vec![0.5f32; frames_for_ms(1000)];
        samples.extend(vec![0.0; frames_for_ms(300)]);
        samples.extend(vec![0.5; frames_for_ms(1000)]);
        let wf = mono(samples);

        let report = analyze_quality(&wf, &QualityConfig::default());
        assert_eq!(report.speech_ratio, Some(1.0));
    }

    #[test]
    fn test_single_speaker_band() {
        // ~70% speech: 7s tone + 3s silence
        let mut samples = vec![0.5f32; frames_for_ms(7000)];
        samples.extend(vec![0.0; frames_for_ms(3000)]);
        let wf = mono(samples);

        let report = analyze_quality(&wf, &QualityConfig::default());
        let ratio = report.speech_ratio.unwrap();
        assert!(ratio > 0.5 && ratio < 0.95, "ratio = {ratio}");
        assert_eq!(report.likely_single_speaker, Some(true));
        assert_eq!(report.quality_score, Some(1.0));
    }

    #[test]
    fn test_ratio_always_in_unit_interval() {
        for pattern in [
            vec![0.0f32; frames_for_ms(600)],
            vec![1.0; frames_for_ms(600)],
            vec![-0.3; frames_for_ms(50)],
        ] {
            let report = analyze_quality(&mono(pattern), &QualityConfig::default());
            let ratio = report.speech_ratio.unwrap();
            assert!((0.0..=1.0).contains(&ratio), "ratio = {ratio}");
        }
    }

    #[test]
    fn test_empty_waveform_degrades_to_error_report() {
        let wf = mono(vec![]);
        let report = analyze_quality(&wf, &QualityConfig::default());
        assert!(!report.is_ok());
        assert!(report.speech_ratio.is_none());
    }

    #[test]
    fn test_dbfs_of_full_scale_is_zero() {
        let loudness = dbfs(&[1.0, -1.0, 1.0, -1.0]);
        assert!(loudness.abs() < 1e-9, "dbfs = {loudness}");
    }
}
