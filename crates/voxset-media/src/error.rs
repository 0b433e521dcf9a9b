//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during audio processing.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("download failed: {message}")]
    DownloadFailed { message: String },

    #[error("could not decode audio: {0}")]
    Decode(String),

    #[error("trim range {start_secs}s + {end_secs}s meets or exceeds duration {duration_secs:.1}s")]
    InvalidTrimRange {
        start_secs: u32,
        end_secs: u32,
        duration_secs: f64,
    },

    #[error("waveform is empty")]
    EmptyWaveform,

    #[error("segment length must be positive, got {0} ms")]
    InvalidSegmentLength(u64),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create a download failure error.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Whether the caller may safely retry with different parameters.
    /// Trim-range violations are non-retryable for the same inputs.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            MediaError::InvalidTrimRange { .. } | MediaError::EmptyWaveform
        )
    }
}
