//! Audio processing for the Voxset pipeline.
//!
//! This crate provides:
//! - yt-dlp audio download with WAV extraction
//! - In-memory waveform decode/encode (hound)
//! - Advisory quality analysis (loudness + speech ratio)
//! - Endpoint trimming and fixed-window segmentation
//! - YouTube transcript retrieval and word-based chunking

pub mod download;
pub mod error;
pub mod quality;
pub mod segment;
pub mod transcript;
pub mod trim;
pub mod waveform;

pub use download::download_audio;
pub use error::{MediaError, MediaResult};
pub use quality::{analyze_quality, QualityConfig};
pub use segment::{
    chunk_transcript, expected_chunk_count, plan_windows, segment_ms_from_minutes, write_segments,
    SegmentArtifact, SegmentWindow, SegmentWriteRequest,
};
pub use transcript::{fetch_transcript, render_placeholder, TranscriptSource};
pub use trim::trim;
pub use waveform::Waveform;
