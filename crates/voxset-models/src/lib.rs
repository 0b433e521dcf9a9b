//! Shared data models for the Voxset backend.
//!
//! This crate provides Serde-serializable types for:
//! - The fixed language registry and caption-code mapping
//! - Process request/response schemas
//! - Audio quality reports
//! - YouTube URL parsing

pub mod language;
pub mod quality;
pub mod request;
pub mod video_url;

// Re-export common types
pub use language::{LanguageTag, UnknownLanguage, LANGUAGES};
pub use quality::QualityReport;
pub use request::{ProcessRequest, ProcessResponse, SpeakerGender};
pub use video_url::{extract_video_id, VideoUrlError, VideoUrlResult};
