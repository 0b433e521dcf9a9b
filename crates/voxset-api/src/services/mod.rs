//! Business logic services.

pub mod library;
pub mod pipeline;

pub use library::Library;
pub use pipeline::{run_pipeline, PipelineError};
