//! The process-audio job pipeline.
//!
//! One request runs end to end inside the handler: download, optional
//! quality analysis, trim, transcript fetch, segmentation. Blocking audio
//! work runs on the blocking pool so the runtime stays responsive.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use voxset_media::{
    analyze_quality, chunk_transcript, download_audio, expected_chunk_count, fetch_transcript,
    render_placeholder, segment_ms_from_minutes, trim, write_segments, MediaError, QualityConfig,
    SegmentWriteRequest, TranscriptSource, Waveform,
};
use voxset_models::{extract_video_id, ProcessRequest, ProcessResponse, VideoUrlError};

use crate::metrics;
use crate::services::Library;

/// Pipeline failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidUrl(#[from] VideoUrlError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("{0}")]
    Internal(String),
}

type PipelineResult<T> = Result<T, PipelineError>;

/// Run the full pipeline for one request.
pub async fn run_pipeline(
    library: &Library,
    quality_config: &Arc<QualityConfig>,
    request: &ProcessRequest,
) -> PipelineResult<ProcessResponse> {
    let started = Instant::now();
    let language = request.language;

    // Reject unusable URLs before touching the filesystem or network
    let video_id = extract_video_id(&request.url)?;

    let job_id = Uuid::new_v4().to_string()[..8].to_string();
    info!(job_id, video_id, language = %language, "Starting audio processing job");

    let job_dir = library.job_temp_dir(&job_id);
    tokio::fs::create_dir_all(&job_dir)
        .await
        .map_err(|e| PipelineError::Internal(format!("Failed to create job directory: {e}")))?;

    let result = run_stages(library, quality_config, request, &video_id, &job_dir).await;

    // Scratch cleanup is best effort; a leftover directory is not a failure
    if let Err(e) = tokio::fs::remove_dir_all(&job_dir).await {
        warn!(job_id, error = %e, "Failed to remove job scratch directory");
    }

    match &result {
        Ok(response) => {
            metrics::record_job_completed(language.as_str());
            metrics::record_segments_written(language.as_str(), response.files.len() as u64);
            metrics::record_pipeline_duration(started.elapsed().as_secs_f64());
        }
        Err(e) => {
            metrics::record_job_failed(language.as_str());
            warn!(job_id, error = %e, "Audio processing job failed");
        }
    }

    result
}

async fn run_stages(
    library: &Library,
    quality_config: &Arc<QualityConfig>,
    request: &ProcessRequest,
    video_id: &str,
    job_dir: &std::path::Path,
) -> PipelineResult<ProcessResponse> {
    let language = request.language;

    // Download
    let download_started = Instant::now();
    let audio_path = download_audio(&request.url, job_dir.join("original.wav")).await?;
    metrics::record_download_duration(download_started.elapsed().as_secs_f64());

    // Decode, analyze, trim. All CPU-bound, so off the async runtime.
    let check_quality = request.check_quality;
    let trim_start = request.trim_start;
    let trim_end = request.trim_end;
    let quality_config = Arc::clone(quality_config);
    let (trimmed, quality_report) = tokio::task::spawn_blocking(move || {
        let waveform = Waveform::from_wav_file(&audio_path)?;
        let report = check_quality.then(|| analyze_quality(&waveform, &quality_config));
        let trimmed = trim(&waveform, trim_start, trim_end)?;
        Ok::<_, MediaError>((trimmed, report))
    })
    .await
    .map_err(|e| PipelineError::Internal(format!("Audio task panicked: {e}")))??;

    // Transcript
    let transcript = if request.fetch_transcript {
        fetch_transcript(video_id, language, &job_dir.join("subs")).await
    } else {
        TranscriptSource::Disabled
    };

    let segment_ms = segment_ms_from_minutes(request.segment_duration);
    let (chunks, fallback) = match transcript.text() {
        Some(text) => {
            let n = expected_chunk_count(trimmed.duration_ms(), segment_ms);
            (chunk_transcript(text, n), render_placeholder(&transcript))
        }
        // Placeholders are written whole into every segment script
        None => (Vec::new(), render_placeholder(&transcript)),
    };
    let transcript_source = match &transcript {
        TranscriptSource::Available(_) => "youtube captions",
        TranscriptSource::Disabled => "placeholder (captions disabled)",
        TranscriptSource::NotFound => "placeholder (no captions found)",
        TranscriptSource::FetchError(_) => "placeholder (fetch error)",
    };

    // Segment into the dataset tree
    let base_name = format!(
        "{}_{}_{}",
        slugify(&request.title),
        language.as_str(),
        request.gender.as_str()
    );
    let output_dir = library.language_dir(language);
    let script_dir = library.script_dir(language);
    let segment_minutes = request.segment_duration;

    let artifacts = tokio::task::spawn_blocking(move || {
        let write_request = SegmentWriteRequest {
            base_name: &base_name,
            output_dir: &output_dir,
            script_dir: &script_dir,
            language,
            segment_minutes,
            transcript_chunks: &chunks,
            transcript_fallback: &fallback,
            transcript_source,
        };
        write_segments(&trimmed, segment_ms, &write_request)
    })
    .await
    .map_err(|e| PipelineError::Internal(format!("Segment task panicked: {e}")))??;

    let files: Vec<String> = artifacts.into_iter().map(|a| a.file_name).collect();
    info!(
        video_id,
        language = %language,
        segments = files.len(),
        "Audio processing job complete"
    );

    Ok(ProcessResponse::success(
        format!("Successfully processed audio into {} segments", files.len()),
        files,
        quality_report,
    ))
}

/// Reduce a title to a filesystem-safe filename base.
///
/// Keeps alphanumerics, collapses runs of everything else into single
/// underscores, and lowercases. Resubmitting the same title overwrites the
/// previous artifacts.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_sep = true;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("untitled");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Morning Interview"), "morning_interview");
        assert_eq!(slugify("  Très: Bien!  "), "tr_s_bien");
        assert_eq!(slugify("episode-12"), "episode_12");
    }

    #[test]
    fn test_slugify_degenerate_titles() {
        assert_eq!(slugify("!!!"), "untitled");
        assert_eq!(slugify(""), "untitled");
    }

    #[test]
    fn test_invalid_url_fails_before_any_io() {
        let err = extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ").unwrap_err();
        assert!(matches!(err, VideoUrlError::NotYoutube));
    }
}
