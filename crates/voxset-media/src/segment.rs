//! Fixed-window segmentation of a trimmed waveform.
//!
//! The segmenter walks the waveform in non-overlapping windows of the
//! nominal segment length starting at offset 0. The final window spans
//! whatever remains: it may be shorter than the nominal length but is never
//! dropped and never padded. Each window is written as one WAV artifact plus
//! one transcript text file.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use voxset_models::LanguageTag;

use crate::error::{MediaError, MediaResult};
use crate::waveform::Waveform;

/// One planned segment window, in milliseconds of the trimmed waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentWindow {
    /// 1-based sequential index.
    pub index: u32,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl SegmentWindow {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// One persisted output unit.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentArtifact {
    /// 1-based sequential index.
    pub index: u32,
    /// Window boundaries in the trimmed waveform.
    pub start_ms: u64,
    pub end_ms: u64,
    /// Audio filename (relative to the language directory).
    pub file_name: String,
    /// Transcript filename (relative to the script subdirectory).
    pub script_file_name: String,
}

/// Convert a nominal segment duration in minutes to milliseconds.
pub fn segment_ms_from_minutes(minutes: f64) -> u64 {
    (minutes * 60_000.0).round() as u64
}

/// Plan contiguous non-overlapping windows covering `[0, total_ms)` exactly.
pub fn plan_windows(total_ms: u64, segment_ms: u64) -> MediaResult<Vec<SegmentWindow>> {
    if segment_ms == 0 {
        return Err(MediaError::InvalidSegmentLength(segment_ms));
    }
    if total_ms == 0 {
        return Err(MediaError::EmptyWaveform);
    }

    let mut windows = Vec::new();
    let mut start = 0u64;
    let mut index = 1u32;
    while start < total_ms {
        let end = (start + segment_ms).min(total_ms);
        windows.push(SegmentWindow {
            index,
            start_ms: start,
            end_ms: end,
        });
        start = end;
        index += 1;
    }
    Ok(windows)
}

/// Number of transcript chunks for a waveform of `total_ms`.
///
/// `floor(total / nominal) + 1`, minimum 1. This can exceed the audio window
/// count by one when the duration is an exact multiple of the nominal
/// length, in which case the trailing chunk goes unused.
pub fn expected_chunk_count(total_ms: u64, segment_ms: u64) -> usize {
    if segment_ms == 0 {
        return 1;
    }
    (total_ms / segment_ms) as usize + 1
}

/// Split a transcript into `n` word-index-based chunks.
///
/// Each of the first `n - 1` chunks holds `words / n` words; all remainder
/// words are appended to the final chunk. This is an approximation with no
/// time alignment to the audio windows.
pub fn chunk_transcript(transcript: &str, n: usize) -> Vec<String> {
    if n <= 1 {
        return vec![transcript.to_string()];
    }

    let words: Vec<&str> = transcript.split_whitespace().collect();
    let per_chunk = words.len() / n;

    (0..n)
        .map(|i| {
            let start = i * per_chunk;
            let end = if i + 1 < n { start + per_chunk } else { words.len() };
            words[start..end].join(" ")
        })
        .collect()
}

/// Destination layout and transcript material for [`write_segments`].
#[derive(Debug)]
pub struct SegmentWriteRequest<'a> {
    /// Filename base, e.g. `title_language_gender`.
    pub base_name: &'a str,
    /// Directory receiving the audio artifacts.
    pub output_dir: &'a Path,
    /// Directory receiving the transcript files.
    pub script_dir: &'a Path,
    pub language: LanguageTag,
    /// Nominal segment duration, recorded in the transcript header.
    pub segment_minutes: f64,
    /// Pre-chunked transcript text, one entry per expected chunk.
    pub transcript_chunks: &'a [String],
    /// Text used when a window has no corresponding chunk.
    pub transcript_fallback: &'a str,
    /// Provenance line for the transcript header.
    pub transcript_source: &'a str,
}

/// Slice the waveform into windows and persist audio + transcript artifacts.
///
/// Windows are written in order; any write failure aborts the job with no
/// partial artifact set considered valid.
pub fn write_segments(
    waveform: &Waveform,
    segment_ms: u64,
    request: &SegmentWriteRequest<'_>,
) -> MediaResult<Vec<SegmentArtifact>> {
    let windows = plan_windows(waveform.duration_ms(), segment_ms)?;
    let mut artifacts = Vec::with_capacity(windows.len());

    for window in &windows {
        let slice = waveform.slice_ms(window.start_ms, window.end_ms);
        let file_name = format!("{}_part{}.wav", request.base_name, window.index);
        let script_file_name = format!("{}_part{}.txt", request.base_name, window.index);

        slice.write_wav_file(request.output_dir.join(&file_name))?;

        let text = request
            .transcript_chunks
            .get(window.index as usize - 1)
            .map(String::as_str)
            .unwrap_or(request.transcript_fallback);
        let script = render_script(&file_name, request, text);
        std::fs::write(request.script_dir.join(&script_file_name), script)?;

        debug!(
            index = window.index,
            start_ms = window.start_ms,
            end_ms = window.end_ms,
            file = %file_name,
            "Wrote segment artifact"
        );

        artifacts.push(SegmentArtifact {
            index: window.index,
            start_ms: window.start_ms,
            end_ms: window.end_ms,
            file_name,
            script_file_name,
        });
    }

    Ok(artifacts)
}

/// Transcript file contents: a commented header followed by the chunk text.
///
/// The chunk-to-audio mapping is word-count based, not time-aligned; the
/// header says so to anyone editing these files by hand.
fn render_script(segment_file: &str, request: &SegmentWriteRequest<'_>, text: &str) -> String {
    format!(
        "# Transcript for {segment_file}\n\
         # Language: {language}\n\
         # Duration: ~{minutes} minutes\n\
         # Source: {source}\n\
         # Note: word-based split, not time-aligned\n\n\
         {text}\n",
        language = request.language,
        minutes = request.segment_minutes,
        source = request.transcript_source,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_cover_duration_exactly() {
        // 22 units at nominal 7 -> [7,7,7,1]
        let windows = plan_windows(22_000, 7_000).unwrap();
        assert_eq!(windows.len(), 4);

        let lengths: Vec<u64> = windows.iter().map(|w| w.duration_ms()).collect();
        assert_eq!(lengths, vec![7_000, 7_000, 7_000, 1_000]);

        // Contiguous, non-overlapping, 1-based
        assert_eq!(windows[0].start_ms, 0);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end_ms, pair[1].start_ms);
        }
        assert_eq!(windows.last().unwrap().end_ms, 22_000);
        assert_eq!(windows[0].index, 1);
        assert_eq!(windows[3].index, 4);
    }

    #[test]
    fn test_exact_multiple_yields_whole_windows() {
        let windows = plan_windows(7_000, 7_000).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].duration_ms(), 7_000);
    }

    #[test]
    fn test_short_input_yields_single_short_window() {
        let windows = plan_windows(1_500, 7_000).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].duration_ms(), 1_500);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            plan_windows(0, 7_000),
            Err(MediaError::EmptyWaveform)
        ));
    }

    #[test]
    fn test_zero_segment_length_is_an_error() {
        assert!(matches!(
            plan_windows(1_000, 0),
            Err(MediaError::InvalidSegmentLength(0))
        ));
    }

    #[test]
    fn test_expected_chunk_count() {
        assert_eq!(expected_chunk_count(22_000, 7_000), 4);
        assert_eq!(expected_chunk_count(7_000, 7_000), 2); // exact multiple: one extra
        assert_eq!(expected_chunk_count(1_500, 7_000), 1);
        assert_eq!(expected_chunk_count(0, 7_000), 1);
    }

    #[test]
    fn test_chunk_sizes_follow_floor_with_remainder_last() {
        let words: Vec<String> = (0..23).map(|i| format!("w{i}")).collect();
        let transcript = words.join(" ");

        let chunks = chunk_transcript(&transcript, 4);
        assert_eq!(chunks.len(), 4);

        // floor(23/4) = 5 words in each non-final chunk
        for chunk in &chunks[..3] {
            assert_eq!(chunk.split_whitespace().count(), 5);
        }
        // Final chunk absorbs the remainder; totals are preserved
        assert_eq!(chunks[3].split_whitespace().count(), 8);
        let total: usize = chunks.iter().map(|c| c.split_whitespace().count()).sum();
        assert_eq!(total, 23);
    }

    #[test]
    fn test_single_chunk_is_whole_transcript() {
        let chunks = chunk_transcript("hello there world", 1);
        assert_eq!(chunks, vec!["hello there world".to_string()]);
    }

    #[test]
    fn test_fewer_words_than_chunks() {
        let chunks = chunk_transcript("only two", 4);
        assert_eq!(chunks.len(), 4);
        // floor(2/4) = 0 words per leading chunk, everything in the last
        assert!(chunks[..3].iter().all(|c| c.is_empty()));
        assert_eq!(chunks[3], "only two");
    }

    #[test]
    fn test_write_segments_produces_artifacts_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("french");
        let script_dir = output_dir.join("script");
        std::fs::create_dir_all(&script_dir).unwrap();

        // 2.2s at 8kHz, 700ms windows -> [700,700,700,100]
        let frames = (2_200u64 * 8) as usize;
        let waveform = Waveform::new(vec![0.4; frames], 8000, 1).unwrap();

        let chunks = chunk_transcript("a b c d e f g h", expected_chunk_count(2_200, 700));
        let request = SegmentWriteRequest {
            base_name: "interview_french_women",
            output_dir: &output_dir,
            script_dir: &script_dir,
            language: LanguageTag::French,
            segment_minutes: 7.0,
            transcript_chunks: &chunks,
            transcript_fallback: "a b c d e f g h",
            transcript_source: "YouTube captions",
        };

        let artifacts = write_segments(&waveform, 700, &request).unwrap();
        assert_eq!(artifacts.len(), 4);
        assert_eq!(artifacts[0].file_name, "interview_french_women_part1.wav");
        assert_eq!(artifacts[3].file_name, "interview_french_women_part4.wav");
        assert_eq!(artifacts[3].end_ms - artifacts[3].start_ms, 100);

        for artifact in &artifacts {
            assert!(output_dir.join(&artifact.file_name).exists());
            let script =
                std::fs::read_to_string(script_dir.join(&artifact.script_file_name)).unwrap();
            assert!(script.starts_with(&format!("# Transcript for {}", artifact.file_name)));
            assert!(script.contains("# Language: french"));
        }

        // Written audio slices decode back to the planned durations
        let part4 = Waveform::from_wav_file(output_dir.join(&artifacts[3].file_name)).unwrap();
        assert_eq!(part4.duration_ms(), 100);
    }
}
