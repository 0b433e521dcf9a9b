//! YouTube transcript retrieval.
//!
//! Downloads caption tracks with yt-dlp (no media download) and flattens the
//! VTT into plain text. Retrieval is best-effort: every failure mode maps to
//! a sentinel that the segmenter renders as a placeholder transcript instead
//! of an error. Caption timestamps are discarded; downstream chunking is
//! word-based.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use voxset_models::LanguageTag;

/// Outcome of a transcript fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSource {
    /// Full caption text, whitespace-normalized.
    Available(String),
    /// Captions are disabled for this video (or fetching was turned off).
    Disabled,
    /// No caption track exists in any acceptable language.
    NotFound,
    /// Retrieval failed for an operational reason.
    FetchError(String),
}

impl TranscriptSource {
    /// Caption text, when available.
    pub fn text(&self) -> Option<&str> {
        match self {
            TranscriptSource::Available(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, TranscriptSource::Available(_))
    }
}

/// Human-readable placeholder written when no caption text was retrieved.
pub fn render_placeholder(source: &TranscriptSource) -> String {
    match source {
        TranscriptSource::Available(text) => text.clone(),
        TranscriptSource::Disabled => {
            "# Transcripts are disabled for this video\n# Please add transcript manually"
                .to_string()
        }
        TranscriptSource::NotFound => {
            "# No transcript found for this video\n# Please add transcript manually".to_string()
        }
        TranscriptSource::FetchError(detail) => {
            format!("# Error fetching transcript: {detail}\n# Please add transcript manually")
        }
    }
}

/// Fetch the caption text for a video.
///
/// Tries the language's prioritized caption codes first, then falls back to
/// any available auto-generated track. Never fails past this boundary; all
/// failures collapse into a sentinel.
pub async fn fetch_transcript(
    video_id: &str,
    language: LanguageTag,
    workdir: &Path,
) -> TranscriptSource {
    let video_url = format!("https://youtube.com/watch?v={video_id}");
    info!(video_id, language = %language, "Fetching transcript");

    // Preferred caption codes for the target language
    let sub_langs = language.caption_codes().join(",");
    match fetch_attempt(&video_url, Some(&sub_langs), language, workdir).await {
        TranscriptSource::NotFound => {}
        other => return other,
    }

    // Fallback: whatever auto-generated track exists
    debug!(video_id, "No captions in preferred languages, trying any track");
    fetch_attempt(&video_url, None, language, workdir).await
}

async fn fetch_attempt(
    video_url: &str,
    sub_langs: Option<&str>,
    language: LanguageTag,
    workdir: &Path,
) -> TranscriptSource {
    if let Err(e) = tokio::fs::create_dir_all(workdir).await {
        return TranscriptSource::FetchError(format!("workdir unavailable: {e}"));
    }

    let output_template = workdir.join("%(id)s");
    let output_template_str = output_template.to_string_lossy();

    let mut args = vec![
        "--no-playlist",
        "--write-sub",
        "--write-auto-sub",
        "--skip-download",
        "--sub-format",
        "vtt",
        "--output",
        &output_template_str,
    ];
    if let Some(langs) = sub_langs {
        args.push("--sub-lang");
        args.push(langs);
    }
    args.push(video_url);

    let output = match Command::new("yt-dlp")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
    {
        Ok(output) => output,
        Err(e) => return TranscriptSource::FetchError(format!("failed to run yt-dlp: {e}")),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp subtitle stderr: {}", stderr);

        if stderr.to_ascii_lowercase().contains("subtitles are disabled") {
            return TranscriptSource::Disabled;
        }
        return TranscriptSource::FetchError(
            stderr.lines().last().unwrap_or("Unknown error").to_string(),
        );
    }

    let vtt_files = match collect_vtt_files(workdir) {
        Ok(files) => files,
        Err(e) => return TranscriptSource::FetchError(format!("failed to read workdir: {e}")),
    };

    if vtt_files.is_empty() {
        return TranscriptSource::NotFound;
    }

    let chosen = pick_preferred_vtt(&vtt_files, language.caption_codes());
    let content = match tokio::fs::read_to_string(&chosen).await {
        Ok(content) => content,
        Err(e) => return TranscriptSource::FetchError(format!("failed to read VTT: {e}")),
    };

    // Cleanup subtitle files inside the job workdir
    for path in &vtt_files {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "Failed to remove VTT file");
        }
    }

    let text = parse_vtt(&content);
    if text.is_empty() {
        return TranscriptSource::NotFound;
    }
    TranscriptSource::Available(text)
}

fn collect_vtt_files(workdir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(workdir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("vtt"))
        .collect();
    files.sort();
    Ok(files)
}

/// Prefer the track whose language suffix matches the earliest caption code.
fn pick_preferred_vtt(files: &[PathBuf], codes: &[&str]) -> PathBuf {
    for code in codes {
        let marker = format!(".{code}.");
        if let Some(found) = files.iter().find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.contains(&marker))
                .unwrap_or(false)
        }) {
            return found.clone();
        }
    }
    files[0].clone()
}

/// Flatten VTT content into whitespace-joined caption text.
///
/// Drops the header, cue identifiers, timestamp lines, and inline tags, and
/// de-duplicates rolling captions that repeat the previous line. Structural
/// lines are matched on the raw text, before tag stripping touches it.
fn parse_vtt(content: &str) -> String {
    let mut pieces: Vec<String> = Vec::new();
    let mut previous = String::new();
    let mut lines = content.lines().map(str::trim).peekable();

    while let Some(raw_line) = lines.next() {
        if raw_line.is_empty()
            || raw_line == "WEBVTT"
            || raw_line.starts_with("Kind:")
            || raw_line.starts_with("Language:")
            || raw_line.contains("-->")
        {
            continue;
        }

        // A cue identifier is a numeric line directly preceding a timestamp
        // line; a numeric caption line (a spoken year, say) is kept.
        if raw_line.chars().all(|c| c.is_ascii_digit())
            && lines.peek().is_some_and(|next| next.contains("-->"))
        {
            continue;
        }

        let line = strip_tags(raw_line);
        if line.is_empty() {
            continue;
        }

        if line != previous {
            pieces.push(line.clone());
            previous = line;
        }
    }

    pieces.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove `<...>` markup (timing/word tags) from a caption line.
/// A `>` with no open tag is caption text and passes through.
fn strip_tags(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_tag = false;
    for c in line.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}
