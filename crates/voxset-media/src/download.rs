//! Audio download using yt-dlp.
//!
//! Downloads the best available audio track and has yt-dlp's FFmpeg
//! post-processor extract it to WAV, so the rest of the pipeline can decode
//! it in-process.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{MediaError, MediaResult};

/// Download the audio track of `url` as a WAV file at `dest`.
///
/// `dest` must end in `.wav`; yt-dlp writes intermediate files next to it
/// inside the caller's job-scoped temp directory. Returns the path to the
/// written WAV on success.
pub async fn download_audio(url: &str, dest: impl AsRef<Path>) -> MediaResult<PathBuf> {
    let dest = dest.as_ref();

    // Check yt-dlp exists
    which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)?;

    info!(url = %url, dest = %dest.display(), "Downloading audio track");

    // yt-dlp substitutes the real container extension, then the
    // post-processor replaces it with .wav
    let template = dest.with_extension("%(ext)s");
    let template_str = template.to_string_lossy();

    let output = Command::new("yt-dlp")
        .args([
            "--no-playlist",
            "--no-warnings",
            "-f",
            "bestaudio/best",
            "--extract-audio",
            "--audio-format",
            "wav",
            "-o",
            &template_str,
            url,
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp stderr: {}", stderr);

        let is_rate_limited = stderr.contains("429")
            || stderr.contains("Too Many Requests")
            || stderr.contains("rate limit")
            || stderr.contains("Sign in to confirm");
        if is_rate_limited {
            warn!(url = %url, "YouTube rate limit detected");
        }

        let error_msg = stderr.lines().last().unwrap_or("Unknown error");
        return Err(MediaError::download_failed(format!(
            "yt-dlp failed: {error_msg}"
        )));
    }

    if !dest.exists() {
        return Err(MediaError::download_failed("output file not created"));
    }

    let file_size = dest.metadata()?.len();
    info!(
        dest = %dest.display(),
        size_mb = file_size as f64 / (1024.0 * 1024.0),
        "Downloaded audio successfully"
    );

    Ok(dest.to_path_buf())
}
