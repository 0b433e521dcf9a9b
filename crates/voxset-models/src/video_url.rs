//! YouTube URL parsing.
//!
//! A single URL-parsing routine built on the `url` crate that inspects host,
//! path, and query consistently, instead of accumulating ad hoc regex
//! patterns. Supports:
//! - https://youtube.com/watch?v=VIDEO_ID
//! - https://youtu.be/VIDEO_ID
//! - https://youtube.com/embed/VIDEO_ID
//! - https://youtube.com/v/VIDEO_ID
//! - https://youtube.com/shorts/VIDEO_ID
//! - https://youtube.com/live/VIDEO_ID
//! with or without scheme, `www.`/`m.` prefixes, extra query parameters and
//! fragments.

use thiserror::Error;
use url::Url;

/// Errors that can occur during video-ID extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoUrlError {
    /// URL is not a valid YouTube URL.
    #[error("URL is not a valid YouTube URL")]
    NotYoutube,
    /// Video ID not found in URL.
    #[error("video ID not found in URL")]
    VideoIdNotFound,
    /// Video ID has invalid format.
    #[error("video ID has invalid format")]
    InvalidVideoId,
}

/// Result type for video-ID extraction.
pub type VideoUrlResult<T> = Result<T, VideoUrlError>;

/// Extract the 11-character YouTube video ID from a URL.
///
/// This performs no network access; callers use it to reject bad input
/// before any download is attempted.
pub fn extract_video_id(raw: &str) -> VideoUrlResult<String> {
    let url = parse_lenient(raw.trim())?;

    let host = url
        .host_str()
        .map(|h| h.to_ascii_lowercase())
        .ok_or(VideoUrlError::NotYoutube)?;

    if host == "youtu.be" {
        // Short links carry the ID as the first path segment
        let id = first_path_segment(&url).ok_or(VideoUrlError::VideoIdNotFound)?;
        return validate_id(id);
    }

    if !is_youtube_host(&host) {
        return Err(VideoUrlError::NotYoutube);
    }

    let mut segments = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()))
        .ok_or(VideoUrlError::VideoIdNotFound)?;

    match segments.next() {
        Some("watch") => {
            let id = url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())
                .ok_or(VideoUrlError::VideoIdNotFound)?;
            validate_id(id)
        }
        Some("embed") | Some("v") | Some("shorts") | Some("live") => {
            let id = segments.next().ok_or(VideoUrlError::VideoIdNotFound)?;
            validate_id(id.to_string())
        }
        _ => Err(VideoUrlError::VideoIdNotFound),
    }
}

/// Parse a URL, tolerating a missing scheme.
fn parse_lenient(raw: &str) -> VideoUrlResult<Url> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{raw}")).map_err(|_| VideoUrlError::NotYoutube)
        }
        Err(_) => Err(VideoUrlError::NotYoutube),
    }
}

fn is_youtube_host(host: &str) -> bool {
    host == "youtube.com"
        || host.ends_with(".youtube.com")
        || host == "youtube-nocookie.com"
        || host.ends_with(".youtube-nocookie.com")
}

fn first_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// YouTube video IDs are exactly 11 characters of `[A-Za-z0-9_-]`.
fn validate_id(id: String) -> VideoUrlResult<String> {
    if id.len() != 11 {
        return Err(VideoUrlError::InvalidVideoId);
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(VideoUrlError::InvalidVideoId);
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ&list=PLx").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=30").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_path_style_urls() {
        for path in ["embed", "v", "shorts", "live"] {
            assert_eq!(
                extract_video_id(&format!("https://youtube.com/{path}/dQw4w9WgXcQ")).unwrap(),
                "dQw4w9WgXcQ",
                "path style: {path}"
            );
        }
    }

    #[test]
    fn test_scheme_and_whitespace_tolerated() {
        assert_eq!(
            extract_video_id("youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("  https://youtu.be/dQw4w9WgXcQ  ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_non_youtube_rejected() {
        assert_eq!(
            extract_video_id("https://vimeo.com/123456"),
            Err(VideoUrlError::NotYoutube)
        );
        assert_eq!(
            extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"),
            Err(VideoUrlError::NotYoutube)
        );
        assert_eq!(extract_video_id("not a url"), Err(VideoUrlError::NotYoutube));
    }

    #[test]
    fn test_missing_id_rejected() {
        assert_eq!(
            extract_video_id("https://youtube.com"),
            Err(VideoUrlError::VideoIdNotFound)
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch"),
            Err(VideoUrlError::VideoIdNotFound)
        );
        assert_eq!(
            extract_video_id("https://youtu.be/"),
            Err(VideoUrlError::VideoIdNotFound)
        );
    }

    #[test]
    fn test_malformed_id_rejected() {
        // Too short
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=abc123"),
            Err(VideoUrlError::InvalidVideoId)
        );
        // Too long
        assert_eq!(
            extract_video_id("https://youtu.be/abc123def456789"),
            Err(VideoUrlError::InvalidVideoId)
        );
        // Invalid characters
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=abc123def!!"),
            Err(VideoUrlError::InvalidVideoId)
        );
        // Empty
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v="),
            Err(VideoUrlError::InvalidVideoId)
        );
    }
}
