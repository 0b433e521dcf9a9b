//! Dataset directory layout and file listing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use voxset_models::{LanguageTag, LANGUAGES};

use crate::error::{ApiError, ApiResult};

/// On-disk dataset library.
///
/// The tree is one directory per language, each with a `script/`
/// subdirectory for transcript excerpts:
///
/// ```text
/// data/
///   english/
///     script/
///   french/
///     script/
///   ...
/// temp/
/// ```
pub struct Library {
    data_dir: PathBuf,
    temp_dir: PathBuf,
}

impl Library {
    /// Create a library rooted at the given dataset and scratch directories.
    pub fn new(data_dir: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Dataset root.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Scratch root for in-flight jobs.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Audio directory for a language.
    pub fn language_dir(&self, language: LanguageTag) -> PathBuf {
        self.data_dir.join(language.as_str())
    }

    /// Transcript directory for a language.
    pub fn script_dir(&self, language: LanguageTag) -> PathBuf {
        self.language_dir(language).join("script")
    }

    /// Scratch directory for a single job.
    pub fn job_temp_dir(&self, job_id: &str) -> PathBuf {
        self.temp_dir.join(job_id)
    }

    /// Create the full dataset tree and scratch root. Idempotent.
    pub fn ensure_directories(&self) -> io::Result<()> {
        for language in LANGUAGES {
            fs::create_dir_all(self.script_dir(language))?;
        }
        fs::create_dir_all(&self.temp_dir)?;
        Ok(())
    }

    /// List the audio file names recorded for a language, sorted.
    ///
    /// A language directory that does not exist yet lists as empty.
    pub fn list_audio_files(&self, language: LanguageTag) -> ApiResult<Vec<String>> {
        let dir = self.language_dir(language);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let entries = fs::read_dir(&dir)
            .map_err(|e| ApiError::internal(format!("Failed to read {}: {}", dir.display(), e)))?;
        for entry in entries {
            let entry = entry
                .map_err(|e| ApiError::internal(format!("Failed to read directory entry: {e}")))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("wav") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    files.push(name.to_string());
                }
            }
        }
        files.sort();
        Ok(files)
    }
}
