//! Fixed registry of supported dataset languages.
//!
//! Each language tag maps to a display label (shown in clients), a dataset
//! directory name, and a prioritized list of YouTube caption-language codes
//! used when fetching transcripts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A supported dataset language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    French,
    English,
    Arabic,
    German,
    Japanese,
    Chinese,
    Spanish,
}

/// All supported languages, in registry order.
pub const LANGUAGES: [LanguageTag; 7] = [
    LanguageTag::French,
    LanguageTag::English,
    LanguageTag::Arabic,
    LanguageTag::German,
    LanguageTag::Japanese,
    LanguageTag::Chinese,
    LanguageTag::Spanish,
];

impl LanguageTag {
    /// Lowercase tag, also used as the dataset directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::French => "french",
            LanguageTag::English => "english",
            LanguageTag::Arabic => "arabic",
            LanguageTag::German => "german",
            LanguageTag::Japanese => "japanese",
            LanguageTag::Chinese => "chinese",
            LanguageTag::Spanish => "spanish",
        }
    }

    /// Human-readable display label.
    pub fn display_label(&self) -> &'static str {
        match self {
            LanguageTag::French => "Français",
            LanguageTag::English => "English (US)",
            LanguageTag::Arabic => "العربية",
            LanguageTag::German => "Deutsch",
            LanguageTag::Japanese => "日本語",
            LanguageTag::Chinese => "中文",
            LanguageTag::Spanish => "Español",
        }
    }

    /// Prioritized YouTube caption-language codes for transcript retrieval.
    pub fn caption_codes(&self) -> &'static [&'static str] {
        match self {
            LanguageTag::French => &["fr", "fr-FR"],
            LanguageTag::English => &["en", "en-US", "en-GB"],
            LanguageTag::Arabic => &["ar", "ar-SA"],
            LanguageTag::German => &["de", "de-DE"],
            LanguageTag::Japanese => &["ja", "ja-JP"],
            LanguageTag::Chinese => &["zh", "zh-CN", "zh-TW"],
            LanguageTag::Spanish => &["es", "es-ES", "es-MX"],
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unsupported language tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for LanguageTag {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "french" => Ok(LanguageTag::French),
            "english" => Ok(LanguageTag::English),
            "arabic" => Ok(LanguageTag::Arabic),
            "german" => Ok(LanguageTag::German),
            "japanese" => Ok(LanguageTag::Japanese),
            "chinese" => Ok(LanguageTag::Chinese),
            "spanish" => Ok(LanguageTag::Spanish),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}
