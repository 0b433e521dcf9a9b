//! Root and language listing handlers.

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

use voxset_models::LANGUAGES;

/// Root response.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

/// Service banner endpoint.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "YouTube Audio Processor API".to_string(),
        status: "running".to_string(),
    })
}

/// Languages response: tag -> display label.
#[derive(Serialize)]
pub struct LanguagesResponse {
    pub languages: BTreeMap<&'static str, &'static str>,
}

/// List the supported dataset languages.
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: LANGUAGES
            .iter()
            .map(|l| (l.as_str(), l.display_label()))
            .collect(),
    })
}
