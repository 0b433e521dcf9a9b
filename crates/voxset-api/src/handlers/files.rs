//! Dataset file listing handler.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use voxset_models::LanguageTag;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// File listing response.
#[derive(Serialize)]
pub struct FilesResponse {
    pub files: Vec<String>,
}

/// List all audio files recorded for a language.
pub async fn list_files(
    State(state): State<AppState>,
    Path(language): Path<String>,
) -> ApiResult<Json<FilesResponse>> {
    let language: LanguageTag = language
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid language".to_string()))?;

    let files = state.library.list_audio_files(language)?;
    Ok(Json(FilesResponse { files }))
}
