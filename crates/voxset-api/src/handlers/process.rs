//! Audio processing handler.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use voxset_models::{ProcessRequest, ProcessResponse};

use crate::error::{ApiError, ApiResult};
use crate::services::run_pipeline;
use crate::state::AppState;

/// Process a YouTube video into dataset segments.
pub async fn process_audio(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> ApiResult<Json<ProcessResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    state
        .library
        .ensure_directories()
        .map_err(|e| ApiError::internal(format!("Failed to create dataset directories: {e}")))?;

    let response = run_pipeline(&state.library, &state.quality, &request).await?;
    Ok(Json(response))
}
