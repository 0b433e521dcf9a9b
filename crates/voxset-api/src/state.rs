//! Application state.

use std::sync::Arc;

use voxset_media::QualityConfig;

use crate::config::ApiConfig;
use crate::services::Library;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub library: Arc<Library>,
    pub quality: Arc<QualityConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Self {
        let library = Library::new(config.data_dir.clone(), config.temp_dir.clone());
        Self {
            config,
            library: Arc::new(library),
            quality: Arc::new(QualityConfig::default()),
        }
    }
}
