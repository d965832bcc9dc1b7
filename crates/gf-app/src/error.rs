//! Error types for the gf-app service layer.

use std::path::PathBuf;

use gf_core::GfError;

/// Application error shared by every frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project file has no parent directory: {path}")]
    ProjectPath { path: PathBuf },

    #[error("Component '{id}': {source}")]
    Component {
        id: String,
        #[source]
        source: GfError,
    },

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    #[error("Output error: {0}")]
    Output(String),

    #[error("Backend error: {0}")]
    Backend(#[from] GfError),
}

/// Result type for gf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<gf_project::ProjectError> for AppError {
    fn from(err: gf_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl AppError {
    pub(crate) fn component(id: &str) -> impl FnOnce(GfError) -> AppError + '_ {
        move |source| AppError::Component {
            id: id.to_string(),
            source,
        }
    }
}
