//! gf-project: on-disk project file format and validation.
//!
//! A project lists the top-level components to build (family, factory and
//! property settings) plus named presets that facility properties can
//! reference with `{ ref: name }`. Files are YAML or JSON, chosen by
//! extension.

pub mod migrate;
pub mod schema;
pub mod settings;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use settings::component_settings;
pub use validate::{ValidationError, validate_project};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unknown project file format: {path} (expected .yaml, .yml or .json)")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ProjectError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// Parse, migrate and validate project text.
    pub fn parse(self, text: &str) -> ProjectResult<Project> {
        let project: Project = match self {
            Self::Yaml => serde_yaml::from_str(text)?,
            Self::Json => serde_json::from_str(text)?,
        };
        let project = migrate_to_latest(project)?;
        validate_project(&project)?;
        Ok(project)
    }

    /// Validate and serialize; invalid projects are never rendered.
    pub fn render(self, project: &Project) -> ProjectResult<String> {
        validate_project(project)?;
        Ok(match self {
            Self::Yaml => serde_yaml::to_string(project)?,
            Self::Json => serde_json::to_string_pretty(project)?,
        })
    }
}

/// Load a project file, picking the format by extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    let format = ProjectFormat::from_path(path)?;
    format.parse(&std::fs::read_to_string(path)?)
}

pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    let text = ProjectFormat::from_path(path)?.render(project)?;
    std::fs::write(path, text)?;
    Ok(())
}
