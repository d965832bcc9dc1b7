//! Shared application service layer for geofem.
//!
//! Frontends go through this crate to list the built-in component families,
//! load and validate project files, and drive every component of a project
//! through configure, preinitialize and activate.

pub mod error;
pub mod project_service;
pub mod registry;
pub mod setup_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use project_service::{
    ComponentDefSummary, LoadedProject, get_component, list_components, load_project,
    save_project, validate_project,
};
pub use registry::{
    FactorySummary, FamilySummary, available_fields, default_registry, list_families,
};
pub use setup_service::{ComponentSummary, MeshSummary, Setup, read_mesh, setup, summarize};
