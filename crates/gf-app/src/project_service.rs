//! Project loading, saving, validation, and introspection.

use std::path::{Path, PathBuf};

use gf_components::{FactoryRegistry, lifecycle};
use gf_project::schema::{ComponentDef, Project};

use crate::error::{AppError, AppResult};

/// A project together with the directory its relative paths refer to.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub project: Project,
    pub base_dir: PathBuf,
}

/// Summary of a component definition for listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ComponentDefSummary {
    pub id: String,
    pub family: String,
    pub factory: String,
    pub property_count: usize,
}

/// Load a YAML or JSON project file.
pub fn load_project(path: &Path) -> AppResult<LoadedProject> {
    let project = gf_project::load(path)?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| AppError::ProjectPath {
            path: path.to_path_buf(),
        })?;
    Ok(LoadedProject { project, base_dir })
}

pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    gf_project::save(path, project)?;
    Ok(())
}

pub fn list_components(project: &Project) -> Vec<ComponentDefSummary> {
    project
        .components
        .iter()
        .map(|c| ComponentDefSummary {
            id: c.id.clone(),
            family: c.family.clone(),
            factory: c.factory.clone(),
            property_count: c.properties.len(),
        })
        .collect()
}

pub fn get_component<'a>(project: &'a Project, id: &str) -> AppResult<&'a ComponentDef> {
    project
        .component(id)
        .ok_or_else(|| AppError::ComponentNotFound(id.to_string()))
}

/// Structural checks plus a configure pass of every component.
///
/// Configuring runs every validator (file probes included) and resolves
/// every facility, but binds no kernel.
pub fn validate_project(loaded: &LoadedProject, registry: &FactoryRegistry) -> AppResult<()> {
    gf_project::validate_project(&loaded.project)
        .map_err(|e| AppError::Project(e.to_string()))?;

    for def in &loaded.project.components {
        let settings =
            gf_project::component_settings(&loaded.project, def, Some(&loaded.base_dir))?;
        let mut component = registry
            .create(&def.family, &def.factory)
            .map_err(AppError::component(&def.id))?;
        component
            .core_mut()
            .set_name(def.id.as_str())
            .map_err(AppError::component(&def.id))?;
        lifecycle::configure(component.as_mut(), &settings, registry)
            .map_err(AppError::component(&def.id))?;
    }
    Ok(())
}
