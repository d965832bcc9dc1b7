//! Building every component of a project through the staged lifecycle.

use std::collections::BTreeMap;

use gf_components::{Component, FactoryRegistry, lifecycle};
use gf_core::LifecycleState;
use gf_meshio::Mesh;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::project_service::{LoadedProject, get_component};

/// Components of a project, all active, in file order.
pub struct Setup {
    components: Vec<(String, Box<dyn Component>)>,
}

impl Setup {
    pub fn get(&self, id: &str) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|(cid, _)| cid == id)
            .map(|(_, c)| c.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|(id, _)| id.as_str())
    }

    pub fn summaries(&self) -> Vec<ComponentSummary> {
        self.components
            .iter()
            .map(|(id, c)| summarize(id, c.as_ref()))
            .collect()
    }

    /// Tear every component down, last built first.
    pub fn destroy(mut self) {
        while let Some((_, mut component)) = self.components.pop() {
            lifecycle::destroy(component.as_mut());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    pub id: String,
    pub family: &'static str,
    pub factory: &'static str,
    pub logging_prefix: &'static str,
    pub state: LifecycleState,
    pub properties: BTreeMap<String, String>,
    /// Facility property name to the factory that was resolved for it.
    pub facilities: BTreeMap<String, String>,
}

pub fn summarize(id: &str, component: &dyn Component) -> ComponentSummary {
    let core = component.core();
    ComponentSummary {
        id: id.to_string(),
        family: core.family(),
        factory: core.kind(),
        logging_prefix: core.logging_prefix(),
        state: core.state(),
        properties: core
            .values()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        facilities: core
            .facility_names()
            .filter_map(|name| {
                let kind = core.facility(name).ok()?.core().kind();
                Some((name.to_string(), kind.to_string()))
            })
            .collect(),
    }
}

/// Configure, preinitialize and activate every component of the project.
///
/// On the first failure every component built so far is destroyed and the
/// error names the offending component.
pub fn setup(loaded: &LoadedProject, registry: &FactoryRegistry) -> AppResult<Setup> {
    let mut built = Setup {
        components: Vec::new(),
    };
    for def in &loaded.project.components {
        match build(loaded, registry, &def.id) {
            Ok(component) => built.components.push((def.id.clone(), component)),
            Err(e) => {
                warn!(component = %def.id, error = %e, "setup failed");
                built.destroy();
                return Err(e);
            }
        }
    }
    info!(
        project = %loaded.project.name,
        components = built.components.len(),
        "setup complete"
    );
    Ok(built)
}

fn build(
    loaded: &LoadedProject,
    registry: &FactoryRegistry,
    id: &str,
) -> AppResult<Box<dyn Component>> {
    let def = get_component(&loaded.project, id)?;
    let settings = gf_project::component_settings(&loaded.project, def, Some(&loaded.base_dir))?;
    let mut component = registry
        .create(&def.family, &def.factory)
        .map_err(AppError::component(id))?;
    component
        .core_mut()
        .set_name(id)
        .map_err(AppError::component(id))?;
    lifecycle::initialize(component.as_mut(), &settings, registry)
        .map_err(AppError::component(id))?;
    Ok(component)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    pub id: String,
    pub cell_dim: usize,
    pub space_dim: usize,
    pub corners: usize,
    pub vertices: usize,
    pub cells: usize,
    pub material_ids: Vec<i64>,
    pub groups: BTreeMap<String, usize>,
}

impl MeshSummary {
    fn new(id: &str, mesh: &Mesh) -> Self {
        let mut material_ids = mesh.material_ids.clone();
        material_ids.sort_unstable();
        material_ids.dedup();
        Self {
            id: id.to_string(),
            cell_dim: mesh.cell_dim,
            space_dim: mesh.space_dim,
            corners: mesh.corners,
            vertices: mesh.num_vertices(),
            cells: mesh.num_cells(),
            material_ids,
            groups: mesh
                .groups
                .iter()
                .map(|(name, vertices)| (name.clone(), vertices.len()))
                .collect(),
        }
    }
}

/// Build the mesh reader `id` and read its mesh.
pub fn read_mesh(
    loaded: &LoadedProject,
    registry: &FactoryRegistry,
    id: &str,
) -> AppResult<(Mesh, MeshSummary)> {
    let def = get_component(&loaded.project, id)?;
    if def.family != gf_meshio::MESH_IO_FAMILY {
        return Err(AppError::Unsupported {
            message: format!(
                "component '{}' is {}/{}, not a mesh reader",
                id, def.family, def.factory
            ),
        });
    }

    let settings = gf_project::component_settings(&loaded.project, def, Some(&loaded.base_dir))?;
    let mut reader = gf_meshio::create(&def.factory).map_err(AppError::component(id))?;
    reader
        .core_mut()
        .set_name(id)
        .map_err(AppError::component(id))?;
    lifecycle::initialize(reader.as_mut(), &settings, registry)
        .map_err(AppError::component(id))?;
    let mesh = reader.read().map_err(AppError::component(id));
    lifecycle::destroy(reader.as_mut());

    let mesh = mesh?;
    let summary = MeshSummary::new(id, &mesh);
    Ok((mesh, summary))
}
