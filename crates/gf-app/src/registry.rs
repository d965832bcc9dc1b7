//! The registry of every built-in component family.

use gf_components::{AvailableFields, FactoryRegistry};
use serde::Serialize;

use crate::error::AppResult;

/// Registry with the coordinate systems, spatial databases, materials and
/// mesh readers shipped with geofem.
pub fn default_registry() -> AppResult<FactoryRegistry> {
    let mut registry = FactoryRegistry::new();
    gf_spatialdata::register(&mut registry)?;
    gf_materials::register(&mut registry)?;
    gf_meshio::register(&mut registry)?;
    Ok(registry)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FactorySummary {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FamilySummary {
    pub family: &'static str,
    pub factories: Vec<FactorySummary>,
}

pub fn list_families(registry: &FactoryRegistry) -> Vec<FamilySummary> {
    registry
        .families()
        .into_iter()
        .map(|family| FamilySummary {
            family,
            factories: registry
                .entries(family)
                .into_iter()
                .map(|e| FactorySummary {
                    name: e.name,
                    description: e.description,
                })
                .collect(),
        })
        .collect()
}

/// Output-field catalog of a variant, read from a fresh instance.
pub fn available_fields(
    registry: &FactoryRegistry,
    family: &str,
    factory: &str,
) -> AppResult<AvailableFields> {
    let component = registry.create(family, factory)?;
    Ok(component.core().fields().clone())
}
