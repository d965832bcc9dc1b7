//! Project validation logic.

use std::collections::{BTreeMap, HashSet};

use crate::schema::{FacilityDef, Project, ValueDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cyclic preset reference: {chain}")]
    CyclicPreset { chain: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut ids = HashSet::new();
    for component in &project.components {
        for (field, value) in [
            ("id", &component.id),
            ("family", &component.family),
            ("factory", &component.factory),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("components[{}].{}", component.id, field),
                    value: value.clone(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if !ids.insert(&component.id) {
            return Err(ValidationError::DuplicateId {
                id: component.id.clone(),
                context: "components".to_string(),
            });
        }
        check_refs(&project.presets, &component.properties, &component.id)?;
    }

    for (name, preset) in &project.presets {
        if preset.factory.as_deref().is_some_and(|f| f.trim().is_empty()) {
            return Err(ValidationError::InvalidValue {
                field: format!("presets.{}.factory", name),
                value: String::new(),
                reason: "must not be empty".to_string(),
            });
        }
        check_refs(&project.presets, &preset.properties, name)?;
    }

    check_preset_cycles(&project.presets)
}

fn check_refs(
    presets: &BTreeMap<String, FacilityDef>,
    properties: &BTreeMap<String, ValueDef>,
    context: &str,
) -> Result<(), ValidationError> {
    for value in properties.values() {
        match value {
            ValueDef::Ref(r) if !presets.contains_key(&r.preset) => {
                return Err(ValidationError::MissingReference {
                    id: r.preset.clone(),
                    context: format!("presets referenced by {}", context),
                });
            }
            ValueDef::Facility(f) => check_refs(presets, &f.properties, context)?,
            _ => {}
        }
    }
    Ok(())
}

/// Presets referenced anywhere inside `properties`.
pub(crate) fn referenced_presets(properties: &BTreeMap<String, ValueDef>) -> Vec<&str> {
    let mut out = Vec::new();
    for value in properties.values() {
        match value {
            ValueDef::Ref(r) => out.push(r.preset.as_str()),
            ValueDef::Facility(f) => out.extend(referenced_presets(&f.properties)),
            _ => {}
        }
    }
    out
}

fn check_preset_cycles(presets: &BTreeMap<String, FacilityDef>) -> Result<(), ValidationError> {
    fn visit<'a>(
        presets: &'a BTreeMap<String, FacilityDef>,
        name: &'a str,
        path: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> Result<(), ValidationError> {
        if done.contains(name) {
            return Ok(());
        }
        if path.contains(&name) {
            let mut chain = path.clone();
            chain.push(name);
            return Err(ValidationError::CyclicPreset {
                chain: chain.join(" -> "),
            });
        }
        let Some(preset) = presets.get(name) else {
            return Ok(());
        };
        path.push(name);
        for next in referenced_presets(&preset.properties) {
            visit(presets, next, path, done)?;
        }
        path.pop();
        done.insert(name);
        Ok(())
    }

    let mut done = HashSet::new();
    for name in presets.keys() {
        visit(presets, name, &mut Vec::new(), &mut done)?;
    }
    Ok(())
}
