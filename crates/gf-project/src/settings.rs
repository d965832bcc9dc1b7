//! Conversion of project definitions into component settings trees.

use std::collections::BTreeMap;
use std::path::Path;

use gf_components::{Setting, Settings};
use gf_core::PropertyValue;

use crate::ProjectResult;
use crate::schema::{ComponentDef, FacilityDef, Project, ValueDef};
use crate::validate::ValidationError;

/// Property whose relative paths are resolved against the project directory.
const FILENAME_PROPERTY: &str = "filename";

/// Settings for one top-level component, with every `{ ref: .. }` expanded.
///
/// Relative `filename` values are joined onto `base_dir` when one is given.
pub fn component_settings(
    project: &Project,
    component: &ComponentDef,
    base_dir: Option<&Path>,
) -> ProjectResult<Settings> {
    let mut expander = Expander {
        presets: &project.presets,
        base_dir,
        stack: Vec::new(),
    };
    expander.settings(None, &component.properties)
}

struct Expander<'a> {
    presets: &'a BTreeMap<String, FacilityDef>,
    base_dir: Option<&'a Path>,
    stack: Vec<&'a str>,
}

impl<'a> Expander<'a> {
    fn settings(
        &mut self,
        factory: Option<&str>,
        properties: &'a BTreeMap<String, ValueDef>,
    ) -> ProjectResult<Settings> {
        let mut settings = match factory {
            Some(f) => Settings::for_factory(f),
            None => Settings::new(),
        };
        for (name, value) in properties {
            let setting = self.setting(name, value)?;
            settings.insert(name.as_str(), setting);
        }
        Ok(settings)
    }

    fn setting(&mut self, name: &str, value: &'a ValueDef) -> ProjectResult<Setting> {
        let value = match value {
            ValueDef::Bool(b) => PropertyValue::Bool(*b),
            ValueDef::Int(i) => PropertyValue::Int(*i),
            ValueDef::Real(x) => PropertyValue::Real(*x),
            ValueDef::Str(s) if name == FILENAME_PROPERTY => {
                PropertyValue::Str(self.resolve_path(s))
            }
            ValueDef::Str(s) => PropertyValue::Str(s.clone()),
            ValueDef::StrList(list) => PropertyValue::StrList(list.clone()),
            ValueDef::RealList(list) => PropertyValue::RealList(list.clone()),
            ValueDef::Facility(f) => {
                return Ok(Setting::Facility(
                    self.settings(f.factory.as_deref(), &f.properties)?,
                ));
            }
            ValueDef::Ref(r) => return self.expand(&r.preset).map(Setting::Facility),
        };
        Ok(Setting::Value(value))
    }

    fn expand(&mut self, preset: &'a str) -> ProjectResult<Settings> {
        if self.stack.contains(&preset) {
            let mut chain = self.stack.clone();
            chain.push(preset);
            return Err(ValidationError::CyclicPreset {
                chain: chain.join(" -> "),
            }
            .into());
        }
        let def = self
            .presets
            .get(preset)
            .ok_or_else(|| ValidationError::MissingReference {
                id: preset.to_string(),
                context: "presets".to_string(),
            })?;

        self.stack.push(preset);
        let result = self.settings(def.factory.as_deref(), &def.properties);
        self.stack.pop();
        result
    }

    fn resolve_path(&self, value: &str) -> String {
        match self.base_dir {
            Some(dir) if !value.is_empty() && Path::new(value).is_relative() => {
                dir.join(value).to_string_lossy().into_owned()
            }
            _ => value.to_string(),
        }
    }
}
