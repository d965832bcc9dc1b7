//! User-supplied configuration for one component and its facilities.

use std::collections::BTreeMap;

use gf_core::PropertyValue;

/// One supplied entry: a scalar value or a nested facility override.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    Value(PropertyValue),
    Facility(Settings),
}

/// Settings tree for a component.
///
/// `factory` only matters when these settings are a facility override: it
/// selects the variant within the facility's family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    factory: Option<String>,
    entries: BTreeMap<String, Setting>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_factory(factory: impl Into<String>) -> Self {
        Self {
            factory: Some(factory.into()),
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_facility(mut self, name: impl Into<String>, settings: Settings) -> Self {
        self.entries.insert(name.into(), Setting::Facility(settings));
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.entries.insert(name.into(), Setting::Value(value.into()));
    }

    pub fn insert(&mut self, name: impl Into<String>, setting: Setting) {
        self.entries.insert(name.into(), setting);
    }

    pub fn factory(&self) -> Option<&str> {
        self.factory.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Setting)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `newer` on top of `self`.
    ///
    /// A different factory replaces the settings wholesale, since the old
    /// entries belong to another variant. Otherwise entries are merged,
    /// recursing into facilities, with `newer` winning.
    pub fn overlay(&mut self, newer: &Settings) {
        if newer.factory.is_some() && newer.factory != self.factory {
            *self = newer.clone();
            return;
        }
        for (name, setting) in &newer.entries {
            match (self.entries.get_mut(name), setting) {
                (Some(Setting::Facility(old)), Setting::Facility(new)) => old.overlay(new),
                _ => {
                    self.entries.insert(name.clone(), setting.clone());
                }
            }
        }
    }
}
