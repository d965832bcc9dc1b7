//! Project schema definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    /// Named facility settings, referenced by `{ ref: name }`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub presets: BTreeMap<String, FacilityDef>,
    #[serde(default)]
    pub components: Vec<ComponentDef>,
}

/// A top-level component: built by `factory` of `family`, named `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub id: String,
    pub family: String,
    pub factory: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ValueDef>,
}

/// Settings for a facility property. Without `factory` the declared
/// default variant is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FacilityDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ValueDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PresetRef {
    #[serde(rename = "ref")]
    pub preset: String,
}

/// A property value as written in the file.
///
/// Variant order matters: integers are tried before reals, and a `ref`
/// mapping before a facility mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ValueDef {
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
    StrList(Vec<String>),
    RealList(Vec<f64>),
    Ref(PresetRef),
    Facility(FacilityDef),
}

impl ValueDef {
    pub fn preset(name: impl Into<String>) -> Self {
        ValueDef::Ref(PresetRef {
            preset: name.into(),
        })
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            presets: BTreeMap::new(),
            components: Vec::new(),
        }
    }

    pub fn component(&self, id: &str) -> Option<&ComponentDef> {
        self.components.iter().find(|c| c.id == id)
    }
}
