//! Catalog of output fields a component's kernel can report.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Where a field is defined on the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    Vertex,
    Cell,
}

/// Static parameters (`info`) versus time-varying output (`data`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Info,
    Data,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown field {what} '{value}'")]
pub struct ParseFieldError {
    what: &'static str,
    value: String,
}

impl FromStr for FieldLocation {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertex" => Ok(Self::Vertex),
            "cell" => Ok(Self::Cell),
            _ => Err(ParseFieldError {
                what: "location",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for FieldCategory {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "data" => Ok(Self::Data),
            _ => Err(ParseFieldError {
                what: "category",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Cell => "cell",
        })
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Data => "data",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldGroup {
    info: Vec<&'static str>,
    data: Vec<&'static str>,
}

/// Field names by location and category, in declaration order.
///
/// Built once when the component is constructed; there is no way to
/// modify a catalog after it has been handed to a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailableFields {
    vertex: FieldGroup,
    cell: FieldGroup,
}

impl AvailableFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        location: FieldLocation,
        category: FieldCategory,
        names: &[&'static str],
    ) -> Self {
        *self.slot_mut(location, category) = names.to_vec();
        self
    }

    pub fn get(&self, location: FieldLocation, category: FieldCategory) -> &[&'static str] {
        let group = match location {
            FieldLocation::Vertex => &self.vertex,
            FieldLocation::Cell => &self.cell,
        };
        match category {
            FieldCategory::Info => &group.info,
            FieldCategory::Data => &group.data,
        }
    }

    pub fn contains(&self, location: FieldLocation, category: FieldCategory, name: &str) -> bool {
        self.get(location, category).contains(&name)
    }

    pub fn is_empty(&self) -> bool {
        self.vertex.info.is_empty()
            && self.vertex.data.is_empty()
            && self.cell.info.is_empty()
            && self.cell.data.is_empty()
    }

    fn slot_mut(&mut self, location: FieldLocation, category: FieldCategory) -> &mut Vec<&'static str> {
        let group = match location {
            FieldLocation::Vertex => &mut self.vertex,
            FieldLocation::Cell => &mut self.cell,
        };
        match category {
            FieldCategory::Info => &mut group.info,
            FieldCategory::Data => &mut group.data,
        }
    }
}
