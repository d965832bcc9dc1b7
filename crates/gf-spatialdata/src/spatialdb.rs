//! Spatial databases (`spatial_db` family).

use std::collections::HashSet;

use gf_components::{Component, ComponentCore, SpatialDb};
use gf_core::{
    GfError, GfResult, Inventory, PropertyDecl, PropertyValues, SemanticType, ValidationError,
};

use crate::SPATIAL_DB_FAMILY;

pub const UNIFORMDB: &str = "uniformdb";

/// Spatial database returning the same values at every location.
pub struct UniformDb {
    core: ComponentCore,
}

impl UniformDb {
    pub fn new() -> GfResult<Self> {
        let inventory = Inventory::new(vec![
            PropertyDecl::string("label", "uniform database").with_tip("Label for database."),
            PropertyDecl::required("values", SemanticType::StrList)
                .with_tip("Names of values in spatial database."),
            PropertyDecl::required("data", SemanticType::RealList)
                .with_tip("Values in spatial database."),
        ])?;
        Ok(Self {
            core: ComponentCore::new(SPATIAL_DB_FAMILY, UNIFORMDB, UNIFORMDB, inventory)
                .with_logging_prefix("UniDB "),
        })
    }
}

/// Factory for [`UniformDb`].
pub fn uniformdb() -> GfResult<Box<dyn Component>> {
    Ok(Box::new(UniformDb::new()?))
}

impl Component for UniformDb {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn check_configuration(&self, values: &PropertyValues) -> GfResult<()> {
        let names = values.get("values").and_then(|v| v.as_str_list());
        let data = values.get("data").and_then(|v| v.as_real_list());

        if let Some(names) = names {
            let mut seen = HashSet::new();
            if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
                return Err(GfError::validation(
                    "values",
                    ValidationError::Inconsistent {
                        reason: format!("value '{}' listed more than once", dup),
                    },
                ));
            }
        }

        if let (Some(names), Some(data)) = (names, data)
            && names.len() != data.len()
        {
            return Err(GfError::validation(
                "data",
                ValidationError::Inconsistent {
                    reason: format!(
                        "{} names given but {} data values",
                        names.len(),
                        data.len()
                    ),
                },
            ));
        }
        Ok(())
    }

    fn as_spatial_db(&self) -> Option<&dyn SpatialDb> {
        Some(self)
    }
}

impl SpatialDb for UniformDb {
    fn label(&self) -> &str {
        self.core.str_value("label").unwrap_or("")
    }

    fn query(&self, names: &[&str]) -> GfResult<Vec<f64>> {
        let known = self.core.str_list("values")?;
        let data = self.core.real_list("data")?;
        names
            .iter()
            .map(|name| {
                known
                    .iter()
                    .position(|k| k == name)
                    .and_then(|i| data.get(i).copied())
                    .ok_or_else(|| GfError::validation(
                        "values",
                        ValidationError::Inconsistent {
                            reason: format!(
                                "'{}' not found in spatial database '{}'",
                                name,
                                self.core.name()
                            ),
                        },
                    ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_components::{FactoryRegistry, Settings, lifecycle};

    fn configured(names: Vec<String>, data: Vec<f64>) -> GfResult<UniformDb> {
        let mut db = UniformDb::new()?;
        let settings = Settings::new().with("values", names).with("data", data);
        lifecycle::configure(&mut db, &settings, &FactoryRegistry::new())?;
        Ok(db)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn query_returns_requested_order() {
        let db = configured(names(&["density", "vs", "vp"]), vec![2500.0, 3000.0, 5200.0]).unwrap();
        assert_eq!(db.query(&["vp", "density"]).unwrap(), vec![5200.0, 2500.0]);
        assert_eq!(db.label(), "uniform database");
    }

    #[test]
    fn query_unknown_name_fails() {
        let db = configured(names(&["density"]), vec![2500.0]).unwrap();
        let err = db.query(&["viscosity"]).unwrap_err();
        assert!(err.to_string().contains("viscosity"));
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = configured(names(&["density", "vs"]), vec![2500.0]).err().unwrap();
        assert!(matches!(err, GfError::Validation { ref property, .. } if property == "data"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = configured(names(&["vs", "vs"]), vec![1.0, 2.0]).err().unwrap();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn unset_lists_fail_at_preinitialize() {
        let mut db = UniformDb::new().unwrap();
        lifecycle::configure(&mut db, &Settings::new(), &FactoryRegistry::new()).unwrap();
        let err = lifecycle::preinitialize(&mut db).unwrap_err();
        assert!(matches!(err, GfError::MissingProperty { .. }));
    }
}
