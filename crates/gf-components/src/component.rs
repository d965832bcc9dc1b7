//! The configurable-component trait and the state every component carries.

use std::collections::BTreeMap;

use gf_core::{
    GfError, GfResult, Inventory, LifecycleState, PropertyValue, PropertyValues,
};

use crate::capability::{CoordSys, SpatialDb};
use crate::fields::AvailableFields;
use crate::settings::Settings;

/// A component driven through the staged lifecycle.
///
/// Implementors own a [`ComponentCore`] (configuration and lifecycle facet)
/// and, usually, a [`KernelBinding`](crate::KernelBinding) (kernel facet).
/// The lifecycle engine in [`crate::lifecycle`] works purely through this
/// trait, so every variant of every family is staged the same way.
pub trait Component {
    fn core(&self) -> &ComponentCore;

    fn core_mut(&mut self) -> &mut ComponentCore;

    /// Cross-property checks on the values about to be committed.
    ///
    /// Runs during configure after each value passed its own validator and
    /// before anything is stored.
    fn check_configuration(&self, _values: &PropertyValues) -> GfResult<()> {
        Ok(())
    }

    /// Create the kernel and push the validated configuration into it.
    ///
    /// Called once, during preinitialize, after every facility has been
    /// preinitialized.
    fn bind_kernel(&mut self) -> GfResult<()> {
        Ok(())
    }

    /// Drop the kernel handle, if one is bound.
    fn release_kernel(&mut self) {}

    fn as_coordsys(&self) -> Option<&dyn CoordSys> {
        None
    }

    fn as_spatial_db(&self) -> Option<&dyn SpatialDb> {
        None
    }
}

/// Configuration and lifecycle state shared by all components.
pub struct ComponentCore {
    name: String,
    family: &'static str,
    kind: &'static str,
    logging_prefix: &'static str,
    inventory: Inventory,
    values: PropertyValues,
    facility_settings: BTreeMap<&'static str, Settings>,
    facilities: BTreeMap<&'static str, Box<dyn Component>>,
    fields: AvailableFields,
    state: LifecycleState,
}

impl ComponentCore {
    /// A freshly constructed core with every property bound to its default.
    ///
    /// `kind` is the factory name of the variant within `family`.
    pub fn new(
        family: &'static str,
        kind: &'static str,
        name: impl Into<String>,
        inventory: Inventory,
    ) -> Self {
        let values = inventory.defaults();
        Self {
            name: name.into(),
            family,
            kind,
            logging_prefix: "",
            inventory,
            values,
            facility_settings: BTreeMap::new(),
            facilities: BTreeMap::new(),
            fields: AvailableFields::new(),
            state: LifecycleState::Constructed,
        }
    }

    pub fn with_logging_prefix(mut self, prefix: &'static str) -> Self {
        self.logging_prefix = prefix;
        self
    }

    pub fn with_fields(mut self, fields: AvailableFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename before configuration, e.g. to the id used in a project file.
    pub fn set_name(&mut self, name: impl Into<String>) -> GfResult<()> {
        self.state
            .require(&self.name, "rename", &[LifecycleState::Constructed])?;
        self.name = name.into();
        Ok(())
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn logging_prefix(&self) -> &'static str {
        self.logging_prefix
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn values(&self) -> &PropertyValues {
        &self.values
    }

    pub fn fields(&self) -> &AvailableFields {
        &self.fields
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Fail unless the component is active.
    pub fn require_active(&self, operation: &'static str) -> GfResult<()> {
        self.state
            .require(&self.name, operation, &[LifecycleState::Active])
    }

    pub fn value(&self, property: &str) -> GfResult<&PropertyValue> {
        self.values
            .get(property)
            .ok_or_else(|| GfError::MissingProperty {
                component: self.name.clone(),
                property: property.to_string(),
            })
    }

    pub fn str_value(&self, property: &str) -> GfResult<&str> {
        let v = self.value(property)?;
        v.as_str().ok_or_else(|| self.type_mismatch(property, v))
    }

    pub fn bool_value(&self, property: &str) -> GfResult<bool> {
        let v = self.value(property)?;
        v.as_bool().ok_or_else(|| self.type_mismatch(property, v))
    }

    pub fn int_value(&self, property: &str) -> GfResult<i64> {
        let v = self.value(property)?;
        v.as_int().ok_or_else(|| self.type_mismatch(property, v))
    }

    pub fn real_value(&self, property: &str) -> GfResult<f64> {
        let v = self.value(property)?;
        v.as_real().ok_or_else(|| self.type_mismatch(property, v))
    }

    pub fn str_list(&self, property: &str) -> GfResult<&[String]> {
        let v = self.value(property)?;
        v.as_str_list().ok_or_else(|| self.type_mismatch(property, v))
    }

    pub fn real_list(&self, property: &str) -> GfResult<&[f64]> {
        let v = self.value(property)?;
        v.as_real_list().ok_or_else(|| self.type_mismatch(property, v))
    }

    /// The resolved facility behind `property`.
    pub fn facility(&self, property: &str) -> GfResult<&dyn Component> {
        self.facilities
            .get(property)
            .map(|f| f.as_ref())
            .ok_or_else(|| GfError::MissingProperty {
                component: self.name.clone(),
                property: property.to_string(),
            })
    }

    pub fn facility_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.facilities.keys().copied()
    }

    pub fn coordsys(&self, property: &str) -> GfResult<&dyn CoordSys> {
        let facility = self.facility(property)?;
        facility.as_coordsys().ok_or_else(|| GfError::Capability {
            component: facility.core().name().to_string(),
            capability: "coordsys",
        })
    }

    pub fn spatial_db(&self, property: &str) -> GfResult<&dyn SpatialDb> {
        let facility = self.facility(property)?;
        facility.as_spatial_db().ok_or_else(|| GfError::Capability {
            component: facility.core().name().to_string(),
            capability: "spatial_db",
        })
    }

    fn type_mismatch(&self, property: &str, found: &PropertyValue) -> GfError {
        GfError::Invariant {
            what: format!(
                "property '{}' of '{}' holds a {}",
                property,
                self.name,
                found.type_name()
            ),
        }
    }

    // Engine access, used by `crate::lifecycle` only.

    pub(crate) fn set_state(&mut self, state: LifecycleState) {
        self.state = state;
    }

    pub(crate) fn facility_settings(&self) -> &BTreeMap<&'static str, Settings> {
        &self.facility_settings
    }

    pub(crate) fn facilities_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut Box<dyn Component>> + '_ {
        self.facilities.values_mut()
    }

    pub(crate) fn commit(
        &mut self,
        values: PropertyValues,
        facility_settings: BTreeMap<&'static str, Settings>,
        facilities: BTreeMap<&'static str, Box<dyn Component>>,
    ) {
        self.values = values;
        self.facility_settings = facility_settings;
        self.facilities = facilities;
        self.state = LifecycleState::Configured;
    }

    pub(crate) fn clear_facilities(&mut self) {
        self.facilities.clear();
    }
}
