//! Material component shared by every constitutive variant.
//!
//! A variant is described by a static [`MaterialVariant`]: factory name,
//! logging prefix, field catalog, the database values its kernel consumes
//! and the kernel constructor. The configuration facet (inventory,
//! lifecycle) is identical for all of them.

use gf_components::{
    AvailableFields, Component, ComponentCore, FieldCategory, FieldLocation, KernelBinding,
};
use gf_core::units::Time;
use gf_core::validate::validate_non_negative;
use gf_core::{GfError, GfResult, Inventory, PropertyDecl};
use gf_spatialdata::SPATIAL_DB_FAMILY;
use gf_spatialdata::spatialdb::UNIFORMDB;
use tracing::debug;

use crate::MATERIAL_FAMILY;
use crate::kernel::MaterialKernel;

/// Static description of one material variant.
#[derive(Debug)]
pub struct MaterialVariant {
    /// Factory name, also the default component name.
    pub kind: &'static str,
    pub description: &'static str,
    pub logging_prefix: &'static str,
    /// Names queried from `db_properties`, in the order the kernel expects.
    pub db_values: &'static [&'static str],
    pub cell_info: &'static [&'static str],
    pub cell_data: &'static [&'static str],
    pub kernel: fn() -> Box<dyn MaterialKernel>,
}

impl MaterialVariant {
    pub fn fields(&self) -> AvailableFields {
        AvailableFields::new()
            .with(FieldLocation::Cell, FieldCategory::Info, self.cell_info)
            .with(FieldLocation::Cell, FieldCategory::Data, self.cell_data)
    }
}

pub struct Material {
    variant: &'static MaterialVariant,
    core: ComponentCore,
    kernel: KernelBinding<dyn MaterialKernel>,
}

impl Material {
    pub fn new(variant: &'static MaterialVariant) -> GfResult<Self> {
        Self::with_kernel(variant, variant.kernel)
    }

    /// Same as [`new`](Self::new) but binding whatever `kernel` builds.
    pub fn with_kernel(
        variant: &'static MaterialVariant,
        kernel: impl Fn() -> Box<dyn MaterialKernel> + 'static,
    ) -> GfResult<Self> {
        let inventory = Inventory::new(vec![
            PropertyDecl::int("id", 0)
                .with_validator(validate_non_negative)
                .with_tip("Material identifier (from mesh generator)."),
            PropertyDecl::string("label", "").with_tip("Descriptive label for material."),
            PropertyDecl::facility("db_properties", SPATIAL_DB_FAMILY, UNIFORMDB)
                .with_tip("Database for physical property parameters."),
        ])?;
        let core = ComponentCore::new(MATERIAL_FAMILY, variant.kind, variant.kind, inventory)
            .with_logging_prefix(variant.logging_prefix)
            .with_fields(variant.fields());
        Ok(Self {
            variant,
            core,
            kernel: KernelBinding::new(kernel),
        })
    }

    pub fn variant(&self) -> &'static MaterialVariant {
        self.variant
    }

    pub fn id(&self) -> GfResult<i64> {
        self.core.int_value("id")
    }

    pub fn label(&self) -> GfResult<&str> {
        self.core.str_value("label")
    }

    /// Value of a cell `info` field (SI base units).
    pub fn cell_info(&self, field: &str) -> GfResult<f64> {
        self.core.require_active("query cell info")?;
        let unknown = || GfError::UnknownField {
            component: self.core.name().to_string(),
            location: "cell",
            category: "info",
            field: field.to_string(),
        };
        if !self
            .core
            .fields()
            .contains(FieldLocation::Cell, FieldCategory::Info, field)
        {
            return Err(unknown());
        }
        self.kernel
            .get(self.core.name())?
            .property(field)
            .ok_or_else(unknown)
    }

    /// Largest stable time step for implicit time integration.
    pub fn stable_time_step_implicit(&self) -> GfResult<Time> {
        self.core.require_active("compute stable time step")?;
        Ok(self.kernel.get(self.core.name())?.stable_time_step_implicit())
    }
}

impl Component for Material {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn bind_kernel(&mut self) -> GfResult<()> {
        let id = self.id()?;
        let label = self.label()?.to_string();
        let values = self
            .core
            .spatial_db("db_properties")?
            .query(self.variant.db_values)?;

        self.kernel.bind(self.core.name(), |k| {
            k.set_id(id);
            k.set_label(&label);
            k.set_db_values(&values)?;
            k.initialize()
        })?;

        debug!(
            component = self.core.name(),
            prefix = self.core.logging_prefix(),
            id,
            "material kernel bound"
        );
        Ok(())
    }

    fn release_kernel(&mut self) {
        self.kernel.release();
    }
}
