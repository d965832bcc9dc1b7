//! Coordinate systems (`coordsys` family).

use gf_components::{Component, ComponentCore, CoordSys, CoordSysInfo};
use gf_core::units::meters_per_unit;
use gf_core::validate::{validate_non_empty, validate_space_dim};
use gf_core::{
    GfError, GfResult, Inventory, PropertyDecl, PropertyValues, ValidationError,
};

use crate::COORDSYS_FAMILY;

pub const CSCART: &str = "cscart";
pub const CSGEO: &str = "csgeo";

// Must match the units known to `meters_per_unit`.
const UNIT_CHOICES: &[&str] = &["m", "km", "cm", "mm"];

fn units_decl() -> PropertyDecl {
    PropertyDecl::choice("units", UNIT_CHOICES, "m").with_tip("Units of coordinates.")
}

fn space_dim_decl() -> PropertyDecl {
    PropertyDecl::int("space_dim", 3)
        .with_validator(validate_space_dim)
        .with_tip("Number of dimensions for coordinate system.")
}

fn info_from(core: &ComponentCore) -> GfResult<CoordSysInfo> {
    let units = core.str_value("units")?;
    let to_meters = meters_per_unit(units).ok_or_else(|| {
        GfError::validation(
            "units",
            ValidationError::NotInChoices {
                value: units.to_string(),
                choices: UNIT_CHOICES.join(", "),
            },
        )
    })?;
    let space_dim = core.int_value("space_dim")?;
    let space_dim = usize::try_from(space_dim).map_err(|_| {
        GfError::validation(
            "space_dim",
            ValidationError::OutOfRange {
                value: space_dim.to_string(),
                reason: "must be 1, 2 or 3",
            },
        )
    })?;
    Ok(CoordSysInfo {
        kind: core.kind(),
        space_dim,
        to_meters,
    })
}

/// Cartesian coordinate system.
pub struct CsCart {
    core: ComponentCore,
}

impl CsCart {
    pub fn new() -> GfResult<Self> {
        let inventory = Inventory::new(vec![units_decl(), space_dim_decl()])?;
        Ok(Self {
            core: ComponentCore::new(COORDSYS_FAMILY, CSCART, CSCART, inventory)
                .with_logging_prefix("CSCart "),
        })
    }
}

/// Factory for [`CsCart`].
pub fn cscart() -> GfResult<Box<dyn Component>> {
    Ok(Box::new(CsCart::new()?))
}

impl Component for CsCart {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn as_coordsys(&self) -> Option<&dyn CoordSys> {
        Some(self)
    }
}

impl CoordSys for CsCart {
    fn info(&self) -> GfResult<CoordSysInfo> {
        info_from(&self.core)
    }
}

/// Geographic coordinate system (longitude, latitude, elevation).
pub struct CsGeo {
    core: ComponentCore,
}

impl CsGeo {
    pub fn new() -> GfResult<Self> {
        let inventory = Inventory::new(vec![
            PropertyDecl::string("ellipsoid", "WGS84")
                .with_validator(validate_non_empty)
                .with_tip("Name of reference ellipsoid."),
            PropertyDecl::string("datum_horiz", "WGS84")
                .with_validator(validate_non_empty)
                .with_tip("Name of horizontal datum."),
            PropertyDecl::choice("datum_vert", &["ellipsoid", "mean sea level"], "ellipsoid")
                .with_tip("Name of vertical datum."),
            PropertyDecl::bool("is_geocentric", false)
                .with_tip("Use geocentric coordinates instead of longitude/latitude."),
            units_decl(),
            space_dim_decl(),
        ])?;
        Ok(Self {
            core: ComponentCore::new(COORDSYS_FAMILY, CSGEO, CSGEO, inventory)
                .with_logging_prefix("CSGeo "),
        })
    }

    pub fn ellipsoid(&self) -> GfResult<&str> {
        self.core.str_value("ellipsoid")
    }

    pub fn is_geocentric(&self) -> GfResult<bool> {
        self.core.bool_value("is_geocentric")
    }
}

/// Factory for [`CsGeo`].
pub fn csgeo() -> GfResult<Box<dyn Component>> {
    Ok(Box::new(CsGeo::new()?))
}

impl Component for CsGeo {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn check_configuration(&self, values: &PropertyValues) -> GfResult<()> {
        // Longitude and latitude need at least two coordinates.
        if let Some(dim) = values.get("space_dim").and_then(|v| v.as_int())
            && dim < 2
        {
            return Err(GfError::validation(
                "space_dim",
                ValidationError::Inconsistent {
                    reason: "geographic coordinates need at least 2 dimensions".to_string(),
                },
            ));
        }
        Ok(())
    }

    fn as_coordsys(&self) -> Option<&dyn CoordSys> {
        Some(self)
    }
}

impl CoordSys for CsGeo {
    fn info(&self) -> GfResult<CoordSysInfo> {
        info_from(&self.core)
    }
}
