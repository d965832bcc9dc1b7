//! gf-spatialdata: coordinate systems and spatial databases.
//!
//! Families:
//! - `coordsys`: `cscart` (Cartesian, the usual default) and `csgeo`
//!   (geographic)
//! - `spatial_db`: `uniformdb` (same values everywhere)

pub mod geocoords;
pub mod spatialdb;

pub use geocoords::{CsCart, CsGeo};
pub use spatialdb::UniformDb;

use gf_components::FactoryRegistry;
use gf_core::GfResult;

pub const COORDSYS_FAMILY: &str = "coordsys";
pub const SPATIAL_DB_FAMILY: &str = "spatial_db";

/// Register every factory of this crate.
pub fn register(registry: &mut FactoryRegistry) -> GfResult<()> {
    registry.register(
        COORDSYS_FAMILY,
        geocoords::CSCART,
        "Cartesian coordinate system",
        geocoords::cscart,
    )?;
    registry.register(
        COORDSYS_FAMILY,
        geocoords::CSGEO,
        "Geographic coordinate system",
        geocoords::csgeo,
    )?;
    registry.register(
        SPATIAL_DB_FAMILY,
        spatialdb::UNIFORMDB,
        "Spatial database with uniform values",
        spatialdb::uniformdb,
    )?;
    Ok(())
}
