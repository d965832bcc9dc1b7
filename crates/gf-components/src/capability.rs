//! Capability contracts that facility families conform to.

use gf_core::GfResult;

/// Resolved description of a coordinate system, as pushed into kernels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordSysInfo {
    /// Factory name of the variant (`cscart`, `csgeo`, ...).
    pub kind: &'static str,
    pub space_dim: usize,
    /// Size of one coordinate unit in meters.
    pub to_meters: f64,
}

/// Contract of the `coordsys` family.
pub trait CoordSys {
    fn info(&self) -> GfResult<CoordSysInfo>;
}

/// Contract of the `spatial_db` family.
pub trait SpatialDb {
    fn label(&self) -> &str;

    /// Values of `names`, in the requested order.
    fn query(&self, names: &[&str]) -> GfResult<Vec<f64>>;
}
