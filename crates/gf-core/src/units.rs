// gf-core/src/units.rs

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, MassDensity as UomMassDensity,
    Pressure as UomPressure, Time as UomTime, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type DynVisc = UomDynamicViscosity;
/// Elastic moduli are stresses.
pub type Modulus = UomPressure;
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Modulus {
    use uom::si::pressure::pascal;
    Modulus::new::<pascal>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Length units accepted by coordinate systems, with their size in meters.
pub const LENGTH_UNITS: [(&str, f64); 4] = [("m", 1.0), ("km", 1.0e3), ("cm", 1.0e-2), ("mm", 1.0e-3)];

/// Size of one `unit` in meters, if the unit is known.
pub fn meters_per_unit(unit: &str) -> Option<f64> {
    LENGTH_UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, scale)| *scale)
}
