//! Contract between a material component and its parameter kernel.

use gf_core::units::{Density, Modulus, Time, Velocity};
use gf_core::{KernelError, KernelResult, ensure_finite};

/// Opaque constitutive kernel bound by a material.
///
/// The component calls the setters in order (`set_id`, `set_label`,
/// `set_db_values`) and then `initialize`; queries are only made after
/// that sequence succeeded.
pub trait MaterialKernel {
    fn set_id(&mut self, id: i64);

    fn set_label(&mut self, label: &str);

    /// Database values in the order of the variant's `db_values` list.
    fn set_db_values(&mut self, values: &[f64]) -> KernelResult<()>;

    /// Ready signal. Fails if the physical properties were never set.
    fn initialize(&mut self) -> KernelResult<()>;

    /// Value of a cell `info` field, in SI base units.
    fn property(&self, name: &str) -> Option<f64>;

    fn stable_time_step_implicit(&self) -> Time;
}

/// Lamé parameters `(mu, lambda)` from density and wave speeds.
pub fn lame_parameters(
    density: Density,
    vs: Velocity,
    vp: Velocity,
) -> KernelResult<(Modulus, Modulus)> {
    positive("density", density.value)?;
    positive("shear wave speed", vs.value)?;
    positive("dilatational wave speed", vp.value)?;

    let mu: Modulus = density * vs * vs;
    let rho_vp2: Modulus = density * vp * vp;
    let lambda = rho_vp2 - mu * 2.0;

    positive("shear modulus (mu)", mu.value)?;
    positive("Lame's constant (lambda)", lambda.value)?;
    Ok((mu, lambda))
}

/// Check the database handed over exactly `expected` values.
pub fn expect_values(values: &[f64], expected: usize) -> KernelResult<()> {
    if values.len() != expected {
        return Err(KernelError::new(format!(
            "expected {} database values, got {}",
            expected,
            values.len()
        )));
    }
    Ok(())
}

pub(crate) fn positive(what: &'static str, value: f64) -> KernelResult<()> {
    ensure_finite(value, what).map_err(|e| KernelError::new(e.to_string()))?;
    if value <= 0.0 {
        return Err(KernelError::new(format!(
            "Found nonpositive {} ({})",
            what, value
        )));
    }
    Ok(())
}
