//! Plane-strain linear Maxwell viscoelastic material.

use gf_components::Component;
use gf_core::units::{DynVisc, Modulus, Time, kg_per_m3, mps, pa_s, s};
use gf_core::{GfResult, KernelError, KernelResult};

use crate::kernel::{MaterialKernel, expect_values, lame_parameters, positive};
use crate::material::{Material, MaterialVariant};

pub const MAXWELL_PLANE_STRAIN: &str = "maxwellplanestrain";

/// Fraction of the Maxwell time used as the implicit stable time step.
const MAXWELL_DT_FRACTION: f64 = 0.2;

pub static VARIANT: MaterialVariant = MaterialVariant {
    kind: MAXWELL_PLANE_STRAIN,
    description: "Plane strain linear Maxwell viscoelastic material",
    logging_prefix: "MaMx2D ",
    db_values: &["density", "vs", "vp", "viscosity"],
    cell_info: &["mu", "lambda", "density", "maxwell_time"],
    cell_data: &["total_strain", "viscous_strain", "stress"],
    kernel,
};

/// Construct the material with the built-in kernel.
pub fn maxwell_plane_strain() -> GfResult<Material> {
    Material::new(&VARIANT)
}

/// Factory for the `material` family.
pub fn material() -> GfResult<Box<dyn Component>> {
    Ok(Box::new(maxwell_plane_strain()?))
}

fn kernel() -> Box<dyn MaterialKernel> {
    Box::new(MaxwellPlaneStrainKernel::default())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxwellProperties {
    pub density: f64,
    pub mu: Modulus,
    pub lambda: Modulus,
    pub maxwell_time: Time,
}

#[derive(Debug, Default)]
pub struct MaxwellPlaneStrainKernel {
    id: i64,
    label: String,
    properties: Option<MaxwellProperties>,
    ready: bool,
}

impl MaxwellPlaneStrainKernel {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn properties(&self) -> Option<&MaxwellProperties> {
        self.properties.as_ref()
    }
}

impl MaterialKernel for MaxwellPlaneStrainKernel {
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn set_db_values(&mut self, values: &[f64]) -> KernelResult<()> {
        expect_values(values, VARIANT.db_values.len())?;
        let density = kg_per_m3(values[0]);
        let (mu, lambda) = lame_parameters(density, mps(values[1]), mps(values[2]))?;

        positive("viscosity", values[3])?;
        let viscosity: DynVisc = pa_s(values[3]);
        let maxwell_time: Time = viscosity / mu;

        self.properties = Some(MaxwellProperties {
            density: density.value,
            mu,
            lambda,
            maxwell_time,
        });
        Ok(())
    }

    fn initialize(&mut self) -> KernelResult<()> {
        if self.properties.is_none() {
            return Err(KernelError::new("physical properties not set"));
        }
        self.ready = true;
        Ok(())
    }

    fn property(&self, name: &str) -> Option<f64> {
        let p = self.properties.filter(|_| self.ready)?;
        match name {
            "mu" => Some(p.mu.value),
            "lambda" => Some(p.lambda.value),
            "density" => Some(p.density),
            "maxwell_time" => Some(p.maxwell_time.value),
            _ => None,
        }
    }

    fn stable_time_step_implicit(&self) -> Time {
        match self.properties {
            Some(p) => p.maxwell_time * MAXWELL_DT_FRACTION,
            None => s(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(values: &[f64]) -> KernelResult<MaxwellPlaneStrainKernel> {
        let mut k = MaxwellPlaneStrainKernel::default();
        k.set_db_values(values)?;
        k.initialize()?;
        Ok(k)
    }

    #[test]
    fn derived_properties() {
        let k = bound(&[2500.0, 3000.0, 3000.0 * 3f64.sqrt(), 2.25e17]).unwrap();
        let mu = k.property("mu").unwrap();
        assert!((mu - 2.25e10).abs() < 1.0);
        assert!((k.property("maxwell_time").unwrap() - 1.0e7).abs() < 1.0e-3);
        assert_eq!(k.property("density"), Some(2500.0));
        assert_eq!(k.property("stress"), None);
        assert!((k.stable_time_step_implicit().value - 2.0e6).abs() < 1.0e-3);
    }

    #[test]
    fn rejects_nonpositive_viscosity() {
        let err = bound(&[2500.0, 3000.0, 6000.0, 0.0]).unwrap_err();
        assert!(err.message.contains("viscosity"));
    }

    #[test]
    fn rejects_wrong_value_count() {
        assert!(bound(&[2500.0, 3000.0, 6000.0]).is_err());
    }

    #[test]
    fn initialize_requires_properties() {
        let mut k = MaxwellPlaneStrainKernel::default();
        assert!(k.initialize().is_err());
        assert_eq!(k.property("mu"), None);
    }
}
