//! Plane-strain linear isotropic elastic material.

use gf_components::Component;
use gf_core::units::{Modulus, Time, kg_per_m3, mps, s};
use gf_core::{GfResult, KernelError, KernelResult};

use crate::kernel::{MaterialKernel, expect_values, lame_parameters};
use crate::material::{Material, MaterialVariant};

pub const ELASTIC_PLANE_STRAIN: &str = "elasticplanestrain";

pub static VARIANT: MaterialVariant = MaterialVariant {
    kind: ELASTIC_PLANE_STRAIN,
    description: "Plane strain linear elastic material",
    logging_prefix: "MaEl2D ",
    db_values: &["density", "vs", "vp"],
    cell_info: &["mu", "lambda", "density"],
    cell_data: &["total_strain", "stress"],
    kernel,
};

pub fn elastic_plane_strain() -> GfResult<Material> {
    Material::new(&VARIANT)
}

/// Factory for the `material` family.
pub fn material() -> GfResult<Box<dyn Component>> {
    Ok(Box::new(elastic_plane_strain()?))
}

fn kernel() -> Box<dyn MaterialKernel> {
    Box::new(ElasticPlaneStrainKernel::default())
}

#[derive(Debug, Default)]
pub struct ElasticPlaneStrainKernel {
    id: i64,
    label: String,
    moduli: Option<(f64, Modulus, Modulus)>,
    ready: bool,
}

impl ElasticPlaneStrainKernel {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl MaterialKernel for ElasticPlaneStrainKernel {
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
        self.moduli = Some((density.value, mu, lambda));
        Ok(())
    }

    fn initialize(&mut self) -> KernelResult<()> {
        if self.moduli.is_none() {
            return Err(KernelError::new("physical properties not set"));
        }
        self.ready = true;
        Ok(())
    }

    fn property(&self, name: &str) -> Option<f64> {
        let (density, mu, lambda) = self.moduli.filter(|_| self.ready)?;
        match name {
            "mu" => Some(mu.value),
            "lambda" => Some(lambda.value),
            "density" => Some(density),
            _ => None,
        }
    }

    /// Elastic response has no intrinsic time scale.
    fn stable_time_step_implicit(&self) -> Time {
        s(f64::MAX)
    }
}
