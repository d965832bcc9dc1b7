//! gf-materials: the `material` family.
//!
//! Every variant shares the [`Material`] component and differs only in its
//! [`MaterialVariant`] descriptor and parameter kernel:
//! - `maxwellplanestrain`: plane-strain linear Maxwell viscoelastic
//! - `elasticplanestrain`: plane-strain linear elastic

pub mod elastic;
pub mod kernel;
pub mod material;
pub mod maxwell;

pub use elastic::{ElasticPlaneStrainKernel, elastic_plane_strain};
pub use kernel::MaterialKernel;
pub use material::{Material, MaterialVariant};
pub use maxwell::{MaxwellPlaneStrainKernel, MaxwellProperties, maxwell_plane_strain};

use gf_components::FactoryRegistry;
use gf_core::GfResult;

pub const MATERIAL_FAMILY: &str = "material";

/// Variants known to this crate.
pub fn variants() -> [&'static MaterialVariant; 2] {
    [&maxwell::VARIANT, &elastic::VARIANT]
}

/// Register every factory of this crate.
pub fn register(registry: &mut FactoryRegistry) -> GfResult<()> {
    registry.register(
        MATERIAL_FAMILY,
        maxwell::MAXWELL_PLANE_STRAIN,
        maxwell::VARIANT.description,
        maxwell::material,
    )?;
    registry.register(
        MATERIAL_FAMILY,
        elastic::ELASTIC_PLANE_STRAIN,
        elastic::VARIANT.description,
        elastic::material,
    )?;
    Ok(())
}
