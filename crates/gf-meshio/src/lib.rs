//! gf-meshio: the `mesh_io` family.
//!
//! - `meshiopetsc`: reads simple ASCII gmsh files into a [`Mesh`]

pub mod error;
pub mod gmsh;
pub mod kernel;
pub mod mesh;
pub mod meshio_petsc;

pub use error::{MeshError, MeshResult};
pub use gmsh::GmshKernel;
pub use kernel::MeshIoKernel;
pub use mesh::Mesh;
pub use meshio_petsc::MeshIoPetsc;

use gf_components::{Component, Factory, FactoryRegistry};
use gf_core::{GfError, GfResult};

pub const MESH_IO_FAMILY: &str = "mesh_io";

/// A `mesh_io` component seen through its domain operations.
///
/// Both operations require the component to be active.
pub trait MeshIo: Component {
    fn read(&mut self) -> GfResult<Mesh>;

    fn write(&mut self, mesh: &Mesh) -> GfResult<()>;
}

/// Zero-argument constructor of a `mesh_io` variant, typed for I/O.
pub type MeshIoFactory = fn() -> GfResult<Box<dyn MeshIo>>;

struct Variant {
    name: &'static str,
    description: &'static str,
    component: Factory,
    mesh_io: MeshIoFactory,
}

const VARIANTS: &[Variant] = &[Variant {
    name: meshio_petsc::MESHIO_PETSC,
    description: "Reader for simple gmsh files",
    component: meshio_petsc::mesh_io,
    mesh_io: meshio_petsc::mesh_io_typed,
}];

/// Build a fresh, unconfigured `mesh_io` variant by factory name.
pub fn create(factory: &str) -> GfResult<Box<dyn MeshIo>> {
    let variant = VARIANTS
        .iter()
        .find(|v| v.name == factory)
        .ok_or_else(|| GfError::UnknownFactory {
            family: MESH_IO_FAMILY.to_string(),
            factory: factory.to_string(),
        })?;
    (variant.mesh_io)()
}

/// Register every factory of this crate.
pub fn register(registry: &mut FactoryRegistry) -> GfResult<()> {
    for v in VARIANTS {
        registry.register(MESH_IO_FAMILY, v.name, v.description, v.component)?;
    }
    Ok(())
}
