//! Mesh reader for simple gmsh files (`meshiopetsc`).

use gf_components::{Component, ComponentCore, KernelBinding};
use gf_core::validate::validate_filename;
use gf_core::{GfError, GfResult, Inventory, PropertyDecl, PropertyValue};
use gf_spatialdata::COORDSYS_FAMILY;
use gf_spatialdata::geocoords::CSCART;
use tracing::debug;

use crate::{MESH_IO_FAMILY, MeshIo};
use crate::gmsh::GmshKernel;
use crate::kernel::MeshIoKernel;
use crate::mesh::Mesh;

pub const MESHIO_PETSC: &str = "meshiopetsc";

pub struct MeshIoPetsc {
    core: ComponentCore,
    kernel: KernelBinding<dyn MeshIoKernel>,
}

impl MeshIoPetsc {
    pub fn new() -> GfResult<Self> {
        Self::with_kernel(|| Box::new(GmshKernel::default()) as Box<dyn MeshIoKernel>)
    }

    /// Same as [`new`](Self::new) but binding whatever `kernel` builds.
    pub fn with_kernel(kernel: impl Fn() -> Box<dyn MeshIoKernel> + 'static) -> GfResult<Self> {
        let inventory = Inventory::new(vec![
            PropertyDecl::string("filename", "")
                .with_validator(validate_filename)
                .with_tip("Name of mesh file"),
            PropertyDecl::facility("coordsys", COORDSYS_FAMILY, CSCART)
                .with_tip("Coordinate system associated with mesh."),
            PropertyDecl::bool("debug", false).with_tip("Write mesh diagnostics while reading."),
            PropertyDecl::bool("interpolate", false)
                .with_tip("Build intermediate topology (edges, faces)."),
        ])?;
        Ok(Self {
            core: ComponentCore::new(MESH_IO_FAMILY, MESHIO_PETSC, MESHIO_PETSC, inventory)
                .with_logging_prefix("MeshIOPETSc "),
            kernel: KernelBinding::new(kernel),
        })
    }

    pub fn filename(&self) -> GfResult<&str> {
        self.core.str_value("filename")
    }

    pub fn debug(&self) -> GfResult<bool> {
        self.core.bool_value("debug")
    }

    pub fn interpolate(&self) -> GfResult<bool> {
        self.core.bool_value("interpolate")
    }

    pub fn read(&mut self) -> GfResult<Mesh> {
        self.core.require_active("read mesh")?;
        let name = self.core.name();
        let mesh = self
            .kernel
            .get_mut(name)?
            .read()
            .map_err(|e| GfError::kernel(name, e))?;
        debug!(
            component = name,
            prefix = self.core.logging_prefix(),
            cells = mesh.num_cells(),
            "mesh read"
        );
        Ok(mesh)
    }

    pub fn write(&mut self, mesh: &Mesh) -> GfResult<()> {
        self.core.require_active("write mesh")?;
        let name = self.core.name();
        self.kernel
            .get_mut(name)?
            .write(mesh)
            .map_err(|e| GfError::kernel(name, e))
    }
}

/// Factory for the `mesh_io` family.
pub fn mesh_io() -> GfResult<Box<dyn Component>> {
    Ok(Box::new(MeshIoPetsc::new()?))
}

pub(crate) fn mesh_io_typed() -> GfResult<Box<dyn MeshIo>> {
    Ok(Box::new(MeshIoPetsc::new()?))
}

impl MeshIo for MeshIoPetsc {
    fn read(&mut self) -> GfResult<Mesh> {
        MeshIoPetsc::read(self)
    }

    fn write(&mut self, mesh: &Mesh) -> GfResult<()> {
        MeshIoPetsc::write(self, mesh)
    }
}

impl Component for MeshIoPetsc {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn bind_kernel(&mut self) -> GfResult<()> {
        // The empty default never went through the validator.
        let filename = validate_filename(PropertyValue::from(self.filename()?))
            .map_err(|e| GfError::validation("filename", e))?;
        let filename = filename.as_str().unwrap_or_default().to_string();
        let coordsys = self.core.coordsys("coordsys")?.info()?;
        let debug = self.debug()?;
        let interpolate = self.interpolate()?;

        self.kernel.bind(self.core.name(), |k| {
            k.set_filename(&filename);
            k.set_coordsys(coordsys);
            k.set_debug(debug);
            k.set_interpolate(interpolate);
            k.initialize()
        })
    }

    fn release_kernel(&mut self) {
        self.kernel.release();
    }
}
