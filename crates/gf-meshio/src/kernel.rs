//! Contract between a mesh-I/O component and its reader/writer kernel.

use gf_components::CoordSysInfo;
use gf_core::KernelResult;

use crate::mesh::Mesh;

/// Opaque reader/writer for one mesh file format.
///
/// The component pushes the filename, coordinate system and flags, then
/// calls `initialize`; `read` and `write` are only used afterwards.
pub trait MeshIoKernel {
    fn set_filename(&mut self, filename: &str);

    fn set_coordsys(&mut self, coordsys: CoordSysInfo);

    fn set_debug(&mut self, debug: bool);

    fn set_interpolate(&mut self, interpolate: bool);

    /// Ready signal; a format kernel checks the file here.
    fn initialize(&mut self) -> KernelResult<()>;

    fn read(&mut self) -> KernelResult<Mesh>;

    fn write(&mut self, mesh: &Mesh) -> KernelResult<()>;
}
