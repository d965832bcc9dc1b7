//! gf-components: the configurable-component framework.
//!
//! A component is built by a named factory, configured from a settings
//! tree (facilities are resolved recursively through the same registry),
//! preinitialized exactly once to bind its numerical kernel, and then
//! activated for use by the simulation driver.
//!
//! # Example
//!
//! ```no_run
//! use gf_components::{FactoryRegistry, Settings, lifecycle};
//!
//! # fn demo(registry: &FactoryRegistry) -> gf_core::GfResult<()> {
//! let mut mesher = registry.create("mesh_io", "meshiopetsc")?;
//! let settings = Settings::new().with("filename", "box.msh");
//! lifecycle::configure(mesher.as_mut(), &settings, registry)?;
//! lifecycle::preinitialize(mesher.as_mut())?;
//! lifecycle::activate(mesher.as_mut())?;
//! # Ok(())
//! # }
//! ```

pub mod capability;
pub mod component;
pub mod factory;
pub mod fields;
pub mod kernel;
pub mod lifecycle;
pub mod settings;

// Re-exports
pub use capability::{CoordSys, CoordSysInfo, SpatialDb};
pub use component::{Component, ComponentCore};
pub use factory::{Factory, FactoryEntry, FactoryRegistry};
pub use fields::{AvailableFields, FieldCategory, FieldGroup, FieldLocation};
pub use kernel::KernelBinding;
pub use settings::{Setting, Settings};
