//! gf-core: stable foundation for geofem.
//!
//! Contains:
//! - error (shared error taxonomy: validation, lifecycle, kernel binding)
//! - lifecycle (component lifecycle states)
//! - value (property values and their semantic types)
//! - property (property declarations and the per-component inventory)
//! - validate (reusable validator functions)
//! - numeric (finite-value checks)
//! - units (uom SI types + constructors)

pub mod error;
pub mod lifecycle;
pub mod numeric;
pub mod property;
pub mod units;
pub mod validate;
pub mod value;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GfError, GfResult, KernelError, KernelResult, ValidationError};
pub use lifecycle::LifecycleState;
pub use numeric::*;
pub use property::{Inventory, PropertyDecl, PropertyValues, Validator};
pub use value::{PropertyValue, SemanticType};
