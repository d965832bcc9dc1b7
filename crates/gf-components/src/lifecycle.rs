//! Lifecycle engine shared by every component family.
//!
//! `configure` may run any number of times before `preinitialize`; later
//! values supersede earlier ones. `preinitialize` runs exactly once and
//! either binds the whole facility tree or tears it down. `activate` hands
//! the component to the driver. `destroy` releases kernels from any state.

use std::collections::BTreeMap;

use gf_core::{
    GfError, GfResult, LifecycleState, PropertyValue, PropertyValues, SemanticType,
    ValidationError,
};
use tracing::{debug, info, warn};

use crate::component::Component;
use crate::factory::FactoryRegistry;
use crate::settings::{Setting, Settings};

/// Validate and apply `settings`, resolving every facility through
/// `registry`.
///
/// Nothing is stored unless every value, cross-property check and nested
/// facility succeeds.
pub fn configure<C: Component + ?Sized>(
    component: &mut C,
    settings: &Settings,
    registry: &FactoryRegistry,
) -> GfResult<()> {
    let core = component.core();
    let mut chain = vec![identity(core.family(), core.kind())];
    configure_in_chain(component, settings, registry, &mut chain)
}

/// Bind kernels, children first. A second call is a lifecycle error and
/// leaves the existing binding untouched.
pub fn preinitialize<C: Component + ?Sized>(component: &mut C) -> GfResult<()> {
    let core = component.core();
    core.state()
        .require(core.name(), "preinitialize", &[LifecycleState::Configured])?;

    match bind_tree(component) {
        Ok(()) => {
            let core = component.core_mut();
            core.set_state(LifecycleState::Preinitialized);
            debug!(
                component = core.name(),
                prefix = core.logging_prefix(),
                "preinitialized"
            );
            Ok(())
        }
        Err(e) => {
            let core = component.core();
            warn!(
                component = core.name(),
                prefix = core.logging_prefix(),
                error = %e,
                "preinitialize failed"
            );
            destroy(component);
            Err(e)
        }
    }
}

/// Freeze configuration and hand the component tree to the driver.
pub fn activate<C: Component + ?Sized>(component: &mut C) -> GfResult<()> {
    let core = component.core();
    core.state()
        .require(core.name(), "activate", &[LifecycleState::Preinitialized])?;

    for child in component.core_mut().facilities_mut() {
        activate(&mut **child)?;
    }

    let core = component.core_mut();
    core.set_state(LifecycleState::Active);
    info!(component = core.name(), prefix = core.logging_prefix(), "active");
    Ok(())
}

/// Configure, preinitialize and activate in one go.
pub fn initialize<C: Component + ?Sized>(
    component: &mut C,
    settings: &Settings,
    registry: &FactoryRegistry,
) -> GfResult<()> {
    configure(component, settings, registry)?;
    preinitialize(component)?;
    activate(component)
}

/// Release the kernel and the facility subtree. Valid from any state.
pub fn destroy<C: Component + ?Sized>(component: &mut C) {
    component.release_kernel();
    for child in component.core_mut().facilities_mut() {
        destroy(&mut **child);
    }

    let core = component.core_mut();
    core.clear_facilities();
    core.set_state(LifecycleState::Destroyed);
    debug!(component = core.name(), prefix = core.logging_prefix(), "destroyed");
}

fn identity(family: &str, kind: &str) -> String {
    format!("{}/{}", family, kind)
}

fn configure_in_chain<C: Component + ?Sized>(
    component: &mut C,
    settings: &Settings,
    registry: &FactoryRegistry,
    chain: &mut Vec<String>,
) -> GfResult<()> {
    let core = component.core();
    core.state().require(
        core.name(),
        "configure",
        &[LifecycleState::Constructed, LifecycleState::Configured],
    )?;

    let mut staged = PropertyValues::default();
    let mut facility_settings = core.facility_settings().clone();

    for (name, setting) in settings.iter() {
        let decl = core
            .inventory()
            .get(name)
            .ok_or_else(|| GfError::UnknownProperty {
                component: core.name().to_string(),
                property: name.to_string(),
            })?;

        match (decl.ty(), setting) {
            (SemanticType::Facility { .. }, Setting::Facility(newer)) => {
                facility_settings
                    .entry(decl.name())
                    .or_default()
                    .overlay(newer);
            }
            // A bare string selects the variant by factory name.
            (SemanticType::Facility { .. }, Setting::Value(PropertyValue::Str(factory))) => {
                facility_settings
                    .entry(decl.name())
                    .or_default()
                    .overlay(&Settings::for_factory(factory.clone()));
            }
            (SemanticType::Facility { .. }, Setting::Value(other)) => {
                return Err(GfError::validation(
                    name,
                    ValidationError::WrongType {
                        expected: "facility",
                        found: other.type_name(),
                    },
                ));
            }
            (ty, Setting::Facility(_)) => {
                return Err(GfError::validation(
                    name,
                    ValidationError::WrongType {
                        expected: ty.name(),
                        found: "facility",
                    },
                ));
            }
            (_, Setting::Value(raw)) => {
                staged.insert(name, decl.accept(raw.clone())?);
            }
        }
    }

    let mut values = core.values().clone();
    values.merge(staged);
    component.check_configuration(&values)?;

    let core = component.core();
    let mut facilities = BTreeMap::new();
    let no_override = Settings::new();
    for decl in core.inventory().facilities() {
        let SemanticType::Facility {
            family,
            default_factory,
        } = decl.ty()
        else {
            continue;
        };
        let over = facility_settings.get(decl.name()).unwrap_or(&no_override);
        let child = resolve_facility(
            decl.name(),
            family,
            default_factory,
            over,
            registry,
            chain,
        )?;
        facilities.insert(decl.name(), child);
    }

    let core = component.core_mut();
    core.commit(values, facility_settings, facilities);
    debug!(
        component = core.name(),
        prefix = core.logging_prefix(),
        "configured"
    );
    Ok(())
}

fn resolve_facility(
    property: &'static str,
    family: &'static str,
    default_factory: &'static str,
    settings: &Settings,
    registry: &FactoryRegistry,
    chain: &mut Vec<String>,
) -> GfResult<Box<dyn Component>> {
    let factory = settings.factory().unwrap_or(default_factory);
    let id = identity(family, factory);
    if chain.contains(&id) {
        let mut links = chain.clone();
        links.push(id);
        return Err(GfError::CyclicFacility {
            chain: links.join(" -> "),
        });
    }

    let mut child = registry.create(family, factory)?;
    child.core_mut().set_name(property)?;

    chain.push(id);
    let result = configure_in_chain(child.as_mut(), settings, registry, chain);
    chain.pop();
    result.map_err(|e| nest(property, e))?;

    Ok(child)
}

/// Qualify a facility's validation failure with the owning property.
fn nest(property: &str, err: GfError) -> GfError {
    match err {
        GfError::Validation {
            property: inner,
            source,
        } => GfError::Validation {
            property: format!("{}.{}", property, inner),
            source,
        },
        other => other,
    }
}

fn bind_tree<C: Component + ?Sized>(component: &mut C) -> GfResult<()> {
    let core = component.core();
    for decl in core.inventory().iter() {
        if !decl.ty().is_facility() && !core.values().contains(decl.name()) {
            return Err(GfError::MissingProperty {
                component: core.name().to_string(),
                property: decl.name().to_string(),
            });
        }
    }

    for child in component.core_mut().facilities_mut() {
        preinitialize(&mut **child)?;
    }

    component.bind_kernel()
}
