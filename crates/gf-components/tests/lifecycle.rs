//! Lifecycle engine behavior with small in-test component families.

use std::cell::RefCell;
use std::rc::Rc;

use gf_components::{
    Component, ComponentCore, CoordSys, CoordSysInfo, FactoryRegistry, KernelBinding, Settings,
    lifecycle,
};
use gf_core::{
    GfError, GfResult, Inventory, KernelError, KernelResult, LifecycleState, PropertyDecl,
    PropertyValue, PropertyValues, SemanticType, ValidationError, validate::validate_positive,
};

// ---------------------------------------------------------------------------
// A "frame" family standing in for coordinate systems.

struct Frame {
    core: ComponentCore,
}

fn frame_fixed() -> GfResult<Box<dyn Component>> {
    let inventory = Inventory::new(vec![PropertyDecl::int("dim", 3)])?;
    Ok(Box::new(Frame {
        core: ComponentCore::new("frame", "fixed", "fixed", inventory),
    }))
}

fn frame_scaled() -> GfResult<Box<dyn Component>> {
    let inventory = Inventory::new(vec![
        PropertyDecl::int("dim", 3),
        PropertyDecl::real("scale", 1.0).with_validator(validate_positive),
    ])?;
    Ok(Box::new(Frame {
        core: ComponentCore::new("frame", "scaled", "scaled", inventory),
    }))
}

impl Component for Frame {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn as_coordsys(&self) -> Option<&dyn CoordSys> {
        Some(self)
    }
}

impl CoordSys for Frame {
    fn info(&self) -> GfResult<CoordSysInfo> {
        // `fixed` frames have no scale.
        let to_meters = match self.core.inventory().get("scale") {
            Some(_) => self.core.real_value("scale")?,
            None => 1.0,
        };
        Ok(CoordSysInfo {
            kind: self.core.kind(),
            space_dim: self.core.int_value("dim")? as usize,
            to_meters,
        })
    }
}

// ---------------------------------------------------------------------------
// A "probe" family with a spy kernel.

trait ProbeKernel {
    fn set_target(&mut self, target: &str) -> KernelResult<()>;
    fn set_dim(&mut self, dim: usize);
}

#[derive(Debug, Default)]
struct SpyLog {
    built: usize,
    targets: Vec<String>,
    dims: Vec<usize>,
}

struct SpyKernel {
    log: Rc<RefCell<SpyLog>>,
}

impl ProbeKernel for SpyKernel {
    fn set_target(&mut self, target: &str) -> KernelResult<()> {
        if target == "reject" {
            return Err(KernelError::new("target rejected"));
        }
        self.log.borrow_mut().targets.push(target.to_string());
        Ok(())
    }

    fn set_dim(&mut self, dim: usize) {
        self.log.borrow_mut().dims.push(dim);
    }
}

struct Probe {
    core: ComponentCore,
    kernel: KernelBinding<dyn ProbeKernel>,
}

impl Probe {
    fn with_spy(log: Rc<RefCell<SpyLog>>) -> GfResult<Self> {
        let inventory = Inventory::new(vec![
            PropertyDecl::string("target", ""),
            PropertyDecl::real("gain", 1.0).with_validator(validate_positive),
            PropertyDecl::real("low", 0.0),
            PropertyDecl::real("high", 1.0),
            PropertyDecl::required("mode", SemanticType::Choice(&["fast", "slow"])),
            PropertyDecl::facility("frame", "frame", "fixed"),
        ])?;
        Ok(Self {
            core: ComponentCore::new("probe", "probe", "probe", inventory)
                .with_logging_prefix("Prb "),
            kernel: KernelBinding::new(move || {
                log.borrow_mut().built += 1;
                Box::new(SpyKernel { log: log.clone() }) as Box<dyn ProbeKernel>
            }),
        })
    }
}

impl Component for Probe {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn check_configuration(&self, values: &PropertyValues) -> GfResult<()> {
        let low = values.get("low").and_then(PropertyValue::as_real).unwrap_or(0.0);
        let high = values.get("high").and_then(PropertyValue::as_real).unwrap_or(1.0);
        if low > high {
            return Err(GfError::validation(
                "low",
                ValidationError::Inconsistent {
                    reason: "low must not exceed high".to_string(),
                },
            ));
        }
        Ok(())
    }

    fn bind_kernel(&mut self) -> GfResult<()> {
        let target = self.core.str_value("target")?.to_string();
        let dim = self.core.coordsys("frame")?.info()?.space_dim;
        self.kernel.bind(self.core.name(), |k| {
            k.set_dim(dim);
            k.set_target(&target)
        })
    }

    fn release_kernel(&mut self) {
        self.kernel.release();
    }
}

fn probe_default() -> GfResult<Box<dyn Component>> {
    Ok(Box::new(Probe::with_spy(Rc::new(RefCell::new(SpyLog::default())))?))
}

// ---------------------------------------------------------------------------
// A family whose default facility is itself.

struct Loop {
    core: ComponentCore,
}

impl Component for Loop {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

fn loop_a() -> GfResult<Box<dyn Component>> {
    let inventory = Inventory::new(vec![PropertyDecl::facility("next", "loop", "b")])?;
    Ok(Box::new(Loop {
        core: ComponentCore::new("loop", "a", "a", inventory),
    }))
}

fn loop_b() -> GfResult<Box<dyn Component>> {
    let inventory = Inventory::new(vec![PropertyDecl::facility("next", "loop", "a")])?;
    Ok(Box::new(Loop {
        core: ComponentCore::new("loop", "b", "b", inventory),
    }))
}

fn registry() -> FactoryRegistry {
    let mut r = FactoryRegistry::new();
    r.register("frame", "fixed", "fixed frame", frame_fixed).unwrap();
    r.register("frame", "scaled", "scaled frame", frame_scaled).unwrap();
    r.register("probe", "probe", "probe with spy kernel", probe_default).unwrap();
    r.register("loop", "a", "points at b", loop_a).unwrap();
    r.register("loop", "b", "points at a", loop_b).unwrap();
    r
}

fn spy_probe() -> (Probe, Rc<RefCell<SpyLog>>) {
    let log = Rc::new(RefCell::new(SpyLog::default()));
    (Probe::with_spy(log.clone()).unwrap(), log)
}

fn base_settings() -> Settings {
    Settings::new().with("target", "t1").with("mode", "fast")
}

// ---------------------------------------------------------------------------

#[test]
fn constructed_state_has_defaults_and_no_facilities() {
    let (probe, log) = spy_probe();
    assert_eq!(probe.core().state(), LifecycleState::Constructed);
    assert_eq!(probe.core().real_value("gain").unwrap(), 1.0);
    assert!(probe.core().facility("frame").is_err());
    assert_eq!(log.borrow().built, 0);
}

#[test]
fn configure_resolves_default_facility() {
    let (mut probe, _) = spy_probe();
    lifecycle::configure(&mut probe, &base_settings(), &registry()).unwrap();

    assert_eq!(probe.core().state(), LifecycleState::Configured);
    let frame = probe.core().facility("frame").unwrap();
    assert_eq!(frame.core().kind(), "fixed");
    assert_eq!(frame.core().name(), "frame");
    assert_eq!(frame.core().state(), LifecycleState::Configured);
}

#[test]
fn facility_override_by_name_and_by_settings() {
    let registry = registry();

    let (mut by_name, _) = spy_probe();
    lifecycle::configure(&mut by_name, &base_settings().with("frame", "scaled"), &registry)
        .unwrap();
    assert_eq!(by_name.core().facility("frame").unwrap().core().kind(), "scaled");

    let (mut by_settings, _) = spy_probe();
    let settings = base_settings().with_facility(
        "frame",
        Settings::for_factory("scaled").with("scale", 1000.0),
    );
    lifecycle::configure(&mut by_settings, &settings, &registry).unwrap();
    let info = by_settings.core().coordsys("frame").unwrap().info().unwrap();
    assert_eq!(info.kind, "scaled");
    assert_eq!(info.to_meters, 1000.0);
}

#[test]
fn nested_validation_error_names_path() {
    let (mut probe, _) = spy_probe();
    let settings = base_settings()
        .with_facility("frame", Settings::for_factory("scaled").with("scale", -1.0));
    let err = lifecycle::configure(&mut probe, &settings, &registry()).unwrap_err();
    assert!(
        matches!(err, GfError::Validation { ref property, .. } if property == "frame.scale"),
        "{err}"
    );
    assert_eq!(probe.core().state(), LifecycleState::Constructed);
}

#[test]
fn unknown_factory_and_property() {
    let registry = registry();
    let (mut probe, _) = spy_probe();
    let err = lifecycle::configure(&mut probe, &base_settings().with("frame", "polar"), &registry)
        .unwrap_err();
    assert!(matches!(err, GfError::UnknownFactory { .. }));

    let err = lifecycle::configure(&mut probe, &Settings::new().with("gian", 2.0), &registry)
        .unwrap_err();
    assert!(matches!(err, GfError::UnknownProperty { ref property, .. } if property == "gian"));
}

#[test]
fn wrong_kind_of_setting_is_validation_error() {
    let registry = registry();
    let (mut probe, _) = spy_probe();
    let err = lifecycle::configure(&mut probe, &Settings::new().with("frame", 3_i64), &registry)
        .unwrap_err();
    assert!(matches!(err, GfError::Validation { .. }));

    let err = lifecycle::configure(
        &mut probe,
        &Settings::new().with_facility("gain", Settings::new()),
        &registry,
    )
    .unwrap_err();
    assert!(matches!(err, GfError::Validation { .. }));
}

#[test]
fn failed_configure_mutates_nothing() {
    let registry = registry();
    let (mut probe, _) = spy_probe();
    lifecycle::configure(&mut probe, &base_settings().with("gain", 2.0), &registry).unwrap();

    let bad = Settings::new().with("gain", 5.0).with("low", 3.0).with("high", 1.0);
    let err = lifecycle::configure(&mut probe, &bad, &registry).unwrap_err();
    assert!(matches!(
        err,
        GfError::Validation {
            source: ValidationError::Inconsistent { .. },
            ..
        }
    ));
    assert_eq!(probe.core().real_value("gain").unwrap(), 2.0);
}

#[test]
fn second_configure_supersedes_first() {
    let registry = registry();
    let (mut probe, _) = spy_probe();
    lifecycle::configure(
        &mut probe,
        &base_settings().with("gain", 2.0).with("high", 5.0),
        &registry,
    )
    .unwrap();
    lifecycle::configure(&mut probe, &Settings::new().with("gain", 3.0), &registry).unwrap();

    assert_eq!(probe.core().real_value("gain").unwrap(), 3.0);
    assert_eq!(probe.core().real_value("high").unwrap(), 5.0);
    assert_eq!(probe.core().str_value("target").unwrap(), "t1");
}

#[test]
fn facility_settings_accumulate_across_configures() {
    let registry = registry();
    let (mut probe, _) = spy_probe();
    lifecycle::configure(
        &mut probe,
        &base_settings().with_facility("frame", Settings::for_factory("scaled").with("dim", 2_i64)),
        &registry,
    )
    .unwrap();
    lifecycle::configure(
        &mut probe,
        &Settings::new().with_facility("frame", Settings::new().with("scale", 10.0)),
        &registry,
    )
    .unwrap();

    let info = probe.core().coordsys("frame").unwrap().info().unwrap();
    assert_eq!(info.kind, "scaled");
    assert_eq!(info.space_dim, 2);
    assert_eq!(info.to_meters, 10.0);
}

#[test]
fn preinitialize_binds_once_and_refuses_reentry() {
    let registry = registry();
    let (mut probe, log) = spy_probe();
    lifecycle::configure(&mut probe, &base_settings(), &registry).unwrap();

    lifecycle::preinitialize(&mut probe).unwrap();
    assert_eq!(probe.core().state(), LifecycleState::Preinitialized);
    assert_eq!(
        probe.core().facility("frame").unwrap().core().state(),
        LifecycleState::Preinitialized
    );
    assert_eq!(log.borrow().targets, vec!["t1".to_string()]);
    assert_eq!(log.borrow().dims, vec![3]);

    let err = lifecycle::preinitialize(&mut probe).unwrap_err();
    assert!(matches!(
        err,
        GfError::Lifecycle {
            operation: "preinitialize",
            state: LifecycleState::Preinitialized,
            ..
        }
    ));
    assert_eq!(probe.core().state(), LifecycleState::Preinitialized);
    assert!(probe.kernel.is_bound());
    assert_eq!(log.borrow().built, 1);
    assert_eq!(log.borrow().targets.len(), 1);
}

#[test]
fn preinitialize_before_configure_is_lifecycle_error() {
    let (mut probe, log) = spy_probe();
    let err = lifecycle::preinitialize(&mut probe).unwrap_err();
    assert!(matches!(err, GfError::Lifecycle { .. }));
    assert_eq!(probe.core().state(), LifecycleState::Constructed);
    assert_eq!(log.borrow().built, 0);
}

#[test]
fn missing_required_property_tears_down() {
    let registry = registry();
    let (mut probe, log) = spy_probe();
    lifecycle::configure(&mut probe, &Settings::new().with("target", "t1"), &registry).unwrap();

    let err = lifecycle::preinitialize(&mut probe).unwrap_err();
    assert!(matches!(err, GfError::MissingProperty { ref property, .. } if property == "mode"));
    assert_eq!(probe.core().state(), LifecycleState::Destroyed);
    assert_eq!(log.borrow().built, 0);

    let err = lifecycle::preinitialize(&mut probe).unwrap_err();
    assert!(matches!(err, GfError::Lifecycle { .. }));
}

#[test]
fn kernel_rejection_leaves_nothing_bound() {
    let registry = registry();
    let (mut probe, log) = spy_probe();
    lifecycle::configure(&mut probe, &base_settings().with("target", "reject"), &registry)
        .unwrap();

    let err = lifecycle::preinitialize(&mut probe).unwrap_err();
    assert!(matches!(err, GfError::KernelBinding { ref component, .. } if component == "probe"));
    assert!(!probe.kernel.is_bound());
    assert_eq!(probe.core().state(), LifecycleState::Destroyed);
    assert!(probe.core().facility("frame").is_err());
    assert!(log.borrow().targets.is_empty());
}

#[test]
fn configure_after_preinitialize_is_refused() {
    let registry = registry();
    let (mut probe, _) = spy_probe();
    lifecycle::configure(&mut probe, &base_settings(), &registry).unwrap();
    lifecycle::preinitialize(&mut probe).unwrap();

    let err = lifecycle::configure(&mut probe, &Settings::new().with("gain", 4.0), &registry)
        .unwrap_err();
    assert!(matches!(err, GfError::Lifecycle { operation: "configure", .. }));
    assert_eq!(probe.core().real_value("gain").unwrap(), 1.0);
}

#[test]
fn activate_and_destroy() {
    let registry = registry();
    let (mut probe, _) = spy_probe();

    assert!(lifecycle::activate(&mut probe).is_err());
    lifecycle::initialize(&mut probe, &base_settings(), &registry).unwrap();
    assert_eq!(probe.core().state(), LifecycleState::Active);
    assert_eq!(
        probe.core().facility("frame").unwrap().core().state(),
        LifecycleState::Active
    );
    probe.core().require_active("probe").unwrap();

    lifecycle::destroy(&mut probe);
    assert_eq!(probe.core().state(), LifecycleState::Destroyed);
    assert!(!probe.kernel.is_bound());
    assert!(probe.core().require_active("probe").is_err());
}

#[test]
fn cyclic_default_facilities_detected() {
    let registry = registry();
    let mut a = registry.create("loop", "a").unwrap();
    let err = lifecycle::configure(a.as_mut(), &Settings::new(), &registry).unwrap_err();
    match err {
        GfError::CyclicFacility { chain } => assert_eq!(chain, "loop/a -> loop/b -> loop/a"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn registry_lookup_and_listing() {
    let mut registry = registry();
    assert!(registry.contains("frame", "scaled"));
    assert!(!registry.contains("frame", "polar"));
    assert_eq!(registry.families(), vec!["frame", "loop", "probe"]);
    let names: Vec<&str> = registry.entries("frame").iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["fixed", "scaled"]);

    assert!(matches!(
        registry.register("frame", "fixed", "again", frame_fixed),
        Err(GfError::DuplicateFactory { .. })
    ));
    assert!(matches!(
        registry.create("frame", "polar"),
        Err(GfError::UnknownFactory { .. })
    ));

    // Each call builds an independent instance.
    let mut first = registry.create("frame", "fixed").unwrap();
    let second = registry.create("frame", "fixed").unwrap();
    first.core_mut().set_name("renamed").unwrap();
    assert_eq!(second.core().name(), "fixed");
}

#[test]
fn registry_rejects_family_mismatch() {
    let mut registry = FactoryRegistry::new();
    registry.register("probe", "fixed", "misfiled", frame_fixed).unwrap();
    assert!(matches!(
        registry.create("probe", "fixed"),
        Err(GfError::Invariant { .. })
    ));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn later_configure_wins(first in 0.001_f64..1.0e6, second in 0.001_f64..1.0e6, touch_low in any::<bool>()) {
            let registry = registry();
            let (mut probe, _) = spy_probe();
            lifecycle::configure(&mut probe, &base_settings().with("gain", first), &registry).unwrap();

            let mut later = Settings::new().with("gain", second);
            if touch_low {
                later.set("low", -1.0);
            }
            lifecycle::configure(&mut probe, &later, &registry).unwrap();

            prop_assert_eq!(probe.core().real_value("gain").unwrap(), second);
            let expected_low = if touch_low { -1.0 } else { 0.0 };
            prop_assert_eq!(probe.core().real_value("low").unwrap(), expected_low);
            prop_assert_eq!(probe.core().str_value("target").unwrap(), "t1");
        }
    }
}
