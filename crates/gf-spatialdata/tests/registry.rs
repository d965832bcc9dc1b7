use gf_components::{FactoryRegistry, Settings, lifecycle};
use gf_core::LifecycleState;

fn registry() -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    gf_spatialdata::register(&mut registry).unwrap();
    registry
}

#[test]
fn registers_both_families() {
    let registry = registry();
    assert_eq!(registry.families(), vec!["coordsys", "spatial_db"]);
    let names: Vec<&str> = registry.entries("coordsys").iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["cscart", "csgeo"]);
    assert!(gf_spatialdata::register(&mut registry.clone()).is_err());
}

#[test]
fn coordsys_through_full_lifecycle() {
    let registry = registry();
    let mut cs = registry.create("coordsys", "csgeo").unwrap();
    lifecycle::initialize(cs.as_mut(), &Settings::new().with("units", "km"), &registry).unwrap();
    assert_eq!(cs.core().state(), LifecycleState::Active);

    let info = cs.as_coordsys().unwrap().info().unwrap();
    assert_eq!(info.kind, "csgeo");
    assert_eq!(info.to_meters, 1000.0);
    assert!(cs.as_spatial_db().is_none());
}

#[test]
fn spatial_db_capability() {
    let registry = registry();
    let mut db = registry.create("spatial_db", "uniformdb").unwrap();
    let settings = Settings::new()
        .with("values", vec!["density".to_string()])
        .with("data", vec![2700.0]);
    lifecycle::initialize(db.as_mut(), &settings, &registry).unwrap();

    let db = db.as_spatial_db().unwrap();
    assert_eq!(db.query(&["density"]).unwrap(), vec![2700.0]);
}
