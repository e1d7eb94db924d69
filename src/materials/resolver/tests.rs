use super::*;
use crate::core::{DensityUnit, MaterialState, PressureUnit, TemperatureUnit};
use anyhow::bail;
use approx::assert_relative_eq;

/// Referenzkatalog, der das Material registriert und trotzdem einen Fehler meldet.
struct FlakyCatalog;

impl ReferenceCatalog for FlakyCatalog {
    fn is_reference_name(&self, name: &str) -> bool {
        name.starts_with("G4_")
    }

    fn material_names(&self) -> anyhow::Result<Vec<String>> {
        bail!("Katalog offline")
    }

    fn materialize(&self, name: &str, registry: &mut Registry) -> anyhow::Result<Arc<Material>> {
        if name == "G4_PARTIAL" {
            registry.add_material(Material::new(
                name,
                1.0,
                Composition::Simple { z: 1.0, a: 1.0 },
            ))?;
        }
        bail!("Materialisierung fehlgeschlagen")
    }

    fn element(&self, _symbol: &str) -> Option<Element> {
        None
    }
}

fn water_mixture() -> UserMaterialRecord {
    UserMaterialRecord::mixture(1.0, DensityUnit::GramPerCm3, &[("H", 0.112), ("O", 0.888)])
}

#[test]
fn test_reference_material_is_materialized_once() {
    let resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    let user = UserMaterialCatalog::in_memory();

    let first = resolver
        .resolve("G4_AIR", &mut registry, &user)
        .expect("G4_AIR erwartet");
    let second = resolver
        .resolve("G4_AIR", &mut registry, &user)
        .expect("G4_AIR erwartet");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.material_count(), 1);
}

#[test]
fn test_registry_material_is_returned_unchanged() {
    let resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    let existing = registry
        .add_material(Material::new("Lead", 11.35, Composition::Simple { z: 82.0, a: 207.2 }))
        .expect("Material");
    let user = UserMaterialCatalog::in_memory();

    let resolved = resolver
        .resolve("Lead", &mut registry, &user)
        .expect("Lead erwartet");
    assert!(Arc::ptr_eq(&existing, &resolved));
}

#[test]
fn test_user_mixture_resolves_idempotently() {
    let resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    let mut user = UserMaterialCatalog::in_memory();
    user.add("MyWater", water_mixture()).expect("Eintrag");

    let first = resolver
        .resolve("MyWater", &mut registry, &user)
        .expect("MyWater erwartet");
    let second = resolver
        .resolve("MyWater", &mut registry, &user)
        .expect("MyWater erwartet");

    assert!(Arc::ptr_eq(&first, &second));
    assert_relative_eq!(first.density, 1.0);
    match &first.composition {
        Composition::MassFractions(parts) => {
            assert_eq!(parts.len(), 2);
            assert_eq!(parts[0].0, "Hydrogen");
        }
        other => panic!("Massenanteile erwartet, war {other:?}"),
    }
}

#[test]
fn test_invalid_mixture_fails_with_invalid_record() {
    let resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    // Ungültige Einträge können aus älteren Katalogdateien stammen
    let user: UserMaterialCatalog = serde_json::from_str::<std::collections::BTreeMap<String, UserMaterialRecord>>(
        r#"{"Broken": {"type": "mixture", "density": 1.0, "composition": [
            {"element": "H", "fraction": 0.5}, {"element": "O", "fraction": 0.4}]},
            "NoFormula": {"type": "compound", "density": 1.0, "composition": ""}}"#,
    )
    .map(catalog_from)
    .expect("JSON erwartet");

    assert!(matches!(
        resolver.resolve("Broken", &mut registry, &user),
        Err(EditorError::InvalidMaterialRecord { .. })
    ));
    assert!(matches!(
        resolver.resolve("NoFormula", &mut registry, &user),
        Err(EditorError::InvalidMaterialRecord { .. })
    ));
    assert_eq!(registry.material_count(), 0);
}

fn catalog_from(
    records: std::collections::BTreeMap<String, UserMaterialRecord>,
) -> UserMaterialCatalog {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        serde_json::to_string(&records).expect("Serialisierung"),
    )
    .expect("schreiben");
    // Einträge werden beim Öffnen nicht validiert
    UserMaterialCatalog::open(&path)
}

#[test]
fn test_compound_conversions_and_placeholder_elements() {
    let resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    let mut user = UserMaterialCatalog::in_memory();
    user.add(
        "WarmGas",
        UserMaterialRecord::compound(1290.0, DensityUnit::MilligramPerCm3, "Xx2O")
            .with_state(MaterialState::Gas)
            .with_temperature(25.0, TemperatureUnit::Celsius)
            .with_pressure(2.0, PressureUnit::Bar),
    )
    .expect("Eintrag");

    let material = resolver
        .resolve("WarmGas", &mut registry, &user)
        .expect("WarmGas erwartet");

    assert_relative_eq!(material.density, 1.29);
    assert_relative_eq!(material.temperature.unwrap_or_default(), 298.15);
    assert_relative_eq!(material.pressure.unwrap_or_default(), 2e5);
    assert_eq!(material.state, Some(MaterialState::Gas));
    assert_eq!(
        material.composition,
        Composition::AtomCounts(vec![("Xx".into(), 2), ("Oxygen".into(), 1)])
    );
    let placeholder = registry.element("Xx").expect("Platzhalter erwartet");
    assert_eq!(placeholder.z, 1.0);
    assert_eq!(placeholder.a, 1.0);
}

#[test]
fn test_unknown_names() {
    let resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    let user = UserMaterialCatalog::in_memory();

    assert!(matches!(
        resolver.resolve("Unobtainium", &mut registry, &user),
        Err(EditorError::UnknownMaterial(_))
    ));
    assert!(matches!(
        resolver.resolve("G4_UNOBTAINIUM", &mut registry, &user),
        Err(EditorError::UnknownReferenceMaterial(_))
    ));
}

#[test]
fn test_failed_materialization_falls_back_to_existing_entry() {
    let resolver = MaterialResolver::with_catalog(Box::new(FlakyCatalog));
    let mut registry = Registry::new();
    let user = UserMaterialCatalog::in_memory();

    let material = resolver
        .resolve("G4_PARTIAL", &mut registry, &user)
        .expect("Fallback erwartet");
    assert_eq!(material.name, "G4_PARTIAL");

    assert!(matches!(
        resolver.resolve("G4_OTHER", &mut registry, &user),
        Err(EditorError::UnknownReferenceMaterial(_))
    ));
}

#[test]
fn test_deleting_user_entry_keeps_materialized_instance() {
    let resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    let mut user = UserMaterialCatalog::in_memory();
    user.add("MyWater", water_mixture()).expect("Eintrag");

    let before = resolver
        .resolve("MyWater", &mut registry, &user)
        .expect("MyWater erwartet");
    user.remove("MyWater").expect("Entfernen");

    let after = resolver
        .resolve("MyWater", &mut registry, &user)
        .expect("Instanz bleibt in der Registry");
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn test_list_available_is_sorted_and_deduplicated() {
    let mut resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    let mut user = UserMaterialCatalog::in_memory();
    user.add("aluminium_foil", UserMaterialRecord::compound(2.7, DensityUnit::GramPerCm3, "Al"))
        .expect("Eintrag");
    user.add("MyWater", water_mixture()).expect("Eintrag");
    resolver
        .resolve("MyWater", &mut registry, &user)
        .expect("MyWater");
    resolver
        .resolve("G4_AIR", &mut registry, &user)
        .expect("G4_AIR");

    let names = resolver.list_available(&registry, &user);

    assert_eq!(names.iter().filter(|n| *n == "MyWater").count(), 1);
    assert_eq!(names.iter().filter(|n| *n == "G4_AIR").count(), 1);
    let lowered: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
    let mut sorted = lowered.clone();
    sorted.sort();
    assert_eq!(lowered, sorted);
    assert!(names.contains(&"aluminium_foil".to_string()));
}

#[test]
fn test_list_available_tolerates_offline_reference_catalog() {
    let mut resolver = MaterialResolver::with_catalog(Box::new(FlakyCatalog));
    let registry = Registry::new();
    let mut user = UserMaterialCatalog::in_memory();
    user.add("MyWater", water_mixture()).expect("Eintrag");

    assert_eq!(resolver.list_available(&registry, &user), vec!["MyWater".to_string()]);
}

#[test]
fn test_unreadable_catalog_entry_fails_with_invalid_record() {
    let dir = tempfile::tempdir().expect("Tempdir erwartet");
    let path = dir.path().join("user_materials.json");
    std::fs::write(
        &path,
        r#"{"Odd": {"type": "mixture", "density": 1.0, "density_unit": "g/cm3",
            "composition": [{"element": "H", "fraction": "viel"}]}}"#,
    )
    .expect("Schreiben erwartet");
    let user = UserMaterialCatalog::open(&path);
    let mut resolver = MaterialResolver::new();
    let mut registry = Registry::new();

    assert!(matches!(
        resolver.resolve("Odd", &mut registry, &user),
        Err(EditorError::InvalidMaterialRecord { .. })
    ));
    assert_eq!(registry.material_count(), 0);
    assert!(resolver
        .list_available(&registry, &user)
        .iter()
        .any(|name| name == "Odd"));
}
