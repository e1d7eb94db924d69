use approx::assert_relative_eq;
use gdml_editor::core::{Composition, DensityUnit, MaterialState};
use gdml_editor::materials::UserMaterialCatalog;
use gdml_editor::{
    parse_gdml, write_gdml, AppController, AppIntent, AppState, EditorError, EditorOptions,
    MaterialResolver, Registry, UserMaterialRecord,
};
use std::sync::Arc;

fn state_with_catalog(dir: &tempfile::TempDir) -> (AppState, AppController) {
    let options = EditorOptions {
        user_catalog_path: Some(dir.path().join("user_materials.json")),
        ..EditorOptions::default()
    };
    let mut state = AppState::from_options(options);
    let mut controller = AppController::new();
    controller
        .handle_intent(&mut state, AppIntent::NewWorldRequested)
        .expect("Neue World erwartet");
    (state, controller)
}

fn water() -> UserMaterialRecord {
    UserMaterialRecord::mixture(1.0, DensityUnit::GramPerCm3, &[("H", 0.112), ("O", 0.888)])
        .with_state(MaterialState::Liquid)
}

#[test]
fn test_user_material_survives_catalog_reopen_and_gdml_export() {
    let dir = tempfile::tempdir().expect("Tempdir erwartet");
    {
        let (mut state, mut controller) = state_with_catalog(&dir);
        controller
            .handle_intent(
                &mut state,
                AppIntent::DefineUserMaterialRequested {
                    name: "MyWater".to_string(),
                    record: water(),
                },
            )
            .expect("Definieren erwartet");
        assert!(state.ui.material_choices.iter().any(|n| n == "MyWater"));
    }

    // Neuer Zustand liest den Katalog von der Platte
    let (mut state, mut controller) = state_with_catalog(&dir);
    assert!(state.user_catalog.contains("MyWater"));
    controller
        .handle_intent(
            &mut state,
            AppIntent::ApplyMaterialRequested {
                volume: "World".to_string(),
                material: "MyWater".to_string(),
            },
        )
        .expect("Material erwartet");

    let registry = state.registry.as_ref().expect("Registry erwartet");
    let xml = write_gdml(registry).expect("Export erwartet");
    let reparsed = parse_gdml(&xml).expect("Re-Parsing erwartet");

    let material = reparsed.material("MyWater").expect("MyWater erwartet");
    assert_relative_eq!(material.density, 1.0);
    assert_eq!(material.state, Some(MaterialState::Liquid));
    match &material.composition {
        Composition::MassFractions(parts) => {
            let names: Vec<&str> = parts.iter().map(|(n, _)| n.as_str()).collect();
            assert_eq!(names, vec!["Hydrogen", "Oxygen"]);
        }
        other => panic!("Massenanteile erwartet, war {other:?}"),
    }
    assert!(reparsed.element("Hydrogen").is_some());
    assert!(reparsed.element("Oxygen").is_some());
}

#[test]
fn test_invalid_definition_is_rejected_and_not_listed() {
    let dir = tempfile::tempdir().expect("Tempdir erwartet");
    let (mut state, mut controller) = state_with_catalog(&dir);

    let broken =
        UserMaterialRecord::mixture(1.0, DensityUnit::GramPerCm3, &[("H", 0.5), ("O", 0.4)]);
    let err = controller
        .handle_intent(
            &mut state,
            AppIntent::DefineUserMaterialRequested {
                name: "Broken".to_string(),
                record: broken,
            },
        )
        .expect_err("Anteilssumme 0.9 muss abgelehnt werden");

    assert!(matches!(
        err.downcast_ref::<EditorError>(),
        Some(EditorError::InvalidMaterialRecord { .. })
    ));
    assert!(!state.ui.material_choices.iter().any(|n| n == "Broken"));
    assert!(!dir.path().join("user_materials.json").exists());
}

#[test]
fn test_removing_user_material_keeps_applied_instance() {
    let dir = tempfile::tempdir().expect("Tempdir erwartet");
    let (mut state, mut controller) = state_with_catalog(&dir);

    controller
        .handle_intent(
            &mut state,
            AppIntent::DefineUserMaterialRequested {
                name: "MyWater".to_string(),
                record: water(),
            },
        )
        .expect("Definieren erwartet");
    controller
        .handle_intent(
            &mut state,
            AppIntent::ApplyMaterialRequested {
                volume: "World".to_string(),
                material: "MyWater".to_string(),
            },
        )
        .expect("Material erwartet");
    controller
        .handle_intent(
            &mut state,
            AppIntent::RemoveUserMaterialRequested {
                name: "MyWater".to_string(),
            },
        )
        .expect("Entfernen erwartet");

    assert!(!state.user_catalog.contains("MyWater"));
    let registry = state.registry.as_ref().expect("Registry erwartet");
    assert_eq!(
        registry.volume("World").and_then(|v| v.material_name()),
        Some("MyWater")
    );
    // Instanz bleibt in der Registry und damit wählbar
    assert!(state.ui.material_choices.iter().any(|n| n == "MyWater"));
}

#[test]
fn test_reference_and_user_resolution_share_registry_elements() {
    let resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    let mut user = UserMaterialCatalog::in_memory();
    user.add("MyWater", water()).expect("Eintrag erwartet");

    let reference = resolver
        .resolve("G4_WATER", &mut registry, &user)
        .expect("G4_WATER erwartet");
    let custom = resolver
        .resolve("MyWater", &mut registry, &user)
        .expect("MyWater erwartet");
    let again = resolver
        .resolve("MyWater", &mut registry, &user)
        .expect("MyWater erwartet");

    assert!(Arc::ptr_eq(&custom, &again));
    assert!(!Arc::ptr_eq(&reference, &custom));
    assert_eq!(registry.material_count(), 2);
    assert_eq!(registry.element_count(), 2);
}

#[test]
fn test_unknown_names_fail_with_distinct_errors() {
    let resolver = MaterialResolver::new();
    let mut registry = Registry::new();
    let user = UserMaterialCatalog::in_memory();

    assert!(matches!(
        resolver.resolve("G4_UNOBTAINIUM", &mut registry, &user),
        Err(EditorError::UnknownReferenceMaterial(_))
    ));
    assert!(matches!(
        resolver.resolve("Unobtainium", &mut registry, &user),
        Err(EditorError::UnknownMaterial(_))
    ));
    assert_eq!(registry.material_count(), 0);
}
