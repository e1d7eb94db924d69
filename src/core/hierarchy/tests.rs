use super::*;
use crate::core::{Composition, Daughter, Material, Placement, VolumeKind, VolumeRef};
use std::sync::Arc;

fn registry_with(volumes: &[&str], world: &str) -> Registry {
    let mut registry = Registry::new();
    let material = registry
        .add_material(Material::new(
            "G4_AIR",
            0.00120479,
            Composition::MassFractions(vec![("N".into(), 0.7), ("O".into(), 0.3)]),
        ))
        .expect("Material");
    for name in volumes {
        registry
            .add_volume(*name, VolumeKind::shaped(format!("{name}_solid"), Arc::clone(&material)))
            .expect("Volumen");
    }
    registry.set_world(world).expect("World");
    registry
}

fn place(registry: &mut Registry, parent: &str, child: &str, pv: &str) {
    let parent = registry.handle(parent).expect("Eltern");
    let child = registry.handle(child).expect("Kind");
    registry
        .add_placement(Placement::new(pv, parent, child), true)
        .expect("Platzierung");
}

#[test]
fn test_union_recovers_child_missing_from_placements() {
    // W enthält A (Platzierung); A listet B nur in seiner Kinderliste
    let mut registry = registry_with(&["W", "A", "B"], "W");
    registry.record_placement(Placement::new(
        "A_pv",
        VolumeRef::name("W"),
        VolumeRef::name("A"),
    ));
    registry
        .link_daughter(
            "A",
            Daughter {
                placement: "B_pv".into(),
                child: VolumeRef::name("B"),
            },
        )
        .expect("Kind verknüpfen");

    let tree = reconcile(&registry).expect("Baum erwartet");
    assert_eq!(tree.root.name, "W");
    assert_eq!(tree.root.children.len(), 1);
    assert_eq!(tree.root.children[0].name, "A");
    assert_eq!(tree.root.children[0].children[0].name, "B");
    assert_eq!(tree.path_to("B"), Some(vec!["W", "A", "B"]));
}

#[test]
fn test_consistent_sources_yield_identical_trees() {
    let mut registry = registry_with(&["World", "a", "B", "c"], "World");
    place(&mut registry, "World", "B", "B_pv");
    place(&mut registry, "World", "a", "a_pv");
    place(&mut registry, "a", "c", "c_pv");

    let union = reconcile_from(&registry, ChildSource::Union).expect("Union");
    let placements = reconcile_from(&registry, ChildSource::Placements).expect("Platzierungen");
    let daughters = reconcile_from(&registry, ChildSource::Daughters).expect("Kinderlisten");

    assert_eq!(union, placements);
    assert_eq!(union, daughters);
    assert_eq!(
        child_map(&registry, ChildSource::Placements),
        child_map(&registry, ChildSource::Daughters)
    );
}

#[test]
fn test_children_sorted_case_insensitive() {
    let mut registry = registry_with(&["World", "beta", "Alpha", "Gamma"], "World");
    place(&mut registry, "World", "Gamma", "g_pv");
    place(&mut registry, "World", "beta", "b_pv");
    place(&mut registry, "World", "Alpha", "a_pv");

    let tree = reconcile(&registry).expect("Baum erwartet");
    let names: Vec<&str> = tree.root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "beta", "Gamma"]);
}

#[test]
fn test_cycle_terminates_and_visits_each_volume_once() {
    let mut registry = registry_with(&["W", "A", "B"], "W");
    place(&mut registry, "W", "A", "A_pv");
    place(&mut registry, "A", "B", "B_pv");
    // Defekt: B platziert A
    place(&mut registry, "B", "A", "A_in_B_pv");

    let tree = reconcile(&registry).expect("Baum erwartet");
    let names: Vec<&str> = tree.iter().map(|(_, n)| n.name.as_str()).collect();
    assert_eq!(names, vec!["W", "A", "B"]);
    assert_eq!(tree.node_count(), 3);
}

#[test]
fn test_self_placement_is_cut() {
    let mut registry = registry_with(&["W"], "W");
    place(&mut registry, "W", "W", "W_in_W");
    let tree = reconcile(&registry).expect("Baum erwartet");
    assert!(tree.root.children.is_empty());
}

#[test]
fn test_occurrences_count_distinct_placements_across_sources() {
    let mut registry = registry_with(&["W", "Pixel"], "W");
    place(&mut registry, "W", "Pixel", "Pixel_pv_0");
    place(&mut registry, "W", "Pixel", "Pixel_pv_1");
    // Nur im Dictionary
    registry.record_placement(Placement::new(
        "Pixel_pv_2",
        VolumeRef::name("W"),
        VolumeRef::name("Pixel"),
    ));

    let tree = reconcile(&registry).expect("Baum erwartet");
    assert_eq!(tree.root.children.len(), 1);
    assert_eq!(tree.root.children[0].occurrences, 3);
    assert_eq!(tree.root.occurrences, 1);
}

#[test]
fn test_assembly_and_unknown_volumes_are_labelled_assembly() {
    let mut registry = registry_with(&["W"], "W");
    registry
        .add_volume("Group", VolumeKind::Assembly)
        .expect("Assembly");
    registry
        .add_volume(
            "Hollow",
            VolumeKind::Shaped {
                solid: "Hollow_solid".into(),
                material: None,
            },
        )
        .expect("Volumen");
    place(&mut registry, "W", "Group", "Group_pv");
    place(&mut registry, "Group", "Hollow", "Hollow_pv");
    // Veralteter Name, zu dem es kein Volumen gibt
    registry.record_placement(Placement::new(
        "Ghost_pv",
        VolumeRef::name("W"),
        VolumeRef::name("Ghost"),
    ));

    let tree = reconcile(&registry).expect("Baum erwartet");
    let labels: Vec<(String, String)> = tree
        .iter()
        .map(|(_, n)| (n.name.clone(), n.material.to_string()))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("W".to_string(), "G4_AIR".to_string()),
            ("Ghost".to_string(), ASSEMBLY_LABEL.to_string()),
            ("Group".to_string(), ASSEMBLY_LABEL.to_string()),
            ("Hollow".to_string(), ASSEMBLY_LABEL.to_string()),
        ]
    );
}

#[test]
fn test_reconcile_after_mutation_reflects_new_state() {
    let mut registry = registry_with(&["W", "A", "B"], "W");
    place(&mut registry, "W", "A", "A_pv");
    place(&mut registry, "A", "B", "B_pv");
    assert!(reconcile(&registry).expect("Baum").contains("B"));

    registry.rename_volume("B", "Bravo").expect("Umbenennen");
    let tree = reconcile(&registry).expect("Baum");
    assert!(tree.contains("Bravo"));
    assert!(!tree.contains("B"));

    registry.remove_volume("A").expect("Löschen");
    let tree = reconcile(&registry).expect("Baum");
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_reconcile_without_world_fails() {
    let registry = Registry::new();
    assert!(matches!(reconcile(&registry), Err(EditorError::NoWorldVolume)));
}

#[test]
fn test_filter_is_case_insensitive_and_sorted_by_name() {
    let mut registry = registry_with(&["World", "DetectorB", "detectorA", "Shield"], "World");
    registry
        .add_volume("DetGroup", VolumeKind::Assembly)
        .expect("Assembly");

    let entries = filter_volumes(&registry, "  DET ");
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["DetGroup", "DetectorB", "detectorA"]);
    assert_eq!(entries[0].material, MaterialLabel::Assembly);
}

#[test]
fn test_volume_view_switches_modes_totally() {
    let mut registry = registry_with(&["World", "Target"], "World");
    place(&mut registry, "World", "Target", "Target_pv");

    let tree = volume_view(&registry, "   ").expect("Ansicht");
    assert!(matches!(tree, VolumeView::Tree(_)));
    assert_eq!(tree.names(), vec!["World", "Target"]);

    let flat = volume_view(&registry, "targ").expect("Ansicht");
    assert_eq!(flat.names(), vec!["Target"]);

    // Flache Liste auch ohne World möglich
    let empty = Registry::new();
    assert!(matches!(
        volume_view(&empty, "x"),
        Ok(VolumeView::Flat(entries)) if entries.is_empty()
    ));
}

#[test]
fn test_render_text_indents_children() {
    let mut registry = registry_with(&["World", "Target"], "World");
    place(&mut registry, "World", "Target", "Target_pv");
    let text = reconcile(&registry).expect("Baum").render_text();
    assert_eq!(text, "World [G4_AIR]\n  Target [G4_AIR]\n");
}

#[test]
fn test_deeply_nested_chain_does_not_exhaust_stack() {
    const DEPTH: usize = 20_000;
    let names: Vec<String> = (0..DEPTH).map(|level| format!("L{level}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut registry = registry_with(&refs, "L0");
    for pair in names.windows(2) {
        place(&mut registry, &pair[0], &pair[1], &format!("{}_pv", pair[1]));
    }

    let tree = reconcile(&registry).expect("Baum erwartet");

    assert_eq!(tree.node_count(), DEPTH);
    let path = tree.path_to("L19999").expect("Pfad erwartet");
    assert_eq!(path.len(), DEPTH);
    assert_eq!(path[1], "L1");
}
