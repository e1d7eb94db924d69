//! Use-Cases für die Volumen-Ansicht (Baum oder gefilterte Liste).

use crate::app::AppState;
use crate::core::{volume_view, VolumeView};

/// Setzt den Suchtext und berechnet die Ansicht neu.
pub fn set_search_text(state: &mut AppState, text: String) {
    state.ui.search_text = text;
    refresh_volume_view(state);
}

/// Selektiert ein Volumen (unbekannte Namen werden ignoriert).
pub fn select_volume(state: &mut AppState, name: &str) {
    let known = state
        .registry
        .as_ref()
        .is_some_and(|registry| registry.contains_volume(name));
    if !known {
        log::warn!("Selektion von unbekanntem Volumen '{}' ignoriert", name);
        return;
    }
    state.ui.selected_volume = Some(name.to_string());
    update_expanded_path(state);
}

/// Berechnet die Ansicht komplett neu aus der Registry.
///
/// Die alte Ansicht wird immer vollständig ersetzt, auch beim Wechsel
/// zwischen Baum und Liste.
pub fn refresh_volume_view(state: &mut AppState) {
    let Some(registry) = state.registry.as_ref() else {
        state.ui.volume_view = None;
        state.ui.expanded_path.clear();
        return;
    };

    match volume_view(registry, &state.ui.search_text) {
        Ok(view) => state.ui.volume_view = Some(view),
        Err(e) => {
            log::warn!("Volumen-Ansicht nicht berechenbar: {}", e);
            state.ui.volume_view = None;
        }
    }

    // Selektion auf gelöschte/umbenannte Volumen verwerfen
    let stale = state
        .ui
        .selected_volume
        .as_deref()
        .is_some_and(|selected| !registry.contains_volume(selected));
    if stale {
        state.ui.selected_volume = registry.world_name().ok().map(str::to_string);
    }
    update_expanded_path(state);
}

/// Pfad World → Selektion im Baum (aufzuklappende Knoten).
fn update_expanded_path(state: &mut AppState) {
    let path = match (&state.ui.volume_view, state.ui.selected_volume.as_deref()) {
        (Some(VolumeView::Tree(tree)), Some(selected)) => tree
            .path_to(selected)
            .map(|path| path.into_iter().map(str::to_string).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    state.ui.expanded_path = path;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::{self, editing::InsertVolumeRequest};
    use crate::core::Shape;

    fn state_with_detector() -> AppState {
        let mut state = AppState::new();
        use_cases::file_io::new_world(&mut state).expect("World erwartet");
        let shape = Shape::Box {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        };
        use_cases::editing::insert_volume(
            &mut state,
            &InsertVolumeRequest::new("Detector", "World", shape.clone(), "G4_Si"),
        )
        .expect("Einfuegen erwartet");
        use_cases::editing::insert_volume(
            &mut state,
            &InsertVolumeRequest::new("Pixel", "Detector", shape, "G4_Si"),
        )
        .expect("Einfuegen erwartet");
        state
    }

    #[test]
    fn test_tree_and_flat_modes_are_exclusive() {
        let mut state = state_with_detector();
        refresh_volume_view(&mut state);
        assert!(matches!(state.ui.volume_view, Some(VolumeView::Tree(_))));
        assert_eq!(state.ui.expanded_path, vec!["World", "Detector", "Pixel"]);

        set_search_text(&mut state, "det".to_string());
        match state.ui.volume_view.as_ref() {
            Some(VolumeView::Flat(entries)) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].name, "Detector");
            }
            other => panic!("Flache Liste erwartet, war {other:?}"),
        }
        assert!(state.ui.expanded_path.is_empty());

        set_search_text(&mut state, "   ".to_string());
        let view = state.ui.volume_view.as_ref().expect("Ansicht erwartet");
        assert_eq!(view.names(), vec!["World", "Detector", "Pixel"]);
    }

    #[test]
    fn test_deleted_selection_falls_back_to_world() {
        let mut state = state_with_detector();
        state.ui.selected_volume = Some("Pixel".to_string());
        state
            .registry
            .as_mut()
            .expect("Registry erwartet")
            .remove_volume("Pixel")
            .expect("Loeschen erwartet");

        refresh_volume_view(&mut state);
        assert_eq!(state.ui.selected_volume.as_deref(), Some("World"));
        assert_eq!(state.ui.expanded_path, vec!["World"]);
    }

    #[test]
    fn test_select_unknown_volume_is_ignored() {
        let mut state = state_with_detector();
        select_volume(&mut state, "Ghost");
        assert_eq!(state.ui.selected_volume.as_deref(), Some("Pixel"));
    }
}
