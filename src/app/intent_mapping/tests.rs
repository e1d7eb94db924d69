use crate::app::use_cases::editing::InsertVolumeRequest;
use crate::app::{AppCommand, AppIntent, AppState};
use crate::core::Shape;

use super::map_intent_to_commands;

#[test]
fn save_requested_maps_to_save_file_without_path() {
    let state = AppState::new();

    let commands = map_intent_to_commands(&state, AppIntent::SaveRequested);

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::SaveFile { path: None }));
}

#[test]
fn insert_refreshes_view_and_syncs_viewer_in_order() {
    let state = AppState::new();
    let request = InsertVolumeRequest::new(
        "Det",
        "World",
        Shape::Sphere {
            rmin: 0.0,
            rmax: 5.0,
            start_phi: 0.0,
            delta_phi: 360.0,
            start_theta: 0.0,
            delta_theta: 180.0,
        },
        "G4_Si",
    );

    let commands = map_intent_to_commands(&state, AppIntent::InsertVolumeRequested { request });

    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[0], AppCommand::InsertVolume { .. }));
    assert!(matches!(commands[1], AppCommand::RefreshVolumeView));
    assert!(matches!(commands[2], AppCommand::SyncViewer));
    assert!(matches!(commands[3], AppCommand::RefreshMaterialChoices));
}

#[test]
fn delete_selected_without_selection_maps_to_nothing() {
    let mut state = AppState::new();
    assert!(map_intent_to_commands(&state, AppIntent::DeleteSelectedVolumeRequested).is_empty());

    state.ui.selected_volume = Some("Det".to_string());
    let commands = map_intent_to_commands(&state, AppIntent::DeleteSelectedVolumeRequested);
    assert!(matches!(
        &commands[0],
        AppCommand::DeleteVolume { name } if name == "Det"
    ));
}

#[test]
fn file_selected_reloads_everything() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::FileSelected {
            path: "welt.gdml".to_string(),
        },
    );

    assert!(matches!(&commands[0], AppCommand::LoadFile { path } if path == "welt.gdml"));
    assert!(commands
        .iter()
        .any(|c| matches!(c, AppCommand::RefreshMaterialChoices)));
    assert!(commands
        .iter()
        .any(|c| matches!(c, AppCommand::RefreshVolumeView)));
}
