//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Nach jeder Änderung der Geometrie: Ansicht neu, Viewer nachführen.
fn after_geometry_change(command: AppCommand) -> Vec<AppCommand> {
    vec![command, AppCommand::RefreshVolumeView, AppCommand::SyncViewer]
}

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::OpenFileRequested => vec![AppCommand::RequestOpenFileDialog],
        AppIntent::SaveRequested => vec![AppCommand::SaveFile { path: None }],
        AppIntent::SaveAsRequested => vec![AppCommand::RequestSaveFileDialog],
        AppIntent::ExitRequested => vec![AppCommand::RequestExit],
        AppIntent::FileSelected { path } => vec![
            AppCommand::LoadFile { path },
            AppCommand::RefreshVolumeView,
            AppCommand::RefreshMaterialChoices,
            AppCommand::SyncViewer,
        ],
        AppIntent::SaveFilePathSelected { path } => {
            vec![AppCommand::SaveFile { path: Some(path) }]
        }
        AppIntent::NewWorldRequested => vec![
            AppCommand::NewWorld,
            AppCommand::RefreshVolumeView,
            AppCommand::RefreshMaterialChoices,
            AppCommand::SyncViewer,
        ],

        AppIntent::SearchTextChanged { text } => vec![AppCommand::SetSearchText { text }],
        AppIntent::VolumeSelected { name } => vec![AppCommand::SelectVolume { name }],

        AppIntent::InsertVolumeRequested { request } => {
            let mut commands = after_geometry_change(AppCommand::InsertVolume { request });
            commands.push(AppCommand::RefreshMaterialChoices);
            commands
        }
        AppIntent::DeleteSelectedVolumeRequested => match state.ui.selected_volume.clone() {
            Some(name) => after_geometry_change(AppCommand::DeleteVolume { name }),
            None => Vec::new(),
        },
        AppIntent::DeleteVolumeRequested { name } => {
            after_geometry_change(AppCommand::DeleteVolume { name })
        }
        AppIntent::RenameVolumeRequested { old_name, new_name } => {
            after_geometry_change(AppCommand::RenameVolume { old_name, new_name })
        }
        AppIntent::ApplyMaterialRequested { volume, material } => {
            let mut commands = after_geometry_change(AppCommand::ApplyMaterial { volume, material });
            commands.push(AppCommand::RefreshMaterialChoices);
            commands
        }

        AppIntent::DefineUserMaterialRequested { name, record } => vec![
            AppCommand::DefineUserMaterial { name, record },
            AppCommand::RefreshMaterialChoices,
        ],
        AppIntent::RemoveUserMaterialRequested { name } => vec![
            AppCommand::RemoveUserMaterial { name },
            AppCommand::RefreshMaterialChoices,
        ],

        AppIntent::ConfirmCatalogOverwriteRequested => vec![AppCommand::ConfirmCatalogOverwrite],

        AppIntent::ViewInViewerRequested => vec![AppCommand::LaunchViewer],

        AppIntent::OpenOptionsDialogRequested => vec![AppCommand::OpenOptionsDialog],
        AppIntent::CloseOptionsDialogRequested => vec![AppCommand::CloseOptionsDialog],
        AppIntent::OptionsChanged { options } => vec![
            AppCommand::ApplyOptions { options },
            AppCommand::RefreshMaterialChoices,
        ],
        AppIntent::ResetOptionsRequested => vec![
            AppCommand::ResetOptions,
            AppCommand::RefreshMaterialChoices,
        ],
    }
}

#[cfg(test)]
mod tests;
