//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Bricht beim ersten fehlgeschlagenen Command ab.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Datei-I/O ===
            AppCommand::RequestOpenFileDialog => handlers::file_io::request_open(state),
            AppCommand::RequestSaveFileDialog => handlers::file_io::request_save(state),
            AppCommand::LoadFile { path } => handlers::file_io::load(state, path)?,
            AppCommand::SaveFile { path } => handlers::file_io::save(state, path)?,
            AppCommand::NewWorld => handlers::file_io::new_world(state)?,

            // === Ansicht & Selektion ===
            AppCommand::SetSearchText { text } => handlers::view::set_search_text(state, text),
            AppCommand::SelectVolume { name } => handlers::view::select_volume(state, &name),
            AppCommand::RefreshVolumeView => handlers::view::refresh(state),

            // === Editing ===
            AppCommand::InsertVolume { request } => {
                handlers::editing::insert_volume(state, &request)?
            }
            AppCommand::DeleteVolume { name } => handlers::editing::delete_volume(state, &name)?,
            AppCommand::RenameVolume { old_name, new_name } => {
                handlers::editing::rename_volume(state, &old_name, &new_name)?
            }
            AppCommand::ApplyMaterial { volume, material } => {
                handlers::editing::apply_material(state, &volume, &material)?
            }

            // === Materialkatalog ===
            AppCommand::DefineUserMaterial { name, record } => {
                handlers::materials::define(state, &name, record)?
            }
            AppCommand::RemoveUserMaterial { name } => handlers::materials::remove(state, &name)?,
            AppCommand::ConfirmCatalogOverwrite => handlers::materials::confirm_overwrite(state),
            AppCommand::RefreshMaterialChoices => handlers::materials::refresh_choices(state),

            // === Viewer ===
            AppCommand::LaunchViewer => handlers::view::launch_viewer(state)?,
            AppCommand::SyncViewer => handlers::view::sync_viewer(state),

            // === Dialoge & Anwendungssteuerung ===
            AppCommand::RequestExit => handlers::dialog::request_exit(state),
            AppCommand::OpenOptionsDialog => handlers::dialog::open_options_dialog(state),
            AppCommand::CloseOptionsDialog => handlers::dialog::close_options_dialog(state),
            AppCommand::ApplyOptions { options } => {
                handlers::dialog::apply_options(state, options)?
            }
            AppCommand::ResetOptions => handlers::dialog::reset_options(state)?,
        }

        Ok(())
    }
}
