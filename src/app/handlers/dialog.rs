//! Handler für Dialog-State und Anwendungssteuerung.

use crate::app::state::{resolver_for, user_catalog_for};
use crate::app::AppState;
use crate::shared::EditorOptions;

/// Markiert die Anwendung zum Beenden.
pub fn request_exit(state: &mut AppState) {
    state.should_exit = true;
}

/// Öffnet den Optionen-Dialog.
pub fn open_options_dialog(state: &mut AppState) {
    state.ui.show_options_dialog = true;
}

/// Schließt den Optionen-Dialog.
pub fn close_options_dialog(state: &mut AppState) {
    state.ui.show_options_dialog = false;
}

/// Übernimmt neue Optionen und persistiert sie in der aktiven Konfigurationsdatei.
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    install_options(state, options);
    match state.config_path.as_deref() {
        Some(path) => state.options.save_to_file(path),
        None => {
            log::debug!("Keine Optionen-Datei gesetzt, Optionen nur im Speicher");
            Ok(())
        }
    }
}

/// Setzt Optionen auf Standardwerte zurück und persistiert sie.
pub fn reset_options(state: &mut AppState) -> anyhow::Result<()> {
    apply_options(state, EditorOptions::default())
}

/// Setzt Optionen im State und passt abhängige Teile an.
///
/// Ein geänderter Referenzpräfix ersetzt den Resolver (samt Namens-Cache),
/// ein geänderter Katalogpfad öffnet den Benutzerkatalog neu.
fn install_options(state: &mut AppState, options: EditorOptions) {
    if options.reference_prefix != state.options.reference_prefix {
        log::info!(
            "Referenzpraefix geaendert: '{}' -> '{}'",
            state.options.reference_prefix,
            options.reference_prefix
        );
        state.resolver = resolver_for(&options);
    }
    if options.user_catalog_path != state.options.user_catalog_path {
        state.user_catalog = user_catalog_for(&options);
    }
    state.command_log.set_capacity(options.command_log_capacity);
    state.options = options;
}
