//! Handler für Volumen-Ansicht, Selektion und externen Viewer.

use crate::app::use_cases;
use crate::app::AppState;

/// Setzt den Suchtext der Volumen-Ansicht.
pub fn set_search_text(state: &mut AppState, text: String) {
    use_cases::volume_view::set_search_text(state, text);
}

/// Selektiert ein Volumen.
pub fn select_volume(state: &mut AppState, name: &str) {
    use_cases::volume_view::select_volume(state, name);
}

/// Berechnet Baum bzw. Liste neu.
pub fn refresh(state: &mut AppState) {
    use_cases::volume_view::refresh_volume_view(state);
}

/// Startet den externen Viewer.
pub fn launch_viewer(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::viewer::launch_viewer(state)
}

/// Führt den laufenden Viewer nach.
pub fn sync_viewer(state: &mut AppState) {
    use_cases::viewer::sync_viewer(state);
}
