//! Handler für Volumen-Bearbeitung.

use crate::app::use_cases;
use crate::app::use_cases::editing::InsertVolumeRequest;
use crate::app::AppState;

/// Fügt ein neues Volumen ein.
pub fn insert_volume(state: &mut AppState, request: &InsertVolumeRequest) -> anyhow::Result<()> {
    use_cases::editing::insert_volume(state, request)
}

/// Löscht ein Volumen samt Platzierungen.
pub fn delete_volume(state: &mut AppState, name: &str) -> anyhow::Result<()> {
    use_cases::editing::delete_volume(state, name)
}

/// Benennt ein Volumen um.
pub fn rename_volume(state: &mut AppState, old_name: &str, new_name: &str) -> anyhow::Result<()> {
    use_cases::editing::rename_volume(state, old_name, new_name)
}

/// Weist einem Volumen ein Material zu.
pub fn apply_material(state: &mut AppState, volume: &str, material: &str) -> anyhow::Result<()> {
    use_cases::editing::apply_material(state, volume, material)
}
