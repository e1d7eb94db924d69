//! Handler für den Benutzer-Materialkatalog.

use crate::app::use_cases;
use crate::app::AppState;
use crate::materials::UserMaterialRecord;

/// Definiert ein Benutzermaterial und speichert den Katalog.
pub fn define(state: &mut AppState, name: &str, record: UserMaterialRecord) -> anyhow::Result<()> {
    use_cases::materials::define_user_material(state, name, record)
}

/// Entfernt ein Benutzermaterial aus dem Katalog.
pub fn remove(state: &mut AppState, name: &str) -> anyhow::Result<()> {
    use_cases::materials::remove_user_material(state, name)
}

/// Gibt das Überschreiben einer unlesbaren Katalogdatei frei.
pub fn confirm_overwrite(state: &mut AppState) {
    use_cases::materials::confirm_catalog_overwrite(state);
}

/// Baut die Materialauswahl neu auf.
pub fn refresh_choices(state: &mut AppState) {
    use_cases::materials::refresh_material_choices(state);
}
