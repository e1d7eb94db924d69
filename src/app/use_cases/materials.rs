//! Use-Cases für den Benutzer-Materialkatalog und die Materialauswahl.

use crate::app::AppState;
use crate::materials::UserMaterialRecord;
use anyhow::{Context, Result};

/// Legt ein Benutzermaterial im Katalog an (oder ersetzt es) und speichert.
///
/// Schlägt das Speichern fehl, bleibt der Eintrag im Speicher erhalten
/// und der Fehler wird gemeldet.
pub fn define_user_material(
    state: &mut AppState,
    name: &str,
    record: UserMaterialRecord,
) -> Result<()> {
    let name = name.trim();
    state
        .user_catalog
        .add(name, record)
        .with_context(|| format!("Benutzermaterial '{}' nicht gespeichert", name))?;

    state.ui.status_message = Some(format!("Material definiert: {}", name));
    log::info!("Benutzermaterial '{}' definiert", name);
    Ok(())
}

/// Entfernt ein Benutzermaterial aus dem Katalog.
///
/// Bereits in der Registry erzeugte Instanzen bleiben unverändert.
pub fn remove_user_material(state: &mut AppState, name: &str) -> Result<()> {
    let removed = state
        .user_catalog
        .remove(name)
        .with_context(|| format!("Benutzermaterial '{}' nicht entfernt", name))?;

    if removed {
        state.ui.status_message = Some(format!("Material entfernt: {}", name));
        log::info!("Benutzermaterial '{}' entfernt", name);
    } else {
        log::debug!("Benutzermaterial '{}' war nicht im Katalog", name);
    }
    Ok(())
}

/// Erlaubt das Überschreiben einer beim Öffnen unlesbaren Katalogdatei.
pub fn confirm_catalog_overwrite(state: &mut AppState) {
    if state.user_catalog.load_error().is_some() {
        state.user_catalog.confirm_overwrite();
        state.ui.status_message = Some("Benutzerkatalog wird beim Speichern ersetzt".to_string());
    }
}

/// Baut die Liste der wählbaren Materialnamen neu auf.
pub fn refresh_material_choices(state: &mut AppState) {
    let choices = match state.registry.as_ref() {
        Some(registry) => state.resolver.list_available(registry, &state.user_catalog),
        None => state
            .resolver
            .list_available(&crate::core::Registry::new(), &state.user_catalog),
    };
    log::debug!("{} Materialien waehlbar", choices.len());
    state.ui.material_choices = choices;
}
