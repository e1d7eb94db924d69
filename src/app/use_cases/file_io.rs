//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::AppState;
use crate::core::{
    Composition, EditorError, Element, LengthUnit, Material, MaterialState, Registry, Shape,
    Solid, VolumeKind,
};
use crate::materials::{MaterialResolver, UserMaterialCatalog};
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;

/// Name des World-Volumens einer neuen Geometrie
pub const NEW_WORLD_NAME: &str = "World";
/// Solid des World-Volumens einer neuen Geometrie
pub const NEW_WORLD_SOLID: &str = "WorldSolid";
/// Kantenparameter des World-Würfels in mm (5 m Würfel)
pub const NEW_WORLD_EXTENT_MM: f64 = 2500.0;
/// Material des World-Volumens einer neuen Geometrie
pub const NEW_WORLD_MATERIAL: &str = "G4_AIR";

/// Öffnet den Open-Datei-Dialog über UI-State.
pub fn request_open_file(state: &mut AppState) {
    state.ui.show_file_dialog = true;
}

/// Öffnet den Save-Datei-Dialog über UI-State.
pub fn request_save_file(state: &mut AppState) {
    state.ui.show_save_file_dialog = true;
}

/// Parst GDML; Fehler der Geometrie-Schicht werden zu `ExternalLibraryFailure`.
pub fn read_gdml(content: &str) -> Result<Registry, EditorError> {
    crate::xml::parse_gdml(content)
        .map_err(|e| EditorError::ExternalLibraryFailure(format!("{e:#}")))
}

/// Schreibt GDML; Fehler der Geometrie-Schicht werden zu `ExternalLibraryFailure`.
pub fn render_gdml(registry: &Registry) -> Result<String, EditorError> {
    crate::xml::write_gdml(registry)
        .map_err(|e| EditorError::ExternalLibraryFailure(format!("{e:#}")))
}

/// Lädt die ausgewählte Datei in den AppState.
///
/// Die Registry wird komplett ersetzt; bei einem Fehler bleibt die
/// bisherige Registry unverändert.
pub fn load_selected_file(state: &mut AppState, path: String) -> Result<()> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Datei '{}' nicht lesbar", path))?;
    let registry =
        read_gdml(&content).with_context(|| format!("GDML '{}' nicht ladbar", path))?;

    log::info!(
        "GDML geladen: {} Volumen, {} Platzierungen, {} Materialien",
        registry.volume_count(),
        registry.placement_count(),
        registry.material_count()
    );

    state.ui.selected_volume = registry.world_name().ok().map(str::to_string);
    state.ui.current_file_path = Some(path.clone());
    state.ui.modified = false;
    state.ui.status_message = Some(format!("Geladen: {}", path));
    state.registry = Some(registry);
    Ok(())
}

/// Speichert die aktuelle Datei (wenn Pfad bekannt) oder öffnet Dialog.
pub fn save_current_file(state: &mut AppState) -> Result<()> {
    if let Some(path) = state.ui.current_file_path.clone() {
        write_registry_to_file(state, &path)?;
        state.ui.modified = false;
        log::info!("Datei gespeichert: {}", path);
    } else {
        // Kein Pfad bekannt → Save As Dialog öffnen
        request_save_file(state);
    }
    Ok(())
}

/// Speichert die Datei unter dem angegebenen Pfad.
pub fn save_file_as(state: &mut AppState, path: String) -> Result<()> {
    write_registry_to_file(state, &path)?;
    state.ui.current_file_path = Some(path.clone());
    state.ui.modified = false;
    log::info!("Datei gespeichert als: {}", path);
    Ok(())
}

/// `None` = aktueller Pfad, `Some(p)` = neuer Pfad.
pub fn save(state: &mut AppState, path: Option<String>) -> Result<()> {
    match path {
        Some(path) if !path.is_empty() => save_file_as(state, path),
        _ => save_current_file(state),
    }
}

/// Schreibt die Registry als GDML in eine Datei.
fn write_registry_to_file(state: &AppState, path: &str) -> Result<()> {
    let registry = state
        .registry
        .as_ref()
        .ok_or_else(|| anyhow!("Keine Geometrie geladen"))?;
    let xml_content = render_gdml(registry).context("GDML konnte nicht erzeugt werden")?;
    std::fs::write(path, xml_content).with_context(|| format!("Datei '{}' nicht schreibbar", path))?;
    Ok(())
}

/// Luft aus Stickstoff/Sauerstoff, falls der Referenzkatalog versagt.
fn fallback_air(registry: &mut Registry) -> Result<Arc<Material>, EditorError> {
    let nitrogen = registry.add_element(Element::new("Nitrogen", "N", 7.0, 14.01));
    let oxygen = registry.add_element(Element::new("Oxygen", "O", 8.0, 16.00));
    let mut air = Material::new(
        NEW_WORLD_MATERIAL,
        1.29e-3,
        Composition::MassFractions(vec![
            (nitrogen.name.clone(), 0.7),
            (oxygen.name.clone(), 0.3),
        ]),
    );
    air.state = Some(MaterialState::Gas);
    registry.add_material(air)
}

/// Baut eine neue Geometrie: World-Würfel aus Luft.
pub fn new_world_registry(
    resolver: &MaterialResolver,
    user: &UserMaterialCatalog,
) -> Result<Registry, EditorError> {
    let mut registry = Registry::new();

    let air = match resolver.resolve(NEW_WORLD_MATERIAL, &mut registry, user) {
        Ok(air) => air,
        Err(e) => {
            log::warn!("{}, erzeuge Luft manuell", e);
            fallback_air(&mut registry)?
        }
    };

    registry.add_solid(Solid::from_shape(
        NEW_WORLD_SOLID,
        &Shape::Box {
            x: NEW_WORLD_EXTENT_MM,
            y: NEW_WORLD_EXTENT_MM,
            z: NEW_WORLD_EXTENT_MM,
        },
        LengthUnit::Mm,
    ))?;
    registry.add_volume(NEW_WORLD_NAME, VolumeKind::shaped(NEW_WORLD_SOLID, air))?;
    registry.set_world(NEW_WORLD_NAME)?;
    Ok(registry)
}

/// Ersetzt die aktuelle Geometrie durch eine neue World.
pub fn new_world(state: &mut AppState) -> Result<()> {
    let registry = new_world_registry(&state.resolver, &state.user_catalog)
        .context("Neue Geometrie konnte nicht erstellt werden")?;
    state.registry = Some(registry);
    state.ui.current_file_path = None;
    state.ui.selected_volume = Some(NEW_WORLD_NAME.to_string());
    state.ui.modified = true;
    state.ui.status_message = Some("Neue Geometrie erstellt".to_string());
    log::info!("Neue Geometrie mit World '{}' erstellt", NEW_WORLD_NAME);
    Ok(())
}
