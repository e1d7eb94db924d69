//! Use-Cases für Volumen-Bearbeitung: Einfügen, Löschen, Umbenennen, Material.
//!
//! Die Registry-Funktionen (`*_in`) sind unabhängig vom AppState und werden
//! auch direkt von Tests und der CLI genutzt. Sie sind nicht transaktional:
//! schlägt ein späterer Schritt fehl, bleiben frühere Änderungen bestehen.

use crate::app::AppState;
use crate::core::{
    EditorError, LengthUnit, LogicalVolume, Placement, Registry, Shape, Solid, VolumeKind,
};
use crate::materials::{MaterialResolver, UserMaterialCatalog};
use anyhow::{anyhow, Context, Result};
use glam::DVec3;

/// Parameter für ein neues Volumen
#[derive(Debug, Clone, PartialEq)]
pub struct InsertVolumeRequest {
    pub name: String,
    /// Eltern-Volumen der neuen Platzierung
    pub parent: String,
    pub shape: Shape,
    /// Einheit der Form-Parameter und der Position
    pub length_unit: LengthUnit,
    pub material: String,
    /// Position in `length_unit`
    pub position: DVec3,
    /// Rotation in Grad
    pub rotation_deg: DVec3,
}

impl InsertVolumeRequest {
    /// Volumen ohne Verschiebung und Rotation
    pub fn new(
        name: impl Into<String>,
        parent: impl Into<String>,
        shape: Shape,
        material: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            shape,
            length_unit: LengthUnit::Mm,
            material: material.into(),
            position: DVec3::ZERO,
            rotation_deg: DVec3::ZERO,
        }
    }

    pub fn with_length_unit(mut self, unit: LengthUnit) -> Self {
        self.length_unit = unit;
        self
    }

    pub fn with_transform(mut self, position: DVec3, rotation_deg: DVec3) -> Self {
        self.position = position;
        self.rotation_deg = rotation_deg;
        self
    }
}

/// Legt Solid `<name>_solid`, Volumen und Platzierung `<name>_pv` an.
///
/// Liefert den tatsächlich vergebenen Platzierungsnamen.
pub fn insert_volume_in(
    registry: &mut Registry,
    resolver: &MaterialResolver,
    user: &UserMaterialCatalog,
    request: &InsertVolumeRequest,
) -> Result<String, EditorError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(EditorError::InvalidVolumeName(request.name.clone()));
    }
    if registry.contains_volume(name) {
        return Err(EditorError::DuplicateVolumeName(name.to_string()));
    }
    let parent = registry
        .handle(&request.parent)
        .ok_or_else(|| EditorError::UnknownVolume(request.parent.clone()))?;
    let material_name = request.material.trim();
    if material_name.is_empty() {
        return Err(EditorError::UnknownMaterial(String::new()));
    }

    let material = resolver.resolve(material_name, registry, user)?;

    let solid_name = format!("{}_solid", name);
    registry.add_solid(Solid::from_shape(
        solid_name.clone(),
        &request.shape,
        request.length_unit,
    ))?;
    registry.add_volume(name, VolumeKind::shaped(solid_name, material))?;

    let child = registry
        .handle(name)
        .ok_or_else(|| EditorError::UnknownVolume(name.to_string()))?;
    let scale = request.length_unit.to_mm_factor();
    let rotation = DVec3::new(
        request.rotation_deg.x.to_radians(),
        request.rotation_deg.y.to_radians(),
        request.rotation_deg.z.to_radians(),
    );
    let placement = Placement::new(format!("{}_pv", name), parent, child)
        .with_transform(request.position * scale, rotation);
    let placement_name = registry.add_placement(placement, true)?;

    log::info!(
        "Volumen '{}' ({}) in '{}' eingefuegt",
        name,
        request.shape.tag(),
        request.parent
    );
    Ok(placement_name)
}

/// Löscht ein Volumen samt aller Platzierungen (World ist geschützt).
pub fn delete_volume_in(registry: &mut Registry, name: &str) -> Result<LogicalVolume, EditorError> {
    let removed = registry.remove_volume(name)?;
    log::info!("Volumen '{}' geloescht", name);
    Ok(removed)
}

/// Benennt ein Volumen um (World ist geschützt).
pub fn rename_volume_in(
    registry: &mut Registry,
    old_name: &str,
    new_name: &str,
) -> Result<(), EditorError> {
    let new_name = new_name.trim();
    if new_name == old_name {
        log::debug!("Umbenennen von '{}' ohne Aenderung", old_name);
        return Ok(());
    }
    registry.rename_volume(old_name, new_name)?;
    log::info!("Volumen umbenannt: '{}' -> '{}'", old_name, new_name);
    Ok(())
}

/// Weist einem Volumen mit Form ein Material zu (erzeugt es bei Bedarf).
///
/// Liefert den vorherigen Materialnamen.
pub fn apply_material_in(
    registry: &mut Registry,
    resolver: &MaterialResolver,
    user: &UserMaterialCatalog,
    volume: &str,
    material: &str,
) -> Result<Option<String>, EditorError> {
    let lv = registry
        .volume(volume)
        .ok_or_else(|| EditorError::UnknownVolume(volume.to_string()))?;
    if lv.is_assembly() {
        return Err(EditorError::NotAShapedVolume(volume.to_string()));
    }
    let previous = lv.material_name().map(str::to_string);

    let material_name = material.trim();
    if material_name.is_empty() {
        return Err(EditorError::UnknownMaterial(String::new()));
    }
    let instance = resolver.resolve(material_name, registry, user)?;
    registry.set_volume_material(volume, instance)?;

    log::info!(
        "Material von '{}': {} -> {}",
        volume,
        previous.as_deref().unwrap_or("-"),
        material_name
    );
    Ok(previous)
}

fn loaded_registry(state: &mut AppState) -> Result<&mut Registry> {
    state
        .registry
        .as_mut()
        .ok_or_else(|| anyhow!("Keine Geometrie geladen"))
}

/// Fügt ein neues Volumen ein und selektiert es.
pub fn insert_volume(state: &mut AppState, request: &InsertVolumeRequest) -> Result<()> {
    let registry = state
        .registry
        .as_mut()
        .ok_or_else(|| anyhow!("Keine Geometrie geladen"))?;
    insert_volume_in(registry, &state.resolver, &state.user_catalog, request)
        .with_context(|| format!("Volumen '{}' konnte nicht eingefuegt werden", request.name))?;

    let name = request.name.trim().to_string();
    state.ui.status_message = Some(format!("Volumen eingefuegt: {}", name));
    state.ui.selected_volume = Some(name);
    state.ui.modified = true;
    Ok(())
}

/// Löscht ein Volumen; die Selektion springt auf World.
pub fn delete_volume(state: &mut AppState, name: &str) -> Result<()> {
    let registry = loaded_registry(state)?;
    delete_volume_in(registry, name)
        .with_context(|| format!("Volumen '{}' konnte nicht geloescht werden", name))?;
    let world = registry.world_name().ok().map(str::to_string);

    state.ui.selected_volume = world;
    state.ui.status_message = Some(format!("Volumen geloescht: {}", name));
    state.ui.modified = true;
    Ok(())
}

/// Benennt ein Volumen um; die Selektion folgt dem neuen Namen.
pub fn rename_volume(state: &mut AppState, old_name: &str, new_name: &str) -> Result<()> {
    let registry = loaded_registry(state)?;
    rename_volume_in(registry, old_name, new_name)
        .with_context(|| format!("Volumen '{}' konnte nicht umbenannt werden", old_name))?;

    let new_name = new_name.trim();
    if new_name != old_name {
        state.ui.selected_volume = Some(new_name.to_string());
        state.ui.status_message = Some(format!("Volumen umbenannt: {} -> {}", old_name, new_name));
        state.ui.modified = true;
    }
    Ok(())
}

/// Weist dem Volumen ein Material zu.
pub fn apply_material(state: &mut AppState, volume: &str, material: &str) -> Result<()> {
    let registry = state
        .registry
        .as_mut()
        .ok_or_else(|| anyhow!("Keine Geometrie geladen"))?;
    let previous = apply_material_in(
        registry,
        &state.resolver,
        &state.user_catalog,
        volume,
        material,
    )
    .with_context(|| format!("Material '{}' konnte nicht gesetzt werden", material))?;

    state.ui.status_message = Some(format!(
        "Material von {}: {} -> {}",
        volume,
        previous.as_deref().unwrap_or("-"),
        material.trim()
    ));
    state.ui.modified = true;
    Ok(())
}
