//! Die zentrale Registry: Volumen, Platzierungen, Materialien, Elemente, Solids.

use super::{
    Daughter, EditorError, Element, GdmlMeta, LogicalVolume, Material, MaterialLabel, Placement,
    Solid, VolumeId, VolumeKind, VolumeRef,
};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// In-Memory-Container einer kompletten Geometrie.
///
/// Die Eltern-Kind-Beziehungen werden an zwei Stellen geführt: im
/// Platzierungs-Dictionary und in der Kinderliste jedes Volumens. Beide
/// Quellen dürfen auseinanderlaufen; `core::hierarchy` vereinigt sie.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Alle Volumen nach ID (Einfüge-Reihenfolge bleibt erhalten)
    volumes: IndexMap<VolumeId, LogicalVolume>,
    /// Namensindex für Volumen (Namen sind eindeutig)
    volume_ids: HashMap<String, VolumeId>,
    /// Zuletzt vergebene Volumen-ID
    last_volume_id: VolumeId,
    /// Platzierungs-Dictionary nach Platzierungsname
    placements: IndexMap<String, Placement>,
    materials: IndexMap<String, Arc<Material>>,
    elements: IndexMap<String, Arc<Element>>,
    solids: IndexMap<String, Solid>,
    /// Zeiger auf das World-Volumen
    world: Option<VolumeRef>,
    /// Zusätzliche GDML-Metadaten (Defines, Setup)
    pub meta: GdmlMeta,
}

/// Prüft, ob eine Referenz auf das Volumen `id`/`name` zeigt.
fn refers_to(reference: &VolumeRef, id: VolumeId, name: &str) -> bool {
    match reference {
        VolumeRef::Handle(handle) => *handle == id,
        VolumeRef::Name(n) => n == name,
    }
}

impl Registry {
    /// Erstellt eine leere Registry
    pub fn new() -> Self {
        Self::default()
    }

    // ── Volumen ─────────────────────────────────────────────────────

    /// Fügt ein Volumen hinzu und liefert seine ID.
    pub fn add_volume(
        &mut self,
        name: impl Into<String>,
        kind: VolumeKind,
    ) -> Result<VolumeId, EditorError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EditorError::InvalidVolumeName(name));
        }
        if self.volume_ids.contains_key(&name) {
            return Err(EditorError::DuplicateVolumeName(name));
        }

        self.last_volume_id += 1;
        let id = self.last_volume_id;
        self.volume_ids.insert(name.clone(), id);
        self.volumes.insert(
            id,
            LogicalVolume {
                id,
                name,
                kind,
                daughters: Vec::new(),
            },
        );
        Ok(id)
    }

    pub fn volume(&self, name: &str) -> Option<&LogicalVolume> {
        self.volume_ids
            .get(name)
            .and_then(|id| self.volumes.get(id))
    }

    pub fn volume_by_id(&self, id: VolumeId) -> Option<&LogicalVolume> {
        self.volumes.get(&id)
    }

    pub fn contains_volume(&self, name: &str) -> bool {
        self.volume_ids.contains_key(name)
    }

    /// Iterator über alle Volumen in Einfüge-Reihenfolge
    pub fn volumes_iter(&self) -> impl Iterator<Item = &LogicalVolume> {
        self.volumes.values()
    }

    /// Direkte Referenz auf ein Volumen (folgt späteren Umbenennungen)
    pub fn handle(&self, name: &str) -> Option<VolumeRef> {
        self.volume_ids.get(name).map(|id| VolumeRef::Handle(*id))
    }

    /// Normalisiert eine Volumen-Referenz auf einen Namen.
    ///
    /// Namensreferenzen werden unverändert zurückgegeben (auch wenn kein
    /// Volumen dieses Namens existiert); verwaiste Handles liefern `None`.
    pub fn resolve_ref<'a>(&'a self, reference: &'a VolumeRef) -> Option<&'a str> {
        match reference {
            VolumeRef::Handle(id) => self.volumes.get(id).map(|v| v.name.as_str()),
            VolumeRef::Name(name) => Some(name.as_str()),
        }
    }

    /// Benennt ein Volumen um.
    ///
    /// Handles folgen automatisch; veraltete Namensreferenzen auf den alten
    /// Namen (Platzierungen, Kinderlisten, World-Zeiger) werden umgeschrieben.
    pub fn rename_volume(&mut self, old_name: &str, new_name: &str) -> Result<(), EditorError> {
        let Some(&id) = self.volume_ids.get(old_name) else {
            return Err(EditorError::UnknownVolume(old_name.to_string()));
        };
        if self.is_world(old_name) {
            return Err(EditorError::WorldVolumeProtected(old_name.to_string()));
        }
        if new_name.trim().is_empty() {
            return Err(EditorError::InvalidVolumeName(new_name.to_string()));
        }
        if old_name == new_name {
            return Ok(());
        }
        if self.volume_ids.contains_key(new_name) {
            return Err(EditorError::DuplicateVolumeName(new_name.to_string()));
        }

        self.volume_ids.remove(old_name);
        self.volume_ids.insert(new_name.to_string(), id);
        if let Some(volume) = self.volumes.get_mut(&id) {
            volume.name = new_name.to_string();
        }

        let rewrite = |reference: &mut VolumeRef| {
            if matches!(&*reference, VolumeRef::Name(n) if n == old_name) {
                *reference = VolumeRef::Name(new_name.to_string());
            }
        };
        for placement in self.placements.values_mut() {
            rewrite(&mut placement.parent);
            rewrite(&mut placement.child);
        }
        for volume in self.volumes.values_mut() {
            for daughter in &mut volume.daughters {
                rewrite(&mut daughter.child);
            }
        }
        if let Some(world) = self.world.as_mut() {
            rewrite(world);
        }
        Ok(())
    }

    /// Entfernt ein Volumen samt aller Platzierungen, die es als Kind oder
    /// Eltern referenzieren. Das Solid wird nur entfernt, wenn kein anderes
    /// Volumen es nutzt.
    pub fn remove_volume(&mut self, name: &str) -> Result<LogicalVolume, EditorError> {
        let Some(&id) = self.volume_ids.get(name) else {
            return Err(EditorError::UnknownVolume(name.to_string()));
        };
        if self.is_world(name) {
            return Err(EditorError::WorldVolumeProtected(name.to_string()));
        }

        self.remove_placements_of(name);
        self.placements
            .retain(|_, p| !refers_to(&p.parent, id, name));

        self.volume_ids.remove(name);
        let Some(removed) = self.volumes.shift_remove(&id) else {
            return Err(EditorError::UnknownVolume(name.to_string()));
        };

        if let Some(solid) = removed.solid_name() {
            let still_used = self
                .volumes
                .values()
                .any(|v| v.solid_name() == Some(solid));
            if !still_used {
                self.solids.shift_remove(solid);
            }
        }
        Ok(removed)
    }

    /// Setzt das Material eines Volumens mit Form.
    pub fn set_volume_material(
        &mut self,
        name: &str,
        material: Arc<Material>,
    ) -> Result<(), EditorError> {
        let Some(id) = self.volume_ids.get(name) else {
            return Err(EditorError::UnknownVolume(name.to_string()));
        };
        let Some(volume) = self.volumes.get_mut(id) else {
            return Err(EditorError::UnknownVolume(name.to_string()));
        };
        match &mut volume.kind {
            VolumeKind::Shaped { material: slot, .. } => {
                *slot = Some(material);
                Ok(())
            }
            VolumeKind::Assembly => Err(EditorError::NotAShapedVolume(name.to_string())),
        }
    }

    // ── World ───────────────────────────────────────────────────────

    /// Setzt den World-Zeiger auf ein existierendes Volumen.
    pub fn set_world(&mut self, name: &str) -> Result<(), EditorError> {
        let reference = self
            .handle(name)
            .ok_or_else(|| EditorError::UnknownVolume(name.to_string()))?;
        self.world = Some(reference);
        Ok(())
    }

    /// Setzt den World-Zeiger ungeprüft (z.B. für unvollständige Dateien).
    pub fn set_world_ref(&mut self, reference: Option<VolumeRef>) {
        self.world = reference;
    }

    pub fn world_ref(&self) -> Option<&VolumeRef> {
        self.world.as_ref()
    }

    /// Name des World-Volumens.
    pub fn world_name(&self) -> Result<&str, EditorError> {
        self.world
            .as_ref()
            .and_then(|world| self.resolve_ref(world))
            .filter(|name| !name.is_empty())
            .ok_or(EditorError::NoWorldVolume)
    }

    pub fn is_world(&self, name: &str) -> bool {
        self.world_name().is_ok_and(|world| world == name)
    }

    /// Materialspalte eines Volumens (Materialname oder Assembly-Marker)
    pub fn material_label(&self, volume: &str) -> MaterialLabel {
        MaterialLabel::of(self, volume)
    }

    // ── Platzierungen ───────────────────────────────────────────────

    /// Liefert einen im Dictionary noch freien Platzierungsnamen.
    pub fn unique_placement_name(&self, base: &str) -> String {
        if !self.placements.contains_key(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.placements.contains_key(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Trägt eine Platzierung nur ins Platzierungs-Dictionary ein.
    ///
    /// Bei Namenskollision wird ein Suffix angehängt; der tatsächlich
    /// verwendete Name wird zurückgegeben.
    pub fn record_placement(&mut self, mut placement: Placement) -> String {
        let name = self.unique_placement_name(&placement.name);
        if name != placement.name {
            log::warn!(
                "Platzierung '{}' existiert bereits, verwende '{}'",
                placement.name,
                name
            );
        }
        placement.name = name.clone();
        self.placements.insert(name.clone(), placement);
        name
    }

    /// Trägt ein Kind nur in die Kinderliste des Eltern-Volumens ein.
    pub fn link_daughter(&mut self, parent: &str, daughter: Daughter) -> Result<(), EditorError> {
        let Some(id) = self.volume_ids.get(parent) else {
            return Err(EditorError::UnknownVolume(parent.to_string()));
        };
        match self.volumes.get_mut(id) {
            Some(volume) => {
                volume.daughters.push(daughter);
                Ok(())
            }
            None => Err(EditorError::UnknownVolume(parent.to_string())),
        }
    }

    /// Fügt eine Platzierung hinzu; mit `link_daughter` zusätzlich in die
    /// Kinderliste des Eltern-Volumens.
    pub fn add_placement(
        &mut self,
        placement: Placement,
        link_daughter: bool,
    ) -> Result<String, EditorError> {
        let parent = match self.resolve_ref(&placement.parent) {
            Some(parent) if self.contains_volume(parent) => parent.to_string(),
            Some(parent) => return Err(EditorError::UnknownVolume(parent.to_string())),
            None => return Err(EditorError::UnknownVolume(format!("{:?}", placement.parent))),
        };

        let child = placement.child.clone();
        let name = self.record_placement(placement);
        if link_daughter {
            self.link_daughter(
                &parent,
                Daughter {
                    placement: name.clone(),
                    child,
                },
            )?;
        }
        Ok(name)
    }

    pub fn placement(&self, name: &str) -> Option<&Placement> {
        self.placements.get(name)
    }

    /// Iterator über das Platzierungs-Dictionary (Einfüge-Reihenfolge)
    pub fn placements_iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.values()
    }

    /// Entfernt eine Platzierung aus beiden Quellen.
    pub fn remove_placement(&mut self, name: &str) -> bool {
        let mut removed = self.placements.shift_remove(name).is_some();
        for volume in self.volumes.values_mut() {
            let before = volume.daughters.len();
            volume.daughters.retain(|d| d.placement != name);
            removed |= volume.daughters.len() < before;
        }
        removed
    }

    /// Entfernt alle Platzierungen des Kind-Volumens `child` aus beiden
    /// Quellen und liefert die Namen der entfernten Platzierungen.
    pub fn remove_placements_of(&mut self, child: &str) -> Vec<String> {
        let id = self.volume_ids.get(child).copied().unwrap_or(0);
        let mut removed: Vec<String> = Vec::new();

        self.placements.retain(|name, p| {
            let hit = refers_to(&p.child, id, child);
            if hit {
                removed.push(name.clone());
            }
            !hit
        });
        for volume in self.volumes.values_mut() {
            volume.daughters.retain(|d| {
                let hit = refers_to(&d.child, id, child);
                if hit && !removed.contains(&d.placement) {
                    removed.push(d.placement.clone());
                }
                !hit
            });
        }
        removed
    }

    // ── Materialien & Elemente ──────────────────────────────────────

    /// Registriert ein Material. Schlägt fehl, wenn der Name bereits belegt ist.
    pub fn add_material(&mut self, material: Material) -> Result<Arc<Material>, EditorError> {
        if self.materials.contains_key(&material.name) {
            return Err(EditorError::ExternalLibraryFailure(format!(
                "Material '{}' existiert bereits",
                material.name
            )));
        }
        let material = Arc::new(material);
        self.materials
            .insert(material.name.clone(), Arc::clone(&material));
        Ok(material)
    }

    /// Gemeinsame Instanz eines bereits registrierten Materials
    pub fn material(&self, name: &str) -> Option<Arc<Material>> {
        self.materials.get(name).cloned()
    }

    pub fn has_material(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn materials_iter(&self) -> impl Iterator<Item = &Arc<Material>> {
        self.materials.values()
    }

    pub fn material_names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    /// Registriert ein Element oder liefert das bereits vorhandene gleichen Namens.
    pub fn add_element(&mut self, element: Element) -> Arc<Element> {
        Arc::clone(
            self.elements
                .entry(element.name.clone())
                .or_insert_with(|| Arc::new(element)),
        )
    }

    pub fn element(&self, name: &str) -> Option<Arc<Element>> {
        self.elements.get(name).cloned()
    }

    pub fn elements_iter(&self) -> impl Iterator<Item = &Arc<Element>> {
        self.elements.values()
    }

    // ── Solids ──────────────────────────────────────────────────────

    /// Registriert ein Solid. Schlägt fehl, wenn der Name bereits belegt ist.
    pub fn add_solid(&mut self, solid: Solid) -> Result<(), EditorError> {
        if self.solids.contains_key(&solid.name) {
            return Err(EditorError::ExternalLibraryFailure(format!(
                "Solid '{}' existiert bereits",
                solid.name
            )));
        }
        self.solids.insert(solid.name.clone(), solid);
        Ok(())
    }

    pub fn solid(&self, name: &str) -> Option<&Solid> {
        self.solids.get(name)
    }

    pub fn has_solid(&self, name: &str) -> bool {
        self.solids.contains_key(name)
    }

    pub fn solids_iter(&self) -> impl Iterator<Item = &Solid> {
        self.solids.values()
    }

    // ── Zähler ──────────────────────────────────────────────────────

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }
}
