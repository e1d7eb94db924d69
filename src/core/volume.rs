//! Logische Volumen und Volumen-Referenzen.

use super::Material;
use std::sync::Arc;

/// Stabile Registry-ID eines Volumens (überlebt Umbenennungen)
pub type VolumeId = u64;

/// Verweis auf ein Volumen: direkte Referenz oder bloßer Name.
///
/// Beide Formen kommen vor (Parser, Editor-Operationen) und werden vor jedem
/// Vergleich über `Registry::resolve_ref` auf einen Namen normalisiert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VolumeRef {
    /// Direkte Referenz auf einen Registry-Eintrag
    Handle(VolumeId),
    /// Name als String (kann nach Umbenennung/Löschen veraltet sein)
    Name(String),
}

impl VolumeRef {
    /// Erstellt eine Namensreferenz.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

/// Art eines logischen Volumens
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeKind {
    /// Form + Material. `material: None` entspricht einem Null-Material.
    Shaped {
        solid: String,
        material: Option<Arc<Material>>,
    },
    /// Reine Gruppierung ohne Form und Material
    Assembly,
}

impl VolumeKind {
    /// Erstellt ein Volumen mit Form und Material.
    pub fn shaped(solid: impl Into<String>, material: Arc<Material>) -> Self {
        Self::Shaped {
            solid: solid.into(),
            material: Some(material),
        }
    }
}

/// Eintrag der volumen-eigenen Kinderliste
#[derive(Debug, Clone, PartialEq)]
pub struct Daughter {
    /// Name der zugehörigen Platzierung
    pub placement: String,
    /// Platziertes Kind-Volumen
    pub child: VolumeRef,
}

/// Ein logisches Volumen
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalVolume {
    /// Registry-ID (von der Registry vergeben)
    pub id: VolumeId,
    pub name: String,
    pub kind: VolumeKind,
    /// Lokal geführte Kinderliste; wird nicht zwingend synchron zum
    /// Platzierungs-Dictionary der Registry gehalten
    pub daughters: Vec<Daughter>,
}

impl LogicalVolume {
    /// Name des Materials, `None` bei Assemblies und Null-Material.
    pub fn material_name(&self) -> Option<&str> {
        match &self.kind {
            VolumeKind::Shaped {
                material: Some(material),
                ..
            } => Some(material.name.as_str()),
            _ => None,
        }
    }

    /// Name des Solids, `None` bei Assemblies.
    pub fn solid_name(&self) -> Option<&str> {
        match &self.kind {
            VolumeKind::Shaped { solid, .. } => Some(solid.as_str()),
            VolumeKind::Assembly => None,
        }
    }

    pub fn is_assembly(&self) -> bool {
        matches!(self.kind, VolumeKind::Assembly)
    }
}
