use super::VolumeRef;
use glam::DVec3;

/// Platzierung (GDML `physvol`): ein Kind-Volumen positioniert im Eltern-Volumen.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Name im Platzierungs-Dictionary der Registry
    pub name: String,
    pub parent: VolumeRef,
    pub child: VolumeRef,
    /// Position in mm
    pub position: DVec3,
    /// Rotation (x, y, z) in rad
    pub rotation: DVec3,
}

impl Placement {
    /// Erstellt eine Platzierung ohne Verschiebung und Rotation
    pub fn new(name: impl Into<String>, parent: VolumeRef, child: VolumeRef) -> Self {
        Self {
            name: name.into(),
            parent,
            child,
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
        }
    }

    /// Setzt Position (mm) und Rotation (rad).
    pub fn with_transform(mut self, position: DVec3, rotation: DVec3) -> Self {
        self.position = position;
        self.rotation = rotation;
        self
    }
}
