//! Aufbau der Volumen und Platzierungen aus dem `<structure>`-Block.

use super::values::{attr, required_attr, Constants};
use crate::core::{AngleUnit, LengthUnit, Placement, Registry, VolumeKind, VolumeRef};
use anyhow::{anyhow, Context, Result};
use glam::DVec3;
use std::collections::HashMap;

/// Rohdaten einer `<physvol>`
#[derive(Debug, Default)]
pub(super) struct PhysvolBuilder {
    pub(super) name: Option<String>,
    pub(super) volume_ref: Option<String>,
    pub(super) position: DVec3,
    pub(super) rotation: DVec3,
}

/// Rohdaten eines `<volume>` oder `<assembly>`
#[derive(Debug)]
pub(super) struct VolumeBuilder {
    pub(super) name: String,
    pub(super) assembly: bool,
    pub(super) material_ref: Option<String>,
    pub(super) solid_ref: Option<String>,
    pub(super) physvols: Vec<PhysvolBuilder>,
}

impl VolumeBuilder {
    pub(super) fn start(tag: &str, attributes: &[(String, String)]) -> Result<Self> {
        Ok(Self {
            name: required_attr(attributes, "name", tag)?.to_string(),
            assembly: tag == "assembly",
            material_ref: None,
            solid_ref: None,
            physvols: Vec::new(),
        })
    }
}

/// Benannte Positionen (mm) und Rotationen (rad) aus `<define>`
#[derive(Debug, Default)]
pub(super) struct Transforms {
    pub(super) positions: HashMap<String, DVec3>,
    pub(super) rotations: HashMap<String, DVec3>,
}

fn xyz(attributes: &[(String, String)], constants: &Constants) -> Result<DVec3> {
    let component = |key: &str| -> Result<f64> {
        attr(attributes, key)
            .map(|text| constants.evaluate(text))
            .transpose()
            .map(|v| v.unwrap_or(0.0))
    };
    Ok(DVec3::new(component("x")?, component("y")?, component("z")?))
}

/// Position in mm (`unit` Standard: mm)
pub(super) fn position(attributes: &[(String, String)], constants: &Constants) -> Result<DVec3> {
    let unit = match attr(attributes, "unit") {
        Some(unit) => {
            LengthUnit::parse(unit).ok_or_else(|| anyhow!("Längeneinheit '{}' unbekannt", unit))?
        }
        None => LengthUnit::Mm,
    };
    Ok(xyz(attributes, constants)? * unit.to_mm_factor())
}

/// Rotation in rad (`unit` Standard: rad)
pub(super) fn rotation(attributes: &[(String, String)], constants: &Constants) -> Result<DVec3> {
    let unit = match attr(attributes, "unit") {
        Some(unit) => {
            AngleUnit::parse(unit).ok_or_else(|| anyhow!("Winkeleinheit '{}' unbekannt", unit))?
        }
        None => AngleUnit::Rad,
    };
    let raw = xyz(attributes, constants)?;
    Ok(DVec3::new(unit.to_rad(raw.x), unit.to_rad(raw.y), unit.to_rad(raw.z)))
}

/// Löst `positionref`/`rotationref` auf.
pub(super) fn lookup(
    table: &HashMap<String, DVec3>,
    attributes: &[(String, String)],
    tag: &str,
) -> Result<DVec3> {
    let name = required_attr(attributes, "ref", tag)?;
    table
        .get(name)
        .copied()
        .ok_or_else(|| anyhow!("<{}> verweist auf unbekanntes '{}'", tag, name))
}

/// Trägt Volumen und Platzierungen in die Registry ein.
///
/// Jede `physvol` landet sowohl im Platzierungs-Dictionary als auch in der
/// Kinderliste des Eltern-Volumens.
pub(super) fn build_structure(registry: &mut Registry, volumes: Vec<VolumeBuilder>) -> Result<()> {
    for volume in &volumes {
        let kind = if volume.assembly {
            VolumeKind::Assembly
        } else {
            let solid = volume
                .solid_ref
                .clone()
                .ok_or_else(|| anyhow!("Volumen '{}' ohne <solidref>", volume.name))?;
            if !registry.has_solid(&solid) {
                log::warn!("Volumen '{}': Solid '{}' nicht definiert", volume.name, solid);
            }
            let material = match &volume.material_ref {
                Some(name) => Some(registry.material(name).ok_or_else(|| {
                    anyhow!("Volumen '{}': Material '{}' nicht definiert", volume.name, name)
                })?),
                None => None,
            };
            VolumeKind::Shaped { solid, material }
        };
        registry
            .add_volume(volume.name.clone(), kind)
            .with_context(|| format!("Volumen '{}' konnte nicht angelegt werden", volume.name))?;
    }

    for volume in volumes {
        let parent = registry
            .handle(&volume.name)
            .ok_or_else(|| anyhow!("Volumen '{}' fehlt", volume.name))?;
        for (index, physvol) in volume.physvols.into_iter().enumerate() {
            let Some(child_name) = physvol.volume_ref else {
                log::warn!(
                    "physvol #{} in '{}' ohne <volumeref> ignoriert",
                    index,
                    volume.name
                );
                continue;
            };
            let child = registry.handle(&child_name).unwrap_or_else(|| {
                log::warn!(
                    "physvol in '{}' verweist auf unbekanntes Volumen '{}'",
                    volume.name,
                    child_name
                );
                VolumeRef::Name(child_name.clone())
            });
            let name = physvol
                .name
                .unwrap_or_else(|| format!("{}_PV", child_name));
            let placement = Placement::new(name, parent.clone(), child)
                .with_transform(physvol.position, physvol.rotation);
            registry.add_placement(placement, true)?;
        }
    }
    Ok(())
}
