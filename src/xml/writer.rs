//! Writer für GDML-Geometriedateien.

use crate::core::{
    child_map, format_number, ChildMap, ChildSource, Composition, LogicalVolume, Material, Registry,
    VolumeKind,
};
use anyhow::Result;
use glam::DVec3;
use std::collections::HashSet;
use std::sync::Arc;

const GDML_HEADER: &str = "<gdml xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
xsi:noNamespaceSchemaLocation=\"http://service-spi.web.cern.ch/service-spi/app/releases/GDML/schema/gdml.xsd\">\n";

/// Schreibt eine Registry als GDML-Dokument
///
/// Materialien stehen nach den von ihnen referenzierten Materialien,
/// Volumen nach ihren Kind-Volumen (GDML verlangt Definition vor Verwendung).
pub fn write_gdml(registry: &Registry) -> Result<String> {
    let world = registry.world_name()?.to_string();

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(GDML_HEADER);

    write_defines(&mut output, registry);
    write_materials(&mut output, registry);
    write_solids(&mut output, registry);
    write_structure(&mut output, registry, &world);

    output.push_str(&format!(
        "    <setup name=\"{}\" version=\"{}\">\n",
        escape_xml(&registry.meta.setup_name),
        escape_xml(&registry.meta.setup_version)
    ));
    output.push_str(&format!("        <world ref=\"{}\"/>\n", escape_xml(&world)));
    output.push_str("    </setup>\n");
    output.push_str("</gdml>\n");

    log::info!(
        "GDML geschrieben: {} Volumen, {} Materialien, {} Solids",
        registry.volume_count(),
        registry.material_count(),
        registry.solid_count()
    );
    Ok(output)
}

fn attributes_text(attributes: &[(String, String)]) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, escape_xml(value)))
        .collect()
}

fn write_defines(output: &mut String, registry: &Registry) {
    output.push_str("    <define>\n");
    for define in &registry.meta.defines {
        output.push_str(&format!(
            "        <{} name=\"{}\"{}/>\n",
            define.tag,
            escape_xml(&define.name),
            attributes_text(&define.attributes)
        ));
    }
    output.push_str("    </define>\n");
}

/// Materialien in Abhängigkeitsreihenfolge (referenzierte zuerst).
fn material_order(registry: &Registry) -> Vec<Arc<Material>> {
    let mut visited = HashSet::new();
    let mut order = Vec::with_capacity(registry.material_count());

    for root in registry.materials_iter() {
        if !visited.insert(root.name.clone()) {
            continue;
        }
        // (Material, Index der nächsten Referenz)
        let mut stack = vec![(Arc::clone(root), 0usize)];
        while let Some((material, next)) = stack.last_mut() {
            let Some(reference) = material.composition.references().get(*next).copied() else {
                order.push(Arc::clone(material));
                stack.pop();
                continue;
            };
            *next += 1;
            let dependency = registry
                .material(reference)
                .filter(|dependency| visited.insert(dependency.name.clone()));
            if let Some(dependency) = dependency {
                stack.push((dependency, 0));
            }
        }
    }
    order
}

fn write_materials(output: &mut String, registry: &Registry) {
    output.push_str("    <materials>\n");

    for element in registry.elements_iter() {
        output.push_str(&format!(
            "        <element name=\"{}\" formula=\"{}\" Z=\"{}\">\n",
            escape_xml(&element.name),
            escape_xml(&element.symbol),
            format_number(element.z)
        ));
        output.push_str(&format!(
            "            <atom unit=\"g/mole\" value=\"{}\"/>\n",
            format_number(element.a)
        ));
        output.push_str("        </element>\n");
    }

    for material in material_order(registry) {
        let mut open = format!("        <material name=\"{}\"", escape_xml(&material.name));
        if let Some(state) = material.state {
            open.push_str(&format!(" state=\"{}\"", state));
        }
        if let Composition::Simple { z, .. } = material.composition {
            open.push_str(&format!(" Z=\"{}\"", format_number(z)));
        }
        output.push_str(&open);
        output.push_str(">\n");

        if let Some(temperature) = material.temperature {
            output.push_str(&format!(
                "            <T unit=\"K\" value=\"{}\"/>\n",
                format_number(temperature)
            ));
        }
        if let Some(pressure) = material.pressure {
            output.push_str(&format!(
                "            <P unit=\"pascal\" value=\"{}\"/>\n",
                format_number(pressure)
            ));
        }
        output.push_str(&format!(
            "            <D unit=\"g/cm3\" value=\"{}\"/>\n",
            format_number(material.density)
        ));

        match &material.composition {
            Composition::Simple { a, .. } => {
                output.push_str(&format!(
                    "            <atom unit=\"g/mole\" value=\"{}\"/>\n",
                    format_number(*a)
                ));
            }
            Composition::MassFractions(parts) => {
                for (reference, fraction) in parts {
                    output.push_str(&format!(
                        "            <fraction n=\"{}\" ref=\"{}\"/>\n",
                        format_number(*fraction),
                        escape_xml(reference)
                    ));
                }
            }
            Composition::AtomCounts(parts) => {
                for (reference, count) in parts {
                    output.push_str(&format!(
                        "            <composite n=\"{}\" ref=\"{}\"/>\n",
                        count,
                        escape_xml(reference)
                    ));
                }
            }
        }
        output.push_str("        </material>\n");
    }

    output.push_str("    </materials>\n");
}

fn write_solids(output: &mut String, registry: &Registry) {
    output.push_str("    <solids>\n");
    for solid in registry.solids_iter() {
        output.push_str(&format!(
            "        <{} name=\"{}\"{}",
            solid.tag,
            escape_xml(&solid.name),
            attributes_text(&solid.attributes)
        ));
        if solid.children.is_empty() {
            output.push_str("/>\n");
            continue;
        }
        output.push_str(">\n");
        for child in &solid.children {
            output.push_str(&format!(
                "            <{}{}/>\n",
                child.tag,
                attributes_text(&child.attributes)
            ));
        }
        output.push_str(&format!("        </{}>\n", solid.tag));
    }
    output.push_str("    </solids>\n");
}

/// Eine zu schreibende `physvol`
struct PhysvolEntry {
    name: String,
    child: String,
    position: DVec3,
    rotation: DVec3,
}

/// Alle Platzierungen in `parent` aus beiden Buchführungsquellen, nach Name dedupliziert.
fn physvols_of(registry: &Registry, parent: &LogicalVolume) -> Vec<PhysvolEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for placement in registry.placements_iter() {
        if registry.resolve_ref(&placement.parent) != Some(parent.name.as_str()) {
            continue;
        }
        let Some(child) = registry.resolve_ref(&placement.child) else {
            continue;
        };
        if seen.insert(placement.name.clone()) {
            entries.push(PhysvolEntry {
                name: placement.name.clone(),
                child: child.to_string(),
                position: placement.position,
                rotation: placement.rotation,
            });
        }
    }

    for daughter in &parent.daughters {
        let Some(child) = registry.resolve_ref(&daughter.child) else {
            continue;
        };
        if seen.insert(daughter.placement.clone()) {
            let (position, rotation) = registry
                .placement(&daughter.placement)
                .map(|p| (p.position, p.rotation))
                .unwrap_or((DVec3::ZERO, DVec3::ZERO));
            entries.push(PhysvolEntry {
                name: daughter.placement.clone(),
                child: child.to_string(),
                position,
                rotation,
            });
        }
    }

    entries.retain(|entry| {
        let known = registry.contains_volume(&entry.child);
        if !known {
            log::warn!(
                "physvol '{}' verweist auf unbekanntes Volumen '{}' und wird nicht geschrieben",
                entry.name,
                entry.child
            );
        }
        known
    });
    entries
}

/// Post-Order ab `root` mit explizitem Stack (beliebige Verschachtelungstiefe).
fn visit_post_order<'a>(
    registry: &'a Registry,
    children: &ChildMap,
    root: &str,
    visited: &mut HashSet<&'a str>,
    order: &mut Vec<&'a LogicalVolume>,
) {
    let enter = |name: &str, visited: &mut HashSet<&'a str>| {
        let volume = registry.volume(name)?;
        visited
            .insert(volume.name.as_str())
            .then(|| (volume, children.children(name), 0usize))
    };

    let mut stack = Vec::new();
    stack.extend(enter(root, visited));
    while let Some((volume, kids, next)) = stack.last_mut() {
        match kids.get(*next).copied() {
            Some(child) => {
                *next += 1;
                stack.extend(enter(child, visited));
            }
            None => {
                order.push(*volume);
                stack.pop();
            }
        }
    }
}

/// Volumen in Post-Order (Kinder vor Eltern), World-Teilbaum zuerst.
fn volume_order<'a>(registry: &'a Registry, world: &str) -> Vec<&'a LogicalVolume> {
    let children = child_map(registry, ChildSource::Union);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut order = Vec::with_capacity(registry.volume_count());

    for root in std::iter::once(world).chain(registry.volumes_iter().map(|v| v.name.as_str())) {
        visit_post_order(registry, &children, root, &mut visited, &mut order);
    }
    order
}

fn write_structure(output: &mut String, registry: &Registry, world: &str) {
    output.push_str("    <structure>\n");

    for volume in volume_order(registry, world) {
        let tag = if volume.is_assembly() { "assembly" } else { "volume" };
        output.push_str(&format!("        <{} name=\"{}\">\n", tag, escape_xml(&volume.name)));

        if let VolumeKind::Shaped { solid, material } = &volume.kind {
            if let Some(material) = material {
                output.push_str(&format!(
                    "            <materialref ref=\"{}\"/>\n",
                    escape_xml(&material.name)
                ));
            }
            output.push_str(&format!("            <solidref ref=\"{}\"/>\n", escape_xml(solid)));
        }

        for physvol in physvols_of(registry, volume) {
            output.push_str(&format!(
                "            <physvol name=\"{}\">\n",
                escape_xml(&physvol.name)
            ));
            output.push_str(&format!(
                "                <volumeref ref=\"{}\"/>\n",
                escape_xml(&physvol.child)
            ));
            if physvol.position != DVec3::ZERO {
                output.push_str(&format!(
                    "                <position name=\"{}_pos\" unit=\"mm\" x=\"{}\" y=\"{}\" z=\"{}\"/>\n",
                    escape_xml(&physvol.name),
                    format_number(physvol.position.x),
                    format_number(physvol.position.y),
                    format_number(physvol.position.z)
                ));
            }
            if physvol.rotation != DVec3::ZERO {
                output.push_str(&format!(
                    "                <rotation name=\"{}_rot\" unit=\"rad\" x=\"{}\" y=\"{}\" z=\"{}\"/>\n",
                    escape_xml(&physvol.name),
                    format_number(physvol.rotation.x),
                    format_number(physvol.rotation.y),
                    format_number(physvol.rotation.z)
                ));
            }
            output.push_str("            </physvol>\n");
        }

        output.push_str(&format!("        </{}>\n", tag));
    }

    output.push_str("    </structure>\n");
}

/// Escaped XML-Sonderzeichen
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Element, LengthUnit, Placement, Shape, Solid, VolumeRef};

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry.add_element(Element::new("Nitrogen", "N", 7.0, 14.007));
        registry.add_element(Element::new("Oxygen", "O", 8.0, 15.999));
        let air = registry
            .add_material(Material::new(
                "Air",
                1.29e-3,
                Composition::MassFractions(vec![
                    ("Nitrogen".to_string(), 0.7),
                    ("Oxygen".to_string(), 0.3),
                ]),
            ))
            .expect("Material erwartet");
        registry
            .add_solid(Solid::from_shape(
                "WorldSolid",
                &Shape::Box { x: 1000.0, y: 1000.0, z: 1000.0 },
                LengthUnit::Mm,
            ))
            .expect("Solid erwartet");
        registry
            .add_solid(Solid::from_shape(
                "Det_solid",
                &Shape::Box { x: 10.0, y: 10.0, z: 10.0 },
                LengthUnit::Mm,
            ))
            .expect("Solid erwartet");
        registry
            .add_volume("World", VolumeKind::shaped("WorldSolid", Arc::clone(&air)))
            .expect("World erwartet");
        registry
            .add_volume("Det", VolumeKind::shaped("Det_solid", air))
            .expect("Det erwartet");
        registry.set_world("World").expect("World setzen");
        let parent = registry.handle("World").expect("Handle erwartet");
        let child = registry.handle("Det").expect("Handle erwartet");
        registry
            .add_placement(
                Placement::new("Det_pv", parent, child)
                    .with_transform(DVec3::new(0.0, 0.0, 50.0), DVec3::ZERO),
                true,
            )
            .expect("Platzierung erwartet");
        registry
    }

    #[test]
    fn test_deeply_nested_structure_is_written_children_first() {
        const DEPTH: usize = 20_000;
        let mut registry = sample_registry();
        let air = registry.material("Air").expect("Material erwartet");
        let mut parent = "Det".to_string();
        for level in 0..DEPTH {
            let name = format!("N{level}");
            registry
                .add_volume(name.as_str(), VolumeKind::shaped("Det_solid", Arc::clone(&air)))
                .expect("Volumen erwartet");
            let placement = Placement::new(
                format!("{name}_pv"),
                registry.handle(&parent).expect("Handle erwartet"),
                registry.handle(&name).expect("Handle erwartet"),
            );
            registry
                .add_placement(placement, true)
                .expect("Platzierung erwartet");
            parent = name;
        }

        let xml = write_gdml(&registry).expect("Schreiben erwartet");

        let deepest = xml.find("<volume name=\"N19999\">").expect("N19999 erwartet");
        let first = xml.find("<volume name=\"N0\">").expect("N0 erwartet");
        let world = xml.find("<volume name=\"World\">").expect("World erwartet");
        assert!(deepest < first && first < world);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&apos;");
    }

    #[test]
    fn test_children_written_before_parents() {
        let xml = write_gdml(&sample_registry()).expect("Schreiben erwartet");
        let det = xml.find("<volume name=\"Det\">").expect("Det erwartet");
        let world = xml.find("<volume name=\"World\">").expect("World erwartet");
        assert!(det < world);
        assert!(xml.contains("<world ref=\"World\"/>"));
    }

    #[test]
    fn test_physvol_written_once_with_position() {
        let xml = write_gdml(&sample_registry()).expect("Schreiben erwartet");
        assert_eq!(xml.matches("<physvol name=\"Det_pv\">").count(), 1);
        assert!(xml.contains("x=\"0\" y=\"0\" z=\"50\""));
        assert!(!xml.contains("<rotation name=\"Det_pv_rot\""));
    }

    #[test]
    fn test_dangling_child_is_skipped() {
        let mut registry = sample_registry();
        let parent = registry.handle("World").expect("Handle erwartet");
        registry.record_placement(Placement::new("Ghost_pv", parent, VolumeRef::name("Ghost")));
        let xml = write_gdml(&registry).expect("Schreiben erwartet");
        assert!(!xml.contains("Ghost"));
    }

    #[test]
    fn test_material_dependencies_written_first() {
        let mut registry = sample_registry();
        registry
            .add_material(Material::new(
                "Mix",
                2.0,
                Composition::MassFractions(vec![("Base".to_string(), 1.0)]),
            ))
            .expect("Material erwartet");
        registry
            .add_material(Material::new("Base", 1.0, Composition::Simple { z: 1.0, a: 1.008 }))
            .expect("Material erwartet");
        let xml = write_gdml(&registry).expect("Schreiben erwartet");
        let base = xml.find("<material name=\"Base\"").expect("Base erwartet");
        let mix = xml.find("<material name=\"Mix\"").expect("Mix erwartet");
        assert!(base < mix);
    }

    #[test]
    fn test_no_world_fails() {
        assert!(write_gdml(&Registry::new()).is_err());
    }
}
