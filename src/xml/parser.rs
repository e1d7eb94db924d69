//! Parser für GDML-Geometriedateien.

mod materials;
mod structure;
pub(crate) mod values;

use crate::core::{Define, Registry, Solid, SolidChild};
use anyhow::{anyhow, bail, Context, Result};
use materials::{ElementBuilder, MaterialBuilder};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use structure::{PhysvolBuilder, Transforms, VolumeBuilder};
use values::{attr, required_attr, Constants};

/// Aktueller Abschnitt der GDML-Datei
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Define,
    Materials,
    Solids,
    Structure,
    Setup,
}

/// Liest alle Attribute eines Tags (Name, unescaped Wert).
fn read_attributes(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

/// Trennt das `name`-Attribut von den übrigen Attributen.
fn split_name(tag: &str, mut attributes: Vec<(String, String)>) -> Result<(String, Vec<(String, String)>)> {
    let index = attributes
        .iter()
        .position(|(k, _)| k == "name")
        .ok_or_else(|| anyhow!("<{}> ohne Attribut 'name'", tag))?;
    let (_, name) = attributes.remove(index);
    Ok((name, attributes))
}

/// Sammelt alle Rohdaten während des Event-Durchlaufs
#[derive(Default)]
struct GdmlBuilder {
    constants: Constants,
    transforms: Transforms,
    defines: Vec<Define>,
    elements: Vec<ElementBuilder>,
    materials: Vec<MaterialBuilder>,
    solids: Vec<Solid>,
    volumes: Vec<VolumeBuilder>,
    world: Option<String>,
    setup: Option<(String, String)>,

    current_element: Option<ElementBuilder>,
    current_material: Option<MaterialBuilder>,
    current_solid: Option<Solid>,
    current_volume: Option<VolumeBuilder>,
    current_physvol: Option<PhysvolBuilder>,
}

impl GdmlBuilder {
    fn define(&mut self, tag: &str, attributes: Vec<(String, String)>) -> Result<()> {
        let (name, rest) = split_name(tag, attributes)?;
        match tag {
            "constant" | "variable" | "quantity" => {
                let value = self
                    .constants
                    .evaluate(required_attr(&rest, "value", tag)?)
                    .with_context(|| format!("<{} name=\"{}\"> ungueltig", tag, name))?;
                self.constants.insert(&name, value);
            }
            "position" => {
                let value = structure::position(&rest, &self.constants)?;
                self.transforms.positions.insert(name.clone(), value);
            }
            "rotation" => {
                let value = structure::rotation(&rest, &self.constants)?;
                self.transforms.rotations.insert(name.clone(), value);
            }
            _ => log::debug!("<define>-Eintrag <{}> '{}' nur durchgereicht", tag, name),
        }
        self.defines.push(Define {
            tag: tag.to_string(),
            name,
            attributes: rest,
        });
        Ok(())
    }

    /// Öffnendes Tag (mit Kindern)
    fn start(&mut self, section: Section, tag: &str, attributes: Vec<(String, String)>) -> Result<()> {
        match section {
            Section::Materials => match tag {
                "element" => {
                    self.current_element = Some(ElementBuilder::start(&attributes, &self.constants)?);
                }
                "material" => {
                    self.current_material =
                        Some(MaterialBuilder::start(&attributes, &self.constants)?);
                }
                "isotope" => log::warn!("<isotope> wird nicht unterstuetzt und ignoriert"),
                _ => {}
            },
            Section::Solids => {
                if self.current_solid.is_none() {
                    let (name, rest) = split_name(tag, attributes)?;
                    self.current_solid = Some(Solid {
                        name,
                        tag: tag.to_string(),
                        attributes: rest,
                        children: Vec::new(),
                    });
                } else {
                    log::warn!("Verschachteltes Solid-Element <{}> ignoriert", tag);
                }
            }
            Section::Structure => match tag {
                "volume" | "assembly" => {
                    self.current_volume = Some(VolumeBuilder::start(tag, &attributes)?);
                }
                "physvol" => {
                    self.current_physvol = Some(PhysvolBuilder {
                        name: attr(&attributes, "name").map(str::to_string),
                        ..PhysvolBuilder::default()
                    });
                }
                _ => log::debug!("<{}> in <structure> ignoriert", tag),
            },
            Section::Setup | Section::Define | Section::None => {}
        }
        Ok(())
    }

    /// Leeres Tag (ohne Kinder)
    fn empty(&mut self, section: Section, tag: &str, attributes: Vec<(String, String)>) -> Result<()> {
        match section {
            Section::Define => self.define(tag, attributes)?,
            Section::Materials => {
                if let Some(material) = self.current_material.as_mut() {
                    material.child(tag, &attributes, &self.constants)?;
                } else if let Some(element) = self.current_element.as_mut() {
                    if tag == "atom" {
                        let text = required_attr(&attributes, "value", tag)?;
                        element.a = Some(self.constants.evaluate(text)?);
                    } else if tag == "fraction" {
                        log::warn!(
                            "Element '{}' aus Isotopen: Zusammensetzung wird ignoriert",
                            element.name
                        );
                    }
                } else if tag == "element" {
                    let element = ElementBuilder::start(&attributes, &self.constants)?;
                    self.elements.push(element);
                }
            }
            Section::Solids => match self.current_solid.as_mut() {
                Some(solid) => solid.children.push(SolidChild {
                    tag: tag.to_string(),
                    attributes,
                }),
                None => {
                    let (name, rest) = split_name(tag, attributes)?;
                    self.solids.push(Solid {
                        name,
                        tag: tag.to_string(),
                        attributes: rest,
                        children: Vec::new(),
                    });
                }
            },
            Section::Structure => self.structure_child(tag, &attributes)?,
            Section::Setup => {
                if tag == "world" {
                    self.world = Some(required_attr(&attributes, "ref", tag)?.to_string());
                }
            }
            Section::None => {}
        }
        Ok(())
    }

    fn structure_child(&mut self, tag: &str, attributes: &[(String, String)]) -> Result<()> {
        if let Some(physvol) = self.current_physvol.as_mut() {
            match tag {
                "volumeref" => {
                    physvol.volume_ref = Some(required_attr(attributes, "ref", tag)?.to_string());
                }
                "position" => physvol.position = structure::position(attributes, &self.constants)?,
                "rotation" => physvol.rotation = structure::rotation(attributes, &self.constants)?,
                "positionref" => {
                    physvol.position = structure::lookup(&self.transforms.positions, attributes, tag)?;
                }
                "rotationref" => {
                    physvol.rotation = structure::lookup(&self.transforms.rotations, attributes, tag)?;
                }
                "file" => log::warn!("<physvol> mit externer <file> wird nicht unterstuetzt"),
                _ => log::debug!("<{}> in <physvol> ignoriert", tag),
            }
            return Ok(());
        }

        let Some(volume) = self.current_volume.as_mut() else {
            log::debug!("<{}> ausserhalb eines Volumens ignoriert", tag);
            return Ok(());
        };
        match tag {
            "materialref" => {
                volume.material_ref = Some(required_attr(attributes, "ref", tag)?.to_string());
            }
            "solidref" => volume.solid_ref = Some(required_attr(attributes, "ref", tag)?.to_string()),
            _ => log::debug!("<{}> in Volumen '{}' ignoriert", tag, volume.name),
        }
        Ok(())
    }

    /// Schließendes Tag
    fn end(&mut self, section: Section, tag: &str) -> Result<()> {
        match (section, tag) {
            (Section::Materials, "element") => {
                if let Some(element) = self.current_element.take() {
                    self.elements.push(element);
                }
            }
            (Section::Materials, "material") => {
                if let Some(material) = self.current_material.take() {
                    self.materials.push(material);
                }
            }
            (Section::Solids, _) => {
                if self.current_solid.as_ref().is_some_and(|s| s.tag == tag) {
                    if let Some(solid) = self.current_solid.take() {
                        self.solids.push(solid);
                    }
                }
            }
            (Section::Structure, "physvol") => {
                let physvol = self.current_physvol.take();
                match (self.current_volume.as_mut(), physvol) {
                    (Some(volume), Some(physvol)) => volume.physvols.push(physvol),
                    _ => bail!("<physvol> ausserhalb eines Volumens"),
                }
            }
            (Section::Structure, "volume" | "assembly") => {
                if let Some(volume) = self.current_volume.take() {
                    self.volumes.push(volume);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Baut die Registry aus den gesammelten Rohdaten.
    fn finish(self) -> Result<Registry> {
        let mut registry = Registry::new();

        for element in self.elements {
            registry.add_element(element.finish());
        }
        for material in self.materials {
            registry.add_material(material.finish()?)?;
        }
        for solid in self.solids {
            registry.add_solid(solid)?;
        }

        structure::build_structure(&mut registry, self.volumes)?;

        let world = self
            .world
            .ok_or_else(|| anyhow!("Kein <world> im <setup>-Block"))?;
        registry
            .set_world(&world)
            .with_context(|| format!("World-Volumen '{}' nicht definiert", world))?;

        registry.meta.defines = self.defines;
        if let Some((name, version)) = self.setup {
            registry.meta.setup_name = name;
            registry.meta.setup_version = version;
        }
        Ok(registry)
    }
}

/// Parsed eine GDML-Datei aus einem XML-String
pub fn parse_gdml(xml_content: &str) -> Result<Registry> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut builder = GdmlBuilder::default();
    let mut section = Section::None;
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?.into_owned();
                let attributes = read_attributes(&reader, e)?;

                if !saw_root {
                    if tag != "gdml" {
                        bail!("Kein GDML-Dokument (Wurzel <{}>)", tag);
                    }
                    saw_root = true;
                    buffer.clear();
                    continue;
                }

                match (section, tag.as_str()) {
                    (Section::None, "define") => section = Section::Define,
                    (Section::None, "materials") => section = Section::Materials,
                    (Section::None, "solids") => section = Section::Solids,
                    (Section::None, "structure") => section = Section::Structure,
                    (Section::None, "setup") => {
                        section = Section::Setup;
                        let name = attr(&attributes, "name").unwrap_or("Default").to_string();
                        let version = attr(&attributes, "version").unwrap_or("1.0").to_string();
                        builder.setup = Some((name, version));
                    }
                    (Section::None, other) => log::debug!("Abschnitt <{}> ignoriert", other),
                    (current, _) => builder.start(current, &tag, attributes)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?.into_owned();
                let attributes = read_attributes(&reader, e)?;
                builder.empty(section, &tag, attributes)?;
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?.into_owned();
                match tag.as_str() {
                    "define" | "materials" | "solids" | "structure" | "setup" => {
                        section = Section::None;
                    }
                    _ => builder.end(section, &tag)?,
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des GDML"),
            _ => {}
        }

        buffer.clear();
    }

    if !saw_root {
        bail!("Leeres Dokument");
    }
    builder.finish()
}
