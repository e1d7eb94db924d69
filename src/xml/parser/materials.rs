//! Aufbau von Elementen und Materialien aus dem `<materials>`-Block.

use super::values::{attr, required_attr, Constants};
use crate::core::{
    Composition, DensityUnit, Element, Material, MaterialState, PressureUnit, TemperatureUnit,
};
use anyhow::{bail, Context, Result};

/// Rohdaten eines `<element>` während des Parsens
#[derive(Debug, Default)]
pub(super) struct ElementBuilder {
    pub(super) name: String,
    pub(super) symbol: Option<String>,
    pub(super) z: Option<f64>,
    pub(super) a: Option<f64>,
}

impl ElementBuilder {
    pub(super) fn start(attributes: &[(String, String)], constants: &Constants) -> Result<Self> {
        let name = required_attr(attributes, "name", "element")?.to_string();
        let z = attr(attributes, "Z")
            .map(|z| constants.evaluate(z))
            .transpose()
            .with_context(|| format!("Element '{}': Z ungueltig", name))?;
        Ok(Self {
            symbol: attr(attributes, "formula").map(str::to_string),
            name,
            z,
            a: None,
        })
    }

    pub(super) fn finish(self) -> Element {
        let symbol = self.symbol.unwrap_or_else(|| self.name.clone());
        if self.z.is_none() {
            log::warn!("Element '{}' ohne Z (Isotop-Zusammensetzung wird nicht unterstuetzt)", self.name);
        }
        Element::new(self.name, symbol, self.z.unwrap_or(0.0), self.a.unwrap_or(0.0))
    }
}

/// Rohdaten eines `<material>` während des Parsens
#[derive(Debug, Default)]
pub(super) struct MaterialBuilder {
    name: String,
    state: Option<MaterialState>,
    z: Option<f64>,
    atom: Option<f64>,
    density: Option<f64>,
    temperature: Option<f64>,
    pressure: Option<f64>,
    fractions: Vec<(String, f64)>,
    composites: Vec<(String, u32)>,
}

impl MaterialBuilder {
    pub(super) fn start(attributes: &[(String, String)], constants: &Constants) -> Result<Self> {
        let name = required_attr(attributes, "name", "material")?.to_string();
        let state = match attr(attributes, "state") {
            Some(text) => match MaterialState::parse(text) {
                Some(state) => Some(state),
                None => {
                    log::warn!("Material '{}': unbekannter Zustand '{}'", name, text);
                    None
                }
            },
            None => None,
        };
        let z = attr(attributes, "Z")
            .map(|z| constants.evaluate(z))
            .transpose()
            .with_context(|| format!("Material '{}': Z ungueltig", name))?;
        Ok(Self {
            name,
            state,
            z,
            ..Self::default()
        })
    }

    /// Verarbeitet ein leeres Kind-Element (`D`, `T`, `P`, `atom`, `fraction`, `composite`).
    pub(super) fn child(
        &mut self,
        tag: &str,
        attributes: &[(String, String)],
        constants: &Constants,
    ) -> Result<()> {
        let value = || -> Result<f64> {
            let text = required_attr(attributes, "value", tag)?;
            constants
                .evaluate(text)
                .with_context(|| format!("Material '{}': <{}> ungueltig", self.name, tag))
        };

        match tag {
            "D" => {
                let unit = match attr(attributes, "unit") {
                    Some(unit) => DensityUnit::parse(unit)
                        .with_context(|| format!("Dichte-Einheit '{}' unbekannt", unit))?,
                    None => DensityUnit::GramPerCm3,
                };
                self.density = Some(unit.to_g_per_cm3(value()?));
            }
            "T" => {
                let unit = match attr(attributes, "unit") {
                    Some(unit) => TemperatureUnit::parse(unit)
                        .with_context(|| format!("Temperatur-Einheit '{}' unbekannt", unit))?,
                    None => TemperatureUnit::Kelvin,
                };
                self.temperature = Some(unit.to_kelvin(value()?));
            }
            "P" => {
                let unit = match attr(attributes, "unit") {
                    Some(unit) => PressureUnit::parse(unit)
                        .with_context(|| format!("Druck-Einheit '{}' unbekannt", unit))?,
                    None => PressureUnit::Pascal,
                };
                self.pressure = Some(unit.to_pascal(value()?));
            }
            "atom" => self.atom = Some(value()?),
            "fraction" => {
                let reference = required_attr(attributes, "ref", tag)?.to_string();
                let n = constants.evaluate(required_attr(attributes, "n", tag)?)?;
                self.fractions.push((reference, n));
            }
            "composite" => {
                let reference = required_attr(attributes, "ref", tag)?.to_string();
                let n = constants.evaluate(required_attr(attributes, "n", tag)?)?;
                if n < 0.0 || n.fract() != 0.0 {
                    bail!("Material '{}': composite n={} ist keine Anzahl", self.name, n);
                }
                self.composites.push((reference, n as u32));
            }
            other => log::debug!("Material '{}': <{}> ignoriert", self.name, other),
        }
        Ok(())
    }

    pub(super) fn finish(self) -> Result<Material> {
        let Some(density) = self.density else {
            bail!("Material '{}' ohne Dichte <D>", self.name);
        };

        let composition = if !self.fractions.is_empty() {
            Composition::MassFractions(self.fractions)
        } else if !self.composites.is_empty() {
            Composition::AtomCounts(self.composites)
        } else if let Some(z) = self.z {
            Composition::Simple {
                z,
                a: self.atom.unwrap_or(0.0),
            }
        } else {
            bail!("Material '{}' ohne Zusammensetzung", self.name);
        };

        let mut material = Material::new(self.name, density, composition);
        material.state = self.state;
        material.temperature = self.temperature;
        material.pressure = self.pressure;
        Ok(material)
    }
}
