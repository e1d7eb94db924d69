//! Materialien der Registry (bereits instanziiert, d.h. "materialisiert").

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregatzustand eines Materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialState {
    #[default]
    Solid,
    Liquid,
    Gas,
}

impl MaterialState {
    /// GDML-Schreibweise (`solid`, `liquid`, `gas`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Liquid => "liquid",
            Self::Gas => "gas",
        }
    }

    /// Parst die GDML-Schreibweise.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "solid" => Some(Self::Solid),
            "liquid" => Some(Self::Liquid),
            "gas" => Some(Self::Gas),
            _ => None,
        }
    }
}

impl fmt::Display for MaterialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zusammensetzung eines Materials
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    /// Einzelnes Element über Ordnungszahl und molare Masse (GDML `Z` + `<atom>`)
    Simple { z: f64, a: f64 },
    /// Massenanteile; Referenzen zeigen auf Elemente oder andere Materialien
    MassFractions(Vec<(String, f64)>),
    /// Atomanzahlen pro Element (Summenformel, GDML `<composite>`)
    AtomCounts(Vec<(String, u32)>),
}

impl Composition {
    /// Alle referenzierten Element-/Materialnamen in Reihenfolge.
    pub fn references(&self) -> Vec<&str> {
        match self {
            Self::Simple { .. } => Vec::new(),
            Self::MassFractions(parts) => parts.iter().map(|(r, _)| r.as_str()).collect(),
            Self::AtomCounts(parts) => parts.iter().map(|(r, _)| r.as_str()).collect(),
        }
    }
}

/// Ein Material der Registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Eindeutiger Name innerhalb der Registry
    pub name: String,
    /// Dichte in g/cm³
    pub density: f64,
    /// Aggregatzustand (optional, GDML-Attribut `state`)
    pub state: Option<MaterialState>,
    /// Temperatur in Kelvin
    pub temperature: Option<f64>,
    /// Druck in Pascal
    pub pressure: Option<f64>,
    pub composition: Composition,
}

impl Material {
    /// Erstellt ein Material ohne optionale Zustandsgrößen.
    pub fn new(name: impl Into<String>, density: f64, composition: Composition) -> Self {
        Self {
            name: name.into(),
            density,
            state: None,
            temperature: None,
            pressure: None,
            composition,
        }
    }
}
