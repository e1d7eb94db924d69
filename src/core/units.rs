//! Einheiten und Umrechnung in die kanonischen Einheiten der Geometrie.
//!
//! Kanonisch sind: Dichte in g/cm³, Temperatur in Kelvin, Druck in Pascal,
//! Längen in mm und Winkel in rad. Die serialisierten Namen entsprechen den
//! Einträgen im Benutzer-Materialkatalog (`"g/cm3"`, `"K"`, `"pascal"`, …).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dichte-Einheit eines Materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DensityUnit {
    /// Gramm pro Kubikzentimeter (kanonisch)
    #[default]
    #[serde(rename = "g/cm3")]
    GramPerCm3,
    /// Milligramm pro Kubikzentimeter
    #[serde(rename = "mg/cm3")]
    MilligramPerCm3,
    /// Kilogramm pro Kubikmeter
    #[serde(rename = "kg/m3")]
    KilogramPerM3,
}

impl DensityUnit {
    /// Faktor nach g/cm³.
    pub fn factor(self) -> f64 {
        match self {
            Self::GramPerCm3 => 1.0,
            Self::MilligramPerCm3 => 1e-3,
            Self::KilogramPerM3 => 1e-3,
        }
    }

    /// Rechnet einen Wert dieser Einheit in g/cm³ um.
    pub fn to_g_per_cm3(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// GDML-Schreibweise der Einheit.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GramPerCm3 => "g/cm3",
            Self::MilligramPerCm3 => "mg/cm3",
            Self::KilogramPerM3 => "kg/m3",
        }
    }

    /// Parst die GDML-Schreibweise (`g/cm3`, `mg/cm3`, `kg/m3`).
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "g/cm3" => Some(Self::GramPerCm3),
            "mg/cm3" => Some(Self::MilligramPerCm3),
            "kg/m3" => Some(Self::KilogramPerM3),
            _ => None,
        }
    }
}

/// Temperatur-Einheit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "K")]
    Kelvin,
    #[serde(rename = "C")]
    Celsius,
}

impl TemperatureUnit {
    /// Rechnet nach Kelvin um (+273.15 nur bei Celsius).
    pub fn to_kelvin(self, value: f64) -> f64 {
        match self {
            Self::Kelvin => value,
            Self::Celsius => value + 273.15,
        }
    }

    /// Parst `K`/`kelvin` oder `C`/`celsius`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "K" | "kelvin" => Some(Self::Kelvin),
            "C" | "celsius" => Some(Self::Celsius),
            _ => None,
        }
    }
}

/// Druck-Einheit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureUnit {
    #[default]
    Pascal,
    Bar,
    Atm,
}

impl PressureUnit {
    /// Faktor nach Pascal.
    pub fn factor(self) -> f64 {
        match self {
            Self::Pascal => 1.0,
            Self::Bar => 1e5,
            Self::Atm => 101_325.0,
        }
    }

    /// Rechnet nach Pascal um.
    pub fn to_pascal(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Parst `pascal`/`Pa`, `bar` und `atm`/`atmosphere`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "pascal" | "Pa" => Some(Self::Pascal),
            "bar" => Some(Self::Bar),
            "atm" | "atmosphere" => Some(Self::Atm),
            _ => None,
        }
    }
}

/// Längeneinheit für Eingaben und GDML-Attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Mm,
    Cm,
    M,
}

impl LengthUnit {
    /// Faktor nach mm.
    pub fn to_mm_factor(self) -> f64 {
        match self {
            Self::Mm => 1.0,
            Self::Cm => 10.0,
            Self::M => 1000.0,
        }
    }

    /// GDML-Schreibweise.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::M => "m",
        }
    }

    /// Parst `mm`, `cm` oder `m`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "mm" => Some(Self::Mm),
            "cm" => Some(Self::Cm),
            "m" => Some(Self::M),
            _ => None,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Winkeleinheit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Rad,
    Deg,
}

impl AngleUnit {
    /// Rechnet einen Winkel nach rad um.
    pub fn to_rad(self, value: f64) -> f64 {
        match self {
            Self::Rad => value,
            Self::Deg => value.to_radians(),
        }
    }

    /// Parst `rad`/`radian` oder `deg`/`degree`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "rad" | "radian" => Some(Self::Rad),
            "deg" | "degree" => Some(Self::Deg),
            _ => None,
        }
    }
}
