//! Vom Benutzer definierte Materialeinträge (persistiert im Katalog).

use super::formula::parse_formula;
use crate::core::{DensityUnit, EditorError, MaterialState, PressureUnit, TemperatureUnit};
use serde::{Deserialize, Serialize};

/// Toleranz für die Summe der Massenanteile
pub const FRACTION_SUM_TOLERANCE: f64 = 0.001;

/// Art des Eintrags (JSON-Feld `type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Verbindung aus Summenformel
    Compound,
    /// Gemisch aus Elementen mit Massenanteilen
    Mixture,
}

/// Massenanteil eines Elements in einem Gemisch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassFraction {
    /// Elementsymbol
    pub element: String,
    pub fraction: f64,
}

/// JSON-Feld `composition`: Formel-String oder Liste von Massenanteilen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordComposition {
    Formula(String),
    Fractions(Vec<MassFraction>),
}

/// Ein Eintrag im Benutzer-Materialkatalog.
///
/// Das JSON-Format ist kompatibel zu bestehenden Katalogdateien:
///
/// ```json
/// { "type": "mixture", "density": 1.0, "density_unit": "g/cm3",
///   "composition": [{"element": "H", "fraction": 0.112}, {"element": "O", "fraction": 0.888}],
///   "state": "liquid" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMaterialRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub density: f64,
    #[serde(default)]
    pub density_unit: DensityUnit,
    pub composition: RecordComposition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MaterialState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_unit: Option<TemperatureUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_unit: Option<PressureUnit>,
}

impl UserMaterialRecord {
    /// Verbindung aus einer Summenformel
    pub fn compound(density: f64, density_unit: DensityUnit, formula: impl Into<String>) -> Self {
        Self::with_composition(
            RecordKind::Compound,
            density,
            density_unit,
            RecordComposition::Formula(formula.into()),
        )
    }

    /// Gemisch aus (Symbol, Massenanteil)-Paaren
    pub fn mixture(density: f64, density_unit: DensityUnit, fractions: &[(&str, f64)]) -> Self {
        let fractions = fractions
            .iter()
            .map(|(element, fraction)| MassFraction {
                element: element.to_string(),
                fraction: *fraction,
            })
            .collect();
        Self::with_composition(
            RecordKind::Mixture,
            density,
            density_unit,
            RecordComposition::Fractions(fractions),
        )
    }

    fn with_composition(
        kind: RecordKind,
        density: f64,
        density_unit: DensityUnit,
        composition: RecordComposition,
    ) -> Self {
        Self {
            kind,
            density,
            density_unit,
            composition,
            state: None,
            temperature: None,
            temp_unit: None,
            pressure: None,
            pressure_unit: None,
        }
    }

    pub fn with_state(mut self, state: MaterialState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_temperature(mut self, value: f64, unit: TemperatureUnit) -> Self {
        self.temperature = Some(value);
        self.temp_unit = Some(unit);
        self
    }

    pub fn with_pressure(mut self, value: f64, unit: PressureUnit) -> Self {
        self.pressure = Some(value);
        self.pressure_unit = Some(unit);
        self
    }

    /// Dichte in g/cm³
    pub fn density_g_per_cm3(&self) -> f64 {
        self.density_unit.to_g_per_cm3(self.density)
    }

    /// Temperatur in Kelvin (Einheit fehlt → Kelvin)
    pub fn temperature_kelvin(&self) -> Option<f64> {
        self.temperature
            .map(|t| self.temp_unit.unwrap_or_default().to_kelvin(t))
    }

    /// Druck in Pascal (Einheit fehlt → Pascal)
    pub fn pressure_pascal(&self) -> Option<f64> {
        self.pressure
            .map(|p| self.pressure_unit.unwrap_or_default().to_pascal(p))
    }

    /// Summenformel einer Verbindung
    pub fn formula(&self) -> Option<&str> {
        match &self.composition {
            RecordComposition::Formula(formula) => Some(formula.as_str()),
            RecordComposition::Fractions(_) => None,
        }
    }

    /// Massenanteile eines Gemischs
    pub fn fractions(&self) -> Option<&[MassFraction]> {
        match &self.composition {
            RecordComposition::Fractions(fractions) => Some(fractions.as_slice()),
            RecordComposition::Formula(_) => None,
        }
    }

    /// Prüft den Eintrag vor dem Speichern bzw. Materialisieren.
    pub fn validate(&self, name: &str) -> Result<(), EditorError> {
        if name.trim().is_empty() {
            return Err(EditorError::invalid_record(name, "Name ist leer"));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(EditorError::invalid_record(
                name,
                format!("Dichte muss positiv sein (ist {})", self.density),
            ));
        }
        if self.temperature.is_some_and(|t| !t.is_finite()) {
            return Err(EditorError::invalid_record(name, "Temperatur ungueltig"));
        }
        if self.pressure.is_some_and(|p| !p.is_finite()) {
            return Err(EditorError::invalid_record(name, "Druck ungueltig"));
        }

        match (self.kind, &self.composition) {
            (RecordKind::Compound, RecordComposition::Formula(formula)) => {
                parse_formula(formula)
                    .map_err(|e| EditorError::invalid_record(name, format!("Formel: {e}")))?;
            }
            (RecordKind::Mixture, RecordComposition::Fractions(fractions)) => {
                validate_fractions(name, fractions)?;
            }
            (RecordKind::Compound, RecordComposition::Fractions(_)) => {
                return Err(EditorError::invalid_record(
                    name,
                    "Verbindung erwartet eine Summenformel",
                ));
            }
            (RecordKind::Mixture, RecordComposition::Formula(_)) => {
                return Err(EditorError::invalid_record(
                    name,
                    "Gemisch erwartet eine Liste von Massenanteilen",
                ));
            }
        }
        Ok(())
    }
}

fn validate_fractions(name: &str, fractions: &[MassFraction]) -> Result<(), EditorError> {
    if fractions.is_empty() {
        return Err(EditorError::invalid_record(name, "Gemisch ohne Elemente"));
    }
    for part in fractions {
        if part.element.trim().is_empty() {
            return Err(EditorError::invalid_record(name, "Elementsymbol fehlt"));
        }
        if !(part.fraction > 0.0 && part.fraction <= 1.0) {
            return Err(EditorError::invalid_record(
                name,
                format!(
                    "Anteil von {} muss in (0, 1] liegen (ist {})",
                    part.element, part.fraction
                ),
            ));
        }
    }
    let total: f64 = fractions.iter().map(|p| p.fraction).sum();
    if (total - 1.0).abs() > FRACTION_SUM_TOLERANCE {
        return Err(EditorError::invalid_record(
            name,
            format!("Summe der Anteile ist {total:.4}, erwartet 1.0"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mixture_sum_within_tolerance() {
        let ok = UserMaterialRecord::mixture(1.0, DensityUnit::GramPerCm3, &[("H", 0.112), ("O", 0.888)]);
        assert!(ok.validate("MyWater").is_ok());

        let almost = UserMaterialRecord::mixture(1.0, DensityUnit::GramPerCm3, &[("H", 0.1125), ("O", 0.8884)]);
        assert!(almost.validate("Almost").is_ok());

        let bad = UserMaterialRecord::mixture(1.0, DensityUnit::GramPerCm3, &[("H", 0.5), ("O", 0.4)]);
        assert!(matches!(
            bad.validate("Bad"),
            Err(EditorError::InvalidMaterialRecord { .. })
        ));
    }

    #[test]
    fn test_fraction_and_density_bounds() {
        let zero = UserMaterialRecord::mixture(1.0, DensityUnit::GramPerCm3, &[("H", 0.0), ("O", 1.0)]);
        assert!(zero.validate("Zero").is_err());

        let negative = UserMaterialRecord::compound(-1.0, DensityUnit::GramPerCm3, "H2O");
        assert!(negative.validate("Neg").is_err());

        let empty = UserMaterialRecord::compound(1.0, DensityUnit::GramPerCm3, "");
        assert!(empty.validate("Empty").is_err());
    }

    #[test]
    fn test_unit_conversions() {
        let record = UserMaterialRecord::compound(1290.0, DensityUnit::KilogramPerM3, "N2")
            .with_temperature(20.0, TemperatureUnit::Celsius)
            .with_pressure(1.0, PressureUnit::Atm);
        assert_relative_eq!(record.density_g_per_cm3(), 1.29);
        assert_relative_eq!(record.temperature_kelvin().unwrap_or_default(), 293.15);
        assert_relative_eq!(record.pressure_pascal().unwrap_or_default(), 101_325.0);
    }

    #[test]
    fn test_json_layout_matches_catalog_file() {
        let json = r#"{
            "type": "compound",
            "density": 2.32,
            "density_unit": "g/cm3",
            "composition": "SiO2",
            "state": "solid",
            "temperature": 300.0,
            "temp_unit": "K",
            "pressure": 1.0,
            "pressure_unit": "bar"
        }"#;
        let record: UserMaterialRecord = serde_json::from_str(json).expect("JSON erwartet");
        assert_eq!(record.kind, RecordKind::Compound);
        assert_eq!(record.formula(), Some("SiO2"));
        assert_eq!(record.state, Some(MaterialState::Solid));
        assert_eq!(record.pressure_unit, Some(PressureUnit::Bar));

        let mixture = UserMaterialRecord::mixture(1.0, DensityUnit::MilligramPerCm3, &[("N", 1.0)]);
        let value = serde_json::to_value(&mixture).expect("Serialisierung");
        assert_eq!(value["type"], "mixture");
        assert_eq!(value["density_unit"], "mg/cm3");
        assert_eq!(value["composition"][0]["element"], "N");
        assert!(value.get("state").is_none());
    }

    #[test]
    fn test_kind_and_composition_must_match() {
        let mut record = UserMaterialRecord::compound(1.0, DensityUnit::GramPerCm3, "H2O");
        record.kind = RecordKind::Mixture;
        assert!(record.validate("Mismatch").is_err());
    }
}
