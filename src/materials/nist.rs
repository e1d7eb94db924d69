//! Referenz-Materialkatalog (NIST/Geant4-Namen `G4_*`).

mod tables;

use crate::core::{Composition, Element, Material, Registry};
use anyhow::{bail, Context, Result};
use std::sync::Arc;

/// Standard-Präfix der Referenzmaterialien
pub const DEFAULT_REFERENCE_PREFIX: &str = "G4_";

/// Katalog unveränderlicher Standardmaterialien und -elemente.
///
/// Alle Aufrufe gelten als "externe" Aufrufe und dürfen fehlschlagen.
pub trait ReferenceCatalog {
    /// Folgt `name` der Namenskonvention dieses Katalogs?
    fn is_reference_name(&self, name: &str) -> bool;

    /// Vollständige Liste aller Materialnamen des Katalogs.
    fn material_names(&self) -> Result<Vec<String>>;

    /// Erzeugt das Material `name` in der Registry und liefert die Instanz.
    fn materialize(&self, name: &str, registry: &mut Registry) -> Result<Arc<Material>>;

    /// Standard-Element zu einem Symbol.
    fn element(&self, symbol: &str) -> Option<Element>;
}

/// Eingebetteter NIST-Katalog
#[derive(Debug, Clone)]
pub struct NistCatalog {
    prefix: String,
}

impl Default for NistCatalog {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_REFERENCE_PREFIX)
    }
}

impl NistCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Katalog mit abweichendem Namenspräfix (Namenskonvention)
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl ReferenceCatalog for NistCatalog {
    fn is_reference_name(&self, name: &str) -> bool {
        !self.prefix.is_empty() && name.starts_with(&self.prefix)
    }

    fn material_names(&self) -> Result<Vec<String>> {
        Ok(tables::MATERIALS
            .iter()
            .map(|(name, ..)| name.to_string())
            .collect())
    }

    fn materialize(&self, name: &str, registry: &mut Registry) -> Result<Arc<Material>> {
        let Some(&(_, density, state, parts)) =
            tables::MATERIALS.iter().find(|(n, ..)| *n == name)
        else {
            bail!("'{name}' ist kein NIST-Material");
        };

        let mut fractions = Vec::with_capacity(parts.len());
        for (symbol, fraction) in parts {
            let element = self
                .element(symbol)
                .with_context(|| format!("NIST-Element '{symbol}' fehlt für '{name}'"))?;
            let element = registry.add_element(element);
            fractions.push((element.name.clone(), *fraction));
        }

        let mut material = Material::new(name, density, Composition::MassFractions(fractions));
        material.state = Some(state);
        let material = registry.add_material(material)?;
        log::debug!("NIST-Material '{}' materialisiert", name);
        Ok(material)
    }

    fn element(&self, symbol: &str) -> Option<Element> {
        tables::ELEMENTS
            .iter()
            .find(|(s, ..)| *s == symbol)
            .map(|&(symbol, name, z, a)| Element::new(name, symbol, f64::from(z), a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_convention() {
        let catalog = NistCatalog::new();
        assert!(catalog.is_reference_name("G4_AIR"));
        assert!(!catalog.is_reference_name("Steel"));
        assert!(NistCatalog::with_prefix("NIST_").is_reference_name("NIST_AIR"));
    }

    #[test]
    fn test_materialize_reuses_elements() {
        let catalog = NistCatalog::new();
        let mut registry = Registry::new();
        let water = catalog
            .materialize("G4_WATER", &mut registry)
            .expect("Wasser erwartet");
        catalog
            .materialize("G4_AIR", &mut registry)
            .expect("Luft erwartet");

        assert_eq!(water.density, 1.0);
        // H, O aus Wasser; C, N, Ar neu aus Luft (O wiederverwendet)
        assert_eq!(registry.element_count(), 5);
        assert_eq!(registry.material_count(), 2);
    }

    #[test]
    fn test_materialize_twice_fails_and_unknown_name_fails() {
        let catalog = NistCatalog::new();
        let mut registry = Registry::new();
        catalog.materialize("G4_Fe", &mut registry).expect("Eisen");
        assert!(catalog.materialize("G4_Fe", &mut registry).is_err());
        assert!(catalog.materialize("G4_UNOBTAINIUM", &mut registry).is_err());
    }

    #[test]
    fn test_tables_are_consistent() {
        let catalog = NistCatalog::new();
        for (name, density, _, parts) in tables::MATERIALS {
            assert!(*density > 0.0, "{name}");
            let total: f64 = parts.iter().map(|(_, f)| f).sum();
            assert!((total - 1.0).abs() < 1e-3, "{name}: {total}");
            for (symbol, _) in parts.iter() {
                assert!(catalog.element(symbol).is_some(), "{name}: {symbol}");
            }
        }
    }
}
