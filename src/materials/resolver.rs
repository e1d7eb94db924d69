//! Material-Auflösung: Name → gemeinsame Material-Instanz der Registry.

use super::catalog::UserMaterialCatalog;
use super::formula::parse_formula;
use super::nist::{NistCatalog, ReferenceCatalog};
use super::record::{RecordComposition, UserMaterialRecord};
use crate::core::{Composition, EditorError, Element, Material, Registry};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Löst Materialnamen gegen Registry, Referenzkatalog und Benutzerkatalog auf.
///
/// Hält den Namens-Cache des Referenzkatalogs für die Lebensdauer der
/// Sitzung; er wird nur nach erfolgreichem Abruf befüllt.
pub struct MaterialResolver {
    reference: Box<dyn ReferenceCatalog>,
    reference_names: Option<Vec<String>>,
}

impl Default for MaterialResolver {
    fn default() -> Self {
        Self::with_catalog(Box::new(NistCatalog::new()))
    }
}

impl std::fmt::Debug for MaterialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialResolver")
            .field("cached_reference_names", &self.reference_names.as_ref().map(Vec::len))
            .finish()
    }
}

impl MaterialResolver {
    /// Resolver mit dem eingebetteten NIST-Katalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(reference: Box<dyn ReferenceCatalog>) -> Self {
        Self {
            reference,
            reference_names: None,
        }
    }

    pub fn reference(&self) -> &dyn ReferenceCatalog {
        self.reference.as_ref()
    }

    /// Liefert die Material-Instanz zu `name`, erzeugt sie bei Bedarf.
    ///
    /// Reihenfolge: Registry, Referenzkatalog (Namenskonvention),
    /// Benutzerkatalog. Ein bereits registriertes Material wird nie dupliziert.
    pub fn resolve(
        &self,
        name: &str,
        registry: &mut Registry,
        user: &UserMaterialCatalog,
    ) -> Result<Arc<Material>, EditorError> {
        if let Some(material) = registry.material(name) {
            return Ok(material);
        }

        if self.reference.is_reference_name(name) {
            return match self.reference.materialize(name, registry) {
                Ok(material) => {
                    log::info!("Referenzmaterial '{}' erzeugt", name);
                    Ok(material)
                }
                Err(e) => match registry.material(name) {
                    Some(material) => {
                        log::warn!(
                            "Referenzmaterial '{}' meldete Fehler ({:#}), verwende vorhandene Instanz",
                            name,
                            e
                        );
                        Ok(material)
                    }
                    None => {
                        log::warn!("Referenzmaterial '{}' nicht erzeugbar: {:#}", name, e);
                        Err(EditorError::UnknownReferenceMaterial(name.to_string()))
                    }
                },
            };
        }

        let record = match user.lookup(name) {
            Some(record) => record?,
            None => return Err(EditorError::UnknownMaterial(name.to_string())),
        };
        let material = self.build_user_material(name, record, registry)?;
        log::info!("Benutzermaterial '{}' erzeugt", name);
        Ok(material)
    }

    /// Baut ein Benutzermaterial und registriert es.
    fn build_user_material(
        &self,
        name: &str,
        record: &UserMaterialRecord,
        registry: &mut Registry,
    ) -> Result<Arc<Material>, EditorError> {
        record.validate(name)?;

        let composition = match &record.composition {
            RecordComposition::Formula(formula) => {
                let atoms = parse_formula(formula)
                    .map_err(|e| EditorError::invalid_record(name, format!("Formel: {e}")))?;
                let counts = atoms
                    .into_iter()
                    .map(|(symbol, count)| (self.element_for(&symbol, registry).name.clone(), count))
                    .collect();
                Composition::AtomCounts(counts)
            }
            RecordComposition::Fractions(fractions) => {
                let parts = fractions
                    .iter()
                    .map(|part| {
                        let element = self.element_for(part.element.trim(), registry);
                        (element.name.clone(), part.fraction)
                    })
                    .collect();
                Composition::MassFractions(parts)
            }
        };

        let mut material = Material::new(name, record.density_g_per_cm3(), composition);
        material.state = record.state;
        material.temperature = record.temperature_kelvin();
        material.pressure = record.pressure_pascal();

        registry.add_material(material)
    }

    /// Element zu einem Symbol: Standarddatenbank, sonst Platzhalter.
    fn element_for(&self, symbol: &str, registry: &mut Registry) -> Arc<Element> {
        match self.reference.element(symbol) {
            Some(element) => registry.add_element(element),
            None => {
                log::warn!(
                    "Element '{}' unbekannt, verwende Platzhalter (Z=1, A=1)",
                    symbol
                );
                registry.add_element(Element::placeholder(symbol))
            }
        }
    }

    /// Alle wählbaren Materialnamen: Registry, Referenzkatalog, Benutzerkatalog.
    ///
    /// Ohne Duplikate, case-insensitiv sortiert. Ist der Referenzkatalog
    /// nicht abrufbar, fehlen seine Namen (kein Fehler).
    pub fn list_available(
        &mut self,
        registry: &Registry,
        user: &UserMaterialCatalog,
    ) -> Vec<String> {
        let mut names: BTreeSet<String> = registry.material_names().map(str::to_string).collect();
        names.extend(self.reference_names().iter().cloned());
        names.extend(user.names().map(str::to_string));

        let mut names: Vec<String> = names.into_iter().collect();
        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        names
    }

    fn reference_names(&mut self) -> &[String] {
        if self.reference_names.is_none() {
            match self.reference.material_names() {
                Ok(names) => self.reference_names = Some(names),
                Err(e) => log::warn!("Referenzkatalog nicht abrufbar: {:#}", e),
            }
        }
        self.reference_names.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests;
