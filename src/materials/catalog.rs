//! Dauerhafter Benutzer-Materialkatalog (eine JSON-Datei).

use super::record::UserMaterialRecord;
use crate::core::EditorError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Verzeichnisname unterhalb des Konfigurationsverzeichnisses
const APP_DIR: &str = "gdml_editor";
/// Dateiname des Katalogs
pub const CATALOG_FILE_NAME: &str = "user_materials.json";

/// Ein Katalogeintrag, wie er aus der Datei kam.
#[derive(Debug, Clone, PartialEq)]
enum CatalogEntry {
    Record(UserMaterialRecord),
    /// Nicht lesbarer Eintrag; wird unverändert zurückgeschrieben.
    Raw { value: Value, reason: String },
}

impl CatalogEntry {
    fn from_value(name: &str, value: Value) -> Self {
        match serde_json::from_value::<UserMaterialRecord>(value.clone()) {
            Ok(record) => Self::Record(record),
            Err(e) => {
                log::warn!("Benutzermaterial '{}' nicht lesbar: {}", name, e);
                Self::Raw {
                    value,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Record(record) => serde_json::to_value(record),
            Self::Raw { value, .. } => Ok(value.clone()),
        }
    }
}

/// Name-→-Eintrag-Speicher, komplett gelesen beim Öffnen und komplett
/// neu geschrieben bei jeder Änderung.
///
/// Einzelne unlesbare Einträge bleiben als rohes JSON erhalten. War die
/// ganze Datei unlesbar, wird sie nicht überschrieben, bis
/// [`UserMaterialCatalog::confirm_overwrite`] aufgerufen wurde.
#[derive(Debug, Clone, Default)]
pub struct UserMaterialCatalog {
    /// Katalogdatei; `None` = nur im Speicher
    path: Option<PathBuf>,
    materials: BTreeMap<String, CatalogEntry>,
    /// Grund, warum die Datei beim Öffnen nicht gelesen werden konnte
    load_error: Option<String>,
}

impl UserMaterialCatalog {
    /// Standardpfad: `<config>/gdml_editor/user_materials.json`,
    /// ersatzweise `~/.gdml_editor/user_materials.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .or_else(|| dirs::home_dir().map(|home| home.join(format!(".{APP_DIR}"))))
            .map(|dir| dir.join(CATALOG_FILE_NAME))
    }

    /// Katalog ohne Datei (Tests, CLI ohne Konfigurationsverzeichnis)
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Öffnet den Katalog unter `path`.
    ///
    /// Fehlende Datei → leerer Katalog. Unlesbare oder fehlerhafte Datei →
    /// Warnung, leerer Katalog und gesperrtes Speichern (siehe
    /// [`Self::load_error`]).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (materials, load_error) = match Self::read_file(&path) {
            Ok(materials) => (materials, None),
            Err(e) => {
                log::warn!("{}", e);
                (BTreeMap::new(), Some(e.to_string()))
            }
        };
        log::info!(
            "Benutzer-Materialkatalog geladen: {} Einträge aus {}",
            materials.len(),
            path.display()
        );
        Self {
            path: Some(path),
            materials,
            load_error,
        }
    }

    fn read_file(path: &Path) -> Result<BTreeMap<String, CatalogEntry>, EditorError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path).map_err(|e| EditorError::persistence(path, e))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let raw: BTreeMap<String, Value> =
            serde_json::from_str(&content).map_err(|e| EditorError::persistence(path, e))?;
        Ok(raw
            .into_iter()
            .map(|(name, value)| {
                let entry = CatalogEntry::from_value(&name, value);
                (name, entry)
            })
            .collect())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Fehler beim Öffnen der Datei; solange gesetzt, wird nicht gespeichert.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Bestätigt, dass eine unlesbare Katalogdatei überschrieben werden darf.
    pub fn confirm_overwrite(&mut self) {
        if let Some(reason) = self.load_error.take() {
            log::info!("Unlesbare Katalogdatei wird ueberschrieben ({})", reason);
        }
    }

    /// Liest die Datei erneut ein (verwirft ungespeicherte Änderungen).
    pub fn reload(&mut self) {
        if let Some(path) = self.path.clone() {
            *self = Self::open(path);
        }
    }

    /// Schreibt den gesamten Katalog (JSON, eingerückt).
    pub fn save(&self) -> Result<(), EditorError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(reason) = self.load_error.as_deref() {
            return Err(EditorError::persistence(
                path,
                format!("Datei beim Oeffnen unlesbar, Ueberschreiben nicht bestaetigt: {reason}"),
            ));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| EditorError::persistence(path, e))?;
            }
        }
        let mut document = serde_json::Map::new();
        for (name, entry) in &self.materials {
            let value = entry
                .to_value()
                .map_err(|e| EditorError::persistence(path, e))?;
            document.insert(name.clone(), value);
        }
        let json = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|e| EditorError::persistence(path, e))?;
        fs::write(path, json).map_err(|e| EditorError::persistence(path, e))?;
        log::debug!("Materialkatalog gespeichert: {}", path.display());
        Ok(())
    }

    /// Fügt einen Eintrag hinzu oder ersetzt ihn und speichert.
    ///
    /// Ungültige Einträge werden abgewiesen. Scheitert das Speichern, bleibt
    /// die Änderung im Speicher erhalten und der Fehler wird gemeldet.
    pub fn add(&mut self, name: &str, record: UserMaterialRecord) -> Result<(), EditorError> {
        let name = name.trim();
        record.validate(name)?;
        self.materials.insert(name.to_string(), CatalogEntry::Record(record));
        self.save()
    }

    /// Entfernt einen Eintrag und speichert. `Ok(false)` falls unbekannt.
    pub fn remove(&mut self, name: &str) -> Result<bool, EditorError> {
        if self.materials.remove(name).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Gültig gelesener Eintrag (unlesbare Einträge liefern `None`).
    pub fn get(&self, name: &str) -> Option<&UserMaterialRecord> {
        match self.materials.get(name) {
            Some(CatalogEntry::Record(record)) => Some(record),
            _ => None,
        }
    }

    /// Eintrag zu `name`; unlesbare Einträge als `InvalidMaterialRecord`.
    pub fn lookup(&self, name: &str) -> Option<Result<&UserMaterialRecord, EditorError>> {
        self.materials.get(name).map(|entry| match entry {
            CatalogEntry::Record(record) => Ok(record),
            CatalogEntry::Raw { reason, .. } => {
                Err(EditorError::invalid_record(name, reason.clone()))
            }
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Alle Namen (alphabetisch), auch unlesbare Einträge
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    /// Alle gültig gelesenen Einträge
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserMaterialRecord)> {
        self.materials.iter().filter_map(|(k, v)| match v {
            CatalogEntry::Record(record) => Some((k.as_str(), record)),
            CatalogEntry::Raw { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DensityUnit;

    fn steel() -> UserMaterialRecord {
        UserMaterialRecord::mixture(
            7.9,
            DensityUnit::GramPerCm3,
            &[("Fe", 0.7), ("Cr", 0.2), ("Ni", 0.1)],
        )
    }

    #[test]
    fn test_missing_file_is_empty_catalog() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = UserMaterialCatalog::open(dir.path().join("none.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_add_persists_and_reopens() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(CATALOG_FILE_NAME);

        let mut catalog = UserMaterialCatalog::open(&path);
        catalog.add("MySteel", steel()).expect("Speichern");
        assert!(path.exists());

        let reopened = UserMaterialCatalog::open(&path);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get("MySteel"), Some(&steel()));

        let mut reopened = reopened;
        assert!(reopened.remove("MySteel").expect("Entfernen"));
        assert!(!reopened.remove("MySteel").expect("Entfernen"));
        assert!(UserMaterialCatalog::open(&path).is_empty());
    }

    #[test]
    fn test_malformed_file_yields_empty_catalog() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CATALOG_FILE_NAME);
        fs::write(&path, "{ not json").expect("schreiben");

        let mut catalog = UserMaterialCatalog::open(&path);
        assert!(catalog.is_empty());
        assert!(catalog.load_error().is_some());

        // Unlesbare Datei wird erst nach Bestätigung überschrieben
        let result = catalog.add("MySteel", steel());
        assert!(matches!(result, Err(EditorError::PersistenceFailure { .. })));
        assert!(catalog.contains("MySteel"));
        assert_eq!(fs::read_to_string(&path).expect("lesen"), "{ not json");

        catalog.confirm_overwrite();
        catalog.save().expect("Speichern nach Bestaetigung");
        assert_eq!(UserMaterialCatalog::open(&path).get("MySteel"), Some(&steel()));
    }

    #[test]
    fn test_unreadable_entry_is_kept_and_written_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CATALOG_FILE_NAME);
        fs::write(
            &path,
            r#"{
                "Good": {"type": "compound", "density": 1.0, "density_unit": "g/cm3", "composition": "H2O"},
                "Odd": {"type": "compound", "density": 1.0, "density_unit": "g/L", "composition": "H2O"}
            }"#,
        )
        .expect("schreiben");

        let mut catalog = UserMaterialCatalog::open(&path);
        assert!(catalog.load_error().is_none());
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("Good").is_some());
        assert!(catalog.get("Odd").is_none());
        assert!(matches!(
            catalog.lookup("Odd"),
            Some(Err(EditorError::InvalidMaterialRecord { .. }))
        ));
        assert_eq!(catalog.iter().count(), 1);

        catalog.add("New", steel()).expect("Speichern");

        let reopened = UserMaterialCatalog::open(&path);
        assert_eq!(reopened.len(), 3);
        assert!(reopened.get("Good").is_some());
        assert!(reopened.get("New").is_some());
        let stored: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("lesen")).expect("JSON");
        assert_eq!(stored["Odd"]["density_unit"], "g/L");
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let mut catalog = UserMaterialCatalog::in_memory();
        let bad = UserMaterialRecord::mixture(1.0, DensityUnit::GramPerCm3, &[("H", 0.5)]);
        assert!(matches!(
            catalog.add("Bad", bad),
            Err(EditorError::InvalidMaterialRecord { .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_save_failure_keeps_in_memory_change() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Ein Verzeichnis an Stelle der Datei macht das Schreiben unmöglich
        let path = dir.path().join("blocked");
        fs::create_dir(&path).expect("Verzeichnis");

        let mut catalog = UserMaterialCatalog::open(&path);
        let result = catalog.add("MySteel", steel());
        assert!(matches!(result, Err(EditorError::PersistenceFailure { .. })));
        assert!(catalog.contains("MySteel"));
    }
}
