//! Nicht-strukturelle Metadaten aus der GDML-Datei.

/// Eintrag aus `<define>` (position, rotation, constant, quantity, …).
#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    pub tag: String,
    pub name: String,
    /// Alle übrigen Attribute in Original-Reihenfolge
    pub attributes: Vec<(String, String)>,
}

/// Container für zusätzliche GDML-Metadaten
#[derive(Debug, Clone, PartialEq)]
pub struct GdmlMeta {
    /// Defines in Original-Reihenfolge (werden unverändert zurückgeschrieben)
    pub defines: Vec<Define>,
    /// Name des `<setup>`-Blocks
    pub setup_name: String,
    /// Version des `<setup>`-Blocks
    pub setup_version: String,
}

impl Default for GdmlMeta {
    fn default() -> Self {
        Self {
            defines: Vec::new(),
            setup_name: "Default".to_string(),
            setup_version: "1.0".to_string(),
        }
    }
}
