//! Fehlertaxonomie des Editor-Kerns.

use std::path::PathBuf;
use thiserror::Error;

/// Typisierte Fehler aus Registry, Hierarchie-Abgleich und Materialauflösung.
///
/// Die Application-Layer reicht sie als `anyhow::Error` weiter; Aufrufer
/// können per `downcast_ref::<EditorError>()` darauf zugreifen.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Registry hat keinen (auflösbaren) World-Zeiger
    #[error("Kein World-Volumen in der Registry")]
    NoWorldVolume,

    #[error("Volumen '{0}' existiert bereits")]
    DuplicateVolumeName(String),

    #[error("Volumen '{0}' nicht gefunden")]
    UnknownVolume(String),

    /// Leerer oder nur aus Leerzeichen bestehender Name
    #[error("Ungueltiger Volumenname '{0}'")]
    InvalidVolumeName(String),

    /// World darf weder umbenannt noch gelöscht werden
    #[error("World-Volumen '{0}' kann nicht veraendert werden")]
    WorldVolumeProtected(String),

    /// Material-Zuweisung an eine Assembly
    #[error("Volumen '{0}' ist eine Assembly und hat kein Material")]
    NotAShapedVolume(String),

    #[error("Unbekanntes Material '{0}'")]
    UnknownMaterial(String),

    #[error("Referenzmaterial '{0}' konnte nicht erzeugt werden")]
    UnknownReferenceMaterial(String),

    #[error("Ungueltiger Materialeintrag '{name}': {reason}")]
    InvalidMaterialRecord {
        /// Materialname
        name: String,
        /// Verletzte Regel (Dichte, Anteile, Formel, Einheit)
        reason: String,
    },

    #[error("Materialkatalog '{}' nicht lesbar/schreibbar: {reason}", path.display())]
    PersistenceFailure {
        /// Pfad der Katalogdatei
        path: PathBuf,
        /// Ursache (I/O oder JSON)
        reason: String,
    },

    /// Fehler der Geometrie-Schicht (z.B. fehlerhaftes GDML beim Lesen)
    #[error("Geometrie-Fehler: {0}")]
    ExternalLibraryFailure(String),
}

impl EditorError {
    /// Kurzform für `InvalidMaterialRecord`.
    pub fn invalid_record(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMaterialRecord {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Kurzform für `PersistenceFailure`.
    pub fn persistence(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::PersistenceFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
