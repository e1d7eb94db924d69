//! Zentrale Konfiguration für den GDML-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::LengthUnit;
use crate::materials::DEFAULT_REFERENCE_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Viewer ──────────────────────────────────────────────────────────

/// Standard-Kommando des externen Geometrie-Viewers.
pub const VIEWER_COMMAND: &str = "gdml-viewer";

// ── Command-Log ─────────────────────────────────────────────────────

/// Maximale Anzahl protokollierter Commands.
pub const COMMAND_LOG_CAPACITY: usize = 200;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `gdml_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    // ── Materialien ─────────────────────────────────────────────
    /// Eigener Pfad des Benutzer-Materialkatalogs (sonst Config-Verzeichnis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_catalog_path: Option<PathBuf>,
    /// Namenspräfix der Referenzmaterialien
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,

    // ── Viewer ──────────────────────────────────────────────────
    /// Kommando des externen Viewers (bekommt `<pfad> --watch`)
    #[serde(default = "default_viewer_command")]
    pub viewer_command: String,
    /// Viewer im Watch-Modus starten und nach jeder Änderung neu schreiben
    #[serde(default = "default_true")]
    pub viewer_watch: bool,

    // ── Einfügen ────────────────────────────────────────────────
    /// Vorausgewählte Längeneinheit im Einfüge-Dialog
    #[serde(default)]
    pub default_length_unit: LengthUnit,

    // ── Protokoll ───────────────────────────────────────────────
    /// Maximale Einträge im Command-Log
    #[serde(default = "default_command_log_capacity")]
    pub command_log_capacity: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            user_catalog_path: None,
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            viewer_command: VIEWER_COMMAND.to_string(),
            viewer_watch: true,
            default_length_unit: LengthUnit::default(),
            command_log_capacity: COMMAND_LOG_CAPACITY,
        }
    }
}

fn default_reference_prefix() -> String {
    DEFAULT_REFERENCE_PREFIX.to_string()
}

fn default_viewer_command() -> String {
    VIEWER_COMMAND.to_string()
}

fn default_true() -> bool {
    true
}

fn default_command_log_capacity() -> usize {
    COMMAND_LOG_CAPACITY
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("gdml-editor"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("gdml_editor.toml")
    }
}
