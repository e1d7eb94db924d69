//! Externer Geometrie-Viewer: Sitzungsdatei schreiben, Prozess starten, nachführen.
//!
//! Der Viewer liest die Sitzungsdatei selbstständig (Watch-Modus). Die Datei
//! wird immer komplett in eine Nachbardatei geschrieben und dann umbenannt,
//! der Viewer sieht nie einen halb geschriebenen Stand.

use crate::app::AppState;
use crate::core::Registry;
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use tempfile::{NamedTempFile, TempDir};

/// Dateiname der Sitzungsdatei im temporären Verzeichnis
const SESSION_FILE_NAME: &str = "viewer_session.gdml";

/// Zustand einer Viewer-Sitzung
#[derive(Debug, Default)]
pub struct ViewerSession {
    dir: Option<TempDir>,
    file: Option<PathBuf>,
    process: Option<Child>,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pfad der Sitzungsdatei (nach dem ersten Schreiben)
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Läuft der Viewer-Prozess noch?
    pub fn is_running(&mut self) -> bool {
        let Some(process) = self.process.as_mut() else {
            return false;
        };
        match process.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                log::info!("Viewer beendet ({})", status);
                self.process = None;
                false
            }
            Err(e) => {
                log::warn!("Viewer-Status nicht abfragbar: {}", e);
                self.process = None;
                false
            }
        }
    }

    /// Schreibt die Registry vollständig in die Sitzungsdatei.
    pub fn write_snapshot(&mut self, registry: &Registry) -> Result<&Path> {
        let xml = super::file_io::render_gdml(registry).context("GDML fuer Viewer")?;

        if self.dir.is_none() {
            let dir = tempfile::Builder::new()
                .prefix("gdml_editor_viewer")
                .tempdir()
                .context("Temp-Verzeichnis fuer Viewer nicht anlegbar")?;
            self.file = Some(dir.path().join(SESSION_FILE_NAME));
            self.dir = Some(dir);
        }
        let (Some(dir), Some(file)) = (self.dir.as_ref(), self.file.as_ref()) else {
            return Err(anyhow!("Viewer-Sitzung ohne Datei"));
        };

        let mut tmp = NamedTempFile::new_in(dir.path())
            .context("Zwischendatei fuer Viewer nicht anlegbar")?;
        tmp.write_all(xml.as_bytes())
            .context("Zwischendatei fuer Viewer nicht schreibbar")?;
        tmp.persist(file)
            .map_err(|e| e.error)
            .with_context(|| format!("Sitzungsdatei '{}' nicht ersetzbar", file.display()))?;

        log::debug!("Viewer-Datei geschrieben: {}", file.display());
        Ok(file.as_path())
    }

    /// Schreibt die Datei und startet den Viewer, falls er nicht schon läuft.
    ///
    /// Liefert `true`, wenn ein neuer Prozess gestartet wurde.
    pub fn launch(&mut self, registry: &Registry, command: &str, watch: bool) -> Result<bool> {
        let file = self.write_snapshot(registry)?.to_path_buf();
        if self.is_running() {
            log::info!("Viewer laeuft bereits, Datei aktualisiert");
            return Ok(false);
        }

        let mut cmd = Command::new(command);
        cmd.arg(&file);
        if watch {
            cmd.arg("--watch");
        }
        let child = cmd
            .spawn()
            .with_context(|| format!("Viewer '{}' nicht startbar", command))?;
        log::info!(
            "Viewer '{}' gestartet (pid {}) fuer {}",
            command,
            child.id(),
            file.display()
        );
        self.process = Some(child);
        Ok(true)
    }

    /// Schreibt die Datei neu, solange der Viewer läuft.
    ///
    /// Fehler werden nur protokolliert; die Bearbeitung geht weiter.
    pub fn sync(&mut self, registry: &Registry) {
        if self.file.is_none() || !self.is_running() {
            return;
        }
        match self.write_snapshot(registry) {
            Ok(_) => log::info!("Viewer aktualisiert"),
            Err(e) => log::warn!("Viewer nicht aktualisierbar: {:#}", e),
        }
    }
}

/// Startet den konfigurierten Viewer für die aktuelle Geometrie.
pub fn launch_viewer(state: &mut AppState) -> Result<()> {
    let registry = state
        .registry
        .as_ref()
        .ok_or_else(|| anyhow!("Keine Geometrie geladen"))?;
    let started = state.viewer.launch(
        registry,
        &state.options.viewer_command,
        state.options.viewer_watch,
    )?;
    state.ui.status_message = Some(if started {
        "Viewer gestartet".to_string()
    } else {
        "Viewer aktualisiert".to_string()
    });
    Ok(())
}

/// Führt den laufenden Viewer nach einer Änderung nach.
pub fn sync_viewer(state: &mut AppState) {
    if let Some(registry) = state.registry.as_ref() {
        state.viewer.sync(registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::file_io::new_world_registry;
    use crate::materials::{MaterialResolver, UserMaterialCatalog};

    fn world() -> Registry {
        new_world_registry(&MaterialResolver::new(), &UserMaterialCatalog::in_memory())
            .expect("World erwartet")
    }

    #[test]
    fn test_snapshot_is_complete_gdml() {
        let mut session = ViewerSession::new();
        let path = session
            .write_snapshot(&world())
            .expect("Schreiben erwartet")
            .to_path_buf();
        let content = std::fs::read_to_string(&path).expect("Lesen erwartet");
        let again = crate::xml::parse_gdml(&content).expect("Parsen erwartet");
        assert_eq!(again.world_name().expect("World erwartet"), "World");

        // Zweites Schreiben ersetzt dieselbe Datei
        let second = session
            .write_snapshot(&world())
            .expect("Schreiben erwartet")
            .to_path_buf();
        assert_eq!(path, second);
        let entries = std::fs::read_dir(path.parent().expect("Verzeichnis erwartet"))
            .expect("Verzeichnis erwartet")
            .count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_sync_without_viewer_writes_nothing() {
        let mut session = ViewerSession::new();
        session.sync(&world());
        assert!(session.file().is_none());
        assert!(!session.is_running());
    }

    #[test]
    fn test_missing_viewer_command_fails() {
        let mut session = ViewerSession::new();
        let err = session
            .launch(&world(), "gdml-viewer-gibt-es-nicht", true)
            .expect_err("Fehler erwartet");
        assert!(format!("{err:#}").contains("nicht startbar"));
        assert!(!session.is_running());
        assert!(session.file().is_some());
    }
}
