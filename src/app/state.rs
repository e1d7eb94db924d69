//! Application State — zentrale Datenhaltung.

use super::use_cases::viewer::ViewerSession;
use super::CommandLog;
use crate::core::{Registry, VolumeView};
use crate::materials::{MaterialResolver, NistCatalog, UserMaterialCatalog};
use crate::shared::EditorOptions;
use std::path::PathBuf;

/// UI-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct UiState {
    /// Ob der Open-Datei-Dialog geöffnet werden soll
    pub show_file_dialog: bool,
    /// Ob der Save-Datei-Dialog geöffnet werden soll
    pub show_save_file_dialog: bool,
    /// Ob der Optionen-Dialog angezeigt wird
    pub show_options_dialog: bool,
    /// Pfad der aktuell geladenen Datei (für Save ohne Dialog)
    pub current_file_path: Option<String>,
    /// Suchtext der Volumen-Ansicht (leer = Baum)
    pub search_text: String,
    /// Aktuelle Volumen-Ansicht (wird nach jeder Änderung neu berechnet)
    pub volume_view: Option<VolumeView>,
    /// Aufgeklappter Pfad World → Selektion
    pub expanded_path: Vec<String>,
    /// Selektiertes Volumen
    pub selected_volume: Option<String>,
    /// Wählbare Materialnamen
    pub material_choices: Vec<String>,
    /// Temporäre Statusnachricht
    pub status_message: Option<String>,
    /// Ungespeicherte Änderungen vorhanden
    pub modified: bool,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand (alle Dialoge geschlossen).
    pub fn new() -> Self {
        Self::default()
    }
}

/// Hauptzustand der Anwendung
#[derive(Debug)]
pub struct AppState {
    /// Aktuelle Geometrie (None = keine Datei geladen)
    pub registry: Option<Registry>,
    /// UI-State
    pub ui: UiState,
    /// Materialauflösung inkl. Namens-Cache des Referenzkatalogs
    pub resolver: MaterialResolver,
    /// Benutzer-Materialkatalog
    pub user_catalog: UserMaterialCatalog,
    /// Externer Viewer
    pub viewer: ViewerSession,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Optionen-Datei, in die geänderte Optionen geschrieben werden
    /// (`None` = Optionen nicht persistieren)
    pub config_path: Option<PathBuf>,
    /// Signalisiert dem Host, die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen leeren App-State mit flüchtigem Benutzerkatalog.
    pub fn new() -> Self {
        let options = EditorOptions::default();
        Self {
            registry: None,
            ui: UiState::new(),
            resolver: MaterialResolver::new(),
            user_catalog: UserMaterialCatalog::in_memory(),
            viewer: ViewerSession::new(),
            command_log: CommandLog::with_capacity(options.command_log_capacity),
            options,
            config_path: None,
            should_exit: false,
        }
    }

    /// Erstellt den App-State aus Optionen und öffnet den Benutzerkatalog.
    pub fn from_options(options: EditorOptions) -> Self {
        let user_catalog = user_catalog_for(&options);
        let mut state = Self {
            resolver: resolver_for(&options),
            user_catalog,
            command_log: CommandLog::with_capacity(options.command_log_capacity),
            options,
            ..Self::new()
        };
        state.ui.status_message = state
            .user_catalog
            .load_error()
            .map(|reason| format!("Benutzerkatalog nicht lesbar: {}", reason));
        state
    }

    /// Setzt die Optionen-Datei für spätere Änderungen.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Gibt die Anzahl der Volumen zurück (für UI-Anzeige)
    pub fn volume_count(&self) -> usize {
        self.registry.as_ref().map_or(0, |r| r.volume_count())
    }

    /// Gibt die Anzahl der Platzierungen zurück (für UI-Anzeige)
    pub fn placement_count(&self) -> usize {
        self.registry.as_ref().map_or(0, |r| r.placement_count())
    }
}

/// Benutzerkatalog am Pfad aus den Optionen, sonst am Standardpfad.
pub(crate) fn user_catalog_for(options: &EditorOptions) -> UserMaterialCatalog {
    match options
        .user_catalog_path
        .clone()
        .or_else(UserMaterialCatalog::default_path)
    {
        Some(path) => UserMaterialCatalog::open(path),
        None => {
            log::warn!("Kein Pfad fuer Benutzerkatalog, Materialien werden nicht gespeichert");
            UserMaterialCatalog::in_memory()
        }
    }
}

/// Resolver mit dem Referenzpräfix aus den Optionen.
pub(crate) fn resolver_for(options: &EditorOptions) -> MaterialResolver {
    MaterialResolver::with_catalog(Box::new(NistCatalog::with_prefix(
        options.reference_prefix.clone(),
    )))
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
