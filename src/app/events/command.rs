use super::super::use_cases::editing::InsertVolumeRequest;
use crate::materials::UserMaterialRecord;
use crate::shared::EditorOptions;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Datei-Öffnen-Dialog anfordern
    RequestOpenFileDialog,
    /// Datei-Speichern-Dialog anfordern
    RequestSaveFileDialog,
    /// Anwendung beenden
    RequestExit,
    /// GDML-Datei laden
    LoadFile { path: String },
    /// Datei speichern (None = aktueller Pfad, Some(p) = neuer Pfad)
    SaveFile { path: Option<String> },
    /// Neue Geometrie anlegen
    NewWorld,

    /// Suchtext setzen
    SetSearchText { text: String },
    /// Volumen selektieren
    SelectVolume { name: String },
    /// Volumen-Ansicht komplett neu berechnen
    RefreshVolumeView,

    /// Volumen einfügen
    InsertVolume { request: InsertVolumeRequest },
    /// Volumen löschen
    DeleteVolume { name: String },
    /// Volumen umbenennen
    RenameVolume { old_name: String, new_name: String },
    /// Material zuweisen
    ApplyMaterial { volume: String, material: String },

    /// Benutzermaterial definieren und speichern
    DefineUserMaterial {
        name: String,
        record: UserMaterialRecord,
    },
    /// Benutzermaterial entfernen
    RemoveUserMaterial { name: String },
    /// Überschreiben einer unlesbaren Katalogdatei freigeben
    ConfirmCatalogOverwrite,
    /// Liste wählbarer Materialien neu aufbauen
    RefreshMaterialChoices,

    /// Viewer starten (oder Datei aktualisieren)
    LaunchViewer,
    /// Laufenden Viewer nachführen
    SyncViewer,

    /// Options-Dialog öffnen
    OpenOptionsDialog,
    /// Options-Dialog schliessen
    CloseOptionsDialog,
    /// Optionen anwenden und speichern
    ApplyOptions { options: EditorOptions },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptions,
}
