use super::super::use_cases::editing::InsertVolumeRequest;
use crate::materials::UserMaterialRecord;
use crate::shared::EditorOptions;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/CLI ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Datei öffnen (zeigt Dateidialog)
    OpenFileRequested,
    /// Datei speichern (unter aktuellem Pfad oder mit Dialog)
    SaveRequested,
    /// Datei unter neuem Pfad speichern
    SaveAsRequested,
    /// Anwendung beenden
    ExitRequested,
    /// Datei wurde im Dialog ausgewählt (Laden)
    FileSelected { path: String },
    /// Speicherpfad wurde im Dialog ausgewählt
    SaveFilePathSelected { path: String },
    /// Neue Geometrie (World aus Luft) anlegen
    NewWorldRequested,

    /// Suchtext der Volumen-Ansicht geändert
    SearchTextChanged { text: String },
    /// Volumen in Baum oder Liste angeklickt
    VolumeSelected { name: String },

    /// Neues Volumen einfügen (Einfüge-Dialog bestätigt)
    InsertVolumeRequested { request: InsertVolumeRequest },
    /// Selektiertes Volumen löschen
    DeleteSelectedVolumeRequested,
    /// Bestimmtes Volumen löschen
    DeleteVolumeRequested { name: String },
    /// Volumen umbenennen
    RenameVolumeRequested { old_name: String, new_name: String },
    /// Material eines Volumens ändern
    ApplyMaterialRequested { volume: String, material: String },

    /// Benutzermaterial definieren (Material-Dialog bestätigt)
    DefineUserMaterialRequested {
        name: String,
        record: UserMaterialRecord,
    },
    /// Benutzermaterial aus dem Katalog entfernen
    RemoveUserMaterialRequested { name: String },
    /// Unlesbare Katalogdatei beim nächsten Speichern überschreiben
    ConfirmCatalogOverwriteRequested,

    /// Geometrie im externen Viewer anzeigen
    ViewInViewerRequested,

    /// Options-Dialog öffnen
    OpenOptionsDialogRequested,
    /// Options-Dialog schließen
    CloseOptionsDialogRequested,
    /// Optionen wurden geändert (sofortige Anwendung)
    OptionsChanged { options: EditorOptions },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptionsRequested,
}
