//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Konfiguration, die von `app` und der Binary
//! gemeinsam genutzt wird.
pub mod options;

pub use options::EditorOptions;
pub use options::{COMMAND_LOG_CAPACITY, VIEWER_COMMAND};
