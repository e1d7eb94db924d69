//! GDML Editor Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod materials;
pub mod shared;
pub mod xml;

pub use app::{AppCommand, AppController, AppIntent, AppState, InsertVolumeRequest, UiState};
pub use core::{
    filter_volumes, reconcile, EditorError, LogicalVolume, Material, Placement, Registry,
    VolumeKind, VolumeRef, VolumeTree, VolumeView,
};
pub use materials::{MaterialResolver, UserMaterialCatalog, UserMaterialRecord};
pub use shared::EditorOptions;
pub use xml::{parse_gdml, write_gdml};
