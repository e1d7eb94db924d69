//! Use-Cases der Application-Layer-Orchestrierung.

pub mod editing;
pub mod file_io;
pub mod materials;
pub mod viewer;
pub mod volume_view;
