//! Core-Domänentypen: Registry, Volumen, Platzierungen, Materialien, Hierarchie.

pub mod element;
pub mod error;
/// Hierarchie-Abgleich (Baum aus Platzierungen + Kinderlisten)
pub mod hierarchy;
pub mod material;
pub mod meta;
pub mod placement;
/// Core-Datenmodell einer GDML-Geometrie
///
/// - Registry: Container für Volumen, Platzierungen, Materialien, Solids
/// - LogicalVolume: Form + Material oder Assembly
/// - Placement: Kind-Volumen positioniert im Eltern-Volumen
pub mod registry;
pub mod solid;
pub mod units;
pub mod volume;

pub use element::Element;
pub use error::EditorError;
pub use hierarchy::{
    child_map, filter_volumes, reconcile, reconcile_from, volume_view, ChildMap, ChildSource,
    MaterialLabel, VolumeEntry, VolumeNode, VolumeTree, VolumeView, ASSEMBLY_LABEL,
};
pub use material::{Composition, Material, MaterialState};
pub use meta::{Define, GdmlMeta};
pub use placement::Placement;
pub use registry::Registry;
pub use solid::{format_number, Shape, Solid, SolidChild};
pub use units::{AngleUnit, DensityUnit, LengthUnit, PressureUnit, TemperatureUnit};
pub use volume::{Daughter, LogicalVolume, VolumeId, VolumeKind, VolumeRef};
