//! GDML Import/Export.
//!
//! Der Parser füllt beide Buchführungsquellen der Registry (Platzierungs-
//! Dictionary und Kinderlisten). Der Writer schreibt deren Vereinigung.
pub mod parser;
pub mod writer;

pub use parser::parse_gdml;
pub use writer::write_gdml;
