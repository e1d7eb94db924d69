//! Materialauflösung: Benutzerkatalog, Referenzkatalog, Resolver.

pub mod catalog;
pub mod formula;
pub mod nist;
pub mod record;
pub mod resolver;

pub use catalog::UserMaterialCatalog;
pub use formula::{parse_formula, FormulaError};
pub use nist::{NistCatalog, ReferenceCatalog, DEFAULT_REFERENCE_PREFIX};
pub use record::{MassFraction, RecordComposition, RecordKind, UserMaterialRecord};
pub use resolver::MaterialResolver;
