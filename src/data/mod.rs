// mod.rs - Data structures module

pub mod families;
pub mod loaders;
pub mod records;

// Re-export main types for convenience
pub use families::{ProteinFamilies, DEFAULT_FAMILIES};
pub use loaders::blast_xml::{BlastXmlDialect, BlastXmlReader};
pub use records::{BlastHeader, BlastHit, BlastQuery, BlastReport, Hsp};
