// lib.rs - blastfam library root

//! # blastfam - Protein family hit tables from BLAST XML output
//!
//! This library classifies BLAST hits into protein families by whole-word,
//! case-insensitive keyword matching on hit descriptions, separates strong
//! matches with an e-value / alignment-span filter, and summarizes the
//! counts in a one-row-per-family table.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use blastfam::prelude::*;
//!
//! let queries = BlastXmlReader::from_path(std::path::Path::new("blast_results.xml"))?;
//! let families = ProteinFamilies::default();
//!
//! let aggregator = HitAggregator::for_families(&families, HspFilter::default())?;
//! let mut counters = FamilyCounters::new(&families);
//! aggregator.aggregate_stream(queries, &mut counters, |_, _, _, _| {})?;
//!
//! let table = build_table(&families, &counters);
//! write_table("family_table.tsv", "tsv", &table, "example")?;
//! # Ok::<(), String>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{build_table, find_families, FamilyCounters, FamilyMatcher, FamilyRow, FamilyTable};
    pub use crate::core::{HitAggregator, HitOutcome, HspFilter, StreamSummary};
    pub use crate::data::{BlastHeader, BlastHit, BlastQuery, BlastReport, BlastXmlReader, Hsp, ProteinFamilies};
    pub use crate::output::{init_run_log, output_format, write_plain_csv, write_table};
}

// Re-export main types at the root level for convenience
pub use crate::cli::{Args, ValidationResult};
pub use crate::core::{FamilyCounters, FamilyTable, HitAggregator, HspFilter};
pub use crate::data::{BlastReport, BlastXmlReader, ProteinFamilies};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
