// mod.rs - Core logic module

pub mod aggregator;
pub mod filter;
pub mod matcher;
pub mod table;

// Re-export main types for convenience
pub use aggregator::{FamilyCounters, HitAggregator, HitOutcome, StreamSummary};
pub use filter::{HspFilter, DEFAULT_ALN_SPAN_THRESHOLD, DEFAULT_EVALUE_THRESHOLD};
pub use matcher::{find_families, FamilyMatcher};
pub use table::{build_table, FamilyRow, FamilyTable};
