// table.rs - Family summary table

use std::fmt;

use serde::Serialize;

use crate::core::aggregator::FamilyCounters;
use crate::data::ProteinFamilies;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyRow {
    #[serde(rename = "Protein Family")]
    pub family: String,
    #[serde(rename = "Total BLAST Hits")]
    pub total: usize,
    #[serde(rename = "Filtered BLAST Hits")]
    pub filtered: usize,
    #[serde(rename = "Unique BLAST Hits")]
    pub unique: usize,
}

/// One row per family, in family-list order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FamilyTable {
    pub rows: Vec<FamilyRow>,
}

impl FamilyTable {
    pub const COLUMNS: [&'static str; 4] = [
        "Protein Family",
        "Total BLAST Hits",
        "Filtered BLAST Hits",
        "Unique BLAST Hits",
    ];

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, family: &str) -> Option<&FamilyRow> {
        self.rows.iter().find(|r| r.family == family)
    }
}

/// Final table from the counters; every family appears exactly once
pub fn build_table(families: &ProteinFamilies, counters: &FamilyCounters) -> FamilyTable {
    FamilyTable {
        rows: families
            .iter()
            .map(|family| FamilyRow {
                family: family.clone(),
                total: counters.total(family),
                filtered: counters.filtered(family),
                unique: counters.unique(family),
            })
            .collect(),
    }
}

impl fmt::Display for FamilyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = |row: &FamilyRow| [row.total.to_string(), row.filtered.to_string(), row.unique.to_string()];

        let mut widths = Self::COLUMNS.map(str::len);
        for row in &self.rows {
            widths[0] = widths[0].max(row.family.chars().count());
            for (i, value) in counts(row).iter().enumerate() {
                widths[i + 1] = widths[i + 1].max(value.len());
            }
        }

        write!(f, "{:<w$}", Self::COLUMNS[0], w = widths[0])?;
        for (i, column) in Self::COLUMNS.iter().enumerate().skip(1) {
            write!(f, "  {:>w$}", column, w = widths[i])?;
        }

        for row in &self.rows {
            writeln!(f)?;
            write!(f, "{:<w$}", row.family, w = widths[0])?;
            for (i, value) in counts(row).iter().enumerate() {
                write!(f, "  {:>w$}", value, w = widths[i + 1])?;
            }
        }
        Ok(())
    }
}
