// aggregator.rs - Per-family hit counting

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::core::filter::HspFilter;
use crate::core::matcher::FamilyMatcher;
use crate::data::{BlastHit, BlastQuery, BlastReport, ProteinFamilies};

/// Running per-family counters for one run.
///
/// Invariant per family: `unique <= filtered <= total`.
#[derive(Debug, Clone, Default)]
pub struct FamilyCounters {
    total: HashMap<String, usize>,
    filtered: HashMap<String, usize>,
    unique: HashMap<String, HashSet<String>>,
}

impl FamilyCounters {
    /// Zeroed counters keyed by every family in the list
    pub fn new(families: &ProteinFamilies) -> Self {
        let mut counters = Self::default();
        for family in families {
            counters.total.insert(family.clone(), 0);
            counters.filtered.insert(family.clone(), 0);
            counters.unique.insert(family.clone(), HashSet::new());
        }
        counters
    }

    pub fn contains(&self, family: &str) -> bool {
        self.total.contains_key(family)
    }

    pub fn total(&self, family: &str) -> usize {
        self.total.get(family).copied().unwrap_or(0)
    }

    pub fn filtered(&self, family: &str) -> usize {
        self.filtered.get(family).copied().unwrap_or(0)
    }

    /// Number of distinct hit ids that passed the filter
    pub fn unique(&self, family: &str) -> usize {
        self.unique.get(family).map_or(0, HashSet::len)
    }

    pub fn unique_ids(&self, family: &str) -> Option<&HashSet<String>> {
        self.unique.get(family)
    }

    /// Total counts with sorted keys, for the final log dump
    pub fn total_counts(&self) -> BTreeMap<&str, usize> {
        self.total.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }

    fn record_total(&mut self, family: &str) -> bool {
        match self.total.get_mut(family) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    fn record_filtered(&mut self, family: &str, hit_id: &str) {
        if let Some(count) = self.filtered.get_mut(family) {
            *count += 1;
        }
        if let Some(ids) = self.unique.get_mut(family) {
            ids.insert(hit_id.to_string());
        }
    }
}

/// What happened to the counters for one hit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HitOutcome {
    /// Families mentioned in the hit description, in family-list order
    pub families: Vec<String>,
    /// Matched families with no counter entry; left uncounted
    pub untracked: Vec<String>,
    pub passed_filter: bool,
}

impl HitOutcome {
    pub fn is_match(&self) -> bool {
        !self.families.is_empty()
    }
}

/// Queries and hits seen by one streamed aggregation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamSummary {
    pub queries: usize,
    pub hits: usize,
    /// Hits whose description mentioned at least one family
    pub matched_hits: usize,
}

/// Classifies hits into families and updates the counters
#[derive(Debug, Clone)]
pub struct HitAggregator {
    matcher: FamilyMatcher,
    filter: HspFilter,
}

impl HitAggregator {
    pub fn new(matcher: FamilyMatcher, filter: HspFilter) -> Self {
        Self { matcher, filter }
    }

    pub fn for_families(families: &ProteinFamilies, filter: HspFilter) -> Result<Self, String> {
        Ok(Self::new(FamilyMatcher::new(families)?, filter))
    }

    /// Count one hit against every family its description mentions
    pub fn aggregate_hit(&self, hit: &BlastHit, counters: &mut FamilyCounters) -> HitOutcome {
        let matched = self.matcher.find_families(hit.description());
        if matched.is_empty() {
            return HitOutcome::default();
        }

        let passed_filter = self.filter.passes_any(&hit.hsps);
        let mut outcome = HitOutcome {
            families: Vec::with_capacity(matched.len()),
            untracked: Vec::new(),
            passed_filter,
        };

        for family in matched {
            if !counters.record_total(family) {
                outcome.untracked.push(family.to_string());
            } else if passed_filter {
                counters.record_filtered(family, &hit.id);
            }
            outcome.families.push(family.to_string());
        }

        outcome
    }

    /// Count every hit of one query in report order.
    ///
    /// `on_hit` runs after each hit with the updated counters.
    pub fn aggregate_query<F>(&self, query: &BlastQuery, counters: &mut FamilyCounters, mut on_hit: F)
    where
        F: FnMut(&BlastHit, &HitOutcome, &FamilyCounters),
    {
        for hit in &query.hits {
            let outcome = self.aggregate_hit(hit, counters);
            on_hit(hit, &outcome, counters);
        }
    }

    /// Walk every hit of every query of an in-memory report
    pub fn aggregate_report<F>(&self, report: &BlastReport, counters: &mut FamilyCounters, mut on_hit: F)
    where
        F: FnMut(&BlastQuery, &BlastHit, &HitOutcome, &FamilyCounters),
    {
        for query in &report.queries {
            self.aggregate_query(query, counters, |hit, outcome, c| on_hit(query, hit, outcome, c));
        }
    }

    /// Consume queries one at a time, as a streaming reader yields them.
    ///
    /// Stops at the first read error; counters keep whatever was counted before it.
    pub fn aggregate_stream<I, F>(
        &self,
        queries: I,
        counters: &mut FamilyCounters,
        mut on_hit: F,
    ) -> Result<StreamSummary, String>
    where
        I: IntoIterator<Item = Result<BlastQuery, String>>,
        F: FnMut(&BlastQuery, &BlastHit, &HitOutcome, &FamilyCounters),
    {
        let mut summary = StreamSummary::default();
        for query in queries {
            let query = query?;
            self.aggregate_query(&query, counters, |hit, outcome, c| {
                if outcome.is_match() {
                    summary.matched_hits += 1;
                }
                on_hit(&query, hit, outcome, c);
            });
            summary.queries += 1;
            summary.hits += query.hits.len();
        }
        Ok(summary)
    }
}
