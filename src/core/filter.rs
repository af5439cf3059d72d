// filter.rs - HSP significance filter

use crate::data::Hsp;

pub const DEFAULT_EVALUE_THRESHOLD: f64 = 1e-10;
pub const DEFAULT_ALN_SPAN_THRESHOLD: u64 = 50;

/// Strong-match filter: `evalue <= max_evalue` and `aln_span >= min_aln_span`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HspFilter {
    pub max_evalue: f64,
    pub min_aln_span: u64,
}

impl HspFilter {
    pub fn new(max_evalue: f64, min_aln_span: u64) -> Self {
        Self { max_evalue, min_aln_span }
    }

    pub fn passes(&self, hsp: &Hsp) -> bool {
        hsp.evalue <= self.max_evalue && hsp.aln_span() >= self.min_aln_span
    }

    /// A hit passes when at least one of its HSPs does
    pub fn passes_any(&self, hsps: &[Hsp]) -> bool {
        hsps.iter().any(|hsp| self.passes(hsp))
    }
}

impl Default for HspFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EVALUE_THRESHOLD, DEFAULT_ALN_SPAN_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsp(evalue: f64, span: u64) -> Hsp {
        Hsp { evalue, align_len: Some(span), ..Default::default() }
    }

    #[test]
    fn test_defaults() {
        let filter = HspFilter::default();
        assert_eq!(filter.max_evalue, 1e-10);
        assert_eq!(filter.min_aln_span, 50);
    }

    #[test]
    fn test_thresholds_inclusive() {
        let filter = HspFilter::default();
        assert!(filter.passes(&hsp(1e-10, 50)));
        assert!(!filter.passes(&hsp(1.1e-10, 50)));
        assert!(!filter.passes(&hsp(1e-10, 49)));
    }

    #[test]
    fn test_existential_over_hsps() {
        let filter = HspFilter::default();
        assert!(filter.passes_any(&[hsp(1e-5, 100), hsp(1e-12, 60)]));
        assert!(!filter.passes_any(&[hsp(1e-5, 100), hsp(1e-12, 10)]));
        assert!(!filter.passes_any(&[]));
    }

    #[test]
    fn test_custom_thresholds() {
        let filter = HspFilter::new(1e-3, 20);
        assert!(filter.passes(&hsp(1e-5, 20)));
        assert!(!filter.passes(&hsp(0.01, 200)));
    }
}
