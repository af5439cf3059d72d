// records.rs - BLAST search result records

/// Run-level fields that precede the first query of a report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlastHeader {
    pub program: Option<String>,
    pub version: Option<String>,
    pub database: Option<String>,
    /// Query fields of old single-query reports
    pub query_id: Option<String>,
    pub query_def: Option<String>,
    pub query_len: Option<u64>,
}

/// Parsed BLAST report: queries in the order BLAST ran them
#[derive(Debug, Clone, Default)]
pub struct BlastReport {
    pub header: BlastHeader,
    pub queries: Vec<BlastQuery>,
}

/// One query sequence and the database hits found for it
#[derive(Debug, Clone, Default)]
pub struct BlastQuery {
    pub id: String,
    pub description: String,
    pub length: Option<u64>,
    pub hits: Vec<BlastHit>,
}

/// One database entry aligned against a query
#[derive(Debug, Clone, Default)]
pub struct BlastHit {
    pub id: String,
    pub accession: Option<String>,
    pub definition: String,
    pub length: Option<u64>,
    pub hsps: Vec<Hsp>,
}

/// High-scoring segment pair: one local alignment inside a hit
#[derive(Debug, Clone, Default)]
pub struct Hsp {
    pub evalue: f64,
    pub bit_score: Option<f64>,
    pub align_len: Option<u64>,
    pub query_from: Option<u64>,
    pub query_to: Option<u64>,
    pub hit_from: Option<u64>,
    pub hit_to: Option<u64>,
    pub qseq: Option<String>,
}

impl BlastHit {
    /// Primary description of the hit.
    ///
    /// BLAST joins redundant database entries into a single definition line
    /// separated by `" >"`; only the first entry describes this hit.
    pub fn description(&self) -> &str {
        match self.definition.find(" >") {
            Some(pos) => self.definition[..pos].trim(),
            None => self.definition.trim(),
        }
    }
}

impl Hsp {
    /// Length of the aligned region
    pub fn aln_span(&self) -> u64 {
        self.align_len
            .or_else(|| self.qseq.as_ref().map(|s| s.len() as u64))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_description() {
        let hit = BlastHit {
            id: "sp|P12830|CADH1_HUMAN".to_string(),
            definition: "Cadherin-1 OS=Homo sapiens >sp|Q9R0T4|CADH1_MOUSE Cadherin-1 OS=Mus musculus"
                .to_string(),
            ..Default::default()
        };
        assert_eq!(hit.description(), "Cadherin-1 OS=Homo sapiens");

        let plain = BlastHit {
            definition: "  Collagen alpha-1(I) chain ".to_string(),
            ..Default::default()
        };
        assert_eq!(plain.description(), "Collagen alpha-1(I) chain");
    }

    #[test]
    fn test_aln_span_fallbacks() {
        let with_len = Hsp { align_len: Some(120), qseq: Some("MKV".to_string()), ..Default::default() };
        assert_eq!(with_len.aln_span(), 120);

        let from_seq = Hsp { qseq: Some("MKV-LA".to_string()), ..Default::default() };
        assert_eq!(from_seq.aln_span(), 6);

        assert_eq!(Hsp::default().aln_span(), 0);
    }
}
