// blast_xml.rs - BLAST XML (-outfmt 5) loader

use crate::data::records::{BlastHeader, BlastHit, BlastQuery, BlastReport, Hsp};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Hit ids BLAST assigns to databases built without `-parse_seqids`
const LOCAL_ID_PREFIX: &str = "gnl|BL_ORD_ID|";

/// XML flavours BLAST can emit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlastXmlDialect {
    /// Classic `BlastOutput` document (`-outfmt 5`)
    BlastOutput,
    /// `BlastXML2` document (`-outfmt 16`)
    BlastXml2,
    Unknown,
}

impl BlastXmlDialect {
    pub fn label(self) -> &'static str {
        match self {
            Self::BlastOutput => "BlastOutput",
            Self::BlastXml2 => "BlastXML2",
            Self::Unknown => "unknown",
        }
    }

    /// Dialect named by a document's root element
    pub fn from_root(name: &[u8]) -> Self {
        match name {
            b"BlastOutput" => Self::BlastOutput,
            b"BlastXML2" => Self::BlastXml2,
            _ => Self::Unknown,
        }
    }
}

fn check_root(name: &[u8]) -> Result<(), String> {
    match BlastXmlDialect::from_root(name) {
        BlastXmlDialect::BlastOutput => Ok(()),
        BlastXmlDialect::BlastXml2 => Err(format!(
            "Unsupported XML dialect '{}'; re-run BLAST with -outfmt 5",
            BlastXmlDialect::BlastXml2.label()
        )),
        BlastXmlDialect::Unknown => Err(format!(
            "Not a BLAST XML document: expected '{}' root element, found '{}'",
            BlastXmlDialect::BlastOutput.label(),
            String::from_utf8_lossy(name)
        )),
    }
}

fn xml_error(e: quick_xml::Error) -> String {
    format!("Malformed BLAST XML: {}", e)
}

#[derive(Clone, Copy)]
enum HeaderField {
    Program,
    Version,
    Database,
    QueryId,
    QueryDef,
    QueryLen,
}

impl HeaderField {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"BlastOutput_program" => Some(Self::Program),
            b"BlastOutput_version" => Some(Self::Version),
            b"BlastOutput_db" => Some(Self::Database),
            b"BlastOutput_query-ID" => Some(Self::QueryId),
            b"BlastOutput_query-def" => Some(Self::QueryDef),
            b"BlastOutput_query-len" => Some(Self::QueryLen),
            _ => None,
        }
    }

    fn store(self, header: &mut BlastHeader, text: &str) -> Result<(), String> {
        let text = text.trim().to_string();
        match self {
            Self::Program => header.program = Some(text),
            Self::Version => header.version = Some(text),
            Self::Database => header.database = Some(text),
            Self::QueryId => header.query_id = Some(text),
            Self::QueryDef => header.query_def = Some(text),
            Self::QueryLen => {
                let len = text
                    .parse()
                    .map_err(|_| format!("Invalid BlastOutput_query-len '{}'", text))?;
                header.query_len = Some(len);
            }
        }
        Ok(())
    }
}

/// Streaming reader over a BLAST XML report.
///
/// The header is read on construction. Each `<Iteration>` is then
/// deserialized on demand, so only one query is held in memory at a time.
pub struct BlastXmlReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    header: BlastHeader,
    pending: Option<BytesStart<'static>>,
    root_seen: bool,
    depth: usize,
    finished: bool,
}

impl BlastXmlReader<BufReader<File>> {
    /// Open a BLAST XML file and read its header
    pub fn from_path(file_path: &Path) -> Result<Self, String> {
        let file = File::open(file_path)
            .map_err(|e| format!("Failed to read BLAST XML file '{}': {}", file_path.display(), e))?;
        Self::new(BufReader::new(file))
            .map_err(|e| format!("Failed to parse BLAST XML file '{}': {}", file_path.display(), e))
    }
}

impl<R: BufRead> BlastXmlReader<R> {
    pub fn new(inner: R) -> Result<Self, String> {
        let mut stream = Self {
            reader: Reader::from_reader(inner),
            buf: Vec::new(),
            header: BlastHeader::default(),
            pending: None,
            root_seen: false,
            depth: 0,
            finished: false,
        };
        stream.pending = stream.next_iteration_start()?;
        if stream.pending.is_none() {
            stream.finished = true;
        }
        Ok(stream)
    }

    pub fn header(&self) -> &BlastHeader {
        &self.header
    }

    /// Advance to the next `<Iteration>` start tag, recording header fields on the way
    fn next_iteration_start(&mut self) -> Result<Option<BytesStart<'static>>, String> {
        let mut field: Option<HeaderField> = None;
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf).map_err(xml_error)? {
                Event::Start(e) => {
                    if !self.root_seen {
                        check_root(e.name().as_ref())?;
                        self.root_seen = true;
                    } else if e.name().as_ref() == b"Iteration" {
                        return Ok(Some(e.into_owned()));
                    }
                    field = HeaderField::from_name(e.name().as_ref());
                    self.depth += 1;
                }
                Event::Empty(e) => {
                    if !self.root_seen {
                        check_root(e.name().as_ref())?;
                        self.root_seen = true;
                    }
                }
                Event::Text(t) => {
                    if let Some(f) = field {
                        let text = t.unescape().map_err(xml_error)?;
                        f.store(&mut self.header, &text)?;
                    }
                }
                Event::End(_) => {
                    field = None;
                    self.depth = self.depth.saturating_sub(1);
                }
                Event::Eof => {
                    if !self.root_seen {
                        return Err("Not a BLAST XML document: no root element".to_string());
                    }
                    if self.depth > 0 {
                        return Err("Malformed BLAST XML: unexpected end of file".to_string());
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    /// Re-serialize one element and everything inside it
    fn capture_element(&mut self, start: BytesStart<'static>) -> Result<Vec<u8>, String> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Start(start))
            .map_err(|e| format!("Failed to buffer <Iteration>: {}", e))?;

        let mut depth = 1usize;
        while depth > 0 {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf).map_err(xml_error)?;
            match &event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => {
                    return Err("Malformed BLAST XML: unexpected end of file inside <Iteration>".to_string());
                }
                _ => {}
            }
            writer
                .write_event(event)
                .map_err(|e| format!("Failed to buffer <Iteration>: {}", e))?;
        }
        Ok(writer.into_inner())
    }

    fn next_query(&mut self) -> Result<Option<BlastQuery>, String> {
        let start = match self.pending.take() {
            Some(start) => start,
            None => match self.next_iteration_start()? {
                Some(start) => start,
                None => return Ok(None),
            },
        };

        let bytes = self.capture_element(start)?;
        let iteration: IterationXml = quick_xml::de::from_reader(bytes.as_slice())
            .map_err(|e| format!("Malformed BLAST XML <Iteration>: {}", e))?;
        Ok(Some(iteration.into_query(&self.header)))
    }
}

impl<R: BufRead> Iterator for BlastXmlReader<R> {
    type Item = Result<BlastQuery, String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_query() {
            Ok(Some(query)) => Some(Ok(query)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl BlastReport {
    /// Parse BLAST XML text into memory
    pub fn from_xml_str(xml: &str) -> Result<Self, String> {
        Self::from_stream(BlastXmlReader::new(xml.as_bytes())?)
    }

    fn from_stream<R: BufRead>(mut reader: BlastXmlReader<R>) -> Result<Self, String> {
        let queries = reader.by_ref().collect::<Result<Vec<_>, String>>()?;
        Ok(Self {
            header: reader.header,
            queries,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IterationXml {
    #[serde(rename = "Iteration_query-ID")]
    query_id: Option<String>,
    #[serde(rename = "Iteration_query-def")]
    query_def: Option<String>,
    #[serde(rename = "Iteration_query-len")]
    query_len: Option<u64>,
    #[serde(rename = "Iteration_hits", default)]
    hits: Option<IterationHitsXml>,
}

#[derive(Debug, Default, Deserialize)]
struct IterationHitsXml {
    #[serde(rename = "Hit", default)]
    hits: Vec<HitXml>,
}

#[derive(Debug, Deserialize)]
struct HitXml {
    #[serde(rename = "Hit_id")]
    id: Option<String>,
    #[serde(rename = "Hit_def")]
    definition: Option<String>,
    #[serde(rename = "Hit_accession")]
    accession: Option<String>,
    #[serde(rename = "Hit_len")]
    length: Option<u64>,
    #[serde(rename = "Hit_hsps", default)]
    hsps: Option<HitHspsXml>,
}

#[derive(Debug, Default, Deserialize)]
struct HitHspsXml {
    #[serde(rename = "Hsp", default)]
    hsps: Vec<HspXml>,
}

#[derive(Debug, Deserialize)]
struct HspXml {
    #[serde(rename = "Hsp_evalue")]
    evalue: f64,
    #[serde(rename = "Hsp_bit-score")]
    bit_score: Option<f64>,
    #[serde(rename = "Hsp_align-len")]
    align_len: Option<u64>,
    #[serde(rename = "Hsp_query-from")]
    query_from: Option<u64>,
    #[serde(rename = "Hsp_query-to")]
    query_to: Option<u64>,
    #[serde(rename = "Hsp_hit-from")]
    hit_from: Option<u64>,
    #[serde(rename = "Hsp_hit-to")]
    hit_to: Option<u64>,
    #[serde(rename = "Hsp_qseq")]
    qseq: Option<String>,
}

impl IterationXml {
    // Old single-query reports only carry the query on the root element
    fn into_query(self, header: &BlastHeader) -> BlastQuery {
        BlastQuery {
            id: self
                .query_id
                .or_else(|| header.query_id.clone())
                .unwrap_or_default(),
            description: self
                .query_def
                .or_else(|| header.query_def.clone())
                .unwrap_or_default(),
            length: self.query_len.or(header.query_len),
            hits: self
                .hits
                .unwrap_or_default()
                .hits
                .into_iter()
                .map(HitXml::into_hit)
                .collect(),
        }
    }
}

impl HitXml {
    fn into_hit(self) -> BlastHit {
        let mut id = self.id.unwrap_or_default();
        let mut definition = self.definition.unwrap_or_default();

        // Local ordinal ids: the real id is the first word of the definition
        if id.starts_with(LOCAL_ID_PREFIX) {
            let (first, rest) = definition.split_once(' ').unwrap_or((definition.as_str(), ""));
            let (first, rest) = (first.to_string(), rest.to_string());
            id = first;
            definition = rest;
        }

        BlastHit {
            id,
            accession: self.accession,
            definition,
            length: self.length,
            hsps: self
                .hsps
                .unwrap_or_default()
                .hsps
                .into_iter()
                .map(|hsp| Hsp {
                    evalue: hsp.evalue,
                    bit_score: hsp.bit_score,
                    align_len: hsp.align_len,
                    query_from: hsp.query_from,
                    query_to: hsp.query_to,
                    hit_from: hsp.hit_from,
                    hit_to: hsp.hit_to,
                    qseq: hsp.qseq,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<!DOCTYPE BlastOutput PUBLIC "-//NCBI//NCBI BlastOutput/EN" "http://www.ncbi.nlm.nih.gov/dtd/NCBI_BlastOutput.dtd">
<BlastOutput>
  <BlastOutput_program>blastp</BlastOutput_program>
  <BlastOutput_version>BLASTP 2.12.0+</BlastOutput_version>
  <BlastOutput_db>swissprot</BlastOutput_db>
  <BlastOutput_query-ID>Query_1</BlastOutput_query-ID>
  <BlastOutput_query-def>contig_1</BlastOutput_query-def>
  <BlastOutput_query-len>420</BlastOutput_query-len>
  <BlastOutput_param>
    <Parameters>
      <Parameters_matrix>BLOSUM62</Parameters_matrix>
      <Parameters_expect>10</Parameters_expect>
    </Parameters>
  </BlastOutput_param>
  <BlastOutput_iterations>
    <Iteration>
      <Iteration_iter-num>1</Iteration_iter-num>
      <Iteration_query-ID>Query_1</Iteration_query-ID>
      <Iteration_query-def>contig_1</Iteration_query-def>
      <Iteration_query-len>420</Iteration_query-len>
      <Iteration_hits>
        <Hit>
          <Hit_num>1</Hit_num>
          <Hit_id>sp|P12830|CADH1_HUMAN</Hit_id>
          <Hit_def>Cadherin-1 OS=Homo sapiens</Hit_def>
          <Hit_accession>P12830</Hit_accession>
          <Hit_len>882</Hit_len>
          <Hit_hsps>
            <Hsp>
              <Hsp_num>1</Hsp_num>
              <Hsp_bit-score>250.4</Hsp_bit-score>
              <Hsp_score>640</Hsp_score>
              <Hsp_evalue>1.5e-70</Hsp_evalue>
              <Hsp_query-from>3</Hsp_query-from>
              <Hsp_query-to>410</Hsp_query-to>
              <Hsp_hit-from>150</Hsp_hit-from>
              <Hsp_hit-to>560</Hsp_hit-to>
              <Hsp_align-len>412</Hsp_align-len>
              <Hsp_qseq>MGPWSRSLSALLLLLQVSSWLCQ</Hsp_qseq>
            </Hsp>
            <Hsp>
              <Hsp_num>2</Hsp_num>
              <Hsp_evalue>0.003</Hsp_evalue>
              <Hsp_align-len>40</Hsp_align-len>
            </Hsp>
          </Hit_hsps>
        </Hit>
      </Iteration_hits>
    </Iteration>
    <Iteration>
      <Iteration_iter-num>2</Iteration_iter-num>
      <Iteration_query-ID>Query_2</Iteration_query-ID>
      <Iteration_query-def>contig_2</Iteration_query-def>
      <Iteration_query-len>88</Iteration_query-len>
      <Iteration_hits>
      </Iteration_hits>
      <Iteration_message>No hits found</Iteration_message>
    </Iteration>
  </BlastOutput_iterations>
</BlastOutput>
"#;

    #[test]
    fn test_parse_sample_report() {
        let report = BlastReport::from_xml_str(SAMPLE).unwrap();
        assert_eq!(report.header.program.as_deref(), Some("blastp"));
        assert_eq!(report.header.version.as_deref(), Some("BLASTP 2.12.0+"));
        assert_eq!(report.header.database.as_deref(), Some("swissprot"));
        assert_eq!(report.queries.len(), 2);

        let query = &report.queries[0];
        assert_eq!(query.id, "Query_1");
        assert_eq!(query.length, Some(420));
        assert_eq!(query.hits.len(), 1);

        let hit = &query.hits[0];
        assert_eq!(hit.id, "sp|P12830|CADH1_HUMAN");
        assert_eq!(hit.description(), "Cadherin-1 OS=Homo sapiens");
        assert_eq!(hit.accession.as_deref(), Some("P12830"));
        assert_eq!(hit.hsps.len(), 2);
        assert_eq!(hit.hsps[0].evalue, 1.5e-70);
        assert_eq!(hit.hsps[0].aln_span(), 412);
        assert_eq!(hit.hsps[1].evalue, 0.003);

        assert!(report.queries[1].hits.is_empty());
    }

    #[test]
    fn test_dialect_from_root() {
        assert_eq!(BlastXmlDialect::from_root(b"BlastOutput"), BlastXmlDialect::BlastOutput);
        assert_eq!(BlastXmlDialect::from_root(b"BlastXML2"), BlastXmlDialect::BlastXml2);
        assert_eq!(BlastXmlDialect::from_root(b"GBSet"), BlastXmlDialect::Unknown);
    }

    #[test]
    fn test_reader_yields_queries_one_at_a_time() {
        // Second iteration is cut off: the first must still come through
        let cut = SAMPLE.find("<Iteration_query-ID>Query_2").unwrap();
        let truncated = &SAMPLE[..cut];

        let mut reader = BlastXmlReader::new(truncated.as_bytes()).unwrap();
        assert_eq!(reader.header().program.as_deref(), Some("blastp"));
        assert_eq!(reader.header().query_len, Some(420));

        let first = reader.next().unwrap().unwrap();
        assert_eq!(first.id, "Query_1");
        assert_eq!(first.hits.len(), 1);

        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_root_query_fields_fill_missing_iteration_fields() {
        let xml = "<BlastOutput><BlastOutput_program>blastn</BlastOutput_program>\
                   <BlastOutput_query-ID>lcl|1</BlastOutput_query-ID>\
                   <BlastOutput_query-def>old contig</BlastOutput_query-def>\
                   <BlastOutput_query-len>77</BlastOutput_query-len>\
                   <BlastOutput_iterations><Iteration><Iteration_iter-num>1</Iteration_iter-num>\
                   <Iteration_hits></Iteration_hits></Iteration></BlastOutput_iterations></BlastOutput>";
        let report = BlastReport::from_xml_str(xml).unwrap();
        let query = &report.queries[0];
        assert_eq!(query.id, "lcl|1");
        assert_eq!(query.description, "old contig");
        assert_eq!(query.length, Some(77));
    }

    #[test]
    fn test_local_ordinal_id_takes_first_definition_word() {
        let xml = "<BlastOutput><BlastOutput_iterations><Iteration><Iteration_hits>\
                   <Hit><Hit_id>gnl|BL_ORD_ID|12</Hit_id><Hit_def>XP_0001.1 Collagen alpha-1 chain</Hit_def>\
                   <Hit_accession>12</Hit_accession></Hit>\
                   <Hit><Hit_id>gnl|BL_ORD_ID|13</Hit_id><Hit_def>lonely</Hit_def></Hit>\
                   <Hit><Hit_id>sp|P1|X</Hit_id><Hit_def>Integrin beta</Hit_def></Hit>\
                   </Iteration_hits></Iteration></BlastOutput_iterations></BlastOutput>";
        let report = BlastReport::from_xml_str(xml).unwrap();
        let hits = &report.queries[0].hits;

        assert_eq!(hits[0].id, "XP_0001.1");
        assert_eq!(hits[0].description(), "Collagen alpha-1 chain");
        assert_eq!(hits[1].id, "lonely");
        assert_eq!(hits[1].description(), "");
        assert_eq!(hits[2].id, "sp|P1|X");
        assert_eq!(hits[2].description(), "Integrin beta");
    }

    #[test]
    fn test_rejects_other_documents() {
        let xml2 = BlastReport::from_xml_str("<BlastXML2><BlastOutput2/></BlastXML2>").unwrap_err();
        assert!(xml2.contains("BlastXML2"));

        let other = BlastReport::from_xml_str("<GBSet></GBSet>").unwrap_err();
        assert!(other.contains("Not a BLAST XML document"));
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let broken = "<BlastOutput><BlastOutput_iterations><Iteration>";
        assert!(BlastReport::from_xml_str(broken).is_err());

        let unclosed = "<BlastOutput><BlastOutput_program>blastp</BlastOutput_program>";
        assert!(BlastReport::from_xml_str(unclosed).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = BlastXmlReader::from_path(Path::new("/nonexistent/blast.xml")).err().unwrap();
        assert!(err.contains("Failed to read BLAST XML file"));
    }
}
