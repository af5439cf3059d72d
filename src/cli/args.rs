// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// blastfam - Protein family hit tables from BLAST XML output
pub struct Args {
    /// input BLAST XML file (-outfmt 5)
    #[argh(option, short = 'i')]
    pub input: Option<String>,

    /// output family table file
    #[argh(option, short = 'o')]
    pub output: Option<String>,

    /// additional plain CSV copy of the family table (optional)
    #[argh(option)]
    pub output_csv: Option<String>,

    /// file containing a custom list of protein families (one per line)
    #[argh(option, short = 'p')]
    pub protein_families: Option<String>,

    /// e-value threshold: HSPs with e-value <= threshold pass (default: 1e-10)
    #[argh(option, short = 'e', default = "1e-10")]
    pub evalue: f64,

    /// alignment span threshold: HSPs aligning >= this many residues pass (default: 50)
    #[argh(option, short = 'a', default = "50")]
    pub aln_span: u64,

    /// output format: tsv, csv, xlsx (default: tsv; an .xlsx output name always writes xlsx)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// log file name (default: log.txt)
    #[argh(option, short = 'l', default = "String::from(\"log.txt\")")]
    pub log: String,

    /// validate inputs and parse the BLAST XML without writing the table (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Args {
    /// Arguments with every option at its default, for library callers
    pub fn with_input(input: &str) -> Self {
        Self {
            input: Some(input.to_string()),
            output: None,
            output_csv: None,
            protein_families: None,
            evalue: crate::core::DEFAULT_EVALUE_THRESHOLD,
            aln_span: crate::core::DEFAULT_ALN_SPAN_THRESHOLD,
            format: "tsv".to_string(),
            log: "log.txt".to_string(),
            dry_run: false,
            config: None,
            generate_config: false,
        }
    }
}
