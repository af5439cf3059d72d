// config.rs - Configuration file support

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    // Input/Output
    pub input: Option<String>,
    pub output: Option<String>,
    pub output_csv: Option<String>,
    pub format: Option<String>,
    pub log: Option<String>,

    // Family list
    pub protein_families: Option<String>,

    // Filter thresholds
    pub evalue: Option<f64>,
    pub aln_span: Option<u64>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# blastfam.toml - Configuration file for blastfam
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# BLAST XML results (-outfmt 5)
input = "/path/to/blast_results.xml"

# Output family table
output = "family_table.tsv"

# Additional plain CSV copy of the table
# output_csv = "family_table.csv"

# Output format: tsv, csv, xlsx (an .xlsx output name always writes xlsx)
format = "tsv"

# Log file name
log = "log.txt"

# =============================================================================
# PROTEIN FAMILIES
# =============================================================================

# Custom family list, one name per line (omit to use the built-in list)
# protein_families = "families.txt"

# =============================================================================
# FILTER THRESHOLDS
# =============================================================================

# HSPs with e-value <= evalue AND alignment span >= aln_span are strong matches
evalue = 1e-10
aln_span = 50

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without writing the table (dry run)
dry_run = false
"#
        .to_string()
    }
}
