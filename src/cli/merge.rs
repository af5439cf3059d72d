// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::core::{DEFAULT_ALN_SPAN_THRESHOLD, DEFAULT_EVALUE_THRESHOLD};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.input.is_none() {
            self.input = config.input;
        }
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.output_csv.is_none() {
            self.output_csv = config.output_csv;
        }
        if self.protein_families.is_none() {
            self.protein_families = config.protein_families;
        }

        // Settings with defaults (only override defaults, not explicit CLI values)
        if let Some(format) = config.format {
            if self.format == "tsv" {
                self.format = format;
            }
        }
        if let Some(log) = config.log {
            if self.log == "log.txt" {
                self.log = log;
            }
        }
        if let Some(evalue) = config.evalue {
            if self.evalue == DEFAULT_EVALUE_THRESHOLD {
                self.evalue = evalue;
            }
        }
        if let Some(aln_span) = config.aln_span {
            if self.aln_span == DEFAULT_ALN_SPAN_THRESHOLD {
                self.aln_span = aln_span;
            }
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
