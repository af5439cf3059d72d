// validation.rs - Input validation utilities

use std::path::Path;

use crate::cli::args::Args;
use crate::core::HspFilter;
use crate::data::ProteinFamilies;

#[derive(Debug)]
pub struct ValidationResult {
    pub families: ProteinFamilies,
    pub filter: HspFilter,
}

const OUTPUT_FORMATS: [&str; 3] = ["tsv", "csv", "xlsx"];

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let input = args.input.as_ref().ok_or("--input is required")?;
    if !Path::new(input).is_file() {
        return Err(format!("Input BLAST XML file '{}' does not exist", input));
    }

    if !args.dry_run && args.output.is_none() {
        return Err("--output is required (omit only with --dry-run)".to_string());
    }

    if !OUTPUT_FORMATS.contains(&args.format.to_lowercase().as_str()) {
        return Err(format!(
            "Invalid output format '{}'. Available: {}",
            args.format,
            OUTPUT_FORMATS.join(", ")
        ));
    }

    // Validate thresholds
    if !args.evalue.is_finite() || args.evalue < 0.0 {
        return Err(format!("E-value threshold must be a non-negative number, got {}", args.evalue));
    }

    if let (Some(output), Some(output_csv)) = (&args.output, &args.output_csv) {
        if output == output_csv {
            return Err(format!("--output and --output-csv both point to '{}'", output));
        }
    }

    let families = match &args.protein_families {
        Some(file_path) => ProteinFamilies::from_file(file_path)?,
        None => ProteinFamilies::default(),
    };

    Ok(ValidationResult {
        families,
        filter: HspFilter::new(args.evalue, args.aln_span),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn input_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "<BlastOutput></BlastOutput>").unwrap();
        file
    }

    fn args_for(input: &tempfile::NamedTempFile) -> Args {
        let mut args = Args::with_input(input.path().to_str().unwrap());
        args.output = Some("table.tsv".to_string());
        args
    }

    #[test]
    fn test_defaults_validate() {
        let input = input_file();
        let result = validate_args(&args_for(&input)).unwrap();
        assert_eq!(result.families, ProteinFamilies::default());
        assert_eq!(result.filter, HspFilter::default());
    }

    #[test]
    fn test_missing_input_and_output() {
        let mut args = Args::with_input("/nonexistent/hits.xml");
        args.output = Some("table.tsv".to_string());
        assert!(validate_args(&args).unwrap_err().contains("does not exist"));

        let input = input_file();
        let mut args = args_for(&input);
        args.output = None;
        assert!(validate_args(&args).unwrap_err().contains("--output is required"));

        args.dry_run = true;
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_rejects_bad_thresholds_and_format() {
        let input = input_file();

        let mut args = args_for(&input);
        args.evalue = -1.0;
        assert!(validate_args(&args).is_err());

        let mut args = args_for(&input);
        args.evalue = f64::NAN;
        assert!(validate_args(&args).is_err());

        let mut args = args_for(&input);
        args.format = "parquet".to_string();
        assert!(validate_args(&args).unwrap_err().contains("Invalid output format"));

        let mut args = args_for(&input);
        args.format = "XLSX".to_string();
        assert!(validate_args(&args).is_ok());

        let mut args = args_for(&input);
        args.output_csv = args.output.clone();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_custom_family_file() {
        let input = input_file();
        let mut families = tempfile::NamedTempFile::new().unwrap();
        writeln!(families, "Foo\nBar").unwrap();

        let mut args = args_for(&input);
        args.protein_families = Some(families.path().to_str().unwrap().to_string());
        let result = validate_args(&args).unwrap();
        assert_eq!(result.families.names(), &["Foo".to_string(), "Bar".to_string()]);

        let mut dupes = tempfile::NamedTempFile::new().unwrap();
        writeln!(dupes, "Foo\nfoo").unwrap();
        args.protein_families = Some(dupes.path().to_str().unwrap().to_string());
        assert!(validate_args(&args).unwrap_err().contains("Duplicate protein family"));
    }
}
