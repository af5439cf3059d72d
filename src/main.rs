// main.rs - CLI entry point

use std::path::Path;
use std::time::{Duration, Instant};

use blastfam::cli::Config;
use blastfam::output::log::{log_final_totals, log_table};
use blastfam::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

fn main() {
    if let Err(e) = run_main() {
        tracing::error!("{}", e);
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validation = validate_args(&args)?;
    let input = args.input.as_deref().ok_or("--input is required")?;

    init_run_log(&args.log)?;

    println!("🚀 blastfam v{}", blastfam::VERSION);
    println!("🧬 Protein families: {}", validation.families.len());
    println!(
        "🔬 Filter: e-value <= {:e}, alignment span >= {}",
        validation.filter.max_evalue, validation.filter.min_aln_span
    );
    info!("Command: {}", command_line);
    info!(
        "Families: {}, e-value threshold: {:e}, alignment span threshold: {}",
        validation.families.len(),
        validation.filter.max_evalue,
        validation.filter.min_aln_span
    );

    let total_start = Instant::now();

    // P1: open the report and read its header; queries are streamed in P2
    println!();
    let spinner = phase_spinner("P1: Reading XML header")?;
    let reader = BlastXmlReader::from_path(Path::new(input));
    spinner.finish_and_clear();
    let reader = reader?;
    log_report_header(reader.header());

    if args.dry_run {
        let (mut queries, mut hits) = (0usize, 0usize);
        for query in reader {
            hits += query?.hits.len();
            queries += 1;
        }
        println!("✅ Dry run completed successfully");
        println!(
            "📊 {} queries, {} hits, {} protein families",
            queries,
            hits,
            validation.families.len()
        );
        return Ok(());
    }

    // P2: classify and count, one query at a time
    println!();
    info!("Starting the iteration through queries and hits");
    let aggregator = HitAggregator::for_families(&validation.families, validation.filter)?;
    let mut counters = FamilyCounters::new(&validation.families);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {pos} queries {msg}")
            .map_err(|e| format!("Invalid progress template: {}", e))?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let queries = reader.inspect(|query| {
        if let Ok(query) = query {
            pb.set_message(format!("P2: {}", query.id));
            pb.inc(1);
        }
    });
    let summary = aggregator.aggregate_stream(queries, &mut counters, |_, hit, outcome, counters| {
        log_hit(hit, outcome, counters);
    })?;
    pb.finish_with_message(format!(
        "✅ Processed {} hits ({} matched a family)",
        summary.hits, summary.matched_hits
    ));
    info!(
        "Finished reading the XML file: {} queries, {} hits",
        summary.queries, summary.hits
    );

    // P3: table
    let spinner = phase_spinner("P3: Building table")?;
    let table = build_table(&validation.families, &counters);
    spinner.finish_and_clear();
    println!("\n{}\n", table);
    log_table(&table);

    // P4/P5: write artifacts; a failed CSV copy leaves the primary table in place
    let output = args.output.as_deref().ok_or("--output is required")?;
    let format = output_format(output, &args.format);
    let spinner = phase_spinner(&format!("P4: Writing {} table", format))?;
    let written = spinner.suspend(|| write_table(output, &format, &table, &command_line));
    spinner.finish_and_clear();
    written?;
    info!("Family table saved to {} ({})", output, format);

    if let Some(csv_path) = &args.output_csv {
        let spinner = phase_spinner("P5: Writing CSV copy")?;
        let written = spinner.suspend(|| write_plain_csv(csv_path, &table));
        spinner.finish_and_clear();
        written?;
        info!("CSV file saved to {}", csv_path);
    }

    log_final_totals(&table, &counters);

    let total_elapsed = total_start.elapsed();
    println!("\n🎉 === BLASTFAM COMPLETED SUCCESSFULLY ===");
    println!("⏱️  Total execution time: {:.2}s", total_elapsed.as_secs_f64());
    println!("📁 Output written to: {}", output);
    println!("📝 Log written to: {}", args.log);

    Ok(())
}

/// Spinner for phases with no meaningful length
fn phase_spinner(title: &str) -> Result<ProgressBar, String> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed_precise}]")
            .map_err(|e| format!("Invalid progress template: {}", e))?,
    );
    spinner.set_message(title.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn log_report_header(header: &BlastHeader) {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!(
        "📖 {} {} against {}",
        field(&header.program),
        field(&header.version),
        field(&header.database)
    );
    info!(
        "Program: {}, version: {}, database: {}",
        field(&header.program),
        field(&header.version),
        field(&header.database)
    );
}

fn log_hit(hit: &BlastHit, outcome: &HitOutcome, counters: &FamilyCounters) {
    info!(
        "Processing ID: {}, DES: {}, families {:?}",
        hit.id,
        hit.description(),
        outcome.families
    );
    for family in &outcome.families {
        if outcome.untracked.contains(family) {
            info!("{} is not in the family counters", family);
            continue;
        }
        info!("{} match: {} is from the {} family.", family, hit.id, family);
        info!("{} TOTAL COUNT: {}", family, counters.total(family));
    }
}
