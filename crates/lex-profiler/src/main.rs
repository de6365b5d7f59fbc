//! CLI entry point for the dataset profiler.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use lex_profiler::{
    DataProfiler, DatasetReport, LoadOutcome, ProfilerConfig, ReportEnvelope, ReportWriter,
    load_dataset,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Privacy-Preserving Dataset Profiler",
    long_about = "Profiles a CSV dataset using structural and statistical properties only.\n\
                  No raw cell value is ever printed or written.\n\n\
                  EXAMPLES:\n  \
                  # Human-readable summary\n  \
                  lex-profiler -i data.csv\n\n  \
                  # Full report as JSON on stdout\n  \
                  lex-profiler -i data.csv --json\n\n  \
                  # Save the report to results/data_profile.json\n  \
                  lex-profiler -i data.csv -r -o results/\n\n  \
                  # Custom thresholds\n  \
                  lex-profiler -i data.csv -c profiler.json"
)]
struct Args {
    /// Path to the CSV file to profile
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: PathBuf,

    /// JSON file with profiler thresholds
    ///
    /// Missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the report.
    /// Useful for piping to other tools: `... --json | jq .dtype_counts`
    #[arg(long)]
    json: bool,

    /// Write the JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_profile.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = load_config(args.config.as_deref())?;

    let df = match load_dataset(args.input.clone(), &config)? {
        LoadOutcome::Loaded(df) => df,
        LoadOutcome::Unusable(source) => {
            error!("Cannot profile {}: {}", source.path.display(), source.reason);
            return Err(anyhow!(
                "Input is not usable: {} ({})",
                source.path.display(),
                source.reason
            ));
        }
    };

    let report = DataProfiler::profile_dataset(&df, &config)?;
    let input_file = args.input.display().to_string();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human_readable_summary(&report, &input_file);
    }

    if args.emit_report {
        let envelope = ReportEnvelope::new(input_file, &report);
        let writer = ReportWriter::new(&args.output);
        let report_path = writer.write_report_to_file(&envelope, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    Ok(())
}

/// Read and validate a JSON config file, or fall back to defaults.
fn load_config(path: Option<&Path>) -> Result<ProfilerConfig> {
    let Some(path) = path else {
        return Ok(ProfilerConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ProfilerConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;

    info!("Loaded profiler config from: {}", path.display());
    Ok(config)
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

/// Print a human-readable summary of the profile.
///
/// Uses `println!` for user-facing output so it is visible regardless of
/// log level settings.
fn print_human_readable_summary(report: &DatasetReport, input_file: &str) {
    println!();
    println!("{}", "=".repeat(80));
    println!("DATASET PROFILE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input: {} ({} rows x {} columns)",
        input_file,
        report.row_count(),
        report.column_count()
    );
    println!();

    println!("Storage Types:");
    for (dtype, count) in &report.dtype_counts {
        println!("  {:<20} {}", dtype, count);
    }
    println!();

    println!("COLUMN PROFILES");
    println!("{}", "-".repeat(40));
    println!(
        "{:<20} {:<8} {:<8} {:<9} {:<10} {:<8} {:<10}",
        "Column", "Unique", "Ratio", "Entropy", "Dominant %", "Skew", "Outlier %"
    );
    println!("{}", "-".repeat(80));

    for (name, metrics) in &report.column_profiles {
        println!(
            "{:<20} {:<8} {:<8.3} {:<9} {:<10} {:<8} {:<10}",
            truncate_str(name, 19),
            metrics.unique_count,
            metrics.unique_ratio,
            fmt_opt(metrics.entropy, 2),
            fmt_opt(metrics.dominant_value_pct, 1),
            fmt_opt(metrics.skewness, 2),
            fmt_opt(metrics.outlier_pct, 2),
        );
    }
    println!();

    println!("COLUMN NAMES");
    println!("{}", "-".repeat(40));
    for (name, profile) in &report.column_name_profiles {
        let hints: Vec<&str> = [
            (profile.likely_id_column, "id"),
            (profile.likely_datetime_column, "datetime"),
            (profile.likely_amount_column, "amount"),
            (profile.likely_count_column, "count"),
            (profile.likely_ratio_column, "ratio"),
        ]
        .into_iter()
        .filter_map(|(flag, hint)| flag.then_some(hint))
        .collect();

        println!(
            "  {:<20} {:<12} {}",
            truncate_str(name, 19),
            profile.case_pattern,
            hints.join(", ")
        );
    }
    println!();

    if !report.high_missing_columns_pct.is_empty() {
        println!("High Missingness:");
        for (name, pct) in &report.high_missing_columns_pct {
            println!("  ! {}: {:.2}% missing", name, pct);
        }
        println!();
    }

    let identifiers = report.likely_identifier_columns();
    if !identifiers.is_empty() {
        println!("Likely Identifiers: {}", identifiers.join(", "));
    }

    let mixed: Vec<&str> = report
        .column_profiles
        .iter()
        .filter(|(_, m)| m.mixed_type_suspected == Some(true))
        .map(|(name, _)| name.as_str())
        .collect();
    if !mixed.is_empty() {
        println!("Mixed-Type Suspected: {}", mixed.join(", "));
    }
    println!();

    println!("{}", report.privacy_note);
    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save the JSON report");
    println!("{}", "=".repeat(80));
}
