//! Command-line interface for combine-text.
//!
//! Combines every text file of a directory (recursively) into a single output
//! file headed by the filtered directory tree, or prints per-extension
//! statistics with `--check-format`.

use clap::Parser;
use combine_text::{
    BinaryDetection, CombineBuilder, CombineOptions, DEFAULT_EXCLUDE_PATH, DEFAULT_OUTPUT,
    StatsFormat, collect_format_stats, combine, format_stats_report,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::exit;

/// combine: merge a directory's text files into one file with headers
#[derive(Parser)]
#[command(name = "combine", version, about, long_about = None)]
struct Cli {
    /// Directory to scan. If omitted, the current directory is used after confirmation
    root: Option<PathBuf>,

    /// Output file name
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Only include files with these extensions (comma-separated, e.g. "py,txt,json")
    #[arg(short = 'f', long = "formats", value_delimiter = ',')]
    include_extensions: Vec<String>,

    /// Exclude files with these extensions (comma-separated, e.g. "exe,jpg,png")
    #[arg(long = "exclude-formats", visible_alias = "fe", value_delimiter = ',')]
    exclude_extensions: Vec<String>,

    /// Exclude files or directories: exact paths, directory prefixes or globs (comma-separated)
    #[arg(
        short = 'e',
        long = "exclude",
        value_delimiter = ',',
        default_value = DEFAULT_EXCLUDE_PATH
    )]
    exclude_paths: Vec<String>,

    /// Only include files containing this text
    #[arg(short, long)]
    pattern: Option<String>,

    /// Keep file content as-is instead of compacting it to a single line
    #[arg(long)]
    no_compact: bool,

    /// Print statistics about file formats instead of combining
    #[arg(long)]
    check_format: bool,

    /// Print the statistics as JSON
    #[arg(long, requires = "check_format")]
    json: bool,

    /// Binary detection strategy
    #[arg(long, default_value = "simple", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Do not ask for confirmation when no directory is given
    #[arg(short, long)]
    yes: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    #[cfg_attr(not(feature = "logging"), allow(dead_code))]
    verbose: u8,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn to_options(&self) -> CombineOptions {
        CombineBuilder::new(self.root.clone().unwrap_or_else(|| PathBuf::from(".")))
            .output(&self.output)
            .include_extensions(&self.include_extensions)
            .exclude_extensions(&self.exclude_extensions)
            .exclude_paths(&self.exclude_paths)
            .content_pattern(self.pattern.clone())
            .compact(!self.no_compact)
            .binary_detection(self.binary_detection)
            .build()
    }
}

#[cfg(feature = "logging")]
fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    #[cfg(feature = "logging")]
    setup_logging(cli.verbose);
    let options = cli.to_options();

    if cli.check_format {
        let format = if cli.json {
            StatsFormat::Json
        } else {
            StatsFormat::Text
        };
        run_check_format(&options, format);
        return;
    }

    if cli.root.is_none()
        && !cli.yes
        && !confirm("Are you sure you want to combine the current folder? (y/N): ")
    {
        println!("Operation cancelled.");
        return;
    }

    run_combine(&options);
}

fn confirm(prompt: &str) -> bool {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut response = String::new();
    if io::stdin().lock().read_line(&mut response).is_err() {
        return false;
    }
    matches!(response.trim(), "y" | "Y")
}

fn run_check_format(options: &CombineOptions, format: StatsFormat) {
    let report = collect_format_stats(&options.root, &options.filters)
        .and_then(|stats| format_stats_report(&stats, &options.root, &options.filters, format));
    match report {
        Ok(report) => print!("{}", report),
        Err(e) => {
            eprintln!("Error checking formats: {}", e);
            exit(1);
        }
    }
}

fn run_combine(options: &CombineOptions) {
    match combine(options) {
        Ok(summary) => {
            for path in &summary.files {
                println!("{}", path);
            }
            println!("{}", options.output.display());
            println!(
                "\nMerging complete. Output file: {} ({} files processed)",
                options.output.display(),
                summary.files.len()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
