//! JPack CLI - Command-line tool for NDJSON ↔ TLV conversion
//!
//! Usage: `jpack [-f] [-m <method>] -i <input> -o <output>`
//!
//! - json2tlv (alias encode): NDJSON → TLV with a key dictionary trailer
//! - tlv2json (alias decode): TLV → NDJSON

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use jpack_io::{execute, Limits, Method, PackOptions, PackRequest, PackSummary, PackerRegistry};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jpack")]
#[command(about = "Convert NDJSON to a key-interned TLV binary stream and back")]
#[command(version)]
struct Cli {
    /// Conversion method (json2tlv, tlv2json, encode, decode)
    #[arg(short, long, default_value = "json2tlv")]
    method: String,
    /// Input file
    #[arg(short, long)]
    input: PathBuf,
    /// Output file
    #[arg(short, long)]
    output: PathBuf,
    /// Overwrite the output file if it exists
    #[arg(short, long)]
    force: bool,
    /// Largest record payload accepted while reading TLV
    #[arg(long)]
    max_record_bytes: Option<u64>,
    /// Write the output file directly instead of through a temporary file
    #[arg(long)]
    no_atomic: bool,
    /// Show progress spinner while converting
    #[arg(long)]
    progress: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Summary format written to stderr
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    summary_format: SummaryFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut limits = Limits::default();
    if let Some(max) = cli.max_record_bytes {
        limits.max_record_payload_len = max;
    }
    let options = PackOptions {
        limits,
        atomic_output: !cli.no_atomic,
    };
    let request = PackRequest::new(cli.method, cli.input, cli.output)
        .overwrite(cli.force)
        .options(options);

    let registry = PackerRegistry::with_defaults();
    let spinner = cli
        .progress
        .then(|| create_spinner(&request.input.display().to_string()));

    let result = execute(&request, &registry);
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let summary = result?;

    match cli.summary_format {
        SummaryFormat::Text => report_summary(&summary)?,
        SummaryFormat::Json => {
            let mut stderr = std::io::stderr().lock();
            writeln!(&mut stderr, "{}", serde_json::to_string(&summary)?)?;
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn report_summary(summary: &PackSummary) -> Result<(), Box<dyn Error>> {
    let verb = match summary.method {
        Method::Encode => "Encoded",
        Method::Decode => "Decoded",
    };
    let mut stderr = std::io::stderr().lock();
    writeln!(
        &mut stderr,
        "{} {} to {} (records: {}, keys: {}, bytes written: {}, elapsed: {:.2?})",
        verb,
        summary.input.display(),
        summary.output.display(),
        summary.run.records(),
        summary.run.dictionary_entries(),
        summary.run.bytes_written(),
        summary.elapsed
    )?;
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
