//! Focus CLI - Command-line interface for Focus Flux
//!
//! Commands:
//! - compute: Focus minutes for a single set of signal durations
//! - transform: Process day records into focus reports (batch mode)
//! - weights: Print the effective weight configuration
//! - doctor: Diagnose configuration health

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use focus_flux::calculator::FocusScoreCalculator;
use focus_flux::encoder::{FocusReport, FocusReportEncoder};
use focus_flux::engine::ResolvedSignals;
use focus_flux::types::{DayRecord, SignalDurations};
use focus_flux::{FocusError, WeightConfiguration, FLUX_VERSION, PRODUCER_NAME};

/// Focus - On-device focus time estimation
#[derive(Parser)]
#[command(name = "focus")]
#[command(version = FLUX_VERSION)]
#[command(
    about = "Estimate daily focus minutes from stillness, mindfulness and interruptions",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute focus minutes for one set of signal durations
    Compute {
        /// Seconds the device was still
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        still: f64,

        /// Seconds of recorded mindful activity
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        mindful: f64,

        /// Seconds attributable to notification interruptions
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        interrupt: f64,

        /// Load weights from a JSON file
        #[arg(long)]
        weights: Option<PathBuf>,

        /// Print the full breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transform day records into focus reports (batch mode)
    Transform {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Load weights from a JSON file
        #[arg(long)]
        weights: Option<PathBuf>,
    },

    /// Print the effective weight configuration
    Weights {
        /// Load weights from a JSON file instead of the defaults
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration health
    Doctor {
        /// Check a weights file
        #[arg(long)]
        weights: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one day record per line)
    Ndjson,
    /// JSON array of day records
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one report per line)
    Ndjson,
    /// JSON array of reports
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), FocusCliError> {
    match cli.command {
        Commands::Compute {
            still,
            mindful,
            interrupt,
            weights,
            json,
        } => cmd_compute(still, mindful, interrupt, weights.as_deref(), json),

        Commands::Transform {
            input,
            output,
            input_format,
            output_format,
            weights,
        } => cmd_transform(&input, &output, input_format, output_format, weights.as_deref()),

        Commands::Weights { file, json } => cmd_weights(file.as_deref(), json),

        Commands::Doctor { weights, json } => cmd_doctor(weights.as_deref(), json),
    }
}

fn cmd_compute(
    still: f64,
    mindful: f64,
    interrupt: f64,
    weights: Option<&Path>,
    json: bool,
) -> Result<(), FocusCliError> {
    let calculator = FocusScoreCalculator::new(load_weights(weights)?);
    let signals = SignalDurations::new(still, mindful, interrupt);

    if !signals.within_one_day() {
        log::warn!("signal durations fall outside a single day: {signals:?}");
    }

    if json {
        let breakdown = calculator.breakdown(&signals);
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        println!("{}", calculator.compute_minutes(&signals).get());
    }

    Ok(())
}

fn cmd_transform(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    weights: Option<&Path>,
) -> Result<(), FocusCliError> {
    // Read input
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let records = match input_format {
        InputFormat::Ndjson => DayRecord::parse_ndjson(&input_data)?,
        InputFormat::Json => DayRecord::parse_array(&input_data)?,
    };

    if records.is_empty() {
        return Err(FocusCliError::NoRecords);
    }

    let calculator = FocusScoreCalculator::new(load_weights(weights)?);
    let encoder = FocusReportEncoder::new();

    let reports: Vec<FocusReport> = records
        .iter()
        .map(|record| encoder.encode(&ResolvedSignals::from_record(record), &calculator))
        .collect();

    log::info!("transformed {} day records", reports.len());

    let output_data = format_output(&reports, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_weights(file: Option<&Path>, json: bool) -> Result<(), FocusCliError> {
    let weights = load_weights(file)?;

    if json {
        println!("{}", weights.to_json()?);
    } else {
        println!("Weight Configuration");
        println!("====================");
        println!("still_weight:           {}", weights.still_weight);
        println!("mindful_weight:         {}", weights.mindful_weight);
        println!("interrupt_penalty:      {}", weights.interrupt_penalty);
        println!(
            "minimum_focus_duration: {}s (reserved, not applied)",
            weights.minimum_focus_duration
        );
    }

    Ok(())
}

fn cmd_doctor(weights: Option<&Path>, json: bool) -> Result<(), FocusCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Focus Flux version {}", FLUX_VERSION),
    });

    // Known reference computation: one hour of stillness with defaults is 48 minutes
    let reference = FocusScoreCalculator::default()
        .compute_minutes(&SignalDurations::new(3600.0, 0.0, 0.0))
        .get();
    checks.push(if reference == 48 {
        DoctorCheck {
            name: "calculator".to_string(),
            status: CheckStatus::Ok,
            message: "Reference computation matches (3600s still = 48 min)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "calculator".to_string(),
            status: CheckStatus::Error,
            message: format!("Reference computation returned {reference} min, expected 48"),
        }
    });

    if let Some(weights_path) = weights {
        if weights_path.exists() {
            checks.push(match WeightConfiguration::from_file(weights_path) {
                Ok(w) => DoctorCheck {
                    name: "weights".to_string(),
                    status: if w == WeightConfiguration::DEFAULT {
                        CheckStatus::Ok
                    } else {
                        CheckStatus::Warning
                    },
                    message: if w == WeightConfiguration::DEFAULT {
                        "Weights file valid (matches defaults)".to_string()
                    } else {
                        "Weights file valid (overrides defaults)".to_string()
                    },
                },
                Err(e) => DoctorCheck {
                    name: "weights".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Invalid weights file: {}", e),
                },
            });
        } else {
            checks.push(DoctorCheck {
                name: "weights".to_string(),
                status: CheckStatus::Warning,
                message: "Weights file does not exist".to_string(),
            });
        }
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (batch input ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: FLUX_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Focus Doctor Report");
        println!("===================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(FocusCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn load_weights(path: Option<&Path>) -> Result<WeightConfiguration, FocusCliError> {
    match path {
        Some(path) => {
            let weights = WeightConfiguration::from_file(path)?;
            log::debug!("loaded weights from {}: {weights:?}", path.display());
            Ok(weights)
        }
        None => Ok(*WeightConfiguration::global()),
    }
}

fn format_output(reports: &[FocusReport], format: &OutputFormat) -> Result<String, FocusCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for report in reports {
                lines.push(serde_json::to_string(report)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(reports)?),
    }
}

// Error types

#[derive(Debug)]
enum FocusCliError {
    Io(io::Error),
    Focus(FocusError),
    Json(serde_json::Error),
    NoRecords,
    DoctorFailed,
}

impl From<io::Error> for FocusCliError {
    fn from(e: io::Error) -> Self {
        FocusCliError::Io(e)
    }
}

impl From<FocusError> for FocusCliError {
    fn from(e: FocusError) -> Self {
        FocusCliError::Focus(e)
    }
}

impl From<serde_json::Error> for FocusCliError {
    fn from(e: serde_json::Error) -> Self {
        FocusCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

const RECORD_HINT: &str =
    r#"Ensure each record looks like {"date":"YYYY-MM-DD","still":0,"mindful":0,"interrupt":0}"#;

impl From<FocusCliError> for CliError {
    fn from(e: FocusCliError) -> Self {
        match e {
            FocusCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            FocusCliError::Focus(FocusError::IoError(e)) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            FocusCliError::Focus(FocusError::InvalidWeights(msg)) => CliError {
                code: "INVALID_WEIGHTS".to_string(),
                message: msg,
                hint: Some("Run 'focus weights --json' to see a valid configuration".to_string()),
            },
            FocusCliError::Focus(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(RECORD_HINT.to_string()),
            },
            FocusCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            FocusCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No day records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            FocusCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
