//! Suggest CLI - Command-line interface for the health suggestion engine
//!
//! Commands:
//! - analyze: Analyze one request or metrics array (batch mode)
//! - run: Answer NDJSON requests from stdin (streaming mode)
//! - validate: Report every invalid metric entry
//! - health: Print the liveness response
//! - config: Print the effective configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use health_suggest::history::count_raw_days;
use health_suggest::logging::init_logging;
use health_suggest::schema::{AnalyzeRequest, HealthResponse, RawMetricEntry, ValidationError};
use health_suggest::{AnalysisError, HealthAnalyzer, ServiceConfig, SuggestionService, SERVICE_VERSION};
use serde::Deserialize;
use tracing::{debug, info};

/// Suggest - Adaptive daily health suggestions
#[derive(Parser)]
#[command(name = "suggest")]
#[command(version = SERVICE_VERSION)]
#[command(about = "Turn daily sleep, screen time, and activity into suggestions", long_about = None)]
struct Cli {
    /// Configuration file (TOML); APP_* environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a request or a bare metrics array (batch mode)
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// User ID for a bare metrics array
        #[arg(long, default_value = "cli")]
        user_id: String,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        format: OutputFormat,
    },

    /// Answer newline-delimited requests from stdin (streaming mode)
    Run {
        /// Flush output after each response
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Validate metric entries and report every failure
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the liveness response
    Health,

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Single-line JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

/// Accepted analyze/validate input shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum AnalyzeInput {
    Request(AnalyzeRequest),
    Metrics(Vec<RawMetricEntry>),
}

impl AnalyzeInput {
    fn into_request(self, user_id: &str) -> AnalyzeRequest {
        match self {
            AnalyzeInput::Request(request) => request,
            AnalyzeInput::Metrics(metrics) => AnalyzeRequest {
                user_id: user_id.to_string(),
                metrics,
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SuggestCliError> {
    let config = ServiceConfig::load(cli.config.as_deref())?;
    init_logging(&config.log_config())?;
    debug!(config = ?cli.config, "configuration loaded");

    match cli.command {
        Commands::Analyze {
            input,
            user_id,
            format,
        } => cmd_analyze(&config, &input, &user_id, format),

        Commands::Run { flush } => cmd_run(&config, flush),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Health => cmd_health(),

        Commands::Config => cmd_config(&config),
    }
}

fn cmd_analyze(
    config: &ServiceConfig,
    input: &Path,
    user_id: &str,
    format: OutputFormat,
) -> Result<(), SuggestCliError> {
    let request = read_input(input)?.into_request(user_id);
    let analyzer = HealthAnalyzer::with_priors(config.priors);
    let result = analyzer.analyze_request(&request)?;

    let output = match format {
        OutputFormat::Json => serde_json::to_string(&result)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&result)?,
    };
    println!("{}", output);

    Ok(())
}

fn cmd_run(config: &ServiceConfig, flush: bool) -> Result<(), SuggestCliError> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Reading one JSON request per line from stdin (Ctrl-D to finish)");
    }

    let service = SuggestionService::from_config(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handled = 0usize;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        // Bad requests become 4xx responses; the stream keeps going
        let response = service.analyze(trimmed);
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        if flush {
            stdout.flush()?;
        }
        handled += 1;
    }

    stdout.flush()?;
    info!(requests = handled, "stream finished");

    Ok(())
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), SuggestCliError> {
    let request = read_input(input)?.into_request("cli");
    let report = ValidationReport::from_request(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total entries:   {}", report.total_entries);
        println!("Valid entries:   {}", report.valid_entries);
        println!("Invalid entries: {}", report.invalid_entries);
        match report.distinct_days {
            Some(days) => println!("Distinct days:   {}", days),
            None => println!("Distinct days:   unknown (invalid dates)"),
        }

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - {}", err.error);
            }
        }
    }

    if report.errors.is_empty() {
        Ok(())
    } else {
        Err(SuggestCliError::ValidationFailed(report.errors.len()))
    }
}

fn cmd_health() -> Result<(), SuggestCliError> {
    println!("{}", serde_json::to_string_pretty(&HealthResponse::default())?);
    Ok(())
}

fn cmd_config(config: &ServiceConfig) -> Result<(), SuggestCliError> {
    print!("{}", config.to_toml()?);
    Ok(())
}

// Helper functions

fn read_input(input: &Path) -> Result<AnalyzeInput, SuggestCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    if input_data.trim().is_empty() {
        return Err(SuggestCliError::EmptyInput);
    }

    Ok(serde_json::from_str(&input_data)?)
}

// Error types

#[derive(Debug)]
enum SuggestCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Analysis(AnalysisError),
    EmptyInput,
    ValidationFailed(usize),
}

impl From<io::Error> for SuggestCliError {
    fn from(e: io::Error) -> Self {
        SuggestCliError::Io(e)
    }
}

impl From<serde_json::Error> for SuggestCliError {
    fn from(e: serde_json::Error) -> Self {
        SuggestCliError::Json(e)
    }
}

impl From<AnalysisError> for SuggestCliError {
    fn from(e: AnalysisError) -> Self {
        SuggestCliError::Analysis(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<SuggestCliError> for CliError {
    fn from(e: SuggestCliError) -> Self {
        match e {
            SuggestCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            SuggestCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Input must be an analyze request or an array of metric entries".to_string()),
            },
            SuggestCliError::Analysis(AnalysisError::Validation(e)) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'suggest validate' for every failure".to_string()),
            },
            SuggestCliError::Analysis(AnalysisError::Config(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: Some("Check the config file and APP_* environment variables".to_string()),
            },
            SuggestCliError::Analysis(e) => CliError {
                code: "ANALYSIS_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            SuggestCliError::EmptyInput => CliError {
                code: "EMPTY_INPUT".to_string(),
                message: "No input found".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            SuggestCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} validation errors", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_entries: usize,
    valid_entries: usize,
    invalid_entries: usize,
    /// Calendar days after date normalization; `None` when a date is unparseable
    distinct_days: Option<usize>,
    errors: Vec<ValidationErrorDetail>,
}

impl ValidationReport {
    fn from_request(request: &AnalyzeRequest) -> Self {
        let failures = request.validation_failures();
        let invalid: BTreeSet<usize> = failures.iter().filter_map(ValidationError::entry_index).collect();

        ValidationReport {
            total_entries: request.metrics.len(),
            valid_entries: request.metrics.len() - invalid.len(),
            invalid_entries: invalid.len(),
            distinct_days: count_raw_days(&request.metrics).ok(),
            errors: failures
                .iter()
                .map(|e| ValidationErrorDetail {
                    index: e.entry_index(),
                    error: e.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: Option<usize>,
    error: String,
}
