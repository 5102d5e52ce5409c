mod logging;
mod settings;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use datafit_core::{
    DecimalSeparator, Encoding, Error as CoreError, FormatHints, InvalidCellPolicy,
    QualityConfig, QualityDescriptor, QualityResult,
};
use datafit_eval::{EvaluationInput, QualityService, TopCategoryOptions};
use logging::{LoggingError, init_logging};
use schemars::schema_for;
use serde::Serialize;
use settings::{SettingsError, load_config};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl CliError {
    /// 2 for problems with caller-supplied input, 1 for everything else.
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Core(_) | CliError::InvalidArgs(_) => 2,
            CliError::Settings(SettingsError::TomlDecode(_)) => 2,
            CliError::Json(err) if err.is_data() || err.is_syntax() || err.is_eof() => 2,
            _ => 1,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CliError::Core(err) => err.code(),
            CliError::Settings(SettingsError::TomlDecode(_)) => "invalid_config",
            CliError::InvalidArgs(_) => "invalid_arguments",
            CliError::Json(_) if self.exit_code() == 2 => "invalid_descriptor",
            _ => "internal_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    detail: String,
}

#[derive(Parser, Debug)]
#[command(name = "datafit", version, about = "Estimate whether a tabular dataset is fit for modeling")]
struct Cli {
    /// TOML file overriding thresholds, weights and the acceptance threshold.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Append JSON log lines to this file instead of logging to stderr.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate pre-aggregated dataset statistics.
    Quality(QualityArgs),
    /// Evaluate a delimited file.
    QualityCsv(CsvArgs),
    /// Per-column summary, missing table, top categories and correlations of a delimited file.
    Summary(SummaryArgs),
    /// Print the JSON Schema of a contract type.
    Schema(SchemaArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Quality(_) => "quality",
            Command::QualityCsv(_) => "quality-csv",
            Command::Summary(_) => "summary",
            Command::Schema(_) => "schema",
        }
    }
}

#[derive(Args, Debug)]
struct QualityArgs {
    /// JSON descriptor file (`-` reads stdin).
    #[arg(long, value_name = "FILE", conflicts_with_all = ["n_rows", "n_cols", "max_missing_share"])]
    descriptor: Option<PathBuf>,
    #[arg(long, allow_negative_numbers = true, required_unless_present = "descriptor")]
    n_rows: Option<i64>,
    #[arg(long, allow_negative_numbers = true, required_unless_present = "descriptor")]
    n_cols: Option<i64>,
    #[arg(long, allow_negative_numbers = true, required_unless_present = "descriptor")]
    max_missing_share: Option<f64>,
    #[arg(long, default_value_t = false, conflicts_with = "descriptor")]
    has_constant_columns: bool,
    #[arg(long, default_value_t = false, conflicts_with = "descriptor")]
    has_high_cardinality_categoricals: bool,
}

#[derive(Args, Debug)]
struct CsvArgs {
    /// Delimited file (`-` reads stdin).
    #[arg(value_name = "FILE")]
    path: PathBuf,
    /// Field delimiter (single ASCII character).
    #[arg(long, default_value_t = ',')]
    delimiter: char,
    /// Quote character (single ASCII character).
    #[arg(long, default_value_t = '"')]
    quote: char,
    /// Payload encoding: utf-8 or latin-1.
    #[arg(long, default_value = "utf-8")]
    encoding: Encoding,
    /// Decimal separator for numeric cells.
    #[arg(long, default_value = ".")]
    decimal: DecimalSeparator,
    /// Null marker; repeat to replace the default marker list.
    #[arg(long = "null-marker", value_name = "TEXT")]
    null_markers: Vec<String>,
    /// Count undecodable cells as missing instead of rejecting the file.
    #[arg(long, default_value_t = false)]
    lenient: bool,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    csv: CsvArgs,
    /// Values reported per categorical column.
    #[arg(long, default_value_t = 5)]
    top_k: usize,
    /// Categorical columns reported.
    #[arg(long, default_value_t = 5)]
    max_columns: usize,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    #[arg(value_enum)]
    target: SchemaTarget,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SchemaTarget {
    Descriptor,
    Result,
    Config,
    Hints,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let pretty = cli.pretty;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", code = err.code(), error = %err);
            let body = ErrorBody {
                error: err.code(),
                detail: err.to_string(),
            };
            match render(&body, pretty) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("error: {err}"),
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(cli.log_file.as_deref())?;
    tracing::info!(event = "run_started", command = cli.command.name());

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Quality(args) => {
            let service = build_service(config)?;
            let descriptor = read_descriptor(args)?;
            let result = service.evaluate(EvaluationInput::Descriptor(&descriptor))?;
            emit_result(&result, cli.pretty)
        }
        Command::QualityCsv(args) => {
            let service = build_service(config)?;
            let hints = format_hints(&args)?;
            let bytes = read_input(&args.path)?;
            let result = service.evaluate(EvaluationInput::Raw {
                bytes: &bytes,
                hints: &hints,
            })?;
            emit_result(&result, cli.pretty)
        }
        Command::Summary(args) => {
            let service = build_service(config)?;
            let hints = format_hints(&args.csv)?;
            let bytes = read_input(&args.csv.path)?;
            let options = TopCategoryOptions {
                top_k: args.top_k,
                max_columns: args.max_columns,
            };
            let overview = service.summarize_raw(&bytes, &hints, &options)?;
            println!("{}", render(&overview, cli.pretty)?);
            Ok(())
        }
        Command::Schema(args) => {
            let schema = match args.target {
                SchemaTarget::Descriptor => schema_for!(QualityDescriptor),
                SchemaTarget::Result => schema_for!(QualityResult),
                SchemaTarget::Config => schema_for!(QualityConfig),
                SchemaTarget::Hints => schema_for!(FormatHints),
            };
            println!("{}", render(&schema, true)?);
            Ok(())
        }
    }
}

fn build_service(config: QualityConfig) -> Result<QualityService, CliError> {
    let service = QualityService::new(config)?;
    let thresholds = &service.config().thresholds;
    tracing::debug!(
        event = "profile_loaded",
        min_rows = thresholds.min_rows,
        max_cols = thresholds.max_cols,
        missing_threshold = thresholds.missing_threshold,
        cardinality_threshold = thresholds.cardinality_threshold
    );
    Ok(service)
}

fn read_descriptor(args: QualityArgs) -> Result<QualityDescriptor, CliError> {
    if let Some(path) = args.descriptor {
        let bytes = read_input(&path)?;
        return Ok(serde_json::from_slice(&bytes)?);
    }

    match (args.n_rows, args.n_cols, args.max_missing_share) {
        (Some(n_rows), Some(n_cols), Some(max_missing_share)) => {
            Ok(QualityDescriptor::new(n_rows, n_cols, max_missing_share)
                .with_constant_columns(args.has_constant_columns)
                .with_high_cardinality_categoricals(args.has_high_cardinality_categoricals))
        }
        _ => Err(CliError::InvalidArgs(
            "--n-rows, --n-cols and --max-missing-share are required without --descriptor"
                .to_string(),
        )),
    }
}

fn format_hints(args: &CsvArgs) -> Result<FormatHints, CliError> {
    let delimiter = ascii_byte("delimiter", args.delimiter)?;
    let quote = ascii_byte("quote", args.quote)?;
    if args.delimiter == args.decimal.as_char() {
        return Err(CliError::InvalidArgs(
            "delimiter and decimal separator must differ".to_string(),
        ));
    }

    let mut hints = FormatHints {
        delimiter,
        quote,
        encoding: args.encoding,
        decimal: args.decimal,
        invalid_cells: if args.lenient {
            InvalidCellPolicy::Missing
        } else {
            InvalidCellPolicy::Reject
        },
        ..FormatHints::default()
    };
    if !args.null_markers.is_empty() {
        hints.null_markers = args.null_markers.clone();
    }
    Ok(hints)
}

fn ascii_byte(name: &str, value: char) -> Result<u8, CliError> {
    if value.is_ascii() {
        Ok(value as u8)
    } else {
        Err(CliError::InvalidArgs(format!(
            "{name} must be a single ASCII character, got '{value}'"
        )))
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        return Ok(bytes);
    }
    Ok(std::fs::read(path)?)
}

fn emit_result(result: &QualityResult, pretty: bool) -> Result<(), CliError> {
    println!("{}", render(result, pretty)?);
    Ok(())
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
