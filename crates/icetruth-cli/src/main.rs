// crates/icetruth-cli/src/main.rs
// ============================================================================
// Module: IceTruth CLI Entry Point
// Description: Command dispatcher for truth extraction and config validation.
// Purpose: Turn JSON-lines frame dumps into JSON-lines truth records.
// Dependencies: clap, icetruth-config, icetruth-core, icetruth-extractors, tracing-subscriber
// ============================================================================

//! ## Overview
//! `icetruth extract` reads one serialized frame per line, runs the extractor
//! collection over it, and writes one `{"<extractor>": {...}}` object per
//! line to stdout. Diagnostics go to stderr through `tracing`, filtered by
//! `ICETRUTH_LOG` (default `warn`), so stdout stays machine-readable.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use icetruth_config::ConfigError;
use icetruth_config::IceTruthConfig;
use icetruth_core::FilePair;
use icetruth_core::Frame;
use icetruth_core::NamedFieldMap;
use icetruth_extractors::ExtractorCollection;
use icetruth_extractors::JsonGcdSource;
use icetruth_extractors::JsonGcdSourceConfig;
use icetruth_extractors::TruthExtractor;
use icetruth_extractors::TruthExtractorConfig;
use serde::Serialize;
use serde::ser::SerializeMap;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "ICETRUTH_LOG";
/// Filter used when `ICETRUTH_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "icetruth", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract truth records from a JSON-lines frame file.
    Extract(ExtractCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the `extract` command.
#[derive(Args, Debug)]
struct ExtractCommand {
    /// Event file with one JSON-serialized frame per line.
    #[arg(long, value_name = "PATH")]
    events: PathBuf,
    /// JSON or YAML export of the GCD file paired with the events.
    #[arg(long, value_name = "PATH")]
    gcd: PathBuf,
    /// Optional config file path (defaults to icetruth.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Padding value for absent fields (overrides `truth.padding_value`).
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    padding: Option<f64>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate an icetruth configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to icetruth.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::new(format!("failed to load config: {error}"))
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing();
    match cli.command {
        Commands::Extract(command) => command_extract(&command),
        Commands::Config {
            command,
        } => command_config(&command),
    }
}

/// Installs the stderr log subscriber.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // An already installed subscriber keeps precedence.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// SECTION: Extract Command
// ============================================================================

/// Executes the extract command.
fn command_extract(command: &ExtractCommand) -> CliResult<ExitCode> {
    let config = IceTruthConfig::load(command.config.as_deref())?;
    let truth = truth_config(&config, command.padding)?;

    let mut collection = ExtractorCollection::new();
    collection
        .register(TruthExtractor::new(truth))
        .map_err(|err| CliError::new(err.to_string()))?;
    let source = JsonGcdSource::new(JsonGcdSourceConfig {
        max_bytes: config.limits.max_gcd_bytes,
        ..JsonGcdSourceConfig::default()
    });
    collection
        .set_files(FilePair::new(&command.events, &command.gcd), &source)
        .map_err(|err| CliError::new(err.to_string()))?;

    let events = File::open(&command.events).map_err(|err| {
        CliError::new(format!("unable to open {}: {err}", command.events.display()))
    })?;
    let stdout = std::io::stdout();
    let mut output = BufWriter::new(stdout.lock());
    let frames = extract_stream(
        &collection,
        BufReader::new(events),
        &mut output,
        config.limits.max_frame_bytes,
    )?;
    output.flush().map_err(|err| CliError::new(output_error(&err)))?;
    info!(frames, events = %command.events.display(), "extraction complete");
    Ok(ExitCode::SUCCESS)
}

/// Builds the truth extractor configuration from file config and CLI overrides.
fn truth_config(config: &IceTruthConfig, padding: Option<f64>) -> CliResult<TruthExtractorConfig> {
    let padding_value = padding.unwrap_or(config.truth.padding_value);
    if !padding_value.is_finite() {
        return Err(CliError::new("--padding must be a finite number".to_string()));
    }
    Ok(TruthExtractorConfig {
        name: config.truth.extractor_name()?,
        padding_value,
        borders: config.fiducial.borders()?,
        horizontal_pad: config.truth.horizontal_pad,
        vertical_pad: config.truth.vertical_pad,
        in_ice_stream: config.truth.in_ice_stream.clone(),
    })
}

/// Runs the collection over every frame line and writes one record per frame.
///
/// Blank lines are skipped. Returns the number of frames written.
fn extract_stream<R: BufRead, W: Write>(
    collection: &ExtractorCollection,
    mut reader: R,
    output: &mut W,
    max_frame_bytes: usize,
) -> CliResult<usize> {
    let mut frames = 0;
    let mut line_number: usize = 0;
    let mut buf = Vec::new();
    while read_frame_line(&mut reader, &mut buf, max_frame_bytes)
        .map_err(|err| CliError::new(format!("line {}: {err}", line_number + 1)))?
    {
        line_number += 1;
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let frame: Frame = serde_json::from_slice(&buf)
            .map_err(|err| CliError::new(format!("line {line_number}: invalid frame: {err}")))?;
        let records = collection
            .extract(&frame)
            .map_err(|err| CliError::new(format!("line {line_number}: {err}")))?;
        serde_json::to_writer(&mut *output, &FrameRecord(&records))
            .map_err(|err| CliError::new(format!("line {line_number}: {err}")))?;
        writeln!(output).map_err(|err| CliError::new(output_error(&err)))?;
        frames += 1;
    }
    Ok(frames)
}

/// Reads one newline-terminated line into `buf`, enforcing `max_bytes`.
///
/// Returns `false` at end of input. The line ending (`\n` or `\r\n`) is not
/// kept and does not count toward the limit.
fn read_frame_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_bytes: usize,
) -> std::io::Result<bool> {
    buf.clear();
    let limit = u64::try_from(max_bytes.saturating_add(2)).unwrap_or(u64::MAX);
    let read = reader.by_ref().take(limit).read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    if buf.len() > max_bytes {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("frame exceeds size limit of {max_bytes} bytes"),
        ));
    }
    Ok(true)
}

/// Serializes the collection output for one frame as a single JSON object.
struct FrameRecord<'a>(&'a [NamedFieldMap]);

impl Serialize for FrameRecord<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for record in self.0 {
            map.serialize_entry(record.name.as_str(), &record.fields)?;
        }
        map.end()
    }
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = IceTruthConfig::load(command.config.as_deref())?;
    write_stdout_line("config valid").map_err(|err| CliError::new(output_error(&err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(error: &std::io::Error) -> String {
    format!("failed to write output: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
