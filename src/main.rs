//! Binary entry point for the fixtures2json CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Convert the built-in fixture module to testpy.json
//! fixtures2json
//!
//! # Choose the output file, fail if any class was dropped
//! fixtures2json convert --jsonfile fixtures.json --strict
//!
//! # List exportable classes, or inspect one
//! fixtures2json list
//! fixtures2json show TestOptionalsDefault
//! ```
//!
//! Diagnostics go to stderr through `tracing`; JSON responses go to stdout.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use argparse_fixtures::catalog::argparse_module;
use argparse_fixtures::commands::{run_convert, run_list, run_show};
use argparse_fixtures::config::{CliOverrides, ResolvedConfig};
use argparse_fixtures::error::{FixtureError, OutputErrorCode};
use argparse_fixtures::output::{emit_response, ErrorResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Convert argparse parser test fixtures to JSON.
#[derive(Parser, Debug)]
#[command(
    name = "fixtures2json",
    version,
    about = "Convert argparse parser test fixtures to JSON",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    /// Arguments for the implicit `convert` when no subcommand is given.
    #[command(flatten)]
    convert: ConvertArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

/// Global arguments shared by all subcommands.
#[derive(Args, Debug)]
struct GlobalArgs {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Emit log lines as JSON objects.
    #[arg(long, global = true)]
    log_json: bool,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
struct ConvertArgs {
    /// Output file (default: testpy.json).
    #[arg(short = 'j', long = "jsonfile")]
    jsonfile: Option<PathBuf>,

    /// Pretty-print the record array.
    #[arg(long)]
    pretty: bool,

    /// Exit non-zero when any fixture class was skipped.
    #[arg(long)]
    strict: bool,

    /// Write the record array to stdout instead of a file.
    #[arg(long, conflicts_with = "jsonfile")]
    stdout: bool,
}

impl ConvertArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output: self.jsonfile.clone(),
            pretty: self.pretty.then_some(true),
            strict: self.strict.then_some(true),
        }
    }
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Convert selected fixture classes and write the JSON array.
    Convert(ConvertArgs),
    /// List the fixture classes selected for export.
    List,
    /// Print one fixture class in readable form.
    Show {
        /// Class name, e.g. TestOptionalsDefault.
        name: String,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level, cli.global.log_json);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = OutputErrorCode::from(&err);
            let _ = emit_response(&ErrorResponse::from_error(&err), &mut io::stdout());
            let _ = io::stdout().flush();
            ExitCode::from(code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), FixtureError> {
    match cli.command {
        None => execute_convert(&cli.convert),
        Some(Command::Convert(args)) => execute_convert(&args),
        Some(Command::List) => execute_list(),
        Some(Command::Show { name }) => execute_show(&name),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn execute_convert(args: &ConvertArgs) -> Result<(), FixtureError> {
    let config = ResolvedConfig::resolve(&args.overrides())?;
    debug!(
        output = %config.output.value.display(),
        source = ?config.output.source,
        pretty = config.pretty.value,
        strict = config.strict.value,
        "resolved configuration"
    );

    let stdout = io::stdout();
    run_convert(&argparse_module(), &config, args.stdout, &mut stdout.lock()).map(|_| ())
}

fn execute_list() -> Result<(), FixtureError> {
    let stdout = io::stdout();
    run_list(&argparse_module(), &mut stdout.lock())
}

fn execute_show(name: &str) -> Result<(), FixtureError> {
    let stdout = io::stdout();
    run_show(&argparse_module(), name, &mut stdout.lock())
}
