//! Implementations of the `fixtures2json` subcommands.
//!
//! Each command takes the fixture module and a writer for stdout so it can
//! be driven from tests. Stdout carries at most one JSON document per run:
//! the record array (`--stdout`), the [`ConvertSummary`], or nothing so the
//! caller can print an error response.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::info;

use crate::config::ResolvedConfig;
use crate::convert::{convert_all, ConversionReport};
use crate::error::FixtureError;
use crate::fixture::FixtureModule;
use crate::output::{emit_records, emit_response, write_records, ConvertSummary};
use crate::select::select_fixture_classes;
use crate::show::render_fixture;

fn stdout_error(source: io::Error) -> FixtureError {
    FixtureError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    }
}

/// Run the convert command.
///
/// The output file is written even when strict mode then fails the run. In
/// that case no summary is printed; the error carries the counts.
pub fn run_convert(
    module: &FixtureModule,
    config: &ResolvedConfig,
    to_stdout: bool,
    out: &mut impl Write,
) -> Result<ConversionReport, FixtureError> {
    let classes = select_fixture_classes(module);
    info!(module = module.name(), "# of test cases: {}", classes.len());

    let report = convert_all(classes);
    let strict_failure = config.strict.value && !report.is_complete();
    let pretty = config.pretty.value;

    if to_stdout {
        if !strict_failure {
            emit_records(&report.records, pretty, out).map_err(stdout_error)?;
        }
    } else {
        write_records(&config.output.value, &report.records, pretty)?;
    }

    if strict_failure {
        return Err(FixtureError::SkippedFixtures {
            skipped: report.skipped.len(),
            discovered: report.discovered,
        });
    }

    if !to_stdout {
        let summary = ConvertSummary::from_report(&report, Some(config.output.value.as_path()));
        emit_response(&summary, out).map_err(stdout_error)?;
    }
    out.flush().map_err(stdout_error)?;
    Ok(report)
}

/// Run the list command: selected class names, one per line.
pub fn run_list(module: &FixtureModule, out: &mut impl Write) -> Result<(), FixtureError> {
    for class in select_fixture_classes(module) {
        writeln!(out, "{}", class.name).map_err(stdout_error)?;
    }
    out.flush().map_err(stdout_error)
}

/// Run the show command for any class in the module, selected or not.
pub fn run_show(
    module: &FixtureModule,
    name: &str,
    out: &mut impl Write,
) -> Result<(), FixtureError> {
    let class = module
        .class(name)
        .ok_or_else(|| FixtureError::UnknownFixture {
            name: name.to_string(),
        })?;
    write!(out, "{}", render_fixture(class)).map_err(stdout_error)?;
    out.flush().map_err(stdout_error)
}
