//! JSON output.
//!
//! Two documents are produced:
//!
//! - the record array consumed by the foreign test runner, written with
//!   [`emit_records`] / [`write_records`]
//! - a [`ConvertSummary`] describing the run, printed with [`emit_response`]
//!
//! Record output is deterministic: the same fixture module produces
//! identical bytes.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::convert::ConversionReport;
use crate::error::{FixtureError, OutputErrorCode, SkipKind};
use crate::record::FixtureRecord;

/// Output file used when none is configured.
pub const DEFAULT_OUTPUT: &str = "testpy.json";

// ============================================================================
// Summary Response
// ============================================================================

/// One skipped class in the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkipSummary {
    pub name: String,
    pub kind: SkipKind,
    pub reason: String,
}

/// Result of a `convert` run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertSummary {
    /// "ok" when every class converted, "incomplete" otherwise.
    pub status: String,
    /// Output path, absent when records went to stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub discovered: usize,
    pub converted: usize,
    pub skipped: Vec<SkipSummary>,
}

impl ConvertSummary {
    pub fn from_report(report: &ConversionReport, output: Option<&Path>) -> Self {
        ConvertSummary {
            status: if report.is_complete() { "ok" } else { "incomplete" }.to_string(),
            output: output.map(|p| p.display().to_string()),
            discovered: report.discovered,
            converted: report.records.len(),
            skipped: report
                .skipped
                .iter()
                .map(|s| SkipSummary {
                    name: s.name.clone(),
                    kind: s.reason.kind(),
                    reason: s.reason.to_string(),
                })
                .collect(),
        }
    }
}

/// Error information in a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    /// Numeric error code, equal to the process exit code.
    pub code: u8,
    pub message: String,
}

/// Response printed when a run fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    pub error: ErrorInfo,
}

impl ErrorResponse {
    pub fn from_error(err: &FixtureError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            error: ErrorInfo {
                code: OutputErrorCode::from(err).code(),
                message: err.to_string(),
            },
        }
    }
}

// ============================================================================
// Emitters
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Emit the record array, compact unless `pretty`.
pub fn emit_records(
    records: &[FixtureRecord],
    pretty: bool,
    writer: &mut impl Write,
) -> io::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Write the record array to `path`, replacing any existing file.
pub fn write_records(
    path: &Path,
    records: &[FixtureRecord],
    pretty: bool,
) -> Result<(), FixtureError> {
    let io_err = |source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    };

    info!(path = %path.display(), records = records.len(), "writing");
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    emit_records(records, pretty, &mut writer).map_err(io_err)?;
    writer.flush().map_err(io_err)
}
