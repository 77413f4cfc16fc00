//! Error types and exit code constants for the fixture converter.
//!
//! Two layers of errors exist:
//!
//! - [`SkipReason`]: recoverable, per-class. The offending fixture class is
//!   dropped and the run continues.
//! - [`FixtureError`]: fatal for the run (writing output, bad arguments,
//!   strict-mode enforcement). Each variant maps to a stable
//!   [`OutputErrorCode`] that the binary uses as its exit code.
//!
//! ## Exit Codes
//!
//! - `2`: Invalid arguments (bad flag or environment value)
//! - `3`: Unknown fixture class name
//! - `4`: Output could not be written
//! - `5`: Strict mode and at least one class was skipped
//! - `10`: Internal errors (serialization bugs, unexpected state)

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Per-class Skip Reasons
// ============================================================================

/// A value with no JSON form and no coercion rule.
///
/// The message mirrors what a JSON encoder reports for an unknown object,
/// carrying the literal rendering of the value that failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{value} is not JSON serializable")]
pub struct UnsupportedValue {
    /// Literal rendering of the offending value (e.g. `<class 'MyType'>`).
    pub value: String,
}

impl UnsupportedValue {
    pub fn new(value: impl Into<String>) -> Self {
        UnsupportedValue {
            value: value.into(),
        }
    }
}

/// Why a selected fixture class produced no record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    /// The class lacks a required data attribute. Typical for abstract parent
    /// fixtures that pass the structural filters but carry no cases.
    #[error("type object '{class}' has no attribute '{attribute}'")]
    MissingAttribute {
        class: String,
        attribute: &'static str,
    },

    /// Some nested value could not be coerced; the whole record is dropped.
    #[error(transparent)]
    UnsupportedValue(#[from] UnsupportedValue),
}

impl SkipReason {
    /// Stable kind label used in logs and the JSON summary.
    pub fn kind(&self) -> SkipKind {
        match self {
            SkipReason::MissingAttribute { .. } => SkipKind::MissingAttribute,
            SkipReason::UnsupportedValue(_) => SkipKind::UnsupportedValue,
        }
    }
}

/// Discriminant of [`SkipReason`], serialized in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    MissingAttribute,
    UnsupportedValue,
}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipKind::MissingAttribute => f.write_str("MissingAttributeError"),
            SkipKind::UnsupportedValue => f.write_str("UnsupportedValueError"),
        }
    }
}

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad flag, malformed environment value).
    InvalidArguments = 2,
    /// Requested fixture class does not exist in the module.
    UnknownFixture = 3,
    /// Output file could not be written.
    WriteError = 4,
    /// Strict mode was requested and classes were skipped.
    SkippedFixtures = 5,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Run Errors
// ============================================================================

/// Fatal error for a converter run.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Invalid arguments or configuration values.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// No class with the given name exists in the fixture module.
    #[error("unknown fixture class '{name}'")]
    UnknownFixture { name: String },

    /// Writing the output failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization failed after records were validated.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Strict mode: at least one class was dropped.
    #[error("{skipped} of {discovered} fixture classes were skipped")]
    SkippedFixtures { skipped: usize, discovered: usize },
}

impl FixtureError {
    pub fn invalid_args(message: impl Into<String>) -> Self {
        FixtureError::InvalidArguments {
            message: message.into(),
        }
    }
}

impl From<&FixtureError> for OutputErrorCode {
    fn from(err: &FixtureError) -> Self {
        match err {
            FixtureError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            FixtureError::UnknownFixture { .. } => OutputErrorCode::UnknownFixture,
            FixtureError::Io { .. } => OutputErrorCode::WriteError,
            FixtureError::Serialize(_) => OutputErrorCode::InternalError,
            FixtureError::SkippedFixtures { .. } => OutputErrorCode::SkippedFixtures,
        }
    }
}
