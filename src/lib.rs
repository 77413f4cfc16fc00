//! argparse-fixtures: parser test fixtures as JSON
//!
//! Converts argument-parser test fixture classes into a JSON array that a
//! test runner in another ecosystem can replay. The pipeline is:
//!
//! 1. [`select::select_fixture_classes`] picks exportable classes from a
//!    [`fixture::FixtureModule`]
//! 2. [`record::extract_record`] flattens each class
//! 3. [`record::encode_record`] serializes it, coercing values through
//!    [`value::coerce`]
//! 4. [`convert::convert_all`] drives the above and collects skips
//! 5. [`output::write_records`] writes the array
//!
//! [`commands`] wires these into the `fixtures2json` subcommands.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod convert;
pub mod error;
pub mod fixture;
pub mod output;
pub mod record;
pub mod select;
pub mod show;
pub mod value;

pub use convert::{convert_all, ConversionReport, SkippedFixture};
pub use error::{FixtureError, OutputErrorCode, SkipReason};
pub use record::FixtureRecord;
