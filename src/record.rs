//! Record extraction and encoding.
//!
//! Extraction flattens a [`FixtureClass`] into an [`ExtractedRecord`] of
//! fixture values. Encoding then serializes every value through the coercion
//! fallback, producing a JSON-safe [`FixtureRecord`] or failing as a whole.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{SkipReason, UnsupportedValue};
use crate::fixture::FixtureClass;
use crate::value::{to_json, FixtureValue};

/// Flattened fixture class. Values may still lack a JSON form.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecord {
    pub name: String,
    pub doc: Option<String>,
    /// `[args, kwargs]`
    pub parser_signature: Option<FixtureValue>,
    /// One `[args, kwargs]` per argument, declaration order.
    pub argument_signatures: Vec<FixtureValue>,
    pub failures: Vec<FixtureValue>,
    /// One `[input, bag]` per case, declaration order.
    pub successes: Vec<FixtureValue>,
}

/// JSON-safe fixture record. Field names are the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureRecord {
    pub name: String,
    pub doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser_signature: Option<Value>,
    pub argument_signatures: Vec<Value>,
    pub failures: Vec<Value>,
    pub successes: Vec<Value>,
}

/// Flatten a fixture class.
///
/// Required attributes are checked in the order `argument_signatures`,
/// `failures`, `successes`; the first one absent is reported.
pub fn extract_record(class: &FixtureClass) -> Result<ExtractedRecord, SkipReason> {
    let missing = |attribute| SkipReason::MissingAttribute {
        class: class.name.clone(),
        attribute,
    };

    let argument_signatures = class
        .argument_signatures
        .as_ref()
        .ok_or_else(|| missing("argument_signatures"))?;
    let failures = class.failures.as_ref().ok_or_else(|| missing("failures"))?;
    let successes = class
        .successes
        .as_ref()
        .ok_or_else(|| missing("successes"))?;

    Ok(ExtractedRecord {
        name: class.name.clone(),
        doc: class.doc.clone(),
        parser_signature: class.parser_signature.as_ref().map(|sig| sig.to_value()),
        argument_signatures: argument_signatures.iter().map(|sig| sig.to_value()).collect(),
        failures: failures.clone(),
        successes: successes.iter().map(|case| case.to_value()).collect(),
    })
}

/// Serialize every value of an extracted record.
pub fn encode_record(record: &ExtractedRecord) -> Result<FixtureRecord, UnsupportedValue> {
    Ok(FixtureRecord {
        name: record.name.clone(),
        doc: record.doc.clone(),
        parser_signature: record.parser_signature.as_ref().map(to_json).transpose()?,
        argument_signatures: encode_all(&record.argument_signatures)?,
        failures: encode_all(&record.failures)?,
        successes: encode_all(&record.successes)?,
    })
}

fn encode_all(values: &[FixtureValue]) -> Result<Vec<Value>, UnsupportedValue> {
    values.iter().map(to_json).collect()
}

/// Dict-literal rendering, logged alongside encoding failures.
impl fmt::Display for ExtractedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = FixtureValue::from(self.doc.clone());
        write!(f, "{{'name': '{}', 'doc': {}", self.name, doc)?;
        if let Some(sig) = &self.parser_signature {
            write!(f, ", 'parser_signature': {}", sig)?;
        }
        write!(
            f,
            ", 'argument_signatures': {}, 'failures': {}, 'successes': {}}}",
            FixtureValue::List(self.argument_signatures.clone()),
            FixtureValue::List(self.failures.clone()),
            FixtureValue::List(self.successes.clone()),
        )
    }
}
