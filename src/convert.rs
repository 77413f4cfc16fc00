//! Conversion pipeline.
//!
//! Each selected class is extracted and encoded exactly once. A class either
//! converts cleanly or is dropped with a [`SkipReason`]; nothing is retried
//! and no record is partially salvaged.

use tracing::{info, warn};

use crate::error::SkipReason;
use crate::fixture::FixtureClass;
use crate::record::{encode_record, extract_record, ExtractedRecord, FixtureRecord};

/// A selected class that produced no record.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFixture {
    pub name: String,
    pub reason: SkipReason,
    /// The extracted record, when extraction succeeded but encoding did not.
    pub partial: Option<Box<ExtractedRecord>>,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// Number of classes handed to the pipeline.
    pub discovered: usize,
    /// Converted records, in input order.
    pub records: Vec<FixtureRecord>,
    /// Dropped classes, in input order.
    pub skipped: Vec<SkippedFixture>,
}

impl ConversionReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Convert one class.
pub fn convert_class(class: &FixtureClass) -> Result<FixtureRecord, SkippedFixture> {
    let extracted = extract_record(class).map_err(|reason| SkippedFixture {
        name: class.name.clone(),
        reason,
        partial: None,
    })?;

    encode_record(&extracted).map_err(|err| SkippedFixture {
        name: class.name.clone(),
        reason: err.into(),
        partial: Some(Box::new(extracted)),
    })
}

/// Convert every class, logging each skip.
pub fn convert_all<'a, I>(classes: I) -> ConversionReport
where
    I: IntoIterator<Item = &'a FixtureClass>,
{
    let mut report = ConversionReport::default();

    for class in classes {
        report.discovered += 1;
        match convert_class(class) {
            Ok(record) => {
                info!(fixture = %record.name, "JSON");
                report.records.push(record);
            }
            Err(skipped) => {
                match &skipped.partial {
                    Some(partial) => warn!(
                        fixture = %skipped.name,
                        kind = %skipped.reason.kind(),
                        error = %skipped.reason,
                        partial = %partial,
                        "skipping fixture class"
                    ),
                    None => warn!(
                        fixture = %skipped.name,
                        kind = %skipped.reason.kind(),
                        error = %skipped.reason,
                        "skipping fixture class"
                    ),
                }
                report.skipped.push(skipped);
            }
        }
    }

    info!(
        discovered = report.discovered,
        converted = report.records.len(),
        skipped = report.skipped.len(),
        "conversion finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkipKind;
    use crate::fixture::{ResultBag, Signature, SuccessCase};
    use crate::value::FixtureValue;

    fn complete(name: &str) -> FixtureClass {
        FixtureClass::parser_test(name)
            .argument_signatures(vec![Signature::new(["-x"])])
            .failures(["-x"])
            .successes(vec![SuccessCase::new("", ResultBag::new().with("x", FixtureValue::None))])
    }

    fn uncoercible(name: &str) -> FixtureClass {
        complete(name).successes(vec![SuccessCase::new(
            "-xb",
            ResultBag::new().with("x", FixtureValue::object("MyType", "MyType('b')")),
        )])
    }

    #[test]
    fn preserves_input_order() {
        let classes = [complete("TestB"), complete("TestA"), complete("TestC")];
        let report = convert_all(&classes);
        let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["TestB", "TestA", "TestC"]);
        assert!(report.is_complete());
    }

    #[test]
    fn missing_attributes_are_skipped_once() {
        let classes = [complete("TestA"), FixtureClass::parser_test("TestParent")];
        let report = convert_all(&classes);
        assert_eq!(report.discovered, 2);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        let skipped = &report.skipped[0];
        assert_eq!(skipped.name, "TestParent");
        assert_eq!(skipped.reason.kind(), SkipKind::MissingAttribute);
        assert!(skipped.partial.is_none());
    }

    #[test]
    fn uncoercible_value_drops_whole_class() {
        let classes = [uncoercible("TestTypeUserDefined"), complete("TestOk")];
        let report = convert_all(&classes);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].name, "TestOk");
        assert_eq!(report.skipped.len(), 1);
        let skipped = &report.skipped[0];
        assert_eq!(skipped.name, "TestTypeUserDefined");
        assert_eq!(skipped.reason.kind(), SkipKind::UnsupportedValue);
        assert!(skipped.partial.is_some());
        assert!(!report.is_complete());
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = convert_all(std::iter::empty());
        assert_eq!(report, ConversionReport::default());
    }

    #[test]
    fn convert_class_matches_pipeline() {
        let class = complete("TestSingle");
        let record = convert_class(&class).unwrap();
        assert_eq!(convert_all([&class]).records, vec![record]);
    }
}
