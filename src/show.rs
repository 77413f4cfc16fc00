//! Human-readable fixture rendering.
//!
//! Prints a class the way it reads in source: name, doc, one signature per
//! line as `[args], {kwargs}`, the failures list, then one success case per
//! line as `'input', {bag}`. Absent attributes render as `<missing NAME>`.

use std::fmt::Write;

use crate::fixture::{FixtureClass, Signature};
use crate::value::FixtureValue;

/// Render a fixture class for display.
pub fn render_fixture(class: &FixtureClass) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_fixture(&mut out, class);
    out
}

fn write_fixture(out: &mut String, class: &FixtureClass) -> std::fmt::Result {
    writeln!(out, "{}", class.name)?;
    writeln!(out, "{}", FixtureValue::from(class.doc.clone()))?;

    if let Some(sig) = &class.parser_signature {
        writeln!(out, "parser: {}", render_signature(sig))?;
    }

    match &class.argument_signatures {
        Some(sigs) => {
            for sig in sigs {
                writeln!(out, "{}", render_signature(sig))?;
            }
        }
        None => writeln!(out, "<missing argument_signatures>")?,
    }

    match &class.failures {
        Some(failures) => writeln!(out, "{}", FixtureValue::List(failures.clone()))?,
        None => writeln!(out, "<missing failures>")?,
    }

    match &class.successes {
        Some(successes) => {
            for case in successes {
                writeln!(out, "{}, {}", case.input, case.expected.to_value())?;
            }
        }
        None => writeln!(out, "<missing successes>")?,
    }
    Ok(())
}

fn render_signature(sig: &Signature) -> String {
    format!(
        "{}, {}",
        FixtureValue::List(sig.args.clone()),
        FixtureValue::Dict(sig.kwargs.clone())
    )
}
