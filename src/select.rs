//! Fixture class discovery.
//!
//! A module entry is selected when all of the following hold:
//!
//! 1. its name starts with [`TEST_PREFIX`]
//! 2. it is bound to a class
//! 3. the class derives from the parser test case base
//! 4. the class does not mix in temporary-directory handling
//!
//! Selection is sorted by binding name so repeated runs emit identical output.

use tracing::debug;

use crate::fixture::{FixtureClass, FixtureModule, ModuleEntry};

/// Required prefix of every exported fixture binding.
pub const TEST_PREFIX: &str = "Test";

/// Why an entry was not selected. Only used for debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Prefix,
    NotAClass,
    NotParserTestCase,
    TempDir,
}

/// Decide whether one entry is an exportable fixture class.
pub fn classify(entry: &ModuleEntry) -> Result<&FixtureClass, Exclusion> {
    if !entry.name.starts_with(TEST_PREFIX) {
        return Err(Exclusion::Prefix);
    }
    let class = entry.as_class().ok_or(Exclusion::NotAClass)?;
    if !class.markers.parser_test_case {
        return Err(Exclusion::NotParserTestCase);
    }
    if class.markers.temp_dir {
        return Err(Exclusion::TempDir);
    }
    Ok(class)
}

/// Select the exportable fixture classes of a module, sorted by name.
pub fn select_fixture_classes(module: &FixtureModule) -> Vec<&FixtureClass> {
    let mut selected: Vec<(&str, &FixtureClass)> = module
        .entries()
        .iter()
        .filter_map(|entry| match classify(entry) {
            Ok(class) => Some((entry.name.as_str(), class)),
            Err(reason) => {
                // Prefix misses are the bulk of any module; not worth a line each.
                if reason != Exclusion::Prefix {
                    debug!(entry = %entry.name, ?reason, "excluded from selection");
                }
                None
            }
        })
        .collect();

    selected.sort_by(|a, b| a.0.cmp(b.0));
    selected.into_iter().map(|(_, class)| class).collect()
}
