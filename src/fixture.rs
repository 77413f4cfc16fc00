//! Fixture class model.
//!
//! A fixture module is an ordered namespace of named entries. Entries that
//! describe parser test scenarios are [`FixtureClass`]es; the others
//! (helper classes, functions, constants) exist only so discovery has
//! something to filter out.
//!
//! Attribute presence is explicit: every data attribute a class may lack is an
//! `Option`, and ancestry is reduced to [`FixtureMarkers`] flags set when the
//! class is defined.

use std::collections::BTreeMap;

use crate::value::FixtureValue;

// ============================================================================
// Signatures and Result Bags
// ============================================================================

/// A recorded call shape: positional args plus named args.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    pub args: Vec<FixtureValue>,
    pub kwargs: BTreeMap<String, FixtureValue>,
}

impl Signature {
    /// Signature with the given positional args and no named args.
    pub fn new<I, V>(args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FixtureValue>,
    {
        Signature {
            args: args.into_iter().map(Into::into).collect(),
            kwargs: BTreeMap::new(),
        }
    }

    /// Add a named argument.
    pub fn kw(mut self, name: impl Into<String>, value: impl Into<FixtureValue>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// `[args, kwargs]`, the flattened form used in records.
    pub fn to_value(&self) -> FixtureValue {
        FixtureValue::List(vec![
            FixtureValue::List(self.args.clone()),
            FixtureValue::Dict(self.kwargs.clone()),
        ])
    }
}

/// Expected parsed namespace for one input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBag {
    attrs: BTreeMap<String, FixtureValue>,
}

impl ResultBag {
    pub fn new() -> Self {
        ResultBag::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FixtureValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn to_value(&self) -> FixtureValue {
        FixtureValue::Dict(self.attrs.clone())
    }
}

/// An input and the namespace it should parse to.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessCase {
    /// Usually a whitespace-split command line; sometimes an explicit list.
    pub input: FixtureValue,
    pub expected: ResultBag,
}

impl SuccessCase {
    pub fn new(input: impl Into<FixtureValue>, expected: ResultBag) -> Self {
        SuccessCase {
            input: input.into(),
            expected,
        }
    }

    /// `[input, bag]`, the flattened form used in records.
    pub fn to_value(&self) -> FixtureValue {
        FixtureValue::List(vec![self.input.clone(), self.expected.to_value()])
    }
}

// ============================================================================
// Fixture Classes
// ============================================================================

/// Capability flags standing in for base-class ancestry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureMarkers {
    /// Derives from the parser test case base.
    pub parser_test_case: bool,
    /// Mixes in temporary-directory handling; such fixtures touch the
    /// filesystem and are never exported.
    pub temp_dir: bool,
}

/// One declared fixture class.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureClass {
    pub name: String,
    pub doc: Option<String>,
    pub markers: FixtureMarkers,
    pub parser_signature: Option<Signature>,
    pub argument_signatures: Option<Vec<Signature>>,
    pub failures: Option<Vec<FixtureValue>>,
    pub successes: Option<Vec<SuccessCase>>,
}

impl FixtureClass {
    /// A class with no markers and no attributes.
    pub fn plain(name: impl Into<String>) -> Self {
        FixtureClass {
            name: name.into(),
            doc: None,
            markers: FixtureMarkers::default(),
            parser_signature: None,
            argument_signatures: None,
            failures: None,
            successes: None,
        }
    }

    /// A class deriving from the parser test case base.
    pub fn parser_test(name: impl Into<String>) -> Self {
        let mut class = FixtureClass::plain(name);
        class.markers.parser_test_case = true;
        class
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn uses_temp_dir(mut self) -> Self {
        self.markers.temp_dir = true;
        self
    }

    pub fn parser_signature(mut self, sig: Signature) -> Self {
        self.parser_signature = Some(sig);
        self
    }

    pub fn argument_signatures(mut self, sigs: Vec<Signature>) -> Self {
        self.argument_signatures = Some(sigs);
        self
    }

    pub fn failures<I, V>(mut self, failures: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FixtureValue>,
    {
        self.failures = Some(failures.into_iter().map(Into::into).collect());
        self
    }

    pub fn successes(mut self, successes: Vec<SuccessCase>) -> Self {
        self.successes = Some(successes);
        self
    }
}

// ============================================================================
// Module Namespace
// ============================================================================

/// What a module entry is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleObject {
    Class(FixtureClass),
    Function,
    Constant(FixtureValue),
}

/// A named binding in a fixture module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleEntry {
    pub name: String,
    pub object: ModuleObject,
}

impl ModuleEntry {
    pub fn as_class(&self) -> Option<&FixtureClass> {
        match &self.object {
            ModuleObject::Class(class) => Some(class),
            _ => None,
        }
    }
}

/// An ordered collection of named entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureModule {
    name: String,
    entries: Vec<ModuleEntry>,
}

impl FixtureModule {
    pub fn new(name: impl Into<String>) -> Self {
        FixtureModule {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    /// Bind a class under its own name.
    pub fn add_class(&mut self, class: FixtureClass) -> &mut Self {
        let name = class.name.clone();
        self.add_entry(name, ModuleObject::Class(class))
    }

    pub fn add_function(&mut self, name: impl Into<String>) -> &mut Self {
        self.add_entry(name, ModuleObject::Function)
    }

    pub fn add_constant(&mut self, name: impl Into<String>, value: FixtureValue) -> &mut Self {
        self.add_entry(name, ModuleObject::Constant(value))
    }

    /// Bind any object under `name`. A later binding of the same name
    /// replaces the earlier one, keeping its position.
    pub fn add_entry(&mut self, name: impl Into<String>, object: ModuleObject) -> &mut Self {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.object = object,
            None => self.entries.push(ModuleEntry { name, object }),
        }
        self
    }

    /// Look up a class by binding name.
    pub fn class(&self, name: &str) -> Option<&FixtureClass> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .and_then(ModuleEntry::as_class)
    }
}
