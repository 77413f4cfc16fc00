//! Fixture values and JSON coercion.
//!
//! Fixture attributes hold [`FixtureValue`]s: a closed tagged representation of
//! the literals found in parser test fixtures. Most kinds map directly onto
//! JSON. The rest are wrapped in [`SpecialValue`] and go through [`coerce`],
//! an ordered list of rules applied as a fallback while serializing.
//!
//! ## Coercion Rules
//!
//! Checked in order:
//!
//! 1. type `int` becomes `"int"`
//! 2. type `float` becomes `"float"`
//! 3. type `object` becomes `"object"`
//! 4. a set becomes a list of its elements (declared order)
//! 5. type `Exception`, or any exception class, becomes `"Exception"`
//! 6. an exception instance becomes `"Exception"`
//!
//! Everything else (other type objects, complex numbers, callables, arbitrary
//! objects) is rejected with [`UnsupportedValue`].

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Number, Value};

use crate::error::UnsupportedValue;

// ============================================================================
// Value Types
// ============================================================================

/// A built-in or user-defined type used as a value (e.g. `type=int`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMarker {
    Int,
    Float,
    Object,
    /// The base `Exception` class itself.
    Exception,
    /// Any other type object, by qualified name (`str`, `complex`,
    /// `test_argparse.OptionalAction`).
    Named(String),
}

/// Values with no direct JSON form.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecialValue {
    Type(TypeMarker),
    /// Unordered collection literal. Elements keep their declared order.
    Set(Vec<FixtureValue>),
    /// An exception subclass such as `ValueError`.
    ExceptionClass(String),
    ExceptionInstance {
        class: String,
        message: String,
    },
    Complex {
        re: f64,
        im: f64,
    },
    /// A function or lambda, by name.
    Callable(String),
    /// An instance of a fixture-local class (e.g. `MyType('a')`).
    Object {
        class: String,
        repr: String,
    },
}

/// A literal held by a fixture attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<FixtureValue>),
    /// Serialized like a list.
    Tuple(Vec<FixtureValue>),
    /// String-keyed mapping; keys are kept sorted for reproducible output.
    Dict(BTreeMap<String, FixtureValue>),
    Special(SpecialValue),
}

impl FixtureValue {
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FixtureValue>,
    {
        FixtureValue::List(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FixtureValue>,
    {
        FixtureValue::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FixtureValue>,
    {
        FixtureValue::Special(SpecialValue::Set(
            items.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn dict<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FixtureValue>,
    {
        FixtureValue::Dict(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn type_named(name: impl Into<String>) -> Self {
        FixtureValue::Special(SpecialValue::Type(TypeMarker::Named(name.into())))
    }

    pub fn exception_class(name: impl Into<String>) -> Self {
        FixtureValue::Special(SpecialValue::ExceptionClass(name.into()))
    }

    pub fn exception(class: impl Into<String>, message: impl Into<String>) -> Self {
        FixtureValue::Special(SpecialValue::ExceptionInstance {
            class: class.into(),
            message: message.into(),
        })
    }

    pub fn complex(re: f64, im: f64) -> Self {
        FixtureValue::Special(SpecialValue::Complex { re, im })
    }

    pub fn callable(name: impl Into<String>) -> Self {
        FixtureValue::Special(SpecialValue::Callable(name.into()))
    }

    pub fn object(class: impl Into<String>, repr: impl Into<String>) -> Self {
        FixtureValue::Special(SpecialValue::Object {
            class: class.into(),
            repr: repr.into(),
        })
    }
}

impl From<&str> for FixtureValue {
    fn from(s: &str) -> Self {
        FixtureValue::Str(s.to_string())
    }
}

impl From<String> for FixtureValue {
    fn from(s: String) -> Self {
        FixtureValue::Str(s)
    }
}

impl From<bool> for FixtureValue {
    fn from(b: bool) -> Self {
        FixtureValue::Bool(b)
    }
}

impl From<i64> for FixtureValue {
    fn from(n: i64) -> Self {
        FixtureValue::Int(n)
    }
}

impl From<i32> for FixtureValue {
    fn from(n: i32) -> Self {
        FixtureValue::Int(i64::from(n))
    }
}

impl From<f64> for FixtureValue {
    fn from(x: f64) -> Self {
        FixtureValue::Float(x)
    }
}

impl From<Vec<FixtureValue>> for FixtureValue {
    fn from(items: Vec<FixtureValue>) -> Self {
        FixtureValue::List(items)
    }
}

impl From<TypeMarker> for FixtureValue {
    fn from(marker: TypeMarker) -> Self {
        FixtureValue::Special(SpecialValue::Type(marker))
    }
}

impl From<SpecialValue> for FixtureValue {
    fn from(special: SpecialValue) -> Self {
        FixtureValue::Special(special)
    }
}

impl<T: Into<FixtureValue>> From<Option<T>> for FixtureValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FixtureValue::None, Into::into)
    }
}

// ============================================================================
// Coercion
// ============================================================================

/// Map a special value onto a JSON-representable fixture value.
///
/// The result may itself contain special values (set elements); callers
/// serialize it with [`to_json`], which applies coercion recursively.
pub fn coerce(special: &SpecialValue) -> Result<FixtureValue, UnsupportedValue> {
    match special {
        SpecialValue::Type(TypeMarker::Int) => Ok("int".into()),
        SpecialValue::Type(TypeMarker::Float) => Ok("float".into()),
        SpecialValue::Type(TypeMarker::Object) => Ok("object".into()),
        SpecialValue::Set(items) => Ok(FixtureValue::List(items.clone())),
        SpecialValue::Type(TypeMarker::Exception) | SpecialValue::ExceptionClass(_) => {
            Ok("Exception".into())
        }
        SpecialValue::ExceptionInstance { .. } => Ok("Exception".into()),
        SpecialValue::Type(TypeMarker::Named(_))
        | SpecialValue::Complex { .. }
        | SpecialValue::Callable(_)
        | SpecialValue::Object { .. } => Err(UnsupportedValue::new(special.to_string())),
    }
}

/// Serialize a fixture value, falling back to [`coerce`] for special values.
///
/// Fails on the first value, at any depth, that has no coercion rule.
/// Non-finite floats are rejected because JSON has no literal for them.
pub fn to_json(value: &FixtureValue) -> Result<Value, UnsupportedValue> {
    match value {
        FixtureValue::None => Ok(Value::Null),
        FixtureValue::Bool(b) => Ok(Value::Bool(*b)),
        FixtureValue::Int(n) => Ok(Value::from(*n)),
        FixtureValue::Float(x) => Number::from_f64(*x)
            .map(Value::Number)
            .ok_or_else(|| UnsupportedValue::new(value.to_string())),
        FixtureValue::Str(s) => Ok(Value::String(s.clone())),
        FixtureValue::List(items) | FixtureValue::Tuple(items) => items
            .iter()
            .map(to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        FixtureValue::Dict(map) => {
            let mut out = Map::new();
            for (key, item) in map {
                out.insert(key.clone(), to_json(item)?);
            }
            Ok(Value::Object(out))
        }
        FixtureValue::Special(special) => to_json(&coerce(special)?),
    }
}

// ============================================================================
// Literal Rendering
// ============================================================================

/// Renders values the way they are written in the fixture source, for
/// diagnostics and `show` output.
impl fmt::Display for FixtureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureValue::None => f.write_str("None"),
            FixtureValue::Bool(true) => f.write_str("True"),
            FixtureValue::Bool(false) => f.write_str("False"),
            FixtureValue::Int(n) => write!(f, "{}", n),
            FixtureValue::Float(x) => write_float(f, *x),
            FixtureValue::Str(s) => write_str_literal(f, s),
            FixtureValue::List(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            FixtureValue::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            FixtureValue::Dict(map) => write_dict(f, map),
            FixtureValue::Special(special) => write!(f, "{}", special),
        }
    }
}

impl fmt::Display for TypeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMarker::Int => f.write_str("<type 'int'>"),
            TypeMarker::Float => f.write_str("<type 'float'>"),
            TypeMarker::Object => f.write_str("<type 'object'>"),
            TypeMarker::Exception => f.write_str("<type 'exceptions.Exception'>"),
            TypeMarker::Named(name) => write!(f, "<class '{}'>", name),
        }
    }
}

impl fmt::Display for SpecialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialValue::Type(marker) => write!(f, "{}", marker),
            SpecialValue::Set(items) => {
                f.write_str("set([")?;
                write_items(f, items)?;
                f.write_str("])")
            }
            SpecialValue::ExceptionClass(name) => write!(f, "<class '{}'>", name),
            SpecialValue::ExceptionInstance { class, message } => {
                write!(f, "{}(", class)?;
                write_str_literal(f, message)?;
                f.write_str(",)")
            }
            SpecialValue::Complex { re, im } => {
                if *re == 0.0 {
                    write!(f, "{}j", im)
                } else {
                    let sign = if *im < 0.0 { '-' } else { '+' };
                    write!(f, "({}{}{}j)", re, sign, im.abs())
                }
            }
            SpecialValue::Callable(name) => write!(f, "<function {}>", name),
            SpecialValue::Object { repr, .. } => f.write_str(repr),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("nan")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "inf" } else { "-inf" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

fn write_str_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            _ => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[FixtureValue]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

pub(crate) fn write_dict(
    f: &mut fmt::Formatter<'_>,
    map: &BTreeMap<String, FixtureValue>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, item)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_str_literal(f, key)?;
        write!(f, ": {}", item)?;
    }
    f.write_str("}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod coercion {
        use super::*;

        #[test]
        fn builtin_types_become_names() {
            assert_eq!(
                coerce(&SpecialValue::Type(TypeMarker::Int)).unwrap(),
                FixtureValue::from("int")
            );
            assert_eq!(
                coerce(&SpecialValue::Type(TypeMarker::Float)).unwrap(),
                FixtureValue::from("float")
            );
            assert_eq!(
                coerce(&SpecialValue::Type(TypeMarker::Object)).unwrap(),
                FixtureValue::from("object")
            );
        }

        #[test]
        fn exceptions_become_exception() {
            let cases = [
                SpecialValue::Type(TypeMarker::Exception),
                SpecialValue::ExceptionClass("ValueError".to_string()),
                SpecialValue::ExceptionInstance {
                    class: "ArgumentError".to_string(),
                    message: "bad".to_string(),
                },
            ];
            for case in &cases {
                assert_eq!(coerce(case).unwrap(), FixtureValue::from("Exception"));
            }
        }

        #[test]
        fn set_becomes_list_in_declared_order() {
            let set = FixtureValue::set(["c", "a", "b"]);
            assert_eq!(to_json(&set).unwrap(), json!(["c", "a", "b"]));
        }

        #[test]
        fn set_elements_are_coerced() {
            let set = FixtureValue::set(vec![
                FixtureValue::from(TypeMarker::Int),
                FixtureValue::exception_class("KeyError"),
            ]);
            assert_eq!(to_json(&set).unwrap(), json!(["int", "Exception"]));
        }

        #[test]
        fn unknown_kinds_are_rejected() {
            let rejected = [
                FixtureValue::type_named("str"),
                FixtureValue::type_named("test_argparse.OptionalAction"),
                FixtureValue::complex(0.0, 2.0),
                FixtureValue::callable("<lambda>"),
                FixtureValue::object("MyType", "MyType('a')"),
            ];
            for value in &rejected {
                assert!(to_json(value).is_err(), "{} should be rejected", value);
            }
        }

        #[test]
        fn rejection_carries_literal() {
            let err = to_json(&FixtureValue::type_named("MyType")).unwrap_err();
            assert_eq!(err.to_string(), "<class 'MyType'> is not JSON serializable");
        }

        #[test]
        fn coerced_strings_are_unchanged() {
            let value = FixtureValue::from("int");
            assert_eq!(to_json(&value).unwrap(), json!("int"));
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn nested_special_values_are_reached() {
            let value = FixtureValue::dict([(
                "b",
                FixtureValue::List(vec![
                    "X".into(),
                    FixtureValue::from(TypeMarker::Exception),
                ]),
            )]);
            assert_eq!(to_json(&value).unwrap(), json!({"b": ["X", "Exception"]}));
        }

        #[test]
        fn one_bad_nested_value_fails_the_whole_value() {
            let value = FixtureValue::List(vec![
                "ok".into(),
                FixtureValue::dict([("spam", FixtureValue::object("MyType", "MyType('a')"))]),
            ]);
            let err = to_json(&value).unwrap_err();
            assert_eq!(err.value, "MyType('a')");
        }

        #[test]
        fn tuples_serialize_as_arrays() {
            let value = FixtureValue::tuple(["-y", "--yyy"]);
            assert_eq!(to_json(&value).unwrap(), json!(["-y", "--yyy"]));
        }

        #[test]
        fn dict_keys_are_sorted() {
            let value = FixtureValue::dict([("y", 1), ("x", 2)]);
            let text = serde_json::to_string(&to_json(&value).unwrap()).unwrap();
            assert_eq!(text, r#"{"x":2,"y":1}"#);
        }

        #[test]
        fn non_finite_floats_are_rejected() {
            assert!(to_json(&FixtureValue::Float(f64::NAN)).is_err());
            assert!(to_json(&FixtureValue::Float(f64::INFINITY)).is_err());
            assert_eq!(to_json(&FixtureValue::Float(0.5)).unwrap(), json!(0.5));
        }

        #[test]
        fn option_maps_to_null() {
            let value: FixtureValue = Option::<&str>::None.into();
            assert_eq!(to_json(&value).unwrap(), Value::Null);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn scalars() {
            assert_eq!(FixtureValue::None.to_string(), "None");
            assert_eq!(FixtureValue::Bool(true).to_string(), "True");
            assert_eq!(FixtureValue::Int(42).to_string(), "42");
            assert_eq!(FixtureValue::Float(1.0).to_string(), "1.0");
            assert_eq!(FixtureValue::Float(2.5).to_string(), "2.5");
            assert_eq!(FixtureValue::from("it's").to_string(), r"'it\'s'");
        }

        #[test]
        fn containers() {
            assert_eq!(FixtureValue::tuple(["-x"]).to_string(), "('-x',)");
            assert_eq!(FixtureValue::list(["a", "b"]).to_string(), "['a', 'b']");
            assert_eq!(
                FixtureValue::dict([("x", FixtureValue::None)]).to_string(),
                "{'x': None}"
            );
            assert_eq!(FixtureValue::set(["a"]).to_string(), "set(['a'])");
        }

        #[test]
        fn specials() {
            assert_eq!(FixtureValue::from(TypeMarker::Int).to_string(), "<type 'int'>");
            assert_eq!(FixtureValue::complex(0.0, 2.0).to_string(), "2j");
            assert_eq!(FixtureValue::complex(1.0, -2.0).to_string(), "(1-2j)");
            assert_eq!(
                FixtureValue::exception("ValueError", "bad").to_string(),
                "ValueError('bad',)"
            );
        }
    }
}
