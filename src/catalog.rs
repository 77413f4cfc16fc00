//! Built-in fixture module.
//!
//! A transcription of the parser test cases from CPython's `test_argparse`,
//! including the bindings that discovery must reject: helper classes, the
//! base itself, help-formatting cases that use a different base, abstract
//! parents with no data, and fixtures that need temporary directories. A few
//! cases carry values without a JSON form (user-defined types and actions,
//! `complex`) and are expected to be dropped during conversion.

use crate::fixture::{FixtureClass, FixtureModule, ResultBag, Signature, SuccessCase};
use crate::value::{FixtureValue, TypeMarker};

const SUPPRESS: &str = "==SUPPRESS==";
const REMAINDER: &str = "...";

fn sig<const N: usize>(args: [&str; N]) -> Signature {
    Signature::new(args)
}

fn no_args() -> Signature {
    Signature::new(Vec::<FixtureValue>::new())
}

fn ns() -> ResultBag {
    ResultBag::new()
}

fn case(input: impl Into<FixtureValue>, expected: ResultBag) -> SuccessCase {
    SuccessCase::new(input, expected)
}

fn strs<const N: usize>(items: [&str; N]) -> FixtureValue {
    FixtureValue::list(items)
}

/// The `test_argparse` module namespace.
pub fn argparse_module() -> FixtureModule {
    let mut module = FixtureModule::new("test_argparse");

    module
        .add_class(FixtureClass::plain("StdIOBuffer"))
        .add_class(FixtureClass::plain("TestCase"))
        .add_class(FixtureClass::plain("TempDirMixin"))
        .add_class(FixtureClass::plain("Sig"))
        .add_class(FixtureClass::plain("NS"))
        .add_class(FixtureClass::plain("ArgumentParserError"))
        .add_class(FixtureClass::parser_test("ParserTestCase").doc(
            "Adds parser tests using the class attributes.\n\n\
             Classes of this type should specify the following attributes:\n\n\
             argument_signatures -- a list of Sig objects which specify\n    \
             the signatures of Argument objects to be created\n\
             failures -- a list of args lists that should cause the parser\n    \
             to fail\n\
             successes -- a list of (initial_args, options, remaining_args) tuples\n    \
             where initial_args specifies the string args to be parsed,\n    \
             options is a dict that should match the vars() of the options\n    \
             parsed out of initial_args, and remaining_args should be any\n    \
             remaining unparsed arguments",
        ))
        .add_class(FixtureClass::plain("OptionalAction"))
        .add_class(FixtureClass::plain("PositionalAction"))
        .add_constant("SUPPRESS", SUPPRESS.into())
        .add_function("test_main");

    for class in optionals() {
        module.add_class(class);
    }
    for class in positionals() {
        module.add_class(class);
    }
    for class in defaults_and_types() {
        module.add_class(class);
    }
    for class in excluded() {
        module.add_class(class);
    }
    module
}

fn optionals() -> Vec<FixtureClass> {
    vec![
        FixtureClass::parser_test("TestOptionalsSingleDash")
            .doc("Test an Optional with a single-dash option string")
            .argument_signatures(vec![sig(["-x"])])
            .failures(["-x", "a", "--foo", "-x --foo", "-x -y"])
            .successes(vec![
                case("", ns().with("x", FixtureValue::None)),
                case("-x a", ns().with("x", "a")),
                case("-xa", ns().with("x", "a")),
                case("-x -1", ns().with("x", "-1")),
                case("-x-1", ns().with("x", "-1")),
            ]),
        FixtureClass::parser_test("TestOptionalsDefault")
            .doc("Tests specifying a default for an Optional")
            .argument_signatures(vec![sig(["-x"]), sig(["-y"]).kw("default", 42)])
            .failures(["a"])
            .successes(vec![
                case("", ns().with("x", FixtureValue::None).with("y", 42)),
                case("-xx", ns().with("x", "x").with("y", 42)),
                case("-yy", ns().with("x", FixtureValue::None).with("y", "y")),
            ]),
        FixtureClass::parser_test("TestOptionLike")
            .doc("Tests options that may or may not be arguments")
            .argument_signatures(vec![
                sig(["-x"]).kw("type", TypeMarker::Float),
                sig(["-3"]).kw("type", TypeMarker::Float).kw("dest", "y"),
                sig(["z"]).kw("nargs", "*"),
            ])
            .failures([
                "-x", "-y2.5", "-xa", "-x -a", "-x -3", "-x -3.5", "-3 -3.5", "-x -2.5",
                "-x -2.5 a", "-3 -.5", "a x -1", "-x -1 a", "-3 -1 a",
            ])
            .successes(vec![
                case(
                    "",
                    ns().with("x", FixtureValue::None)
                        .with("y", FixtureValue::None)
                        .with("z", strs([])),
                ),
                case(
                    "-x 2.5",
                    ns().with("x", 2.5).with("y", FixtureValue::None).with("z", strs([])),
                ),
                case(
                    "-x 2.5 a",
                    ns().with("x", 2.5).with("y", FixtureValue::None).with("z", strs(["a"])),
                ),
                case(
                    "-3.5",
                    ns().with("x", FixtureValue::None).with("y", 0.5).with("z", strs([])),
                ),
                case(
                    "-3-.5",
                    ns().with("x", FixtureValue::None).with("y", -0.5).with("z", strs([])),
                ),
                case(
                    "a -x 1",
                    ns().with("x", 1.0).with("y", FixtureValue::None).with("z", strs(["a"])),
                ),
                case(
                    "-3 1 a",
                    ns().with("x", FixtureValue::None).with("y", 1.0).with("z", strs(["a"])),
                ),
            ]),
        FixtureClass::parser_test("TestOptionalsActionAppendConstWithDefault")
            .doc("Tests the append_const action for an Optional")
            .argument_signatures(vec![
                sig(["-b"])
                    .kw("action", "append_const")
                    .kw("const", TypeMarker::Exception)
                    .kw("default", strs(["X"])),
                sig(["-c"]).kw("action", "append").kw("dest", "b"),
            ])
            .failures(["a", "-c", "a -c", "-bx", "-b x"])
            .successes(vec![
                case("", ns().with("b", strs(["X"]))),
                case(
                    "-b",
                    ns().with(
                        "b",
                        FixtureValue::List(vec!["X".into(), TypeMarker::Exception.into()]),
                    ),
                ),
                case(
                    "-b -cx -b -cyz",
                    ns().with(
                        "b",
                        FixtureValue::List(vec![
                            "X".into(),
                            TypeMarker::Exception.into(),
                            "x".into(),
                            TypeMarker::Exception.into(),
                            "yz".into(),
                        ]),
                    ),
                ),
            ]),
        FixtureClass::parser_test("TestOptionalsAlternatePrefixCharsAddedHelp")
            .doc(
                "When ``-`` not in prefix_chars, default operators created for help\n    \
                 should use the prefix_chars in use rather than - or --\n    \
                 http://bugs.python.org/issue9444",
            )
            .parser_signature(no_args().kw("prefix_chars", "+:/").kw("add_help", true))
            .argument_signatures(vec![
                sig(["+f"]).kw("action", "store_true"),
                sig(["::bar"]),
                sig(["/baz"]).kw("action", "store_const").kw("const", 42),
            ])
            .failures(["--bar", "-fbar", "-b B", "B", "-f", "--bar B", "-baz"])
            .successes(vec![
                case(
                    "",
                    ns().with("f", false)
                        .with("bar", FixtureValue::None)
                        .with("baz", FixtureValue::None),
                ),
                case(
                    "+f",
                    ns().with("f", true)
                        .with("bar", FixtureValue::None)
                        .with("baz", FixtureValue::None),
                ),
                case(
                    "::ba B",
                    ns().with("f", false).with("bar", "B").with("baz", FixtureValue::None),
                ),
                case(
                    "+f ::bar B",
                    ns().with("f", true).with("bar", "B").with("baz", FixtureValue::None),
                ),
                case(
                    "+f /b",
                    ns().with("f", true).with("bar", FixtureValue::None).with("baz", 42),
                ),
                case(
                    "/ba +f",
                    ns().with("f", true).with("bar", FixtureValue::None).with("baz", 42),
                ),
            ]),
    ]
}

fn positionals() -> Vec<FixtureClass> {
    vec![
        FixtureClass::parser_test("TestPositionalsNargsOptional")
            .doc("Tests an Optional Positional")
            .argument_signatures(vec![sig(["foo"]).kw("nargs", "?")])
            .failures(["-x", "a b"])
            .successes(vec![
                case("", ns().with("foo", FixtureValue::None)),
                case("a", ns().with("foo", "a")),
            ]),
        FixtureClass::parser_test("TestPositionalsChoicesString")
            .doc("Test a set of single-character choices")
            .argument_signatures(vec![sig(["spam"]).kw(
                "choices",
                FixtureValue::set(["a", "b", "c", "d", "e", "f", "g"]),
            )])
            .failures(["", "--foo", "h", "42", "ef"])
            .successes(vec![
                case("a", ns().with("spam", "a")),
                case("g", ns().with("spam", "g")),
            ]),
        FixtureClass::parser_test("TestPositionalsChoicesInt")
            .doc("Test a set of integer choices")
            .argument_signatures(vec![sig(["spam"])
                .kw("type", TypeMarker::Int)
                .kw("choices", FixtureValue::list(0..20))])
            .failures(["", "--foo", "h", "42", "ef"])
            .successes(vec![
                case("4", ns().with("spam", 4)),
                case("15", ns().with("spam", 15)),
            ]),
        FixtureClass::parser_test("TestNargsRemainder")
            .doc("Tests specifying a positional with nargs=REMAINDER")
            .argument_signatures(vec![
                sig(["x"]),
                sig(["y"]).kw("nargs", REMAINDER),
                sig(["-z"]),
            ])
            .failures(["", "-z", "-z Z"])
            .successes(vec![
                case(
                    "X",
                    ns().with("x", "X").with("y", strs([])).with("z", FixtureValue::None),
                ),
                case("-z Z X", ns().with("x", "X").with("y", strs([])).with("z", "Z")),
                case(
                    "X A B -z Z",
                    ns().with("x", "X")
                        .with("y", strs(["A", "B", "-z", "Z"]))
                        .with("z", FixtureValue::None),
                ),
                case(
                    "X Y --foo",
                    ns().with("x", "X")
                        .with("y", strs(["Y", "--foo"]))
                        .with("z", FixtureValue::None),
                ),
            ]),
        FixtureClass::parser_test("TestEmptyAndSpaceContainingArguments")
            .argument_signatures(vec![
                sig(["x"]).kw("nargs", "?"),
                sig(["-y", "--yyy"]).kw("dest", "y"),
            ])
            .failures(["-y"])
            .successes(vec![
                case(strs([""]), ns().with("x", "").with("y", FixtureValue::None)),
                case(
                    strs(["a badger"]),
                    ns().with("x", "a badger").with("y", FixtureValue::None),
                ),
                case(
                    strs(["-a badger"]),
                    ns().with("x", "-a badger").with("y", FixtureValue::None),
                ),
                case(strs(["-y", ""]), ns().with("x", FixtureValue::None).with("y", "")),
                case(
                    strs(["-y", "a badger"]),
                    ns().with("x", FixtureValue::None).with("y", "a badger"),
                ),
                case(
                    strs(["--yyy=a badger"]),
                    ns().with("x", FixtureValue::None).with("y", "a badger"),
                ),
            ]),
    ]
}

fn defaults_and_types() -> Vec<FixtureClass> {
    vec![
        FixtureClass::parser_test("TestDefaultSuppress")
            .doc("Test actions with suppressed defaults")
            .argument_signatures(vec![
                sig(["foo"]).kw("nargs", "?").kw("default", SUPPRESS),
                sig(["bar"]).kw("nargs", "*").kw("default", SUPPRESS),
                sig(["--baz"]).kw("action", "store_true").kw("default", SUPPRESS),
            ])
            .failures(["-x"])
            .successes(vec![
                case("", ns()),
                case("a", ns().with("foo", "a")),
                case("a b", ns().with("foo", "a").with("bar", strs(["b"]))),
                case("--baz", ns().with("baz", true)),
                case("a --baz", ns().with("foo", "a").with("baz", true)),
                case(
                    "--baz a b",
                    ns().with("foo", "a").with("bar", strs(["b"])).with("baz", true),
                ),
            ]),
        FixtureClass::parser_test("TestParserDefault42")
            .doc("Test actions with a parser-level default of 42")
            .parser_signature(no_args().kw("argument_default", 42).kw("version", "1.0"))
            .argument_signatures(vec![
                sig(["foo"]).kw("nargs", "?"),
                sig(["bar"]).kw("nargs", "*"),
                sig(["--baz"]).kw("action", "store_true"),
            ])
            .failures(["-x"])
            .successes(vec![
                case("", ns().with("foo", 42).with("bar", 42).with("baz", 42)),
                case("a", ns().with("foo", "a").with("bar", 42).with("baz", 42)),
                case(
                    "a b",
                    ns().with("foo", "a").with("bar", strs(["b"])).with("baz", 42),
                ),
                case("--baz", ns().with("foo", 42).with("bar", 42).with("baz", true)),
                case(
                    "--baz a b",
                    ns().with("foo", "a").with("bar", strs(["b"])).with("baz", true),
                ),
            ]),
        FixtureClass::parser_test("TestTypeUserDefined")
            .doc("Test a user-defined option/argument type")
            .argument_signatures(vec![
                sig(["-x"]).kw("type", FixtureValue::type_named("MyType")),
                sig(["spam"]).kw("type", FixtureValue::type_named("MyType")),
            ])
            .failures(Vec::<FixtureValue>::new())
            .successes(vec![
                case(
                    "a",
                    ns().with("x", FixtureValue::None)
                        .with("spam", FixtureValue::object("MyType", "MyType('a')")),
                ),
                case(
                    "-xf g",
                    ns().with("x", FixtureValue::object("MyType", "MyType('f')"))
                        .with("spam", FixtureValue::object("MyType", "MyType('g')")),
                ),
            ]),
        FixtureClass::parser_test("TestTypeCallable")
            .doc("Test some callables as option/argument types")
            .argument_signatures(vec![
                sig(["--eggs"]).kw("type", FixtureValue::type_named("complex")),
                sig(["spam"]).kw("type", TypeMarker::Float),
            ])
            .failures(["a", "42j", "--eggs a", "--eggs 2i"])
            .successes(vec![
                case(
                    "--eggs=42 42",
                    ns().with("eggs", FixtureValue::complex(42.0, 0.0)).with("spam", 42.0),
                ),
                case(
                    "--eggs 2j -- -1.5",
                    ns().with("eggs", FixtureValue::complex(0.0, 2.0)).with("spam", -1.5),
                ),
                case(
                    "1024.675",
                    ns().with("eggs", FixtureValue::None).with("spam", 1024.675),
                ),
            ]),
        FixtureClass::parser_test("TestActionUserDefined")
            .doc("Test a user-defined option/argument action")
            .argument_signatures(vec![
                sig(["-s"])
                    .kw("dest", "spam")
                    .kw("action", FixtureValue::type_named("test_argparse.OptionalAction"))
                    .kw("type", TypeMarker::Float)
                    .kw("default", 0.25),
                sig(["badger"])
                    .kw("action", FixtureValue::type_named("test_argparse.PositionalAction"))
                    .kw("type", TypeMarker::Int)
                    .kw("nargs", "?")
                    .kw("default", 2),
            ])
            .failures(Vec::<FixtureValue>::new())
            .successes(vec![
                case("-s0.125", ns().with("spam", 0.125).with("badger", 2)),
                case("42", ns().with("spam", 0.25).with("badger", 42)),
            ]),
        FixtureClass::parser_test("TestParentParsers"),
    ]
}

fn excluded() -> Vec<FixtureClass> {
    vec![
        FixtureClass::parser_test("TestFileTypeR")
            .doc("Test the FileType option/argument type for reading files")
            .uses_temp_dir()
            .argument_signatures(vec![
                sig(["-x"]).kw("type", FixtureValue::object("FileType", "FileType('r')")),
                sig(["spam"]).kw("type", FixtureValue::object("FileType", "FileType('r')")),
            ])
            .failures(["-x", "", "non-existent-file.txt"])
            .successes(vec![case(
                "foo",
                ns().with("x", FixtureValue::None)
                    .with("spam", FixtureValue::object("RFile", "RFile('foo')")),
            )]),
        FixtureClass::parser_test("TestArgumentsFromFile")
            .doc("Test reading arguments from a file")
            .uses_temp_dir()
            .parser_signature(no_args().kw("fromfile_prefix_chars", "@"))
            .argument_signatures(vec![sig(["-a"]), sig(["x"]), sig(["y"]).kw("nargs", "+")])
            .failures(["", "-b", "X", "@invalid", "@missing"])
            .successes(vec![case(
                "X Y",
                ns().with("a", FixtureValue::None).with("x", "X").with("y", strs(["Y"])),
            )]),
        FixtureClass::plain("TestHelpBiggerOptionals")
            .doc("Make sure that argument help aligns when options are longer"),
        FixtureClass::plain("TestNamespaceContainsSimple"),
    ]
}
