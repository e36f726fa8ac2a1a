#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(
    SchemaError::Tokenization { line: 12, token: "foo".into() },
    "foo"
)]
#[test_case(
    SchemaError::UnresolvedType { entity: "argument 'x' of chat".into(), name: "Nope".into() },
    "Nope"
)]
#[test_case(
    SchemaError::StructuralViolation { type_name: "User".into(), constructors: 2 },
    "User"
)]
#[test_case(
    SchemaError::MissingConstructor { line: 3, constructor: "ok".into() },
    "ok"
)]
#[test_case(
    SchemaError::MalformedDoc { line: 7, text: "//@class".into() },
    "//@class"
)]
fn SchemaError___display___names_offending_token(error: SchemaError, expected_part: &str) {
    let display = error.to_string();

    assert!(
        display.contains(expected_part),
        "Error message '{}' should contain '{}'",
        display,
        expected_part
    );
}

#[test]
fn SchemaError___tokenization___reports_line() {
    let error = SchemaError::Tokenization {
        line: 42,
        token: "foo".into(),
    };

    assert_eq!(error.line(), Some(42));
    assert_eq!(
        error.to_string(),
        "line 42: cannot split argument token 'foo' into name and type"
    );
}

#[test]
fn SchemaError___model_level_errors___have_no_line() {
    let unresolved = SchemaError::UnresolvedType {
        entity: "function getChat".into(),
        name: "Chatt".into(),
    };
    let structural = SchemaError::StructuralViolation {
        type_name: "Chat".into(),
        constructors: 3,
    };

    assert_eq!(unresolved.line(), None);
    assert_eq!(structural.line(), None);
}
