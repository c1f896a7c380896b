use pretty_assertions::assert_eq;
use stride_syntax::{ScanContext, ScanError, MAX_NESTING};

use super::recorder::record;

#[test]
fn missing_expression_is_reported_to_the_listener() {
    let (events, result) = record("int x = ;", ScanContext::Statement);
    let err = result.expect_err("scan should fail");
    assert_eq!(
        err,
        ScanError {
            position: 8,
            message: "expected an expression, found `;`".to_owned(),
        }
    );
    assert_eq!(
        err.to_string(),
        "expected an expression, found `;` at offset 8"
    );
    assert_eq!(
        events.last().map(String::as_str),
        Some("parse_failed 8: expected an expression, found `;`")
    );
}

#[test]
fn unterminated_type_body() {
    let (_events, result) = record("class A {", ScanContext::TopLevel);
    let err = result.expect_err("scan should fail");
    assert_eq!(err.position, 9);
    assert_eq!(err.message, "expected `}`, found end of input");
}

#[test]
fn top_level_requires_a_type_declaration() {
    let (_events, result) = record("int x;", ScanContext::TopLevel);
    let err = result.expect_err("scan should fail");
    assert_eq!(err.position, 0);
    assert_eq!(err.message, "expected a type declaration, found `int`");
}

#[test]
fn deeply_nested_parentheses_fail_instead_of_overflowing() {
    let depth = 2000;
    let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let (events, result) = record(&source, ScanContext::Statement);
    let err = result.expect_err("scan should fail");
    assert_eq!(err.message, format!("nesting deeper than {MAX_NESTING} levels, found `(`"));
    assert!(err.position > 4 && err.position < 4 + depth, "position {}", err.position);
    assert!(events.last().is_some_and(|e| e.starts_with("parse_failed")));
}

#[test]
fn deeply_nested_blocks_and_initializers_fail() {
    let depth = MAX_NESTING + 10;
    let blocks = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
    let (_events, result) = record(&blocks, ScanContext::Statement);
    let err = result.expect_err("scan should fail");
    assert!(err.message.starts_with("nesting deeper than"), "{}", err.message);

    let initializer = format!("int[] a = {};", "{".repeat(depth) + &"}".repeat(depth));
    let (_events, result) = record(&initializer, ScanContext::Statement);
    let err = result.expect_err("scan should fail");
    assert!(err.message.starts_with("nesting deeper than"), "{}", err.message);
}

#[test]
fn moderate_nesting_scans() {
    let depth = 64;
    let source = format!(
        "x = {}1{}; {}y = -(int) -z;{}",
        "(".repeat(depth),
        ")".repeat(depth),
        "{".repeat(depth),
        "}".repeat(depth)
    );
    let (_events, result) = record(&source, ScanContext::Statement);
    assert_eq!(result, Ok(()));
}
