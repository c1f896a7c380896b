use pretty_assertions::assert_eq;
use stride_syntax::ScanContext;

use super::recorder::record;

fn unit(source: &str) -> Vec<String> {
    let (events, result) = record(source, ScanContext::TopLevel);
    result.expect("source should scan");
    events
}

#[test]
fn package_imports_and_class_header() {
    assert_eq!(
        unit(
            "package a.b; import java.util.*; import static x.Y.z; \
             class A extends B implements C, D {}"
        ),
        vec![
            "package a . b",
            "wildcard_import java . util false",
            "import x . Y . z true",
            "top_level_decl",
            "decl_begin",
            "type_def class Class",
            "type_def_name A",
            "modifiers_consumed",
            "begin_extends",
            "type_spec B",
            "end_extends",
            "begin_implements",
            "type_spec C",
            "type_spec D",
            "end_implements",
            "begin_type_body {",
            "end_type_body }",
            "type_def_end",
            "finished false",
        ]
    );
}

#[test]
fn imports_only() {
    assert_eq!(
        unit("import a.B;"),
        vec!["import a . B false", "finished true"]
    );
}

#[test]
fn enum_constants_are_skipped() {
    assert_eq!(
        unit("public enum E { X(1), Y { void f() {} }; int v; }"),
        vec![
            "top_level_decl",
            "decl_begin",
            "modifier public",
            "type_def enum Enum",
            "type_def_name E",
            "modifiers_consumed",
            "begin_type_body {",
            "decl_begin",
            "type_spec int",
            "begin_fields",
            "modifiers_consumed",
            "field v false",
            "end_fields",
            "end_type_body }",
            "type_def_end",
            "finished false",
        ]
    );
}

#[test]
fn inner_types_are_announced() {
    assert_eq!(
        unit("class A { static class B {} }"),
        vec![
            "top_level_decl",
            "decl_begin",
            "type_def class Class",
            "type_def_name A",
            "modifiers_consumed",
            "begin_type_body {",
            "decl_begin",
            "modifier static",
            "inner_type class",
            "type_def class Class",
            "type_def_name B",
            "modifiers_consumed",
            "begin_type_body {",
            "end_type_body }",
            "type_def_end",
            "end_type_body }",
            "type_def_end",
            "finished false",
        ]
    );
}

#[test]
fn annotation_type_declaration() {
    assert_eq!(
        unit("@interface Ann {}"),
        vec![
            "top_level_decl",
            "decl_begin",
            "type_def @interface Annotation",
            "type_def_name Ann",
            "modifiers_consumed",
            "begin_type_body {",
            "end_type_body }",
            "type_def_end",
            "finished false",
        ]
    );
}
