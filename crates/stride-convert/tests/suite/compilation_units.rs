use pretty_assertions::assert_eq;
use stride_convert::{
    AccessPermission, ClassElement, CodeElement, ConstructorElement, InterfaceElement,
    MethodElement, MethodProtoElement,
};

use super::support::*;

#[test]
fn empty_class() {
    assert_eq!(
        file("class Foo {}"),
        vec![CodeElement::Class(ClassElement {
            name: "Foo".to_owned(),
            ..ClassElement::default()
        })]
    );
}

#[test]
fn abstract_class_with_a_superclass() {
    assert_eq!(
        file("abstract class A extends B { int x; }"),
        vec![CodeElement::Class(ClassElement {
            is_abstract: true,
            name: "A".to_owned(),
            extends: Some(ty("B")),
            fields: vec![var(Some(AccessPermission::Protected), false, false, "int", "x", None)],
            ..ClassElement::default()
        })]
    );
}

#[test]
fn members_are_sorted_by_kind() {
    assert_eq!(
        file(
            "package p; import java.util.*; /**Mixed order*/class Jumble implements A,B,C { \
             public double method() {return 0.0;}; private int member; protected Jumble() {return;} }"
        ),
        vec![CodeElement::Class(ClassElement {
            is_abstract: false,
            name: "Jumble".to_owned(),
            extends: None,
            implements: types(&["A", "B", "C"]),
            fields: vec![var(Some(AccessPermission::Private), false, false, "int", "member", None)],
            constructors: vec![CodeElement::Constructor(ConstructorElement {
                access: AccessPermission::Protected,
                params: vec![],
                throws: vec![],
                delegate: None,
                delegate_args: None,
                body: vec![ret(None)],
                doc: None,
            })],
            methods: vec![CodeElement::Method(MethodElement {
                access: AccessPermission::Public,
                is_static: false,
                is_final: false,
                return_type: ty("double"),
                name: "method".to_owned(),
                params: vec![],
                throws: vec![],
                body: vec![ret(Some("0.0"))],
                doc: None,
            })],
            doc: Some("Mixed order".to_owned()),
            package: Some("p".to_owned()),
            imports: vec!["java.util.*".to_owned()],
        })]
    );
}

#[test]
fn interface_members_are_public() {
    assert_eq!(
        file("/**Hi*/interface Foo extends A, B { int X = 1; void foo(int a) throws E; }"),
        vec![CodeElement::Interface(InterfaceElement {
            name: "Foo".to_owned(),
            extends: types(&["A", "B"]),
            fields: vec![var(Some(AccessPermission::Public), false, false, "int", "X", Some("1"))],
            methods: vec![CodeElement::MethodProto(MethodProtoElement {
                access: AccessPermission::Public,
                return_type: ty("void"),
                name: "foo".to_owned(),
                params: vec![param("int", "a")],
                throws: types(&["E"]),
                doc: None,
            })],
            doc: Some("Hi".to_owned()),
            package: None,
            imports: vec![],
        })]
    );
}

#[test]
fn the_implicit_import_is_dropped() {
    assert_eq!(
        file("import lang.stride.*; import java.io.File; class Foo {}"),
        vec![CodeElement::Class(ClassElement {
            name: "Foo".to_owned(),
            imports: vec!["java.io.File".to_owned()],
            ..ClassElement::default()
        })]
    );
}

#[test]
fn a_file_without_types_keeps_its_header() {
    assert_eq!(
        file("package a.b; import java.util.List; import lang.stride.*; import static x.Y.*;"),
        vec![
            CodeElement::Package("a.b".to_owned()),
            CodeElement::Import("java.util.List".to_owned()),
            CodeElement::Import("x.Y.*".to_owned()),
        ]
    );
    assert_eq!(file(""), vec![]);
}
