use pretty_assertions::assert_eq;
use stride_convert::{CodeElement, ConstructorElement, ElseIf, Expression, ExpressionSlot, IfElement, SlotKind, SuperThis};
use stride_syntax::ScanContext;

use super::support::*;

fn stride_text(java: &str) -> String {
    Expression::new(java).stride().to_owned()
}

#[test]
fn spacing_is_uniform() {
    assert_eq!(stride_text("0"), "0");
    assert_eq!(stride_text("0+1"), "0 + 1");
    assert_eq!(stride_text("0  +  1"), "0 + 1");
    assert_eq!(stride_text("0  >=  1"), "0 >= 1");
    assert_eq!(stride_text("0  > =  1"), "0 > = 1");
    assert_eq!(stride_text("new Foo()"), "new Foo ( )");
    assert_eq!(stride_text("newFoo()"), "newFoo ( )");
    assert_eq!(stride_text("0 << 1"), "0 << 1");
    assert_eq!(stride_text("0|1"), "0 | 1");
    assert_eq!(stride_text("0&1"), "0 & 1");
    assert_eq!(stride_text("0 ||1"), "0 || 1");
    assert_eq!(stride_text("0&& 1"), "0 && 1");
    assert_eq!(stride_text("a::b"), "a :: b");
}

#[test]
fn instanceof_is_rewritten_only_as_a_keyword() {
    assert_eq!(stride_text("instanceof"), "<:");
    assert_eq!(stride_text("a instanceof b"), "a <: b");
    assert_eq!(stride_text("a instanceofb"), "a instanceofb");
    // Typed on the Java side, `<:` is two operators.
    assert_eq!(stride_text("a <: b"), "a < : b");
}

#[test]
fn character_literals_survive_intact() {
    assert_eq!(
        statements(r#"if (c == '\\' || c == '"' || c == '\'') buf.append('\\');"#),
        vec![if_only(
            r#"c == '\\' || c == '"' || c == '\''"#,
            vec![call(r#"buf . append ( '\\' )"#)]
        )]
    );
}

#[test]
fn slots_keep_both_renderings() {
    let both = |kind, stride: &str, java: &str| ExpressionSlot::new(kind, stride, java);
    assert_eq!(
        statements("while (a instanceof b) {}"),
        vec![CodeElement::While {
            condition: both(SlotKind::Filled, "a <: b", "a instanceof b"),
            body: vec![],
        }]
    );
    assert_eq!(
        statements("if (a instanceof b) {} else if (c instanceof d) {}"),
        vec![CodeElement::If(IfElement {
            condition: both(SlotKind::Filled, "a <: b", "a instanceof b"),
            body: vec![],
            else_ifs: vec![ElseIf {
                condition: both(SlotKind::Filled, "c <: d", "c instanceof d"),
                body: vec![],
            }],
            else_body: None,
        })]
    );
    assert_eq!(
        statements("foo(a instanceof b);"),
        vec![CodeElement::Call(both(
            SlotKind::Call,
            "foo ( a <: b )",
            "foo ( a instanceof b )"
        ))]
    );
    assert_eq!(
        statements("return (a instanceof b);"),
        vec![CodeElement::Return(Some(both(
            SlotKind::Optional,
            "( a <: b )",
            "( a instanceof b )"
        )))]
    );
    assert_eq!(
        convert("C() {super(a instanceof b);}", ScanContext::ClassMember).elements(),
        [CodeElement::Constructor(ConstructorElement {
            access: stride_convert::AccessPermission::Protected,
            params: vec![],
            throws: vec![],
            delegate: Some(SuperThis::Super),
            delegate_args: Some(both(SlotKind::SuperThisParams, "a <: b", "a instanceof b")),
            body: vec![],
            doc: None,
        })]
    );
}

#[test]
fn comments_inside_an_expression_are_not_part_of_it() {
    assert_eq!(
        statements("x = a /* first */ + /* second */ b;"),
        vec![comment("first second"), assign("x", "a + b")]
    );
}

#[test]
fn nested_argument_lists_are_transparent() {
    assert_eq!(
        statements("f(g(h(1), 2), (3 + 4) * 5);"),
        vec![call("f ( g ( h ( 1 ) , 2 ) , ( 3 + 4 ) * 5 )")]
    );
}
