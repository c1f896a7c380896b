use pretty_assertions::assert_eq;
use stride_convert::{convert_java, render_java, CodeElement, Conversion, ConvertOptions};
use stride_syntax::ScanContext;

use super::support::*;

const STATEMENTS: &str = r#"
int total = 0;
// Sum the first ten.
for (int i = 0; i < 10; i++) total += i;
if (total > 5) { print(total); } else if (total < 0) { return; } else { total = 0; }
try { risky(); } catch (IOException e) { log(e); } finally { done(); }
switch (total) { case 1: f(); break; default: g(); }
for (String s : names) { if (s instanceof Object) break; }
throw new IllegalStateException("done");
"#;

const CLASS: &str = r#"
package demo.shapes;

import java.util.List;
import java.io.*;

/**
 * A shape.
 *
 * Second paragraph.
 */
abstract class Shape extends Base implements Comparable, Cloneable {
    private static final int SIDES = 4;
    int[] points;

    /** Makes one. */
    public Shape(int a, String b) throws IOException {
        super(a, b);
        points = null;
    }

    protected abstract double area();

    public static String describe(List<String> parts) {
        return parts.get(0);
    }
}
"#;

fn round_trip(source: &str, context: ScanContext) -> (Vec<CodeElement>, Vec<CodeElement>) {
    let first = statements_in(source, context);
    let rendered = render_java(&first);
    let second = statements_in(&rendered, context);
    (first, second)
}

fn statements_in(source: &str, context: ScanContext) -> Vec<CodeElement> {
    let (elements, warnings) = convert(source, context).into_parts();
    assert!(warnings.is_empty(), "unexpected warnings {warnings:?} for:\n{source}");
    elements
}

#[test]
fn rendered_statements_convert_to_the_same_tree() {
    let (first, second) = round_trip(STATEMENTS, ScanContext::Statement);
    assert_eq!(first, second);
}

#[test]
fn rendered_class_converts_to_the_same_tree() {
    let (first, second) = round_trip(CLASS, ScanContext::TopLevel);
    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[test]
fn rendering_is_stable() {
    let elements = statements_in(STATEMENTS, ScanContext::Statement);
    let once = render_java(&elements);
    let twice = render_java(&statements_in(&once, ScanContext::Statement));
    assert_eq!(once, twice);
}

#[test]
fn lookahead_does_not_move_comments() {
    let source = "//Declares x\nint x /* empty */;int y;\n\
                  while(true) {break; }/*After-comment*/\n\
                  int z = /*6*/7;\nint w = 7/*8*/;\n\
                  while (true /* false */);\n\
                  return 0; /*XXX*/ while(true) {/*Just-comment*/}";
    let baseline = with_lookahead(source, ScanContext::Statement, 1);
    assert_eq!(baseline.elements()[0], comment("Declares x empty"));
    assert_eq!(with_lookahead(source, ScanContext::Statement, 3), baseline);
    assert_eq!(with_lookahead(source, ScanContext::Statement, 8), baseline);
}

#[test]
fn lookahead_does_not_turn_body_comments_into_method_docs() {
    let source = "void foo() { /** inner */ int x; }";
    let baseline = with_lookahead(source, ScanContext::ClassMember, 1);
    let [CodeElement::Method(method)] = baseline.elements() else {
        panic!("expected one method, got {:?}", baseline.elements());
    };
    assert_eq!(method.doc, None);
    assert_eq!(method.body[0], comment("inner"));
    assert_eq!(with_lookahead(source, ScanContext::ClassMember, 3), baseline);
    assert_eq!(with_lookahead(source, ScanContext::ClassMember, 8), baseline);
}

#[test]
fn lookahead_does_not_turn_member_docs_into_class_docs() {
    let source = "class Foo { /** m */ void f() {} }";
    let baseline = with_lookahead(source, ScanContext::TopLevel, 1);
    let [CodeElement::Class(class)] = baseline.elements() else {
        panic!("expected one class, got {:?}", baseline.elements());
    };
    assert_eq!(class.doc, None);
    let [CodeElement::Method(method)] = class.methods.as_slice() else {
        panic!("expected one method, got {:?}", class.methods);
    };
    assert_eq!(method.doc.as_deref(), Some("m"));
    assert_eq!(with_lookahead(source, ScanContext::TopLevel, 3), baseline);
    assert_eq!(with_lookahead(source, ScanContext::TopLevel, 8), baseline);
}

fn with_lookahead(source: &str, context: ScanContext, lookahead: usize) -> Conversion {
    let options = ConvertOptions {
        comment_lookahead: lookahead,
        ..options(context)
    };
    convert_java(source, &options).expect("source should convert")
}
