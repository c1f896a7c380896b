use pretty_assertions::assert_eq;
use stride_convert::{
    CaseElement, CatchArm, CodeElement, ElseIf, IfElement, SwitchElement, TryElement,
};

use super::support::*;

fn catch(ty_text: &str, name: &str, body: Vec<CodeElement>) -> CatchArm {
    CatchArm {
        ty: ty(ty_text),
        name: name.to_owned(),
        body,
    }
}

#[test]
fn while_loops_nest() {
    assert_eq!(statements("while (true);"), vec![while_loop("true", vec![])]);
    assert_eq!(
        statements("while (true) while (false);"),
        vec![while_loop("true", vec![while_loop("false", vec![])])]
    );
    assert_eq!(statements("while (true) {}"), vec![while_loop("true", vec![])]);
    assert_eq!(
        statements("while (0) {while (1) { while (2) {} } while (3) while (4); while(5); }"),
        vec![while_loop(
            "0",
            vec![
                while_loop("1", vec![while_loop("2", vec![])]),
                while_loop("3", vec![while_loop("4", vec![])]),
                while_loop("5", vec![]),
            ]
        )]
    );
}

#[test]
fn return_break_and_throw() {
    assert_eq!(statements("return 0;"), vec![ret(Some("0"))]);
    assert_eq!(statements("return 0+(1+2);"), vec![ret(Some("0 + ( 1 + 2 )"))]);
    assert_eq!(statements("return;"), vec![ret(None)]);
    assert_eq!(statements("break;"), vec![CodeElement::Break]);
    assert_eq!(
        statements("throw new IOException();"),
        vec![CodeElement::Throw(filled("new IOException ( )"))]
    );
}

#[test]
fn inner_blocks_are_spliced() {
    assert_eq!(
        statements("return 0; {return 1;}"),
        vec![ret(Some("0")), ret(Some("1"))]
    );
    assert_eq!(
        statements("{return 0;} {return 1;}"),
        vec![ret(Some("0")), ret(Some("1"))]
    );
    assert_eq!(
        statements("if (true) {return 0;} {return 1;}"),
        vec![if_only("true", vec![ret(Some("0"))]), ret(Some("1"))]
    );
}

#[test]
fn if_else_chains() {
    assert_eq!(statements("if (0);"), vec![if_only("0", vec![])]);
    assert_eq!(
        statements("if (0) return 1; else return 2;"),
        vec![CodeElement::If(IfElement {
            condition: filled("0"),
            body: vec![ret(Some("1"))],
            else_ifs: vec![],
            else_body: Some(vec![ret(Some("2"))]),
        })]
    );
    assert_eq!(
        statements("if (0) return 1; else if (2) return 3; else if (4) return 5; else return 6;"),
        vec![CodeElement::If(IfElement {
            condition: filled("0"),
            body: vec![ret(Some("1"))],
            else_ifs: vec![
                ElseIf {
                    condition: filled("2"),
                    body: vec![ret(Some("3"))],
                },
                ElseIf {
                    condition: filled("4"),
                    body: vec![ret(Some("5"))],
                },
            ],
            else_body: Some(vec![ret(Some("6"))]),
        })]
    );
    assert_eq!(
        statements("if (0) return 1; else if (2) return 3;"),
        vec![CodeElement::If(IfElement {
            condition: filled("0"),
            body: vec![ret(Some("1"))],
            else_ifs: vec![ElseIf {
                condition: filled("2"),
                body: vec![ret(Some("3"))],
            }],
            else_body: None,
        })]
    );
}

#[test]
fn try_catch_finally() {
    assert_eq!(
        statements("try { return 0; } catch (Exception e) { return 1; }"),
        vec![CodeElement::Try(TryElement {
            body: vec![ret(Some("0"))],
            catches: vec![catch("Exception", "e", vec![ret(Some("1"))])],
            finally: None,
        })]
    );
    assert_eq!(
        statements("try { return 0; } finally { return 1;}"),
        vec![CodeElement::Try(TryElement {
            body: vec![ret(Some("0"))],
            catches: vec![],
            finally: Some(vec![ret(Some("1"))]),
        })]
    );
    assert_eq!(
        statements("try { } catch (java.lang.String x) { while (0) { } } catch (int x) { }"),
        vec![CodeElement::Try(TryElement {
            body: vec![],
            catches: vec![
                catch("java.lang.String", "x", vec![while_loop("0", vec![])]),
                catch("int", "x", vec![]),
            ],
            finally: None,
        })]
    );
}

#[test]
fn multi_catch_repeats_the_clause_per_type() {
    assert_eq!(
        statements(
            "try { return 0; } catch (E1A|E1B e1) { return 1; } \
             catch (E2A|E2B|E2C e2) { return 2; } finally { return -1;}"
        ),
        vec![CodeElement::Try(TryElement {
            body: vec![ret(Some("0"))],
            catches: vec![
                catch("E1A", "e1", vec![ret(Some("1"))]),
                catch("E1B", "e1", vec![ret(Some("1"))]),
                catch("E2A", "e2", vec![ret(Some("2"))]),
                catch("E2B", "e2", vec![ret(Some("2"))]),
                catch("E2C", "e2", vec![ret(Some("2"))]),
            ],
            finally: Some(vec![ret(Some("- 1"))]),
        })]
    );
}

#[test]
fn switch_groups_statements_per_label() {
    assert_eq!(
        statements("switch (0) { case 1: break; }"),
        vec![CodeElement::Switch(SwitchElement {
            expression: filled("0"),
            cases: vec![CaseElement {
                expression: filled("1"),
                body: vec![CodeElement::Break],
            }],
            default: None,
        })]
    );
    assert_eq!(
        statements("switch (0) { default: break; }"),
        vec![CodeElement::Switch(SwitchElement {
            expression: filled("0"),
            cases: vec![],
            default: Some(vec![CodeElement::Break]),
        })]
    );
    assert_eq!(
        statements("switch (x) { case 1: case 2: f(); break; default: g(); case 3: h(); }"),
        vec![CodeElement::Switch(SwitchElement {
            expression: filled("x"),
            cases: vec![
                CaseElement {
                    expression: filled("1"),
                    body: vec![],
                },
                CaseElement {
                    expression: filled("2"),
                    body: vec![call("f ( )"), CodeElement::Break],
                },
                CaseElement {
                    expression: filled("3"),
                    body: vec![call("h ( )")],
                },
            ],
            default: Some(vec![call("g ( )")]),
        })]
    );
}

#[test]
fn for_each_loops() {
    assert_eq!(
        statements("for (int x : xs) return;"),
        vec![CodeElement::Foreach {
            ty: ty("int"),
            var: "x".to_owned(),
            iterable: filled("xs"),
            body: vec![ret(None)],
        }]
    );
    assert_eq!(
        statements("for (final int x : (int[])xs) return;"),
        vec![CodeElement::Foreach {
            ty: ty("int"),
            var: "x".to_owned(),
            iterable: filled("( int [ ] ) xs"),
            body: vec![ret(None)],
        }]
    );
}

#[test]
fn counting_loops_become_while_loops() {
    assert_eq!(
        statements("for (int i = 0; i < 10; i++) sum += i;"),
        vec![
            local("int", "i", Some("0")),
            while_loop("i < 10", vec![assign("sum", "sum + i"), assign("i", "i + 1")]),
        ]
    );
    assert_eq!(
        statements("for (int i = 0; i < 10; i = i + 2) return;"),
        vec![
            local("int", "i", Some("0")),
            while_loop("i < 10", vec![ret(None), assign("i", "i + 2")]),
        ]
    );
    assert_eq!(
        statements("for (int i = 0, j, k = (double)7, l; i < 10; i = i + 1) {return 0; return 1;}"),
        vec![
            local("int", "i", Some("0")),
            local("int", "j", None),
            local("int", "k", Some("( double ) 7")),
            local("int", "l", None),
            while_loop(
                "i < 10",
                vec![ret(Some("0")), ret(Some("1")), assign("i", "i + 1")]
            ),
        ]
    );
    assert_eq!(statements("for (;;) return;"), vec![while_loop("true", vec![ret(None)])]);
    assert_eq!(statements("for (;false;) return;"), vec![while_loop("false", vec![ret(None)])]);
}

#[test]
fn expression_initializers_precede_the_loop() {
    assert_eq!(
        statements("for (i = 0; i < 3; i++) f();"),
        vec![
            assign("i", "0"),
            while_loop("i < 3", vec![call("f ( )"), assign("i", "i + 1")]),
        ]
    );
}

#[test]
fn calls_and_assignments() {
    assert_eq!(statements("go();"), vec![call("go ( )")]);
    assert_eq!(
        statements("getFoo().move(6 + 7);"),
        vec![call("getFoo ( ) . move ( 6 + 7 )")]
    );
    assert_eq!(statements("x = getX();"), vec![assign("x", "getX ( )")]);
    assert_eq!(statements("x = new Foo();"), vec![assign("x", "new Foo ( )")]);
    assert_eq!(statements("i += 1;"), vec![assign("i", "i + 1")]);
    assert_eq!(statements("a . x <<= 4;"), vec![assign("a . x", "a . x << 4")]);
    assert_eq!(statements("x *= a + b;"), vec![assign("x", "x * ( a + b )")]);
    assert_eq!(statements("x = c -> 3;"), vec![assign("x", "c -> 3")]);
    assert_eq!(statements("ref = a::b;"), vec![assign("ref", "a :: b")]);
}

#[test]
fn increments_become_assignments() {
    assert_eq!(statements("++i;"), vec![assign("i", "i + 1")]);
    assert_eq!(statements("i++;"), vec![assign("i", "i + 1")]);
    assert_eq!(statements("--i[j.k];"), vec![assign("i [ j . k ]", "i [ j . k ] - 1")]);
    assert_eq!(statements("i[j.k]--;"), vec![assign("i [ j . k ]", "i [ j . k ] - 1")]);
}

#[test]
fn locals() {
    assert_eq!(statements("int x;"), vec![local("int", "x", None)]);
    assert_eq!(
        statements("final int CONST=7;"),
        vec![var(None, false, true, "int", "CONST", Some("7"))]
    );
    assert_eq!(
        statements("final String a = null, b, c=(String)false, d;"),
        vec![
            var(None, false, true, "String", "a", Some("null")),
            var(None, false, true, "String", "b", None),
            var(None, false, true, "String", "c", Some("( String ) false")),
            var(None, false, true, "String", "d", None),
        ]
    );
    assert_eq!(statements("int[] x;"), vec![local("int[]", "x", None)]);
    assert_eq!(statements("int x[];"), vec![local("int[]", "x", None)]);
    assert_eq!(statements("int[] x[];"), vec![local("int[][]", "x", None)]);
    assert_eq!(
        statements("Map<String, List<Integer>> m = null;"),
        vec![local("Map<String,List<Integer>>", "m", Some("null"))]
    );
}

#[test]
fn empty_input_converts_to_nothing() {
    assert_eq!(statements(""), vec![]);
    assert_eq!(statements(";;"), vec![]);
}
