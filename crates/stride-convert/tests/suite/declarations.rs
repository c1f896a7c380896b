use pretty_assertions::assert_eq;
use stride_convert::{
    AccessPermission, CodeElement, ConstructorElement, MethodElement, Param, SlotKind, SuperThis,
    TypeSlot,
};

use super::support::*;

use AccessPermission::{Private, Protected, Public};

#[allow(clippy::too_many_arguments)]
fn method(
    doc: Option<&str>,
    access: AccessPermission,
    is_static: bool,
    is_final: bool,
    return_type: &str,
    name: &str,
    params: Vec<Param>,
    throws: Vec<TypeSlot>,
    body: Vec<CodeElement>,
) -> CodeElement {
    CodeElement::Method(MethodElement {
        access,
        is_static,
        is_final,
        return_type: ty(return_type),
        name: name.to_owned(),
        params,
        throws,
        body,
        doc: doc.map(str::to_owned),
    })
}

fn constructor(
    doc: Option<&str>,
    access: AccessPermission,
    params: Vec<Param>,
    throws: Vec<TypeSlot>,
    body: Vec<CodeElement>,
) -> CodeElement {
    CodeElement::Constructor(ConstructorElement {
        access,
        params,
        throws,
        delegate: None,
        delegate_args: None,
        body,
        doc: doc.map(str::to_owned),
    })
}

fn delegating(
    doc: Option<&str>,
    access: AccessPermission,
    delegate: SuperThis,
    args: &str,
    body: Vec<CodeElement>,
) -> CodeElement {
    CodeElement::Constructor(ConstructorElement {
        access,
        params: vec![],
        throws: vec![],
        delegate: Some(delegate),
        delegate_args: Some(slot(SlotKind::SuperThisParams, args)),
        body,
        doc: doc.map(str::to_owned),
    })
}

#[test]
fn methods() {
    assert_eq!(
        members("public void foo() { return; }"),
        vec![method(None, Public, false, false, "void", "foo", vec![], vec![], vec![ret(None)])]
    );
    assert_eq!(
        members("public final void foo(int x) { return; }"),
        vec![method(
            None,
            Public,
            false,
            true,
            "void",
            "foo",
            vec![param("int", "x")],
            vec![],
            vec![ret(None)]
        )]
    );
    assert_eq!(
        members("@Override public final void foo(int[] x, double y[][], String[] s[]) { return; }"),
        vec![method(
            None,
            Public,
            false,
            true,
            "void",
            "foo",
            vec![param("int[]", "x"), param("double[][]", "y"), param("String[][]", "s")],
            vec![],
            vec![ret(None)]
        )]
    );
}

#[test]
fn constructors_default_to_protected() {
    assert_eq!(
        members("Foo(int x, String y) throws IOException { }"),
        vec![constructor(
            None,
            Protected,
            vec![param("int", "x"), param("String", "y")],
            types(&["IOException"]),
            vec![]
        )]
    );
}

#[test]
fn javadoc_attaches_to_the_member() {
    assert_eq!(
        members("/** Comment */ private void foo() {}"),
        vec![method(Some("Comment"), Private, false, false, "void", "foo", vec![], vec![], vec![])]
    );
    assert_eq!(
        members("// Comment\nprivate void foo() {}"),
        vec![
            comment("Comment"),
            method(None, Private, false, false, "void", "foo", vec![], vec![], vec![]),
        ]
    );
    assert_eq!(
        members(
            "/** Multi\n * line \n * comment.\n*/ private static final java.lang.String foo() \
             throws IOException, NullPointerException {}"
        ),
        vec![method(
            Some("Multi line comment."),
            Private,
            true,
            true,
            "java.lang.String",
            "foo",
            vec![],
            types(&["IOException", "NullPointerException"]),
            vec![]
        )]
    );
    assert_eq!(
        members("/** First\nPara.\n\nSecond\nPara.\n\n\nThird Para.*/\nprotected Foo(){}"),
        vec![constructor(
            Some("First Para.\nSecond Para.\n\nThird Para."),
            Protected,
            vec![],
            vec![],
            vec![]
        )]
    );
    assert_eq!(
        members("//Normal\n/** Javadoc */ private void foo() {}"),
        vec![
            comment("Normal"),
            method(Some("Javadoc"), Private, false, false, "void", "foo", vec![], vec![], vec![]),
        ]
    );
}

#[test]
fn leading_this_or_super_delegates() {
    assert_eq!(
        members("/** X*/\npublic Bar() { this(0); }"),
        vec![delegating(Some("X"), Public, SuperThis::This, "0", vec![])]
    );
    assert_eq!(
        members("C() {super(2, 3);}"),
        vec![delegating(None, Protected, SuperThis::Super, "2 , 3", vec![])]
    );
    assert_eq!(
        members("C() {super(); return;}"),
        vec![delegating(None, Protected, SuperThis::Super, "", vec![ret(None)])]
    );
    assert_eq!(
        members("C() {this2(0);}"),
        vec![constructor(None, Protected, vec![], vec![], vec![call("this2 ( 0 )")])]
    );
}

#[test]
fn fields() {
    assert_eq!(
        members("int x;"),
        vec![var(Some(Protected), false, false, "int", "x", None)]
    );
    assert_eq!(
        members("public static final int CONST=7;"),
        vec![var(Some(Public), true, true, "int", "CONST", Some("7"))]
    );
    assert_eq!(
        members("private final bool b = 7, c=false;"),
        vec![
            var(Some(Private), false, true, "bool", "b", Some("7")),
            var(Some(Private), false, true, "bool", "c", Some("false")),
        ]
    );
    assert_eq!(
        members("public static String a = null, b, c=(String)false, d;"),
        vec![
            var(Some(Public), true, false, "String", "a", Some("null")),
            var(Some(Public), true, false, "String", "b", None),
            var(Some(Public), true, false, "String", "c", Some("( String ) false")),
            var(Some(Public), true, false, "String", "d", None),
        ]
    );
}

#[test]
fn repeated_access_keywords_keep_the_widest() {
    assert_eq!(
        members("private public int x;"),
        vec![var(Some(Public), false, false, "int", "x", None)]
    );
    assert_eq!(
        members("protected private int y;"),
        vec![var(Some(Protected), false, false, "int", "y", None)]
    );
}

#[test]
fn abstract_methods_are_prototypes() {
    assert_eq!(
        members("protected abstract int size() throws E;"),
        vec![CodeElement::MethodProto(stride_convert::MethodProtoElement {
            access: Protected,
            return_type: ty("int"),
            name: "size".to_owned(),
            params: vec![],
            throws: types(&["E"]),
            doc: None,
        })]
    );
}
