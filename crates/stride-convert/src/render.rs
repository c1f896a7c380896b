//! Java source rendering of converted elements.
//!
//! The output is plain Java with one statement per line and four-space
//! indentation. Expression slots are written in their original-language form.
//! Converting the rendered text again yields the same elements.

use crate::element::{
    ClassElement, CodeElement, ConstructorElement, IfElement, InterfaceElement, MethodElement,
    MethodProtoElement, Param, SwitchElement, TryElement, TypeSlot, VarElement,
};

const INDENT: &str = "    ";

impl CodeElement {
    /// Renders this element, and everything nested in it, as Java source.
    pub fn to_java(&self) -> String {
        let mut writer = JavaWriter::default();
        writer.element(self, Owner::Block);
        writer.out
    }
}

/// Renders a sequence of elements, such as the result of one conversion.
pub fn render_java(elements: &[CodeElement]) -> String {
    let mut writer = JavaWriter::default();
    writer.elements(elements, Owner::Block);
    writer.out
}

/// What the element being written is a member of.
#[derive(Clone, Copy)]
enum Owner<'a> {
    Block,
    Class(&'a str),
    Interface,
}

#[derive(Default)]
struct JavaWriter {
    out: String,
    indent: usize,
}

fn params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn throws(types: &[TypeSlot]) -> String {
    if types.is_empty() {
        return String::new();
    }
    let list = types.iter().map(TypeSlot::as_str).collect::<Vec<_>>().join(", ");
    format!(" throws {list}")
}

/// Lines of a block comment whose processed text is `text`: every `\n` in
/// the text stands for one blank line.
fn comment_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    for (idx, segment) in text.split('\n').enumerate() {
        if idx > 0 {
            lines.push("");
        }
        if !segment.is_empty() {
            lines.push(segment);
        }
    }
    lines
}

impl JavaWriter {
    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn indented(&mut self, body: &[CodeElement], owner: Owner<'_>) {
        self.indent += 1;
        self.elements(body, owner);
        self.indent -= 1;
    }

    fn elements(&mut self, elements: &[CodeElement], owner: Owner<'_>) {
        for element in elements {
            self.element(element, owner);
        }
    }

    fn block(&mut self, header: &str, body: &[CodeElement]) {
        self.line(&format!("{header} {{"));
        self.indented(body, Owner::Block);
        self.line("}");
    }

    fn comment(&mut self, opener: &str, text: &str) {
        if !text.contains('\n') {
            if opener == "//" {
                self.line(format!("// {text}").trim_end());
            } else {
                self.line(&format!("{opener} {text} */"));
            }
            return;
        }
        self.line(opener);
        for line in comment_lines(text) {
            self.line(format!(" * {line}").trim_end());
        }
        self.line(" */");
    }

    fn doc(&mut self, doc: Option<&str>) {
        if let Some(doc) = doc {
            self.comment("/**", doc);
        }
    }

    fn element(&mut self, element: &CodeElement, owner: Owner<'_>) {
        match element {
            CodeElement::Import(name) => self.line(&format!("import {name};")),
            CodeElement::Package(name) => self.line(&format!("package {name};")),
            CodeElement::Comment(text) if text.contains('\n') => self.comment("/*", text),
            CodeElement::Comment(text) => self.comment("//", text),
            CodeElement::Var(var) => self.var(var),
            CodeElement::Constructor(ctor) => self.constructor(ctor, owner),
            CodeElement::Method(method) => self.method(method),
            CodeElement::MethodProto(proto) => self.method_proto(proto, owner),
            CodeElement::Class(class) => self.class(class),
            CodeElement::Interface(interface) => self.interface(interface),
            CodeElement::If(element) => self.if_else(element),
            CodeElement::While { condition, body } => {
                self.block(&format!("while ({})", condition.java), body);
            }
            CodeElement::Foreach {
                ty,
                var,
                iterable,
                body,
            } => self.block(&format!("for ({ty} {var} : {})", iterable.java), body),
            CodeElement::Break => self.line("break;"),
            CodeElement::Return(None) => self.line("return;"),
            CodeElement::Return(Some(value)) if value.java.is_empty() => self.line("return;"),
            CodeElement::Return(Some(value)) => self.line(&format!("return {};", value.java)),
            CodeElement::Throw(value) => self.line(&format!("throw {};", value.java)),
            CodeElement::Try(element) => self.try_catch(element),
            CodeElement::Switch(element) => self.switch(element),
            CodeElement::Call(call) => self.line(&format!("{};", call.java)),
            CodeElement::Assign { lhs, rhs } => {
                self.line(&format!("{} = {};", lhs.java, rhs.java));
            }
        }
    }

    fn var(&mut self, var: &VarElement) {
        let mut text = String::new();
        if let Some(access) = var.access {
            text.push_str(access.keyword());
            text.push(' ');
        }
        if var.is_static {
            text.push_str("static ");
        }
        if var.is_final {
            text.push_str("final ");
        }
        text.push_str(&format!("{} {}", var.ty, var.name));
        if let Some(init) = &var.init {
            text.push_str(&format!(" = {}", init.java));
        }
        text.push(';');
        self.line(&text);
    }

    fn constructor(&mut self, ctor: &ConstructorElement, owner: Owner<'_>) {
        let name = match owner {
            Owner::Class(name) => name,
            Owner::Block | Owner::Interface => "",
        };
        self.doc(ctor.doc.as_deref());
        self.line(&format!(
            "{} {name}({}){} {{",
            ctor.access.keyword(),
            params(&ctor.params),
            throws(&ctor.throws)
        ));
        self.indent += 1;
        if let Some(delegate) = ctor.delegate {
            let args = ctor.delegate_args.as_ref().map_or("", |a| a.java.as_str());
            self.line(&format!("{}({args});", delegate.keyword()));
        }
        self.elements(&ctor.body, Owner::Block);
        self.indent -= 1;
        self.line("}");
    }

    fn method(&mut self, method: &MethodElement) {
        self.doc(method.doc.as_deref());
        let mut header = format!("{} ", method.access.keyword());
        if method.is_static {
            header.push_str("static ");
        }
        if method.is_final {
            header.push_str("final ");
        }
        header.push_str(&format!(
            "{} {}({}){}",
            method.return_type,
            method.name,
            params(&method.params),
            throws(&method.throws)
        ));
        self.block(&header, &method.body);
    }

    fn method_proto(&mut self, proto: &MethodProtoElement, owner: Owner<'_>) {
        self.doc(proto.doc.as_deref());
        let abstract_kw = match owner {
            Owner::Interface => "",
            Owner::Class(_) | Owner::Block => "abstract ",
        };
        self.line(&format!(
            "{} {abstract_kw}{} {}({}){};",
            proto.access.keyword(),
            proto.return_type,
            proto.name,
            params(&proto.params),
            throws(&proto.throws)
        ));
    }

    fn unit_header(&mut self, package: Option<&str>, imports: &[String]) {
        if let Some(package) = package {
            self.line(&format!("package {package};"));
            self.line("");
        }
        for import in imports {
            self.line(&format!("import {import};"));
        }
        if !imports.is_empty() {
            self.line("");
        }
    }

    fn class(&mut self, class: &ClassElement) {
        self.unit_header(class.package.as_deref(), &class.imports);
        self.doc(class.doc.as_deref());
        let mut header = String::from("public ");
        if class.is_abstract {
            header.push_str("abstract ");
        }
        header.push_str("class ");
        header.push_str(&class.name);
        if let Some(extends) = &class.extends {
            header.push_str(&format!(" extends {extends}"));
        }
        if !class.implements.is_empty() {
            let list = class
                .implements
                .iter()
                .map(TypeSlot::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            header.push_str(&format!(" implements {list}"));
        }
        self.line(&format!("{header} {{"));
        let owner = Owner::Class(&class.name);
        self.indented(&class.fields, owner);
        self.indented(&class.constructors, owner);
        self.indented(&class.methods, owner);
        self.line("}");
    }

    fn interface(&mut self, interface: &InterfaceElement) {
        self.unit_header(interface.package.as_deref(), &interface.imports);
        self.doc(interface.doc.as_deref());
        let mut header = format!("public interface {}", interface.name);
        if !interface.extends.is_empty() {
            let list = interface
                .extends
                .iter()
                .map(TypeSlot::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            header.push_str(&format!(" extends {list}"));
        }
        self.line(&format!("{header} {{"));
        self.indented(&interface.fields, Owner::Interface);
        self.indented(&interface.methods, Owner::Interface);
        self.line("}");
    }

    fn if_else(&mut self, element: &IfElement) {
        self.line(&format!("if ({}) {{", element.condition.java));
        self.indented(&element.body, Owner::Block);
        for else_if in &element.else_ifs {
            self.line(&format!("}} else if ({}) {{", else_if.condition.java));
            self.indented(&else_if.body, Owner::Block);
        }
        if let Some(else_body) = &element.else_body {
            self.line("} else {");
            self.indented(else_body, Owner::Block);
        }
        self.line("}");
    }

    fn try_catch(&mut self, element: &TryElement) {
        self.line("try {");
        self.indented(&element.body, Owner::Block);
        for arm in &element.catches {
            self.line(&format!("}} catch ({} {}) {{", arm.ty, arm.name));
            self.indented(&arm.body, Owner::Block);
        }
        if let Some(finally) = &element.finally {
            self.line("} finally {");
            self.indented(finally, Owner::Block);
        }
        self.line("}");
    }

    fn switch(&mut self, element: &SwitchElement) {
        self.line(&format!("switch ({}) {{", element.expression.java));
        self.indent += 1;
        for case in &element.cases {
            self.line(&format!("case {}:", case.expression.java));
            self.indented(&case.body, Owner::Block);
        }
        if let Some(default) = &element.default {
            self.line("default:");
            self.indented(default, Owner::Block);
        }
        self.indent -= 1;
        self.line("}");
    }
}
