//! Accumulators for constructs whose parts arrive over several events.
//!
//! Each builder is owned by the converter while its construct is open and is
//! consumed exactly once when the construct ends.

use crate::element::{
    AccessPermission, CaseElement, CatchArm, CodeElement, ConstructorElement, ElseIf,
    ExpressionSlot, IfElement, MethodElement, MethodProtoElement, Param, SuperThis,
    SwitchElement, TryElement, TypeSlot, VarElement,
};
use crate::expression::Expression;
use crate::modifier::{take_access, take_annotation, take_keyword, warn_remaining, Modifier};
use crate::warning::WarningManager;

/// A method or constructor signature and its body state.
#[derive(Debug)]
pub(crate) struct MethodBuilder {
    /// `None` for constructors.
    pub(crate) return_type: Option<String>,
    pub(crate) name: String,
    pub(crate) modifiers: Vec<Modifier>,
    pub(crate) doc: Option<String>,
    pub(crate) params: Vec<Param>,
    pub(crate) throws: Vec<TypeSlot>,
    pub(crate) has_body: bool,
    pub(crate) delegate: Option<SuperThis>,
    pub(crate) delegate_args: Vec<Expression>,
}

impl MethodBuilder {
    pub(crate) fn new(
        return_type: Option<String>,
        name: String,
        modifiers: Vec<Modifier>,
        doc: Option<String>,
    ) -> Self {
        Self {
            return_type,
            name,
            modifiers,
            doc,
            params: Vec::new(),
            throws: Vec::new(),
            has_body: false,
            delegate: None,
            delegate_args: Vec::new(),
        }
    }

    pub(crate) fn build(
        self,
        body: Vec<CodeElement>,
        default_access: AccessPermission,
        warnings: &mut WarningManager,
    ) -> CodeElement {
        let mut modifiers = self.modifiers;
        let access = take_access(&mut modifiers).unwrap_or(default_access);

        let Some(return_type) = self.return_type else {
            warn_remaining("method", &modifiers, warnings);
            let delegate_args = self
                .delegate
                .map(|_| Expression::join(self.delegate_args, " , ").into_super_this_params(warnings));
            return CodeElement::Constructor(ConstructorElement {
                access,
                params: self.params,
                throws: self.throws,
                delegate: self.delegate,
                delegate_args,
                body,
                doc: self.doc,
            });
        };

        let is_final = take_keyword(&mut modifiers, "final");
        let is_static = take_keyword(&mut modifiers, "static");
        take_keyword(&mut modifiers, "abstract");
        take_annotation(&mut modifiers, "Override");
        warn_remaining("method", &modifiers, warnings);

        if self.has_body {
            CodeElement::Method(MethodElement {
                access,
                is_static,
                is_final,
                return_type: TypeSlot::new(return_type),
                name: self.name,
                params: self.params,
                throws: self.throws,
                body,
                doc: self.doc,
            })
        } else {
            CodeElement::MethodProto(MethodProtoElement {
                access,
                return_type: TypeSlot::new(return_type),
                name: self.name,
                params: self.params,
                throws: self.throws,
                doc: self.doc,
            })
        }
    }
}

/// The shared type and modifiers of one field or local variable declaration
/// statement, which may declare several names.
#[derive(Debug)]
pub(crate) struct VarBuilder {
    ty: String,
    modifiers: Vec<Modifier>,
    /// `None` for locals.
    default_access: Option<AccessPermission>,
}

impl VarBuilder {
    pub(crate) fn new(
        ty: String,
        modifiers: Vec<Modifier>,
        default_access: Option<AccessPermission>,
    ) -> Self {
        Self {
            ty,
            modifiers,
            default_access,
        }
    }

    /// The element for one declarator, still without its initializer.
    pub(crate) fn declare(&self, name: &str, warnings: &mut WarningManager) -> VarElement {
        let mut modifiers = self.modifiers.clone();
        let access = take_access(&mut modifiers).or(self.default_access);
        let is_final = take_keyword(&mut modifiers, "final");
        let is_static = take_keyword(&mut modifiers, "static");
        warn_remaining("variable", &modifiers, warnings);
        VarElement {
            access,
            is_static,
            is_final,
            ty: TypeSlot::new(self.ty.clone()),
            name: name.to_owned(),
            init: None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct IfBuilder {
    /// The `if` condition followed by each `else if` condition.
    conditions: Vec<ExpressionSlot>,
    /// One body per condition, plus one more for a final `else`.
    blocks: Vec<Vec<CodeElement>>,
}

impl IfBuilder {
    pub(crate) fn new(condition: ExpressionSlot) -> Self {
        Self {
            conditions: vec![condition],
            blocks: Vec::new(),
        }
    }

    pub(crate) fn add_condition(&mut self, condition: ExpressionSlot) {
        self.conditions.push(condition);
    }

    pub(crate) fn add_block(&mut self, block: Vec<CodeElement>) {
        self.blocks.push(block);
    }

    pub(crate) fn build(self) -> CodeElement {
        let mut conditions = self.conditions.into_iter();
        let mut blocks = self.blocks.into_iter();
        // `new` always seeds one condition.
        let condition = conditions
            .next()
            .unwrap_or_else(|| ExpressionSlot::filled("true"));
        let body = blocks.next().unwrap_or_default();
        let else_ifs = conditions
            .map(|condition| ElseIf {
                condition,
                body: blocks.next().unwrap_or_default(),
            })
            .collect();
        let else_body = blocks.next();
        CodeElement::If(IfElement {
            condition,
            body,
            else_ifs,
            else_body,
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct ForBuilder {
    ty: Option<String>,
    vars: Vec<(String, Option<Expression>)>,
    each: Option<Expression>,
    test: Option<Expression>,
    update: Option<Expression>,
}

impl ForBuilder {
    pub(crate) fn set_type(&mut self, ty: String) {
        self.ty = Some(ty);
    }

    pub(crate) fn add_var(&mut self, name: String) {
        self.vars.push((name, None));
    }

    pub(crate) fn set_last_init(&mut self, init: Expression) {
        if let Some((_, slot)) = self.vars.last_mut() {
            *slot = Some(init);
        }
    }

    pub(crate) fn set_each(&mut self, iterable: Expression) {
        self.each = Some(iterable);
    }

    pub(crate) fn set_test(&mut self, test: Expression) {
        self.test = Some(test);
    }

    /// Only the first update expression is kept.
    pub(crate) fn set_update(&mut self, update: Expression) {
        if self.update.is_none() {
            self.update = Some(update);
        }
    }

    /// A for-each loop, or the loop variables followed by an equivalent
    /// `while` loop with the update appended to the body.
    pub(crate) fn build(
        self,
        mut body: Vec<CodeElement>,
        warnings: &mut WarningManager,
    ) -> Vec<CodeElement> {
        let ty = self.ty.unwrap_or_default();
        if let Some(iterable) = self.each {
            let var = self
                .vars
                .into_iter()
                .next()
                .map(|(name, _)| name)
                .unwrap_or_default();
            return vec![CodeElement::Foreach {
                ty: TypeSlot::new(ty),
                var,
                iterable: iterable.into_filled(warnings),
                body,
            }];
        }

        let mut out: Vec<CodeElement> = self
            .vars
            .into_iter()
            .map(|(name, init)| {
                CodeElement::Var(VarElement {
                    access: None,
                    is_static: false,
                    is_final: false,
                    ty: TypeSlot::new(ty.clone()),
                    name,
                    init: init.map(|e| e.into_filled(warnings)),
                })
            })
            .collect();
        let condition = match self.test {
            Some(test) => test.into_filled(warnings),
            None => ExpressionSlot::filled("true"),
        };
        if let Some(update) = self.update {
            body.push(update.into_statement(warnings));
        }
        out.push(CodeElement::While { condition, body });
        out
    }
}

#[derive(Debug, Default)]
pub(crate) struct SwitchBuilder {
    expression: Option<Expression>,
    cases: Vec<Expression>,
    bodies: Vec<Vec<CodeElement>>,
    default: Option<Vec<CodeElement>>,
    in_default: bool,
}

impl SwitchBuilder {
    pub(crate) fn set_expression(&mut self, expression: Expression) {
        self.expression = Some(expression);
    }

    /// Files the statements of the segment that just closed.
    pub(crate) fn store_segment(&mut self, content: Vec<CodeElement>) {
        if self.in_default {
            self.default.get_or_insert_with(Vec::new).extend(content);
        } else if self.bodies.len() < self.cases.len() {
            self.bodies.push(content);
        }
        // Anything before the first label is unreachable and dropped.
    }

    pub(crate) fn begin_case(&mut self, expression: Expression) {
        self.in_default = false;
        self.cases.push(expression);
    }

    pub(crate) fn begin_default(&mut self) {
        self.in_default = true;
        self.default.get_or_insert_with(Vec::new);
    }

    pub(crate) fn build(self, warnings: &mut WarningManager) -> CodeElement {
        let expression = match self.expression {
            Some(e) => e.into_filled(warnings),
            None => ExpressionSlot::filled(""),
        };
        let mut bodies = self.bodies.into_iter();
        let cases = self
            .cases
            .into_iter()
            .map(|e| CaseElement {
                expression: e.into_filled(warnings),
                body: bodies.next().unwrap_or_default(),
            })
            .collect();
        CodeElement::Switch(SwitchElement {
            expression,
            cases,
            default: self.default,
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct TryBuilder {
    body: Vec<CodeElement>,
    catch_types: Vec<Vec<String>>,
    catch_names: Vec<String>,
    catch_bodies: Vec<Vec<CodeElement>>,
    finally: Option<Vec<CodeElement>>,
}

impl TryBuilder {
    pub(crate) fn set_body(&mut self, body: Vec<CodeElement>) {
        self.body = body;
    }

    pub(crate) fn begin_catch(&mut self) {
        self.catch_types.push(Vec::new());
    }

    pub(crate) fn add_catch_type(&mut self, ty: String) {
        if let Some(types) = self.catch_types.last_mut() {
            types.push(ty);
        }
    }

    pub(crate) fn set_catch_name(&mut self, name: String) {
        self.catch_names.push(name);
    }

    pub(crate) fn add_catch_body(&mut self, body: Vec<CodeElement>) {
        self.catch_bodies.push(body);
    }

    pub(crate) fn set_finally(&mut self, body: Vec<CodeElement>) {
        self.finally = Some(body);
    }

    /// A clause catching several types becomes one arm per type, each with
    /// its own copy of the body.
    pub(crate) fn build(self) -> CodeElement {
        let mut catches = Vec::new();
        let clauses = self
            .catch_types
            .into_iter()
            .zip(self.catch_names)
            .zip(self.catch_bodies);
        for ((types, name), body) in clauses {
            for ty in types {
                catches.push(CatchArm {
                    ty: TypeSlot::new(ty),
                    name: name.clone(),
                    body: body.clone(),
                });
            }
        }
        CodeElement::Try(TryElement {
            body: self.body,
            catches,
            finally: self.finally,
        })
    }
}
