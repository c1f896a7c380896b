//! The event-driven conversion driver.
//!
//! [`Converter`] receives [`SyntaxListener`] events and keeps one stack per
//! kind of construct in progress. Events that finish a construct pop its
//! frame, build the element and hand it to the statement handler on top of
//! the statement stack. Nothing here looks ahead: every decision is made from
//! the events seen so far and the byte offset of the most recently consumed
//! token.

use stride_syntax::{SyntaxListener, Token, TokenKind, TypeDefKind};

use crate::builder::{ForBuilder, IfBuilder, MethodBuilder, SwitchBuilder, TryBuilder, VarBuilder};
use crate::capture::{ExpressionCapture, ExpressionConsumer};
use crate::config::WarningStyle;
use crate::element::{AccessPermission, CodeElement, Param, SuperThis, TypeSlot};
use crate::error::ConvertError;
use crate::expression::Expression;
use crate::handlers::{
    ArgsTarget, ArgumentListHandler, BlockEnd, PendingComment, StatementHandler, TypeExpectation,
};
use crate::modifier::{take_keyword, warn_remaining, Modifier};
use crate::type_def::{TypeDefHandler, TypeDelegate};
use crate::warning::{ConversionWarning, WarningManager};

/// Imports Stride code gets implicitly.
const IMPLICIT_IMPORT: &str = "lang.stride.*";

/// The result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    elements: Vec<CodeElement>,
    warnings: Vec<ConversionWarning>,
}

impl Conversion {
    /// The converted top-level elements, in source order.
    pub fn elements(&self) -> &[CodeElement] {
        &self.elements
    }

    /// Every warning recorded, in the order it was encountered.
    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Vec<CodeElement>, Vec<ConversionWarning>) {
        (self.elements, self.warnings)
    }
}

/// Builds a Stride element tree from the events of one scan.
///
/// A converter is used for exactly one input. Feed it to
/// [`stride_syntax::scan`] and then call [`Converter::finish`].
#[derive(Debug)]
pub struct Converter<'s> {
    source: &'s str,
    /// Start of the most recently consumed token.
    current: usize,
    warnings: WarningManager,
    statements: Vec<StatementHandler>,
    captures: Vec<ExpressionCapture>,
    arguments: Vec<ArgumentListHandler>,
    type_defs: Vec<TypeDefHandler>,
    methods: Vec<MethodBuilder>,
    vars: Vec<VarBuilder>,
    ifs: Vec<IfBuilder>,
    fors: Vec<ForBuilder>,
    switches: Vec<SwitchBuilder>,
    tries: Vec<TryBuilder>,
    modifiers: Vec<Vec<Modifier>>,
    type_expectations: Vec<TypeExpectation>,
    /// Types seen before anything claimed them.
    parked_types: Vec<String>,
    package: Option<String>,
    imports: Vec<String>,
    failure: Option<ConvertError>,
}

fn unbalanced(event: &'static str, position: usize) -> ConvertError {
    ConvertError::UnbalancedEvents { event, position }
}

fn top_of<'a, T>(
    stack: &'a mut [T],
    event: &'static str,
    position: usize,
) -> Result<&'a mut T, ConvertError> {
    stack.last_mut().ok_or(unbalanced(event, position))
}

fn pop_of<T>(stack: &mut Vec<T>, event: &'static str, position: usize) -> Result<T, ConvertError> {
    stack.pop().ok_or(unbalanced(event, position))
}

/// Joins the tokens of a type, keeping a space only where two words meet.
fn type_text(tokens: &[Token]) -> String {
    let is_word = |t: &Token| matches!(t.kind, TokenKind::Ident | TokenKind::Keyword);
    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    for token in tokens {
        if let Some(prev) = prev {
            if is_word(token) && (is_word(prev) || prev.is("?")) {
                out.push(' ');
            }
        }
        out.push_str(&token.text);
        prev = Some(token);
    }
    out
}

fn joined(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

impl<'s> Converter<'s> {
    pub fn new(source: &'s str, style: WarningStyle) -> Self {
        Self {
            source,
            current: 0,
            warnings: WarningManager::new(style),
            statements: vec![StatementHandler::root()],
            captures: Vec::new(),
            arguments: Vec::new(),
            type_defs: Vec::new(),
            methods: Vec::new(),
            vars: Vec::new(),
            ifs: Vec::new(),
            fors: Vec::new(),
            switches: Vec::new(),
            tries: Vec::new(),
            modifiers: Vec::new(),
            type_expectations: Vec::new(),
            parked_types: Vec::new(),
            package: None,
            imports: Vec::new(),
            failure: None,
        }
    }

    /// Collects the converted elements.
    ///
    /// Comments still pending anywhere in the root are emitted at the end.
    /// Frames left open by a truncated event stream are dropped.
    pub fn finish(mut self) -> Result<Conversion, ConvertError> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        if self.statements.len() > 1 {
            tracing::warn!(
                target: "stride.convert",
                open = self.statements.len() - 1,
                "statement handlers left open at end of input"
            );
            self.statements.truncate(1);
        }
        self.flush_warnings();
        let elements = match self.statements.pop() {
            Some(root) => root.close(self.current, true).1,
            None => Vec::new(),
        };
        Ok(Conversion {
            elements,
            warnings: self.warnings.into_warnings(),
        })
    }

    /// Runs one event handler unless a failure was already recorded.
    fn guard(&mut self, f: impl FnOnce(&mut Self) -> Result<(), ConvertError>) {
        if self.failure.is_some() {
            return;
        }
        if let Err(err) = f(self) {
            tracing::warn!(target: "stride.convert", error = %err, "conversion aborted");
            self.failure = Some(err);
        }
    }

    fn warn(&mut self, warning: ConversionWarning) {
        self.warnings.add(warning);
        self.flush_warnings();
    }

    /// Moves warning markers into the statement handler on top.
    fn flush_warnings(&mut self) {
        let pending = self.warnings.take_pending();
        if let Some(top) = self.statements.last_mut() {
            for marker in pending {
                top.add_comment(PendingComment::marker(marker));
            }
        }
    }

    // ---- statement handlers ------------------------------------------------

    fn push_statements(&mut self, on_end: BlockEnd, single: bool) {
        self.flush_warnings();
        let mut handler = StatementHandler::new(on_end, single);
        if let Some(parent) = self.statements.last_mut() {
            handler.steal_comments(parent, self.current);
        }
        tracing::trace!(
            target: "stride.convert",
            handler = ?handler.on_end(),
            depth = self.statements.len(),
            "push statement handler"
        );
        self.statements.push(handler);
    }

    /// Closes the handler on top; comments it could not place yet move to
    /// its parent.
    fn pop_statements(
        &mut self,
        event: &'static str,
    ) -> Result<(BlockEnd, Vec<CodeElement>), ConvertError> {
        self.flush_warnings();
        if self.statements.len() <= 1 {
            return Err(unbalanced(event, self.current));
        }
        let handler = pop_of(&mut self.statements, event, self.current)?;
        let (on_end, content, leftover) = handler.close(self.current, false);
        tracing::trace!(
            target: "stride.convert",
            handler = ?on_end,
            depth = self.statements.len(),
            "pop statement handler"
        );
        if let Some(parent) = self.statements.last_mut() {
            for comment in leftover {
                parent.add_comment(comment);
            }
        }
        Ok((on_end, content))
    }

    fn found_statement(&mut self, element: CodeElement) -> Result<(), ConvertError> {
        self.found_statements(vec![element])
    }

    fn found_statements(&mut self, elements: Vec<CodeElement>) -> Result<(), ConvertError> {
        self.flush_warnings();
        let current = self.current;
        let depth = self.statements.len();
        let top = top_of(&mut self.statements, "statement", current)?;
        if depth == 1 {
            for element in &elements {
                tracing::debug!(
                    target: "stride.convert",
                    kind = element.kind_name(),
                    "converted top-level element"
                );
            }
        }
        top.found(current, elements);
        if top.is_single() {
            let (on_end, content) = self.pop_statements("statement")?;
            self.end_single(on_end, content)?;
        }
        Ok(())
    }

    /// Delivers the content of a single-statement handler that just closed.
    fn end_single(&mut self, on_end: BlockEnd, content: Vec<CodeElement>) -> Result<(), ConvertError> {
        let position = self.current;
        match on_end {
            BlockEnd::WhileBody(condition) => self.found_statement(CodeElement::While {
                condition,
                body: content,
            }),
            BlockEnd::IfBranch => {
                top_of(&mut self.ifs, "if branch", position)?.add_block(content);
                Ok(())
            }
            BlockEnd::ForBody => {
                let builder = pop_of(&mut self.fors, "for body", position)?;
                let elements = builder.build(content, &mut self.warnings);
                self.found_statements(elements)
            }
            BlockEnd::CatchBody => {
                top_of(&mut self.tries, "catch body", position)?.add_catch_body(content);
                Ok(())
            }
            BlockEnd::FinallyBody => {
                top_of(&mut self.tries, "finally body", position)?.set_finally(content);
                Ok(())
            }
            BlockEnd::DoWhileBody => {
                // The loop condition follows the body.
                self.push_capture(ExpressionConsumer::Discard);
                self.found_statements(Vec::new())
            }
            BlockEnd::Discard => Ok(()),
            BlockEnd::Root
            | BlockEnd::Block
            | BlockEnd::MethodBody
            | BlockEnd::TypeBody
            | BlockEnd::SwitchSegment
            | BlockEnd::TryBody => Ok(()),
        }
    }

    // ---- expressions -------------------------------------------------------

    fn push_capture(&mut self, consumer: ExpressionConsumer) {
        self.captures.push(ExpressionCapture::new(consumer));
    }

    fn deliver(&mut self, consumer: ExpressionConsumer, expression: Expression) -> Result<(), ConvertError> {
        let position = self.current;
        match consumer {
            ExpressionConsumer::Statement => {
                let element = expression.into_statement(&mut self.warnings);
                self.found_statement(element)?;
            }
            ExpressionConsumer::Discard => {}
            ExpressionConsumer::WhileCondition => {
                let condition = expression.into_filled(&mut self.warnings);
                self.push_statements(BlockEnd::WhileBody(condition), true);
            }
            ExpressionConsumer::IfCondition => {
                let condition = expression.into_filled(&mut self.warnings);
                self.ifs.push(IfBuilder::new(condition));
            }
            ExpressionConsumer::ElseIfCondition => {
                let condition = expression.into_filled(&mut self.warnings);
                top_of(&mut self.ifs, "else if", position)?.add_condition(condition);
            }
            ExpressionConsumer::ReturnValue => {
                let value = expression.into_optional(&mut self.warnings);
                self.found_statement(CodeElement::Return(Some(value)))?;
            }
            ExpressionConsumer::Throw => {
                let value = expression.into_filled(&mut self.warnings);
                self.found_statement(CodeElement::Throw(value))?;
            }
            ExpressionConsumer::VarInit(mut var) => {
                var.init = Some(expression.into_filled(&mut self.warnings));
                self.found_statement(CodeElement::Var(var))?;
            }
            ExpressionConsumer::Argument => {
                top_of(&mut self.arguments, "argument", position)?
                    .args
                    .push(expression);
            }
            ExpressionConsumer::SwitchExpression => {
                top_of(&mut self.switches, "switch", position)?.set_expression(expression);
            }
            ExpressionConsumer::SwitchCase => {
                self.store_switch_segment("case")?;
                top_of(&mut self.switches, "case", position)?.begin_case(expression);
                self.push_statements(BlockEnd::SwitchSegment, false);
            }
            ExpressionConsumer::ForEach => {
                top_of(&mut self.fors, "for-each", position)?.set_each(expression);
            }
            ExpressionConsumer::ForVarInit => {
                top_of(&mut self.fors, "for init", position)?.set_last_init(expression);
            }
            ExpressionConsumer::ForTest => {
                top_of(&mut self.fors, "for test", position)?.set_test(expression);
            }
            ExpressionConsumer::ForUpdate => {
                top_of(&mut self.fors, "for update", position)?.set_update(expression);
            }
        }
        self.flush_warnings();
        Ok(())
    }

    fn record_operator(&mut self, op: &Token) {
        if let Some(capture) = self.captures.last_mut() {
            capture.operator(&op.text, op.span);
        }
    }

    fn mask_top(&mut self, start: usize, end: usize) {
        if let Some(capture) = self.captures.last_mut() {
            capture.mask(stride_syntax::Span::new(start, end));
        }
    }

    // ---- declarations ------------------------------------------------------

    fn park_or_deliver_type(&mut self, text: String) -> Result<(), ConvertError> {
        let position = self.current;
        match self.type_expectations.last() {
            None => self.parked_types.push(text),
            Some(TypeExpectation::Throws) => {
                top_of(&mut self.methods, "throws", position)?
                    .throws
                    .push(TypeSlot::new(text));
            }
            Some(TypeExpectation::Extends) => {
                if let Some(delegate) = self.outermost_delegate() {
                    delegate.add_extends(text);
                }
            }
            Some(TypeExpectation::Implements) => {
                if let Some(delegate) = self.outermost_delegate() {
                    delegate.add_implements(text);
                }
            }
        }
        Ok(())
    }

    fn claim_type(&mut self, event: &'static str) -> Result<String, ConvertError> {
        pop_of(&mut self.parked_types, event, self.current)
    }

    /// The delegate of the type declaration being converted, unless an inner
    /// type is currently open inside it.
    fn outermost_delegate(&mut self) -> Option<&mut TypeDelegate> {
        self.type_defs
            .last_mut()
            .filter(|td| td.nested == 0)
            .and_then(|td| td.delegate.as_mut())
    }

    fn current_modifiers(&self) -> Vec<Modifier> {
        self.modifiers.last().cloned().unwrap_or_default()
    }

    /// Members of an interface are public unless stated otherwise; members
    /// of anything else are protected.
    fn member_access(&self) -> AccessPermission {
        match self.type_defs.last() {
            Some(td) if td.nested == 0 && td.is_interface() => AccessPermission::Public,
            _ => AccessPermission::Protected,
        }
    }

    fn take_javadoc(&mut self) -> Option<String> {
        let current = self.current;
        self.statements
            .last_mut()
            .and_then(|handler| handler.take_javadoc(current))
    }

    fn start_method(&mut self, return_type: Option<String>, name: &Token) {
        let doc = self.take_javadoc();
        let modifiers = self.current_modifiers();
        self.methods
            .push(MethodBuilder::new(return_type, name.text.clone(), modifiers, doc));
    }

    fn declare_var(
        &mut self,
        event: &'static str,
        name: &Token,
        initialized: bool,
    ) -> Result<(), ConvertError> {
        let var = top_of(&mut self.vars, event, self.current)?.declare(&name.text, &mut self.warnings);
        self.flush_warnings();
        if initialized {
            self.push_capture(ExpressionConsumer::VarInit(var));
            Ok(())
        } else {
            self.found_statement(CodeElement::Var(var))
        }
    }

    fn store_switch_segment(&mut self, event: &'static str) -> Result<(), ConvertError> {
        let (_, content) = self.pop_statements(event)?;
        top_of(&mut self.switches, event, self.current)?.store_segment(content);
        Ok(())
    }

    fn deliver_arguments(&mut self, handler: ArgumentListHandler, rparen: &Token) -> Result<(), ConvertError> {
        match handler.target {
            ArgsTarget::ConstructorDelegate => {
                top_of(&mut self.methods, "constructor call", self.current)?.delegate_args =
                    handler.args;
            }
            ArgsTarget::Annotation => {
                let annotation = self.modifiers.last_mut().and_then(|m| m.last_mut());
                if let Some(Modifier::Annotation { params, span, .. }) = annotation {
                    *params = Some(handler.args);
                    span.end = rparen.span.end;
                }
            }
        }
        Ok(())
    }

    fn imports_for_unit(&self) -> Vec<String> {
        self.imports
            .iter()
            .filter(|import| *import != IMPLICIT_IMPORT)
            .cloned()
            .collect()
    }
}

impl SyntaxListener for Converter<'_> {
    fn token_consumed(&mut self, token: &Token) {
        self.current = token.span.start;
    }

    fn got_comment(&mut self, token: &Token) {
        self.guard(|c| {
            if let Some(top) = c.statements.last_mut() {
                top.add_comment(PendingComment::at(token.span.start, token.text.clone()));
            }
            for capture in &mut c.captures {
                capture.mask(token.span);
            }
            Ok(())
        });
    }

    fn parse_failed(&mut self, position: usize, message: &str) {
        if self.failure.is_none() {
            self.failure = Some(ConvertError::Parse {
                position,
                message: message.to_owned(),
            });
        }
    }

    // ---- compilation unit --------------------------------------------------

    fn got_package(&mut self, name: &[Token]) {
        self.guard(|c| {
            c.package = Some(joined(name));
            Ok(())
        });
    }

    fn got_import(&mut self, name: &[Token], _is_static: bool) {
        self.guard(|c| {
            c.imports.push(joined(name));
            Ok(())
        });
    }

    fn got_wildcard_import(&mut self, name: &[Token], _is_static: bool) {
        self.guard(|c| {
            c.imports.push(format!("{}.*", joined(name)));
            Ok(())
        });
    }

    fn got_top_level_decl(&mut self) {
        self.guard(|c| {
            c.type_defs.push(TypeDefHandler::top_level());
            Ok(())
        });
    }

    fn got_inner_type(&mut self, keyword: &Token) {
        self.guard(|c| {
            c.warn(ConversionWarning::feature(format!("inner {}", keyword.text)));
            match c.type_defs.last_mut() {
                Some(td) => td.nested += 1,
                None => c.type_defs.push(TypeDefHandler::detached_inner()),
            }
            Ok(())
        });
    }

    fn got_type_def(&mut self, _keyword: &Token, kind: TypeDefKind) {
        self.guard(|c| {
            match kind {
                TypeDefKind::Enum => c.warn(ConversionWarning::feature("enum")),
                TypeDefKind::Annotation => c.warn(ConversionWarning::feature("annotation")),
                TypeDefKind::Class | TypeDefKind::Interface => {}
            }
            let nested = top_of(&mut c.type_defs, "got_type_def", c.current)?.nested;
            if nested > 0 {
                return Ok(());
            }
            let modifiers = c.current_modifiers();
            let doc = c.take_javadoc();
            let mut delegate = match kind {
                TypeDefKind::Class => TypeDelegate::class(modifiers, doc),
                TypeDefKind::Interface => TypeDelegate::interface(modifiers, doc),
                TypeDefKind::Enum | TypeDefKind::Annotation => return Ok(()),
            };
            // Comments before the header move into the type body.
            let current = c.current;
            if let Some(comment) = c.statements.last_mut().and_then(|s| s.collate(current, false)) {
                delegate.add_member(comment, &mut c.warnings);
            }
            top_of(&mut c.type_defs, "got_type_def", current)?.delegate = Some(delegate);
            Ok(())
        });
    }

    fn got_type_def_name(&mut self, name: &Token) {
        self.guard(|c| {
            if let Some(delegate) = c.outermost_delegate() {
                delegate.set_name(&name.text);
            }
            Ok(())
        });
    }

    fn got_type_def_type_params(&mut self) {
        self.guard(|c| {
            if c.type_defs.last().is_some_and(|td| td.nested == 0) {
                c.warn(ConversionWarning::feature("generic classes"));
            }
            Ok(())
        });
    }

    fn begin_type_def_extends(&mut self) {
        self.guard(|c| {
            c.type_expectations.push(TypeExpectation::Extends);
            Ok(())
        });
    }

    fn end_type_def_extends(&mut self) {
        self.guard(|c| pop_of(&mut c.type_expectations, "end_type_def_extends", c.current).map(drop));
    }

    fn begin_type_def_implements(&mut self) {
        self.guard(|c| {
            c.type_expectations.push(TypeExpectation::Implements);
            Ok(())
        });
    }

    fn end_type_def_implements(&mut self) {
        self.guard(|c| {
            pop_of(&mut c.type_expectations, "end_type_def_implements", c.current).map(drop)
        });
    }

    fn begin_type_body(&mut self, _lcurly: &Token) {
        self.guard(|c| {
            c.push_statements(BlockEnd::TypeBody, false);
            Ok(())
        });
    }

    fn end_type_body(&mut self, _rcurly: &Token) {
        self.guard(|c| {
            let (_, content) = c.pop_statements("end_type_body")?;
            let type_defs = &mut c.type_defs;
            let warnings = &mut c.warnings;
            if let Some(delegate) = type_defs
                .last_mut()
                .filter(|td| td.nested == 0)
                .and_then(|td| td.delegate.as_mut())
            {
                for member in content {
                    delegate.add_member(member, warnings);
                }
            }
            Ok(())
        });
    }

    fn got_type_def_end(&mut self) {
        self.guard(|c| {
            let td = top_of(&mut c.type_defs, "got_type_def_end", c.current)?;
            if td.nested > 0 {
                td.nested -= 1;
                if td.nested == 0 && !td.emit {
                    c.type_defs.pop();
                }
                return Ok(());
            }
            let td = pop_of(&mut c.type_defs, "got_type_def_end", c.current)?;
            if let (Some(delegate), true) = (td.delegate, td.emit) {
                let imports = c.imports_for_unit();
                let element = delegate.end(c.package.clone(), imports, &mut c.warnings);
                c.found_statement(element)?;
            }
            Ok(())
        });
    }

    fn finished_compilation_unit(&mut self, imports_only: bool) {
        self.guard(|c| {
            if !imports_only {
                return Ok(());
            }
            let elements = c
                .package
                .clone()
                .map(CodeElement::Package)
                .into_iter()
                .chain(c.imports_for_unit().into_iter().map(CodeElement::Import))
                .collect();
            c.found_statements(elements)
        });
    }

    // ---- declarations ------------------------------------------------------

    fn got_decl_begin(&mut self) {
        self.guard(|c| {
            c.modifiers.push(Vec::new());
            Ok(())
        });
    }

    fn got_modifier(&mut self, token: &Token) {
        self.guard(|c| {
            if let Some(modifiers) = c.modifiers.last_mut() {
                modifiers.push(Modifier::Keyword {
                    keyword: token.text.clone(),
                    span: token.span,
                });
            }
            Ok(())
        });
    }

    fn got_annotation(&mut self, name: &[Token], params_follow: bool) {
        self.guard(|c| {
            let (Some(first), Some(last)) = (name.first(), name.last()) else {
                return Ok(());
            };
            let Some(modifiers) = c.modifiers.last_mut() else {
                return Ok(());
            };
            let start = c
                .source
                .get(..first.span.start)
                .and_then(|before| before.rfind('@'))
                .unwrap_or(first.span.start);
            modifiers.push(Modifier::Annotation {
                name: joined(name),
                params: None,
                span: stride_syntax::Span::new(start, last.span.end),
            });
            if params_follow {
                c.arguments.push(ArgumentListHandler::new(ArgsTarget::Annotation));
            }
            Ok(())
        });
    }

    fn modifiers_consumed(&mut self) {
        self.guard(|c| pop_of(&mut c.modifiers, "modifiers_consumed", c.current).map(drop));
    }

    fn got_type_spec(&mut self, tokens: &[Token]) {
        self.guard(|c| c.park_or_deliver_type(type_text(tokens)));
    }

    fn got_array_declarator(&mut self) {
        self.guard(|c| {
            if let Some(ty) = c.parked_types.last_mut() {
                ty.push_str("[]");
            }
            Ok(())
        });
    }

    fn got_method_type_params(&mut self) {
        self.guard(|c| {
            c.warn(ConversionWarning::feature("generic methods"));
            Ok(())
        });
    }

    fn got_method_declaration(&mut self, name: &Token) {
        self.guard(|c| {
            let return_type = c.claim_type("got_method_declaration")?;
            c.start_method(Some(return_type), name);
            Ok(())
        });
    }

    fn got_constructor_decl(&mut self, name: &Token) {
        self.guard(|c| {
            c.start_method(None, name);
            Ok(())
        });
    }

    fn begin_formal_parameter(&mut self) {
        self.guard(|c| {
            c.modifiers.push(Vec::new());
            Ok(())
        });
    }

    fn got_method_parameter(&mut self, name: &Token, ellipsis: Option<&Token>) {
        self.guard(|c| {
            if ellipsis.is_some() {
                c.warn(ConversionWarning::feature("varargs"));
            }
            let ty = c.claim_type("got_method_parameter")?;
            top_of(&mut c.methods, "got_method_parameter", c.current)?
                .params
                .push(Param {
                    ty: TypeSlot::new(ty),
                    name: name.text.clone(),
                });
            Ok(())
        });
    }

    fn begin_throws(&mut self) {
        self.guard(|c| {
            c.type_expectations.push(TypeExpectation::Throws);
            Ok(())
        });
    }

    fn end_throws(&mut self) {
        self.guard(|c| pop_of(&mut c.type_expectations, "end_throws", c.current).map(drop));
    }

    fn begin_method_body(&mut self, _lcurly: &Token) {
        self.guard(|c| {
            top_of(&mut c.methods, "begin_method_body", c.current)?.has_body = true;
            c.push_statements(BlockEnd::MethodBody, false);
            Ok(())
        });
    }

    fn end_method_decl(&mut self) {
        self.guard(|c| {
            let method = pop_of(&mut c.methods, "end_method_decl", c.current)?;
            let body = if method.has_body {
                c.pop_statements("end_method_decl")?.1
            } else {
                Vec::new()
            };
            let access = c.member_access();
            let element = method.build(body, access, &mut c.warnings);
            c.found_statement(element)
        });
    }

    fn got_constructor_call(&mut self, keyword: &Token) {
        self.guard(|c| {
            let Some(method) = c.methods.last_mut().filter(|m| m.return_type.is_none()) else {
                // Not inside a constructor: an ordinary call.
                return Ok(());
            };
            method.delegate = Some(if keyword.text == "super" {
                SuperThis::Super
            } else {
                SuperThis::This
            });
            // Replace the statement capture opened for this expression.
            c.captures.pop();
            c.push_capture(ExpressionConsumer::Discard);
            c.arguments
                .push(ArgumentListHandler::new(ArgsTarget::ConstructorDelegate));
            Ok(())
        });
    }

    fn begin_field_declarations(&mut self) {
        self.guard(|c| {
            let ty = c.claim_type("begin_field_declarations")?;
            let builder = VarBuilder::new(ty, c.current_modifiers(), Some(c.member_access()));
            c.vars.push(builder);
            Ok(())
        });
    }

    fn got_field(&mut self, name: &Token, initialized: bool) {
        self.guard(|c| c.declare_var("got_field", name, initialized));
    }

    fn got_subsequent_field(&mut self, name: &Token, initialized: bool) {
        self.guard(|c| c.declare_var("got_subsequent_field", name, initialized));
    }

    fn end_field_declarations(&mut self) {
        self.guard(|c| pop_of(&mut c.vars, "end_field_declarations", c.current).map(drop));
    }

    fn got_variable_decl(&mut self, name: &Token, initialized: bool) {
        self.guard(|c| {
            let ty = c.claim_type("got_variable_decl")?;
            c.vars.push(VarBuilder::new(ty, c.current_modifiers(), None));
            c.declare_var("got_variable_decl", name, initialized)
        });
    }

    fn got_subsequent_var(&mut self, name: &Token, initialized: bool) {
        self.guard(|c| c.declare_var("got_subsequent_var", name, initialized));
    }

    fn end_variable_decls(&mut self) {
        self.guard(|c| pop_of(&mut c.vars, "end_variable_decls", c.current).map(drop));
    }

    fn begin_init_block(&mut self, _lcurly: &Token) {
        self.guard(|c| {
            c.warn(ConversionWarning::feature("initializer block"));
            c.push_statements(BlockEnd::Discard, false);
            Ok(())
        });
    }

    fn end_init_block(&mut self) {
        self.guard(|c| c.pop_statements("end_init_block").map(drop));
    }

    // ---- statements --------------------------------------------------------

    fn begin_stmtblock_body(&mut self, _lcurly: &Token) {
        self.guard(|c| {
            c.push_statements(BlockEnd::Block, false);
            Ok(())
        });
    }

    fn end_stmtblock_body(&mut self) {
        self.guard(|c| {
            let (_, content) = c.pop_statements("end_stmtblock_body")?;
            c.found_statements(content)
        });
    }

    fn got_statement_expression(&mut self) {
        self.guard(|c| {
            c.push_capture(ExpressionConsumer::Statement);
            Ok(())
        });
    }

    fn got_empty_statement(&mut self) {
        self.guard(|c| c.found_statements(Vec::new()));
    }

    fn got_return_statement(&mut self, has_value: bool) {
        self.guard(|c| {
            if has_value {
                c.push_capture(ExpressionConsumer::ReturnValue);
                Ok(())
            } else {
                c.found_statement(CodeElement::Return(None))
            }
        });
    }

    fn got_throw(&mut self) {
        self.guard(|c| {
            c.push_capture(ExpressionConsumer::Throw);
            Ok(())
        });
    }

    fn got_break_continue(&mut self, keyword: &Token, label: Option<&Token>) {
        self.guard(|c| {
            if keyword.text == "continue" {
                c.warn(ConversionWarning::feature("continue"));
                return c.found_statements(Vec::new());
            }
            c.found_statement(CodeElement::Break)?;
            if label.is_some() {
                c.warn(ConversionWarning::feature("break label"));
            }
            Ok(())
        });
    }

    fn got_statement_label(&mut self, _label: &Token) {
        self.guard(|c| {
            c.warn(ConversionWarning::feature("label"));
            Ok(())
        });
    }

    fn begin_while_loop(&mut self) {
        self.guard(|c| {
            c.push_capture(ExpressionConsumer::WhileCondition);
            Ok(())
        });
    }

    fn begin_do_while(&mut self) {
        self.guard(|c| {
            c.warn(ConversionWarning::feature("do-while loop"));
            c.push_statements(BlockEnd::DoWhileBody, true);
            Ok(())
        });
    }

    fn begin_if_stmt(&mut self) {
        self.guard(|c| {
            c.push_capture(ExpressionConsumer::IfCondition);
            Ok(())
        });
    }

    fn begin_if_cond_block(&mut self) {
        self.guard(|c| {
            c.push_statements(BlockEnd::IfBranch, true);
            Ok(())
        });
    }

    fn got_else_if(&mut self) {
        self.guard(|c| {
            c.push_capture(ExpressionConsumer::ElseIfCondition);
            Ok(())
        });
    }

    fn end_if_stmt(&mut self) {
        self.guard(|c| {
            let builder = pop_of(&mut c.ifs, "end_if_stmt", c.current)?;
            c.found_statement(builder.build())
        });
    }

    fn begin_for_loop(&mut self) {
        self.guard(|c| {
            c.fors.push(ForBuilder::default());
            c.modifiers.push(Vec::new());
            Ok(())
        });
    }

    fn got_for_init(&mut self, name: &Token) {
        self.guard(|c| {
            let ty = c.claim_type("got_for_init")?;
            let mut modifiers = c.current_modifiers();
            take_keyword(&mut modifiers, "final");
            warn_remaining("for-loop", &modifiers, &mut c.warnings);
            c.flush_warnings();
            let builder = top_of(&mut c.fors, "got_for_init", c.current)?;
            builder.set_type(ty);
            builder.add_var(name.text.clone());
            Ok(())
        });
    }

    fn got_subsequent_for_init(&mut self, name: &Token, initialized: bool) {
        self.guard(|c| {
            top_of(&mut c.fors, "got_subsequent_for_init", c.current)?.add_var(name.text.clone());
            if initialized {
                c.push_capture(ExpressionConsumer::ForVarInit);
            }
            Ok(())
        });
    }

    fn determined_for_loop(&mut self, for_each: bool, initialized: bool) {
        self.guard(|c| {
            if for_each {
                c.push_capture(ExpressionConsumer::ForEach);
            } else if initialized {
                c.push_capture(ExpressionConsumer::ForVarInit);
            }
            Ok(())
        });
    }

    fn got_for_test(&mut self, present: bool) {
        self.guard(|c| {
            if present {
                c.push_capture(ExpressionConsumer::ForTest);
            }
            Ok(())
        });
    }

    fn got_for_increment(&mut self, present: bool) {
        self.guard(|c| {
            if present {
                c.push_capture(ExpressionConsumer::ForUpdate);
            }
            Ok(())
        });
    }

    fn begin_for_loop_body(&mut self) {
        self.guard(|c| {
            c.push_statements(BlockEnd::ForBody, true);
            Ok(())
        });
    }

    fn begin_switch_stmt(&mut self) {
        self.guard(|c| {
            c.switches.push(SwitchBuilder::default());
            c.push_capture(ExpressionConsumer::SwitchExpression);
            Ok(())
        });
    }

    fn begin_switch_block(&mut self) {
        self.guard(|c| {
            c.push_statements(BlockEnd::SwitchSegment, false);
            Ok(())
        });
    }

    fn got_switch_case(&mut self) {
        self.guard(|c| {
            c.push_capture(ExpressionConsumer::SwitchCase);
            Ok(())
        });
    }

    fn got_switch_default(&mut self) {
        self.guard(|c| {
            c.store_switch_segment("got_switch_default")?;
            top_of(&mut c.switches, "got_switch_default", c.current)?.begin_default();
            c.push_statements(BlockEnd::SwitchSegment, false);
            Ok(())
        });
    }

    fn end_switch_block(&mut self) {
        self.guard(|c| {
            c.store_switch_segment("end_switch_block")?;
            let builder = pop_of(&mut c.switches, "end_switch_block", c.current)?;
            let element = builder.build(&mut c.warnings);
            c.found_statement(element)
        });
    }

    fn begin_try_catch_stmt(&mut self, has_resources: bool) {
        self.guard(|c| {
            if has_resources {
                c.warn(ConversionWarning::feature("try-with-resource"));
            }
            c.tries.push(TryBuilder::default());
            Ok(())
        });
    }

    fn begin_try_block(&mut self) {
        self.guard(|c| {
            c.push_statements(BlockEnd::TryBody, false);
            Ok(())
        });
    }

    fn end_try_block(&mut self) {
        self.guard(|c| {
            let (_, content) = c.pop_statements("end_try_block")?;
            top_of(&mut c.tries, "end_try_block", c.current)?.set_body(content);
            Ok(())
        });
    }

    fn got_catch_finally(&mut self, keyword: &Token) {
        self.guard(|c| {
            if keyword.text == "finally" {
                c.push_statements(BlockEnd::FinallyBody, true);
            } else {
                top_of(&mut c.tries, "got_catch_finally", c.current)?.begin_catch();
            }
            Ok(())
        });
    }

    fn got_multi_catch(&mut self) {
        self.guard(|c| {
            let ty = c.claim_type("got_multi_catch")?;
            top_of(&mut c.tries, "got_multi_catch", c.current)?.add_catch_type(ty);
            Ok(())
        });
    }

    fn got_catch_var_name(&mut self, name: &Token) {
        self.guard(|c| {
            let ty = c.claim_type("got_catch_var_name")?;
            let builder = top_of(&mut c.tries, "got_catch_var_name", c.current)?;
            builder.add_catch_type(ty);
            builder.set_catch_name(name.text.clone());
            c.push_statements(BlockEnd::CatchBody, true);
            Ok(())
        });
    }

    fn end_try_catch_stmt(&mut self) {
        self.guard(|c| {
            let builder = pop_of(&mut c.tries, "end_try_catch_stmt", c.current)?;
            c.found_statement(builder.build())
        });
    }

    fn got_assert(&mut self) {
        self.guard(|c| {
            c.warn(ConversionWarning::feature("assert"));
            c.push_capture(ExpressionConsumer::Discard);
            c.found_statements(Vec::new())
        });
    }

    fn begin_synchronized_block(&mut self) {
        self.guard(|c| {
            c.warn(ConversionWarning::feature("synchronized"));
            c.push_capture(ExpressionConsumer::Discard);
            Ok(())
        });
    }

    // ---- expressions -------------------------------------------------------

    fn begin_expression(&mut self, first: &Token) {
        self.guard(|c| {
            if let Some(capture) = c.captures.last_mut() {
                capture.begin(first.span.start);
            }
            Ok(())
        });
    }

    fn end_expression(&mut self, next: &Token) {
        self.guard(|c| {
            let finished = c.captures.last_mut().is_some_and(ExpressionCapture::end);
            if !finished {
                return Ok(());
            }
            let capture = pop_of(&mut c.captures, "end_expression", c.current)?;
            let (consumer, expression) = capture.finish(c.source, next.span.start);
            c.deliver(consumer, expression)
        });
    }

    fn got_binary_operator(&mut self, op: &Token) {
        self.guard(|c| {
            c.record_operator(op);
            Ok(())
        });
    }

    fn got_unary_operator(&mut self, op: &Token) {
        self.guard(|c| {
            c.record_operator(op);
            Ok(())
        });
    }

    fn got_postfix_operator(&mut self, op: &Token) {
        self.guard(|c| {
            c.record_operator(op);
            Ok(())
        });
    }

    fn got_question_operator(&mut self, op: &Token) {
        self.guard(|c| {
            c.warn(ConversionWarning::feature("conditional operator (.. ? .. : ..)"));
            c.mask_top(op.span.start, op.span.end);
            Ok(())
        });
    }

    fn got_question_colon(&mut self, op: &Token) {
        self.guard(|c| {
            c.mask_top(op.span.start, op.span.end);
            Ok(())
        });
    }

    fn begin_argument_list(&mut self, _lparen: &Token) {
        self.guard(|c| {
            if let Some(handler) = c.arguments.last_mut() {
                handler.outstanding += 1;
                if handler.outstanding == 1 {
                    c.push_capture(ExpressionConsumer::Argument);
                }
            }
            Ok(())
        });
    }

    fn end_argument(&mut self) {
        self.guard(|c| {
            if c.arguments.last().is_some_and(|h| h.outstanding == 1) {
                c.push_capture(ExpressionConsumer::Argument);
            }
            Ok(())
        });
    }

    fn end_argument_list(&mut self, rparen: &Token) {
        self.guard(|c| {
            let Some(handler) = c.arguments.last_mut() else {
                return Ok(());
            };
            if handler.outstanding > 1 {
                handler.outstanding -= 1;
                return Ok(());
            }
            // Drop the capture opened for an argument that never came.
            if c
                .captures
                .last()
                .is_some_and(|cap| matches!(cap.consumer(), ExpressionConsumer::Argument))
            {
                c.captures.pop();
            }
            let handler = pop_of(&mut c.arguments, "end_argument_list", c.current)?;
            c.deliver_arguments(handler, rparen)
        });
    }

    fn begin_anon_class_body(&mut self, lcurly: &Token) {
        self.guard(|c| {
            if let Some(capture) = c.captures.last_mut() {
                capture.begin_mask(lcurly.span.start);
            }
            c.warn(ConversionWarning::feature("anonymous class"));
            c.push_statements(BlockEnd::Discard, false);
            Ok(())
        });
    }

    fn end_anon_class_body(&mut self, rcurly: &Token) {
        self.guard(|c| {
            c.pop_statements("end_anon_class_body")?;
            if let Some(capture) = c.captures.last_mut() {
                capture.end_mask(rcurly.span.end);
            }
            Ok(())
        });
    }

    fn got_lambda_formal_param(&mut self) {
        self.guard(|c| {
            c.modifiers.push(Vec::new());
            Ok(())
        });
    }

    fn got_lambda_formal_type(&mut self, tokens: &[Token]) {
        self.guard(|c| {
            c.warn(ConversionWarning::feature("lambda parameter type"));
            if let (Some(first), Some(last)) = (tokens.first(), tokens.last()) {
                c.mask_top(first.span.start, last.span.end);
            }
            Ok(())
        });
    }

    fn got_lambda_formal_name(&mut self, _name: &Token) {
        self.guard(|c| {
            let modifiers = c.current_modifiers();
            warn_remaining("lambda parameter", &modifiers, &mut c.warnings);
            c.flush_warnings();
            for modifier in &modifiers {
                let span = modifier.span();
                c.mask_top(span.start, span.end);
            }
            Ok(())
        });
    }

    fn begin_lambda(&mut self, block: Option<&Token>) {
        self.guard(|c| {
            if let Some(lcurly) = block {
                c.warn(ConversionWarning::feature("lambda block"));
                if let Some(capture) = c.captures.last_mut() {
                    capture.begin_mask(lcurly.span.start);
                }
                c.push_statements(BlockEnd::Discard, true);
            }
            Ok(())
        });
    }

    fn end_lambda(&mut self, block_end: Option<&Token>) {
        self.guard(|c| {
            if let (Some(rcurly), Some(capture)) = (block_end, c.captures.last_mut()) {
                capture.end_mask(rcurly.span.end);
            }
            Ok(())
        });
    }
}
