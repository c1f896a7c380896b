//! Recursive-descent recognizer for Java source that reports
//! [`SyntaxListener`] events instead of building a tree.
//!
//! Only the token stream is materialized up front. Comments are held back and
//! reported once the token following them enters the lookahead window, which
//! reproduces the "comment seen early" behavior of a streaming lexer. Syntactic
//! decisions that need more than one token of lookahead (declarations vs.
//! expressions, casts, lambdas) inspect the buffered tokens directly and never
//! report comments.

use serde::{Deserialize, Serialize};

use crate::lexer::{Lexer, Span, Token, TokenKind, PRIMITIVE_TYPES};
use crate::listener::{SyntaxListener, TypeDefKind};

/// Which grammar production the input is scanned as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanContext {
    /// A whole compilation unit.
    #[default]
    TopLevel,
    /// A sequence of class body declarations.
    ClassMember,
    /// A sequence of block statements.
    Statement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub context: ScanContext,
    /// Number of tokens buffered ahead of the consumed position. Comments are
    /// reported when the token after them enters this window.
    pub comment_lookahead: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            context: ScanContext::TopLevel,
            comment_lookahead: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {position}")]
pub struct ScanError {
    pub position: usize,
    pub message: String,
}

/// Scans `source`, reporting events to `listener`.
///
/// On failure the listener also receives [`SyntaxListener::parse_failed`]
/// before the error is returned.
pub fn scan<L: SyntaxListener + ?Sized>(
    source: &str,
    options: ScanOptions,
    listener: &mut L,
) -> Result<(), ScanError> {
    let mut scanner = Scanner::new(source, options.comment_lookahead, listener);
    let result = match options.context {
        ScanContext::TopLevel => scanner.compilation_unit(),
        ScanContext::ClassMember => scanner.class_members_to_end(),
        ScanContext::Statement => scanner.statements_to_end(),
    };
    match &result {
        Ok(()) => tracing::debug!(
            target: "stride.syntax",
            tokens = scanner.tokens.len(),
            context = ?options.context,
            "scan finished"
        ),
        Err(err) => {
            tracing::debug!(target: "stride.syntax", error = %err, "scan failed");
            scanner.listener.parse_failed(err.position, &err.message);
        }
    }
    result
}

const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "abstract",
    "final",
    "native",
    "synchronized",
    "transient",
    "volatile",
    "strictfp",
    "default",
];

const BINARY_OPERATORS: &[&str] = &[
    "||", "&&", "|", "^", "&", "==", "!=", "<", ">", "<=", ">=", "<<", ">>", ">>>", "+", "-", "*",
    "/", "%", "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", ">>>=",
];

const PREFIX_OPERATORS: &[&str] = &["+", "-", "!", "~", "++", "--"];

/// Deepest nesting of statements, operands and array initializers the
/// scanner descends into before giving up with a [`ScanError`]. Each level is
/// a few recursive calls, so this keeps the scanner well inside a 2 MiB
/// thread stack.
pub const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Field,
    Local,
}

struct Scanner<'l, L: ?Sized> {
    /// Significant tokens, always ending with an end-of-file token.
    tokens: Vec<Token>,
    /// `comments[i]` holds the comments between `tokens[i - 1]` and `tokens[i]`.
    comments: Vec<Vec<Token>>,
    pos: usize,
    /// Comments of `tokens[..reported]` have been handed to the listener.
    reported: usize,
    lookahead: usize,
    /// Closing angle brackets already consumed as part of a `>>`/`>>>` token.
    pending_close: usize,
    /// Recursion depth of the nesting-limited productions.
    depth: usize,
    listener: &'l mut L,
}

impl<'l, L: SyntaxListener + ?Sized> Scanner<'l, L> {
    fn new(source: &str, lookahead: usize, listener: &'l mut L) -> Self {
        let mut tokens = Vec::new();
        let mut comments = Vec::new();
        let mut pending = Vec::new();
        let mut lexer = Lexer::new(source);
        loop {
            let token = lexer.next_token();
            if token.kind.is_comment() {
                pending.push(token);
                continue;
            }
            let eof = token.is_eof();
            comments.push(std::mem::take(&mut pending));
            tokens.push(token);
            if eof {
                break;
            }
        }
        Scanner {
            tokens,
            comments,
            pos: 0,
            reported: 0,
            lookahead: lookahead.max(1),
            pending_close: 0,
            depth: 0,
            listener,
        }
    }

    // ---- token stream ----------------------------------------------------

    fn fill(&mut self) {
        let limit = (self.pos + self.lookahead).min(self.tokens.len());
        while self.reported < limit {
            let comments = std::mem::take(&mut self.comments[self.reported]);
            for comment in &comments {
                self.listener.got_comment(comment);
            }
            self.reported += 1;
        }
    }

    fn peek(&mut self) -> &Token {
        self.fill();
        &self.tokens[self.pos]
    }

    fn peek_clone(&mut self) -> Token {
        self.peek().clone()
    }

    /// Raw lookahead; never reports comments.
    fn nth(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn at(&mut self, text: &str) -> bool {
        self.peek().is(text)
    }

    fn at_ident(&mut self) -> bool {
        self.peek().is_ident()
    }

    fn at_eof(&mut self) -> bool {
        self.peek().is_eof()
    }

    fn at_primitive(&mut self) -> bool {
        let token = self.peek();
        PRIMITIVE_TYPES.iter().any(|p| token.is(p))
    }

    fn bump(&mut self) -> Token {
        self.fill();
        let token = self.tokens[self.pos].clone();
        if !token.is_eof() {
            self.pos += 1;
            self.listener.token_consumed(&token);
        }
        token
    }

    fn eat(&mut self, text: &str) -> Option<Token> {
        if self.at(text) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, text: &str) -> Result<Token, ScanError> {
        match self.eat(text) {
            Some(token) => Ok(token),
            None => Err(self.error_here(&format!("expected `{text}`"))),
        }
    }

    fn expect_one_of(&mut self, texts: &[&str]) -> Result<Token, ScanError> {
        if texts.iter().any(|t| self.at(t)) {
            return Ok(self.bump());
        }
        let expected = texts
            .iter()
            .map(|t| format!("`{t}`"))
            .collect::<Vec<_>>()
            .join(" or ");
        Err(self.error_here(&format!("expected {expected}")))
    }

    fn expect_ident(&mut self) -> Result<Token, ScanError> {
        if self.at_ident() {
            Ok(self.bump())
        } else {
            Err(self.error_here("expected an identifier"))
        }
    }

    fn error_here(&mut self, message: &str) -> ScanError {
        let token = self.peek();
        let message = if token.is_eof() {
            format!("{message}, found end of input")
        } else {
            format!("{message}, found `{}`", token.text)
        };
        ScanError {
            position: token.span.start,
            message,
        }
    }

    fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, ScanError>,
    ) -> Result<T, ScanError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_here(&format!("nesting deeper than {MAX_NESTING} levels")));
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    fn skip_balanced(&mut self, open: &str, close: &str) -> Result<(), ScanError> {
        self.expect(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            if self.at_eof() {
                return Err(self.error_here(&format!("expected `{close}`")));
            }
            let token = self.bump();
            if token.is(open) {
                depth += 1;
            } else if token.is(close) {
                depth -= 1;
            }
        }
        Ok(())
    }

    /// Skips `<...>` type parameters or arguments without reporting them.
    fn skip_angle_brackets(&mut self) -> Result<(), ScanError> {
        let mut depth: i32 = 0;
        loop {
            if self.at_eof() {
                return Err(self.error_here("expected `>`"));
            }
            let token = self.bump();
            match token.text.as_str() {
                "<" => depth += 1,
                ">" => depth -= 1,
                ">>" => depth -= 2,
                ">>>" => depth -= 3,
                _ => {}
            }
            if depth <= 0 {
                return Ok(());
            }
        }
    }

    // ---- raw lookahead classification -------------------------------------

    fn raw_is_primitive(&self, n: usize) -> bool {
        let token = self.nth(n);
        PRIMITIVE_TYPES.iter().any(|p| token.is(p))
    }

    fn raw_type_args_end(&self, start: usize) -> Option<usize> {
        let mut depth: i32 = 0;
        let mut i = start;
        loop {
            let token = self.nth(i);
            if token.is_eof() {
                return None;
            }
            match token.text.as_str() {
                "<" => depth += 1,
                ">" => depth -= 1,
                ">>" => depth -= 2,
                ">>>" => depth -= 3,
                "," | "." | "?" | "extends" | "super" | "[" | "]" | "&" => {}
                _ if token.is_ident() || self.raw_is_primitive(i) => {}
                _ => return None,
            }
            i += 1;
            if depth <= 0 {
                return Some(i);
            }
        }
    }

    /// Length in tokens of the type starting `start` tokens ahead, if any.
    fn raw_type_len(&self, start: usize) -> Option<usize> {
        let mut i = start;
        if self.raw_is_primitive(i) {
            i += 1;
        } else if self.nth(i).is_ident() {
            i += 1;
            loop {
                if self.nth(i).is("<") {
                    i = self.raw_type_args_end(i)?;
                }
                if self.nth(i).is(".") && self.nth(i + 1).is_ident() {
                    i += 2;
                    continue;
                }
                break;
            }
        } else {
            return None;
        }
        while self.nth(i).is("[") && self.nth(i + 1).is("]") {
            i += 2;
        }
        Some(i - start)
    }

    fn raw_skip_modifiers(&self, mut i: usize) -> usize {
        loop {
            let token = self.nth(i);
            if token.is("@") && self.nth(i + 1).is_ident() {
                i += 2;
                while self.nth(i).is(".") && self.nth(i + 1).is_ident() {
                    i += 2;
                }
                if self.nth(i).is("(") {
                    i = self.raw_matching_close(i).map_or(i, |close| close + 1);
                }
            } else if MODIFIER_KEYWORDS.iter().any(|m| token.is(m)) {
                i += 1;
            } else {
                return i;
            }
        }
    }

    fn raw_matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = open;
        loop {
            let token = self.nth(i);
            if token.is_eof() {
                return None;
            }
            if token.is("(") {
                depth += 1;
            } else if token.is(")") {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            i += 1;
        }
    }

    /// A type followed by a declared name.
    fn raw_is_declaration(&self, start: usize) -> bool {
        let Some(len) = self.raw_type_len(start) else {
            return false;
        };
        if !self.nth(start + len).is_ident() {
            return false;
        }
        let after = self.nth(start + len + 1);
        ["=", ";", ",", "[", ":"].iter().any(|t| after.is(t))
    }

    fn is_local_var_decl(&self) -> bool {
        let start = self.raw_skip_modifiers(0);
        self.raw_is_declaration(start)
    }

    fn is_local_type_decl(&self) -> bool {
        let start = self.raw_skip_modifiers(0);
        let token = self.nth(start);
        token.is("class")
            || token.is("interface")
            || token.is("enum")
            || (token.is("@") && self.nth(start + 1).is("interface"))
    }

    fn is_lambda_start(&self) -> bool {
        if self.nth(0).is_ident() {
            return self.nth(1).is("->");
        }
        if !self.nth(0).is("(") {
            return false;
        }
        self.raw_matching_close(0)
            .is_some_and(|close| self.nth(close + 1).is("->"))
    }

    fn is_cast(&self) -> bool {
        if self.raw_is_primitive(1) {
            return self
                .raw_type_len(1)
                .is_some_and(|len| self.nth(1 + len).is(")"));
        }
        let Some(len) = self.raw_type_len(1) else {
            return false;
        };
        let close = 1 + len;
        if !self.nth(close).is(")") {
            return false;
        }
        let next = self.nth(close + 1);
        next.is_ident()
            || next.kind.is_literal()
            || ["(", "!", "~", "this", "super", "new", "true", "false", "null"]
                .iter()
                .any(|t| next.is(t))
    }

    // ---- compilation units and type declarations ---------------------------

    fn compilation_unit(&mut self) -> Result<(), ScanError> {
        if self.eat("package").is_some() {
            let name = self.qualified_name()?;
            self.expect(";")?;
            self.listener.got_package(&name);
        }
        while self.at("import") {
            self.import_declaration()?;
        }
        while self.eat(";").is_some() {}
        if self.at_eof() {
            self.listener.finished_compilation_unit(true);
            return Ok(());
        }
        while !self.at_eof() {
            if self.eat(";").is_some() {
                continue;
            }
            self.listener.got_top_level_decl();
            self.listener.got_decl_begin();
            self.modifiers()?;
            if self.peek_type_def_keyword().is_none() {
                return Err(self.error_here("expected a type declaration"));
            }
            self.type_declaration_rest()?;
        }
        self.listener.finished_compilation_unit(false);
        Ok(())
    }

    fn class_members_to_end(&mut self) -> Result<(), ScanError> {
        while !self.at_eof() {
            self.class_member()?;
        }
        Ok(())
    }

    fn statements_to_end(&mut self) -> Result<(), ScanError> {
        while !self.at_eof() {
            self.block_statement()?;
        }
        Ok(())
    }

    fn import_declaration(&mut self) -> Result<(), ScanError> {
        self.expect("import")?;
        let is_static = self.eat("static").is_some();
        let mut name = vec![self.expect_ident()?];
        let mut wildcard = false;
        while self.at(".") {
            if self.nth(1).is("*") {
                self.bump();
                self.bump();
                wildcard = true;
                break;
            }
            name.push(self.bump());
            name.push(self.expect_ident()?);
        }
        self.expect(";")?;
        if wildcard {
            self.listener.got_wildcard_import(&name, is_static);
        } else {
            self.listener.got_import(&name, is_static);
        }
        Ok(())
    }

    fn qualified_name(&mut self) -> Result<Vec<Token>, ScanError> {
        let mut name = vec![self.expect_ident()?];
        while self.at(".") && self.nth(1).is_ident() {
            name.push(self.bump());
            name.push(self.bump());
        }
        Ok(name)
    }

    fn peek_type_def_keyword(&mut self) -> Option<(Token, TypeDefKind)> {
        let first = self.peek_clone();
        let kind = if first.is("class") {
            TypeDefKind::Class
        } else if first.is("interface") {
            TypeDefKind::Interface
        } else if first.is("enum") {
            TypeDefKind::Enum
        } else if first.is("@") && self.nth(1).is("interface") {
            let span = Span::new(first.span.start, self.nth(1).span.end);
            return Some((
                Token::new(TokenKind::Keyword, "@interface", span),
                TypeDefKind::Annotation,
            ));
        } else {
            return None;
        };
        Some((first, kind))
    }

    /// Everything of a type declaration after its modifiers.
    fn type_declaration_rest(&mut self) -> Result<(), ScanError> {
        let Some((keyword, kind)) = self.peek_type_def_keyword() else {
            return Err(self.error_here("expected a type declaration"));
        };
        self.bump();
        if kind == TypeDefKind::Annotation {
            self.bump();
        }
        self.listener.got_type_def(&keyword, kind);
        let name = self.expect_ident()?;
        self.listener.got_type_def_name(&name);
        self.listener.modifiers_consumed();

        if self.at("<") {
            self.listener.got_type_def_type_params();
            self.skip_angle_brackets()?;
        }
        if self.eat("extends").is_some() {
            self.listener.begin_type_def_extends();
            self.type_list()?;
            self.listener.end_type_def_extends();
        }
        if self.eat("implements").is_some() {
            self.listener.begin_type_def_implements();
            self.type_list()?;
            self.listener.end_type_def_implements();
        }
        if self.peek().text == "permits" {
            self.bump();
            loop {
                self.type_tokens()?;
                if self.eat(",").is_none() {
                    break;
                }
            }
        }
        self.type_body(kind)?;
        self.listener.got_type_def_end();
        Ok(())
    }

    fn type_list(&mut self) -> Result<(), ScanError> {
        loop {
            let ty = self.type_tokens()?;
            self.listener.got_type_spec(&ty);
            if self.eat(",").is_none() {
                return Ok(());
            }
        }
    }

    fn type_body(&mut self, kind: TypeDefKind) -> Result<(), ScanError> {
        let lcurly = self.expect("{")?;
        self.listener.begin_type_body(&lcurly);
        if kind == TypeDefKind::Enum {
            self.skip_enum_constants()?;
        }
        while !self.at("}") {
            if self.at_eof() {
                return Err(self.error_here("expected `}`"));
            }
            self.class_member()?;
        }
        let rcurly = self.bump();
        self.listener.end_type_body(&rcurly);
        Ok(())
    }

    fn skip_enum_constants(&mut self) -> Result<(), ScanError> {
        let mut depth = 0usize;
        loop {
            if self.at_eof() {
                return Err(self.error_here("expected `}`"));
            }
            if depth == 0 && self.at("}") {
                return Ok(());
            }
            if depth == 0 && self.at(";") {
                self.bump();
                return Ok(());
            }
            let token = self.bump();
            if token.is("(") || token.is("{") || token.is("[") {
                depth += 1;
            } else if token.is(")") || token.is("}") || token.is("]") {
                depth = depth.saturating_sub(1);
            }
        }
    }

    fn class_member(&mut self) -> Result<(), ScanError> {
        if self.eat(";").is_some() {
            return Ok(());
        }
        if self.at("{") || (self.at("static") && self.nth(1).is("{")) {
            self.eat("static");
            let lcurly = self.bump();
            self.listener.begin_init_block(&lcurly);
            self.block_statements()?;
            self.expect("}")?;
            self.listener.end_init_block();
            return Ok(());
        }

        self.listener.got_decl_begin();
        self.modifiers()?;
        if let Some((keyword, _)) = self.peek_type_def_keyword() {
            self.listener.got_inner_type(&keyword);
            return self.type_declaration_rest();
        }
        if self.at("<") {
            self.listener.got_method_type_params();
            self.skip_angle_brackets()?;
        }
        if self.at_ident() && self.nth(1).is("(") {
            let name = self.bump();
            self.listener.got_constructor_decl(&name);
            self.listener.modifiers_consumed();
            return self.method_rest();
        }

        let ty = self.type_tokens()?;
        self.listener.got_type_spec(&ty);
        let name = self.expect_ident()?;
        if self.at("(") {
            self.listener.got_method_declaration(&name);
            self.listener.modifiers_consumed();
            self.method_rest()
        } else {
            self.declarators(name, DeclKind::Field)
        }
    }

    fn modifiers(&mut self) -> Result<(), ScanError> {
        loop {
            if self.at("@") && !self.nth(1).is("interface") {
                self.annotation()?;
                continue;
            }
            let token = self.peek_clone();
            let is_modifier = MODIFIER_KEYWORDS.iter().any(|m| token.is(m))
                && !(token.is("synchronized") && self.nth(1).is("("))
                && !(token.is("default") && self.nth(1).is(":"));
            if !is_modifier {
                return Ok(());
            }
            self.bump();
            self.listener.got_modifier(&token);
        }
    }

    fn annotation(&mut self) -> Result<(), ScanError> {
        self.expect("@")?;
        let name = self.qualified_name()?;
        let params_follow = self.at("(");
        self.listener.got_annotation(&name, params_follow);
        if params_follow {
            self.arguments()?;
        }
        Ok(())
    }

    fn method_rest(&mut self) -> Result<(), ScanError> {
        self.expect("(")?;
        if !self.at(")") {
            loop {
                self.formal_parameter()?;
                if self.eat(",").is_none() {
                    break;
                }
            }
        }
        self.expect(")")?;
        while self.eat("[").is_some() {
            self.expect("]")?;
        }
        if self.eat("throws").is_some() {
            self.listener.begin_throws();
            self.type_list()?;
            self.listener.end_throws();
        }
        if self.eat("default").is_some() {
            while !self.at(";") && !self.at_eof() {
                self.bump();
            }
        }
        if self.at("{") {
            let lcurly = self.bump();
            self.listener.begin_method_body(&lcurly);
            self.block_statements()?;
            self.expect("}")?;
        } else {
            self.expect(";")?;
        }
        self.listener.end_method_decl();
        Ok(())
    }

    fn formal_parameter(&mut self) -> Result<(), ScanError> {
        self.listener.begin_formal_parameter();
        self.modifiers()?;
        let ty = self.type_tokens()?;
        self.listener.got_type_spec(&ty);
        let ellipsis = self.eat("...");
        let name = match self.eat("this") {
            Some(receiver) => receiver,
            None => self.expect_ident()?,
        };
        while self.eat("[").is_some() {
            self.expect("]")?;
            self.listener.got_array_declarator();
        }
        self.listener.got_method_parameter(&name, ellipsis.as_ref());
        self.listener.modifiers_consumed();
        Ok(())
    }

    fn declarators(&mut self, first: Token, kind: DeclKind) -> Result<(), ScanError> {
        let mut name = first;
        let mut subsequent = false;
        loop {
            while self.eat("[").is_some() {
                self.expect("]")?;
                if !subsequent {
                    self.listener.got_array_declarator();
                }
            }
            if !subsequent && kind == DeclKind::Field {
                self.listener.begin_field_declarations();
                self.listener.modifiers_consumed();
            }
            // Without an initializer the separator is consumed first so that
            // comments before it belong to this declarator.
            let separator = if self.eat("=").is_some() {
                self.report_declarator(kind, &name, subsequent, true);
                self.variable_initializer()?;
                self.expect_one_of(&[",", ";"])?
            } else {
                let separator = self.expect_one_of(&[",", ";"])?;
                self.report_declarator(kind, &name, subsequent, false);
                separator
            };
            if separator.is(";") {
                break;
            }
            name = self.expect_ident()?;
            subsequent = true;
        }
        match kind {
            DeclKind::Field => self.listener.end_field_declarations(),
            DeclKind::Local => self.listener.end_variable_decls(),
        }
        Ok(())
    }

    fn report_declarator(&mut self, kind: DeclKind, name: &Token, subsequent: bool, init: bool) {
        match (kind, subsequent) {
            (DeclKind::Field, false) => self.listener.got_field(name, init),
            (DeclKind::Field, true) => self.listener.got_subsequent_field(name, init),
            (DeclKind::Local, false) => {
                self.listener.got_variable_decl(name, init);
                self.listener.modifiers_consumed();
            }
            (DeclKind::Local, true) => self.listener.got_subsequent_var(name, init),
        }
    }

    // ---- types ---------------------------------------------------------------

    fn type_tokens(&mut self) -> Result<Vec<Token>, ScanError> {
        let mut out = Vec::new();
        self.type_into(&mut out)?;
        Ok(out)
    }

    fn type_into(&mut self, out: &mut Vec<Token>) -> Result<(), ScanError> {
        while self.at("@") && !self.nth(1).is("interface") {
            self.bump();
            self.qualified_name()?;
            if self.at("(") {
                self.skip_balanced("(", ")")?;
            }
        }
        if self.at_primitive() || self.at("void") {
            out.push(self.bump());
        } else if self.at("?") {
            out.push(self.bump());
            if self.at("extends") || self.at("super") {
                out.push(self.bump());
                self.type_into(out)?;
            }
            return Ok(());
        } else {
            out.push(self.expect_ident()?);
            if self.at("<") {
                self.type_arguments(out)?;
            }
            while self.pending_close == 0 && self.at(".") && self.nth(1).is_ident() {
                out.push(self.bump());
                out.push(self.bump());
                if self.at("<") {
                    self.type_arguments(out)?;
                }
            }
        }
        while self.pending_close == 0 && self.at("[") && self.nth(1).is("]") {
            out.push(self.bump());
            out.push(self.bump());
        }
        Ok(())
    }

    fn type_arguments(&mut self, out: &mut Vec<Token>) -> Result<(), ScanError> {
        out.push(self.bump());
        if self.at(">") {
            out.push(self.bump());
            return Ok(());
        }
        loop {
            self.type_into(out)?;
            if self.pending_close > 0 {
                self.pending_close -= 1;
                return Ok(());
            }
            match self.eat(",") {
                Some(comma) => out.push(comma),
                None => break,
            }
        }
        let close = self.peek_clone();
        let extra = match close.text.as_str() {
            ">" => 0,
            ">>" => 1,
            ">>>" => 2,
            _ => return Err(self.error_here("expected `>`")),
        };
        out.push(self.bump());
        self.pending_close = extra;
        Ok(())
    }

    // ---- statements ------------------------------------------------------------

    fn block_statements(&mut self) -> Result<(), ScanError> {
        while !self.at("}") {
            if self.at_eof() {
                return Err(self.error_here("expected `}`"));
            }
            self.block_statement()?;
        }
        Ok(())
    }

    fn block_statement(&mut self) -> Result<(), ScanError> {
        self.fill();
        if self.is_local_type_decl() {
            self.listener.got_decl_begin();
            self.modifiers()?;
            if let Some((keyword, _)) = self.peek_type_def_keyword() {
                self.listener.got_inner_type(&keyword);
            }
            return self.type_declaration_rest();
        }
        if self.is_local_var_decl() {
            self.listener.got_decl_begin();
            self.modifiers()?;
            let ty = self.type_tokens()?;
            self.listener.got_type_spec(&ty);
            let name = self.expect_ident()?;
            return self.declarators(name, DeclKind::Local);
        }
        self.statement()
    }

    /// Returns the closing brace.
    fn block(&mut self) -> Result<Token, ScanError> {
        let lcurly = self.expect("{")?;
        self.listener.begin_stmtblock_body(&lcurly);
        self.block_statements()?;
        let rcurly = self.expect("}")?;
        self.listener.end_stmtblock_body();
        Ok(rcurly)
    }

    fn paren_expression(&mut self) -> Result<(), ScanError> {
        self.expect("(")?;
        self.expression()?;
        self.expect(")")?;
        Ok(())
    }

    fn statement(&mut self) -> Result<(), ScanError> {
        self.nested(Self::statement_at_depth)
    }

    fn statement_at_depth(&mut self) -> Result<(), ScanError> {
        let token = self.peek_clone();
        if token.kind == TokenKind::Keyword {
            match token.text.as_str() {
                "if" => return self.if_statement(),
                "while" => {
                    self.bump();
                    self.listener.begin_while_loop();
                    self.paren_expression()?;
                    return self.statement();
                }
                "do" => {
                    self.bump();
                    self.listener.begin_do_while();
                    self.statement()?;
                    self.expect("while")?;
                    self.paren_expression()?;
                    self.expect(";")?;
                    return Ok(());
                }
                "for" => return self.for_statement(),
                "return" => {
                    self.bump();
                    if self.eat(";").is_some() {
                        self.listener.got_return_statement(false);
                    } else {
                        self.listener.got_return_statement(true);
                        self.expression()?;
                        self.expect(";")?;
                    }
                    return Ok(());
                }
                "throw" => {
                    self.bump();
                    self.listener.got_throw();
                    self.expression()?;
                    self.expect(";")?;
                    return Ok(());
                }
                "break" | "continue" => {
                    let keyword = self.bump();
                    let label = if self.at_ident() {
                        Some(self.bump())
                    } else {
                        None
                    };
                    self.expect(";")?;
                    self.listener.got_break_continue(&keyword, label.as_ref());
                    return Ok(());
                }
                "switch" => return self.switch_statement(),
                "try" => return self.try_statement(),
                "synchronized" => {
                    self.bump();
                    self.listener.begin_synchronized_block();
                    self.paren_expression()?;
                    self.block()?;
                    return Ok(());
                }
                "assert" => {
                    self.bump();
                    self.listener.got_assert();
                    self.expression()?;
                    if self.eat(":").is_some() {
                        self.expression()?;
                    }
                    self.expect(";")?;
                    return Ok(());
                }
                "this" | "super" if self.nth(1).is("(") => return self.constructor_call(),
                _ => {}
            }
        }
        if token.is("{") {
            self.block()?;
            return Ok(());
        }
        if token.is(";") {
            self.bump();
            self.listener.got_empty_statement();
            return Ok(());
        }
        if token.is_ident() && self.nth(1).is(":") {
            let label = self.bump();
            self.bump();
            self.listener.got_statement_label(&label);
            return self.statement();
        }

        self.listener.got_statement_expression();
        self.expression()?;
        self.expect(";")?;
        Ok(())
    }

    fn constructor_call(&mut self) -> Result<(), ScanError> {
        self.listener.got_statement_expression();
        let keyword = self.peek_clone();
        self.listener.got_constructor_call(&keyword);
        self.listener.begin_expression(&keyword);
        self.bump();
        self.arguments()?;
        let next = self.peek_clone();
        self.listener.end_expression(&next);
        self.expect(";")?;
        Ok(())
    }

    fn if_statement(&mut self) -> Result<(), ScanError> {
        self.expect("if")?;
        self.listener.begin_if_stmt();
        self.paren_expression()?;
        self.listener.begin_if_cond_block();
        self.statement()?;
        while self.eat("else").is_some() {
            if self.eat("if").is_some() {
                self.listener.got_else_if();
                self.paren_expression()?;
                self.listener.begin_if_cond_block();
                self.statement()?;
            } else {
                self.listener.begin_if_cond_block();
                self.statement()?;
                break;
            }
        }
        self.listener.end_if_stmt();
        Ok(())
    }

    fn for_statement(&mut self) -> Result<(), ScanError> {
        self.expect("for")?;
        self.listener.begin_for_loop();
        self.expect("(")?;
        self.modifiers()?;
        if self.raw_is_declaration(0) {
            let ty = self.type_tokens()?;
            self.listener.got_type_spec(&ty);
            let name = self.expect_ident()?;
            while self.eat("[").is_some() {
                self.expect("]")?;
                self.listener.got_array_declarator();
            }
            self.listener.got_for_init(&name);
            self.listener.modifiers_consumed();

            if self.eat(":").is_some() {
                self.listener.determined_for_loop(true, false);
                self.expression()?;
                self.expect(")")?;
                self.listener.begin_for_loop_body();
                return self.statement();
            }

            let initialized = self.eat("=").is_some();
            self.listener.determined_for_loop(false, initialized);
            if initialized {
                self.variable_initializer()?;
            }
            while self.eat(",").is_some() {
                let name = self.expect_ident()?;
                while self.eat("[").is_some() {
                    self.expect("]")?;
                }
                let initialized = self.eat("=").is_some();
                self.listener.got_subsequent_for_init(&name, initialized);
                if initialized {
                    self.variable_initializer()?;
                }
            }
        } else {
            self.listener.modifiers_consumed();
            self.listener.determined_for_loop(false, false);
            if !self.at(";") {
                loop {
                    self.listener.got_statement_expression();
                    self.expression()?;
                    if self.eat(",").is_none() {
                        break;
                    }
                }
            }
        }
        self.expect(";")?;

        let has_test = !self.at(";");
        self.listener.got_for_test(has_test);
        if has_test {
            self.expression()?;
        }
        self.expect(";")?;

        let has_update = !self.at(")");
        self.listener.got_for_increment(has_update);
        if has_update {
            self.expression()?;
            while self.eat(",").is_some() {
                self.expression()?;
            }
        }
        self.expect(")")?;
        self.listener.begin_for_loop_body();
        self.statement()
    }

    fn switch_statement(&mut self) -> Result<(), ScanError> {
        self.expect("switch")?;
        self.listener.begin_switch_stmt();
        self.paren_expression()?;
        self.expect("{")?;
        self.listener.begin_switch_block();
        while !self.at("}") {
            if self.at_eof() {
                return Err(self.error_here("expected `}`"));
            }
            if self.eat("case").is_some() {
                self.listener.got_switch_case();
                self.expression()?;
                while self.eat(",").is_some() {
                    self.expression()?;
                }
                self.expect(":")?;
            } else if self.at("default") && self.nth(1).is(":") {
                self.bump();
                self.bump();
                self.listener.got_switch_default();
            } else {
                self.block_statement()?;
            }
        }
        self.bump();
        self.listener.end_switch_block();
        Ok(())
    }

    fn try_statement(&mut self) -> Result<(), ScanError> {
        self.expect("try")?;
        let has_resources = self.at("(");
        self.listener.begin_try_catch_stmt(has_resources);
        if has_resources {
            self.skip_balanced("(", ")")?;
        }
        self.expect("{")?;
        self.listener.begin_try_block();
        self.block_statements()?;
        self.expect("}")?;
        self.listener.end_try_block();

        while self.at("catch") {
            let keyword = self.bump();
            self.listener.got_catch_finally(&keyword);
            self.expect("(")?;
            while self.at("final") || self.at("@") {
                if self.eat("final").is_none() {
                    self.bump();
                    self.qualified_name()?;
                    if self.at("(") {
                        self.skip_balanced("(", ")")?;
                    }
                }
            }
            let ty = self.type_tokens()?;
            self.listener.got_type_spec(&ty);
            while self.eat("|").is_some() {
                self.listener.got_multi_catch();
                let ty = self.type_tokens()?;
                self.listener.got_type_spec(&ty);
            }
            let name = self.expect_ident()?;
            self.listener.got_catch_var_name(&name);
            self.expect(")")?;
            self.block()?;
        }
        if self.at("finally") {
            let keyword = self.bump();
            self.listener.got_catch_finally(&keyword);
            self.block()?;
        }
        self.listener.end_try_catch_stmt();
        Ok(())
    }

    // ---- expressions ------------------------------------------------------------

    fn expression(&mut self) -> Result<(), ScanError> {
        let first = self.peek_clone();
        self.listener.begin_expression(&first);
        self.expression_body()?;
        let next = self.peek_clone();
        self.listener.end_expression(&next);
        Ok(())
    }

    fn expression_body(&mut self) -> Result<(), ScanError> {
        self.unary()?;
        loop {
            let token = self.peek_clone();
            if token.kind == TokenKind::Operator && BINARY_OPERATORS.contains(&token.text.as_str())
            {
                self.bump();
                self.listener.got_binary_operator(&token);
                self.unary()?;
            } else if token.is("instanceof") {
                self.bump();
                self.listener.got_binary_operator(&token);
                self.eat("final");
                self.type_tokens()?;
                if self.at_ident() {
                    self.bump();
                }
            } else if token.is("?") {
                self.bump();
                self.listener.got_question_operator(&token);
                self.expression_body()?;
                let colon = self.expect(":")?;
                self.listener.got_question_colon(&colon);
                self.unary()?;
            } else {
                return Ok(());
            }
        }
    }

    fn unary(&mut self) -> Result<(), ScanError> {
        self.nested(Self::unary_at_depth)
    }

    fn unary_at_depth(&mut self) -> Result<(), ScanError> {
        loop {
            let token = self.peek_clone();
            if token.kind == TokenKind::Operator && PREFIX_OPERATORS.contains(&token.text.as_str())
            {
                self.bump();
                self.listener.got_unary_operator(&token);
            } else {
                break;
            }
        }
        if self.is_lambda_start() {
            return self.lambda();
        }
        if self.at("(") && self.is_cast() {
            self.bump();
            self.type_tokens()?;
            while self.eat("&").is_some() {
                self.type_tokens()?;
            }
            self.expect(")")?;
            return self.unary();
        }
        self.primary()?;
        self.postfix()
    }

    fn primary(&mut self) -> Result<(), ScanError> {
        let token = self.peek_clone();
        if token.kind.is_literal() {
            self.bump();
            return Ok(());
        }
        if token.is_ident() {
            self.bump();
            if self.at("(") {
                self.arguments()?;
            }
            return Ok(());
        }
        if token.is("(") {
            self.bump();
            self.expression()?;
            self.expect(")")?;
            return Ok(());
        }
        if token.is("new") {
            return self.creator();
        }
        if token.is("true") || token.is("false") || token.is("null") || token.is("super") {
            self.bump();
            return Ok(());
        }
        if token.is("this") {
            self.bump();
            if self.at("(") {
                self.arguments()?;
            }
            return Ok(());
        }
        if self.at_primitive() || token.is("void") {
            self.bump();
            while self.at("[") && self.nth(1).is("]") {
                self.bump();
                self.bump();
            }
            if !self.at(".") && !self.at("::") {
                return Err(self.error_here("expected `.class`"));
            }
            return Ok(());
        }
        Err(self.error_here("expected an expression"))
    }

    fn postfix(&mut self) -> Result<(), ScanError> {
        loop {
            if self.eat(".").is_some() {
                if self.at("<") {
                    self.skip_angle_brackets()?;
                }
                if self.at("new") {
                    self.creator()?;
                    continue;
                }
                let member = self.peek_clone();
                if !(member.is_ident()
                    || member.is("this")
                    || member.is("class")
                    || member.is("super"))
                {
                    return Err(self.error_here("expected a member name"));
                }
                self.bump();
                if self.at("(") {
                    self.arguments()?;
                }
            } else if self.at("[") && self.nth(1).is("]") {
                self.bump();
                self.bump();
            } else if self.eat("[").is_some() {
                self.expression()?;
                self.expect("]")?;
            } else if self.eat("::").is_some() {
                if self.at("<") {
                    self.skip_angle_brackets()?;
                }
                if self.at("new") || self.at_ident() {
                    self.bump();
                } else {
                    return Err(self.error_here("expected a method reference"));
                }
            } else if self.at("++") || self.at("--") {
                let op = self.bump();
                self.listener.got_postfix_operator(&op);
            } else {
                return Ok(());
            }
        }
    }

    fn creator(&mut self) -> Result<(), ScanError> {
        self.expect("new")?;
        if self.at("<") {
            self.skip_angle_brackets()?;
        }
        if self.at_primitive() {
            self.bump();
        } else {
            self.expect_ident()?;
            if self.at("<") {
                self.skip_angle_brackets()?;
            }
            while self.at(".") && self.nth(1).is_ident() {
                self.bump();
                self.bump();
                if self.at("<") {
                    self.skip_angle_brackets()?;
                }
            }
        }

        if self.at("[") {
            while self.eat("[").is_some() {
                if !self.at("]") {
                    self.expression()?;
                }
                self.expect("]")?;
            }
            if self.at("{") {
                self.array_initializer()?;
            }
            return Ok(());
        }

        self.arguments()?;
        if self.at("{") {
            let lcurly = self.bump();
            self.listener.begin_anon_class_body(&lcurly);
            while !self.at("}") {
                if self.at_eof() {
                    return Err(self.error_here("expected `}`"));
                }
                self.class_member()?;
            }
            let rcurly = self.bump();
            self.listener.end_anon_class_body(&rcurly);
        }
        Ok(())
    }

    fn arguments(&mut self) -> Result<(), ScanError> {
        let lparen = self.expect("(")?;
        self.listener.begin_argument_list(&lparen);
        if !self.at(")") {
            loop {
                self.variable_initializer()?;
                self.listener.end_argument();
                if self.eat(",").is_none() {
                    break;
                }
            }
        }
        let rparen = self.expect(")")?;
        self.listener.end_argument_list(&rparen);
        Ok(())
    }

    fn variable_initializer(&mut self) -> Result<(), ScanError> {
        if !self.at("{") {
            return self.expression();
        }
        let first = self.peek_clone();
        self.listener.begin_expression(&first);
        self.array_initializer()?;
        let next = self.peek_clone();
        self.listener.end_expression(&next);
        Ok(())
    }

    fn array_initializer(&mut self) -> Result<(), ScanError> {
        self.nested(Self::array_initializer_at_depth)
    }

    fn array_initializer_at_depth(&mut self) -> Result<(), ScanError> {
        self.expect("{")?;
        while !self.at("}") {
            self.variable_initializer()?;
            if self.eat(",").is_none() {
                break;
            }
        }
        self.expect("}")?;
        Ok(())
    }

    fn lambda(&mut self) -> Result<(), ScanError> {
        if self.at_ident() {
            self.listener.got_lambda_formal_param();
            let name = self.bump();
            self.listener.got_lambda_formal_name(&name);
            self.listener.modifiers_consumed();
        } else {
            self.expect("(")?;
            while !self.at(")") {
                self.listener.got_lambda_formal_param();
                self.modifiers()?;
                let untyped = self.at_ident() && (self.nth(1).is(",") || self.nth(1).is(")"));
                if !untyped {
                    let ty = self.type_tokens()?;
                    self.listener.got_lambda_formal_type(&ty);
                }
                let name = self.expect_ident()?;
                self.listener.got_lambda_formal_name(&name);
                self.listener.modifiers_consumed();
                if self.eat(",").is_none() {
                    break;
                }
            }
            self.expect(")")?;
        }
        self.expect("->")?;

        if self.at("{") {
            let lcurly = self.peek_clone();
            self.listener.begin_lambda(Some(&lcurly));
            let rcurly = self.block()?;
            self.listener.end_lambda(Some(&rcurly));
        } else {
            self.listener.begin_lambda(None);
            self.expression()?;
            self.listener.end_lambda(None);
        }
        Ok(())
    }
}
