use stride_syntax::{scan, ScanContext, ScanError, ScanOptions, SyntaxListener, Token, TypeDefKind};

/// Records the events it receives as short strings.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<String>,
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Recorder {
    fn push(&mut self, event: impl Into<String>) {
        self.events.push(event.into());
    }
}

pub fn record(source: &str, context: ScanContext) -> (Vec<String>, Result<(), ScanError>) {
    record_with(
        source,
        ScanOptions {
            context,
            ..ScanOptions::default()
        },
    )
}

pub fn record_with(source: &str, options: ScanOptions) -> (Vec<String>, Result<(), ScanError>) {
    let mut recorder = Recorder::default();
    let result = scan(source, options, &mut recorder);
    (recorder.events, result)
}

impl SyntaxListener for Recorder {
    fn got_comment(&mut self, token: &Token) {
        self.push(format!("comment {}", token.text));
    }
    fn parse_failed(&mut self, position: usize, message: &str) {
        self.push(format!("parse_failed {position}: {message}"));
    }
    fn got_package(&mut self, name: &[Token]) {
        self.push(format!("package {}", join(name)));
    }
    fn got_import(&mut self, name: &[Token], is_static: bool) {
        self.push(format!("import {} {is_static}", join(name)));
    }
    fn got_wildcard_import(&mut self, name: &[Token], is_static: bool) {
        self.push(format!("wildcard_import {} {is_static}", join(name)));
    }
    fn got_top_level_decl(&mut self) {
        self.push("top_level_decl");
    }
    fn got_inner_type(&mut self, keyword: &Token) {
        self.push(format!("inner_type {}", keyword.text));
    }
    fn got_type_def(&mut self, keyword: &Token, kind: TypeDefKind) {
        self.push(format!("type_def {} {kind:?}", keyword.text));
    }
    fn got_type_def_name(&mut self, name: &Token) {
        self.push(format!("type_def_name {}", name.text));
    }
    fn begin_type_def_extends(&mut self) {
        self.push("begin_extends");
    }
    fn end_type_def_extends(&mut self) {
        self.push("end_extends");
    }
    fn begin_type_def_implements(&mut self) {
        self.push("begin_implements");
    }
    fn end_type_def_implements(&mut self) {
        self.push("end_implements");
    }
    fn begin_type_body(&mut self, lcurly: &Token) {
        self.push(format!("begin_type_body {}", lcurly.text));
    }
    fn end_type_body(&mut self, rcurly: &Token) {
        self.push(format!("end_type_body {}", rcurly.text));
    }
    fn got_type_def_end(&mut self) {
        self.push("type_def_end");
    }
    fn finished_compilation_unit(&mut self, imports_only: bool) {
        self.push(format!("finished {imports_only}"));
    }
    fn got_decl_begin(&mut self) {
        self.push("decl_begin");
    }
    fn got_modifier(&mut self, token: &Token) {
        self.push(format!("modifier {}", token.text));
    }
    fn got_annotation(&mut self, name: &[Token], params_follow: bool) {
        self.push(format!("annotation {} {params_follow}", join(name)));
    }
    fn modifiers_consumed(&mut self) {
        self.push("modifiers_consumed");
    }
    fn got_type_spec(&mut self, tokens: &[Token]) {
        self.push(format!("type_spec {}", join(tokens)));
    }
    fn got_array_declarator(&mut self) {
        self.push("array_declarator");
    }
    fn got_method_declaration(&mut self, name: &Token) {
        self.push(format!("method_decl {}", name.text));
    }
    fn got_constructor_decl(&mut self, name: &Token) {
        self.push(format!("constructor_decl {}", name.text));
    }
    fn got_method_parameter(&mut self, name: &Token, ellipsis: Option<&Token>) {
        self.push(format!("method_parameter {} {}", name.text, ellipsis.is_some()));
    }
    fn begin_method_body(&mut self, _lcurly: &Token) {
        self.push("begin_method_body");
    }
    fn end_method_decl(&mut self) {
        self.push("end_method_decl");
    }
    fn got_constructor_call(&mut self, keyword: &Token) {
        self.push(format!("constructor_call {}", keyword.text));
    }
    fn begin_field_declarations(&mut self) {
        self.push("begin_fields");
    }
    fn got_field(&mut self, name: &Token, initialized: bool) {
        self.push(format!("field {} {initialized}", name.text));
    }
    fn got_subsequent_field(&mut self, name: &Token, initialized: bool) {
        self.push(format!("subsequent_field {} {initialized}", name.text));
    }
    fn end_field_declarations(&mut self) {
        self.push("end_fields");
    }
    fn got_variable_decl(&mut self, name: &Token, initialized: bool) {
        self.push(format!("variable_decl {} {initialized}", name.text));
    }
    fn got_subsequent_var(&mut self, name: &Token, initialized: bool) {
        self.push(format!("subsequent_var {} {initialized}", name.text));
    }
    fn end_variable_decls(&mut self) {
        self.push("end_variable_decls");
    }
    fn begin_stmtblock_body(&mut self, _lcurly: &Token) {
        self.push("begin_block");
    }
    fn end_stmtblock_body(&mut self) {
        self.push("end_block");
    }
    fn got_statement_expression(&mut self) {
        self.push("statement_expression");
    }
    fn got_empty_statement(&mut self) {
        self.push("empty_statement");
    }
    fn got_return_statement(&mut self, has_value: bool) {
        self.push(format!("return {has_value}"));
    }
    fn begin_if_stmt(&mut self) {
        self.push("begin_if");
    }
    fn begin_if_cond_block(&mut self) {
        self.push("begin_if_cond_block");
    }
    fn got_else_if(&mut self) {
        self.push("else_if");
    }
    fn end_if_stmt(&mut self) {
        self.push("end_if");
    }
    fn begin_for_loop(&mut self) {
        self.push("begin_for");
    }
    fn got_for_init(&mut self, name: &Token) {
        self.push(format!("for_init {}", name.text));
    }
    fn got_subsequent_for_init(&mut self, name: &Token, initialized: bool) {
        self.push(format!("subsequent_for_init {} {initialized}", name.text));
    }
    fn determined_for_loop(&mut self, for_each: bool, initialized: bool) {
        self.push(format!("determined_for {for_each} {initialized}"));
    }
    fn got_for_test(&mut self, present: bool) {
        self.push(format!("for_test {present}"));
    }
    fn got_for_increment(&mut self, present: bool) {
        self.push(format!("for_increment {present}"));
    }
    fn begin_for_loop_body(&mut self) {
        self.push("begin_for_body");
    }
    fn got_multi_catch(&mut self) {
        self.push("multi_catch");
    }
    fn got_catch_var_name(&mut self, name: &Token) {
        self.push(format!("catch_var {}", name.text));
    }
    fn got_catch_finally(&mut self, keyword: &Token) {
        self.push(format!("catch_finally {}", keyword.text));
    }
    fn begin_expression(&mut self, first: &Token) {
        self.push(format!("begin_expression {}", first.text));
    }
    fn end_expression(&mut self, next: &Token) {
        self.push(format!("end_expression {}", next.text));
    }
    fn got_binary_operator(&mut self, op: &Token) {
        self.push(format!("binary {}", op.text));
    }
    fn got_unary_operator(&mut self, op: &Token) {
        self.push(format!("unary {}", op.text));
    }
    fn got_postfix_operator(&mut self, op: &Token) {
        self.push(format!("postfix {}", op.text));
    }
    fn begin_argument_list(&mut self, _lparen: &Token) {
        self.push("begin_arguments");
    }
    fn end_argument(&mut self) {
        self.push("end_argument");
    }
    fn end_argument_list(&mut self, _rparen: &Token) {
        self.push("end_arguments");
    }
    fn begin_anon_class_body(&mut self, _lcurly: &Token) {
        self.push("begin_anon_class");
    }
    fn end_anon_class_body(&mut self, _rcurly: &Token) {
        self.push("end_anon_class");
    }
    fn got_lambda_formal_param(&mut self) {
        self.push("lambda_param");
    }
    fn got_lambda_formal_type(&mut self, tokens: &[Token]) {
        self.push(format!("lambda_type {}", join(tokens)));
    }
    fn got_lambda_formal_name(&mut self, name: &Token) {
        self.push(format!("lambda_name {}", name.text));
    }
    fn begin_lambda(&mut self, block: Option<&Token>) {
        self.push(format!("begin_lambda {}", block.is_some()));
    }
    fn end_lambda(&mut self, block_end: Option<&Token>) {
        self.push(format!("end_lambda {}", block_end.is_some()));
    }
}
