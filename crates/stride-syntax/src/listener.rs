//! The event vocabulary a scanner reports while recognizing Java source.
//!
//! Events arrive in source order. Comments are reported as soon as they enter
//! the scanner's lookahead window, so a comment may be reported before the
//! events of the construct that precedes it in the text have finished.
//! Every method has an empty default so listeners only implement what they use.

use crate::lexer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDefKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeDefKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeDefKind::Class => "class",
            TypeDefKind::Interface => "interface",
            TypeDefKind::Enum => "enum",
            TypeDefKind::Annotation => "@interface",
        }
    }
}

#[allow(unused_variables)]
pub trait SyntaxListener {
    /// A token was consumed; its start is the current scan position.
    fn token_consumed(&mut self, token: &Token) {}
    fn got_comment(&mut self, token: &Token) {}
    fn parse_failed(&mut self, position: usize, message: &str) {}

    // Compilation unit and type declarations.
    fn got_package(&mut self, name: &[Token]) {}
    fn got_import(&mut self, name: &[Token], is_static: bool) {}
    fn got_wildcard_import(&mut self, name: &[Token], is_static: bool) {}
    fn got_top_level_decl(&mut self) {}
    /// A type declaration nested in a type body or a block.
    fn got_inner_type(&mut self, keyword: &Token) {}
    fn got_type_def(&mut self, keyword: &Token, kind: TypeDefKind) {}
    fn got_type_def_name(&mut self, name: &Token) {}
    fn got_type_def_type_params(&mut self) {}
    fn begin_type_def_extends(&mut self) {}
    fn end_type_def_extends(&mut self) {}
    fn begin_type_def_implements(&mut self) {}
    fn end_type_def_implements(&mut self) {}
    fn begin_type_body(&mut self, lcurly: &Token) {}
    fn end_type_body(&mut self, rcurly: &Token) {}
    fn got_type_def_end(&mut self) {}
    /// `imports_only` is set when the unit ended without any type declaration.
    fn finished_compilation_unit(&mut self, imports_only: bool) {}

    // Declarations.
    /// Opens a modifier list; closed by [`SyntaxListener::modifiers_consumed`].
    fn got_decl_begin(&mut self) {}
    fn got_modifier(&mut self, token: &Token) {}
    /// When `params_follow` is set an argument list follows immediately.
    fn got_annotation(&mut self, name: &[Token], params_follow: bool) {}
    fn modifiers_consumed(&mut self) {}
    fn got_type_spec(&mut self, tokens: &[Token]) {}
    fn got_array_declarator(&mut self) {}
    fn got_method_type_params(&mut self) {}
    fn got_method_declaration(&mut self, name: &Token) {}
    fn got_constructor_decl(&mut self, name: &Token) {}
    fn begin_formal_parameter(&mut self) {}
    fn got_method_parameter(&mut self, name: &Token, ellipsis: Option<&Token>) {}
    fn begin_throws(&mut self) {}
    fn end_throws(&mut self) {}
    fn begin_method_body(&mut self, lcurly: &Token) {}
    fn end_method_decl(&mut self) {}
    /// `super(...)` or `this(...)` as the first statement of a constructor.
    fn got_constructor_call(&mut self, keyword: &Token) {}
    fn begin_field_declarations(&mut self) {}
    fn got_field(&mut self, name: &Token, initialized: bool) {}
    fn got_subsequent_field(&mut self, name: &Token, initialized: bool) {}
    fn end_field_declarations(&mut self) {}
    fn got_variable_decl(&mut self, name: &Token, initialized: bool) {}
    fn got_subsequent_var(&mut self, name: &Token, initialized: bool) {}
    fn end_variable_decls(&mut self) {}
    fn begin_init_block(&mut self, lcurly: &Token) {}
    fn end_init_block(&mut self) {}

    // Statements.
    fn begin_stmtblock_body(&mut self, lcurly: &Token) {}
    fn end_stmtblock_body(&mut self) {}
    fn got_statement_expression(&mut self) {}
    fn got_empty_statement(&mut self) {}
    fn got_return_statement(&mut self, has_value: bool) {}
    fn got_throw(&mut self) {}
    fn got_break_continue(&mut self, keyword: &Token, label: Option<&Token>) {}
    fn got_statement_label(&mut self, label: &Token) {}
    fn begin_while_loop(&mut self) {}
    fn begin_do_while(&mut self) {}
    fn begin_if_stmt(&mut self) {}
    fn begin_if_cond_block(&mut self) {}
    fn got_else_if(&mut self) {}
    fn end_if_stmt(&mut self) {}
    fn begin_for_loop(&mut self) {}
    fn got_for_init(&mut self, name: &Token) {}
    fn got_subsequent_for_init(&mut self, name: &Token, initialized: bool) {}
    fn determined_for_loop(&mut self, for_each: bool, initialized: bool) {}
    fn got_for_test(&mut self, present: bool) {}
    fn got_for_increment(&mut self, present: bool) {}
    fn begin_for_loop_body(&mut self) {}
    fn begin_switch_stmt(&mut self) {}
    fn begin_switch_block(&mut self) {}
    fn got_switch_case(&mut self) {}
    fn got_switch_default(&mut self) {}
    fn end_switch_block(&mut self) {}
    fn begin_try_catch_stmt(&mut self, has_resources: bool) {}
    fn begin_try_block(&mut self) {}
    fn end_try_block(&mut self) {}
    /// `keyword` is either `catch` or `finally`.
    fn got_catch_finally(&mut self, keyword: &Token) {}
    fn got_multi_catch(&mut self) {}
    fn got_catch_var_name(&mut self, name: &Token) {}
    fn end_try_catch_stmt(&mut self) {}
    fn got_assert(&mut self) {}
    fn begin_synchronized_block(&mut self) {}

    // Expressions.
    fn begin_expression(&mut self, first: &Token) {}
    /// `next` is the first token after the expression; its start is the
    /// exclusive end of the span.
    fn end_expression(&mut self, next: &Token) {}
    fn got_binary_operator(&mut self, op: &Token) {}
    fn got_unary_operator(&mut self, op: &Token) {}
    fn got_postfix_operator(&mut self, op: &Token) {}
    fn got_question_operator(&mut self, op: &Token) {}
    fn got_question_colon(&mut self, op: &Token) {}
    fn begin_argument_list(&mut self, lparen: &Token) {}
    /// Reported after every argument, including the last.
    fn end_argument(&mut self) {}
    fn end_argument_list(&mut self, rparen: &Token) {}
    fn begin_anon_class_body(&mut self, lcurly: &Token) {}
    fn end_anon_class_body(&mut self, rcurly: &Token) {}
    fn got_lambda_formal_param(&mut self) {}
    fn got_lambda_formal_type(&mut self, tokens: &[Token]) {}
    fn got_lambda_formal_name(&mut self, name: &Token) {}
    /// `block` is the opening brace of a block body.
    fn begin_lambda(&mut self, block: Option<&Token>) {}
    fn end_lambda(&mut self, block_end: Option<&Token>) {}
}
