//! Java tokenizer.
//!
//! Comments are produced as tokens rather than skipped: the scanner needs to
//! report each one with its position, and expression spacing needs to drop
//! them explicitly.

use std::fmt;

/// Byte range into the scanned source.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({}..{})", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Keyword,
    IntLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,
    TextBlock,
    Operator,
    Separator,
    LineComment,
    BlockComment,
    Unknown,
    Eof,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::TextBlock
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// True for operators, separators and keywords spelled `text`.
    pub fn is(&self, text: &str) -> bool {
        matches!(
            self.kind,
            TokenKind::Operator | TokenKind::Separator | TokenKind::Keyword
        ) && self.text == text
    }

    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Ident
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

const KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

pub const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "int", "long", "short",
];

// Longest first; the lexer takes the first match.
const OPERATORS: &[&str] = &[
    ">>>=", "<<=", ">>=", ">>>", "...", "->", "::", "++", "--", "&&", "||", "==", "!=", "<=",
    ">=", "+=", "-=", "*=", "/=", "&=", "|=", "^=", "%=", "<<", ">>", "=", ">", "<", "!", "~",
    "?", ":", "+", "-", "*", "/", "&", "|", "^", "%", "@",
];

const SEPARATORS: &[char] = &['(', ')', '{', '}', '[', ']', ';', ',', '.'];

pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || unicode_ident::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Lexer {
            text,
            pos: 0,
            done: false,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    fn bump_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn bump_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while matches!(self.peek_char(), Some(c) if pred(c)) {
            self.bump_char();
        }
    }

    fn skip_whitespace(&mut self) {
        self.bump_while(char::is_whitespace);
    }

    fn lex_line_comment(&mut self) {
        self.bump_while(|c| c != '\n' && c != '\r');
    }

    fn lex_block_comment(&mut self) {
        // `/*` already consumed.
        while !self.remaining().is_empty() && !self.remaining().starts_with("*/") {
            self.bump_char();
        }
        if self.remaining().starts_with("*/") {
            self.pos += 2;
        }
    }

    fn lex_quoted(&mut self, quote: char) {
        // Opening quote already consumed; an unterminated literal stops at end of line.
        while let Some(c) = self.peek_char() {
            match c {
                '\n' | '\r' => break,
                '\\' => {
                    self.bump_char();
                    self.bump_char();
                }
                c if c == quote => {
                    self.bump_char();
                    break;
                }
                _ => {
                    self.bump_char();
                }
            }
        }
    }

    fn lex_text_block(&mut self) {
        // `"""` already consumed.
        while !self.remaining().is_empty() && !self.remaining().starts_with("\"\"\"") {
            if self.bump_char() == Some('\\') {
                self.bump_char();
            }
        }
        if self.remaining().starts_with("\"\"\"") {
            self.pos += 3;
        }
    }

    fn lex_number(&mut self, first: char) -> TokenKind {
        let mut float = first == '.';
        let second = self.peek_char();
        if first == '0' && matches!(second, Some('x' | 'X' | 'b' | 'B')) {
            self.bump_char();
            self.bump_while(|c| c.is_ascii_hexdigit() || c == '_');
        } else {
            self.bump_while(|c| c.is_ascii_digit() || c == '_');
            if !float
                && self.peek_char() == Some('.')
                && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
            {
                float = true;
                self.bump_char();
                self.bump_while(|c| c.is_ascii_digit() || c == '_');
            }
            if matches!(self.peek_char(), Some('e' | 'E')) {
                let sign = matches!(self.peek_char_n(1), Some('+' | '-'));
                let digit_at = if sign { 2 } else { 1 };
                if self.peek_char_n(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                    float = true;
                    self.bump_char();
                    if sign {
                        self.bump_char();
                    }
                    self.bump_while(|c| c.is_ascii_digit() || c == '_');
                }
            }
        }
        match self.peek_char() {
            Some('l' | 'L') => {
                self.bump_char();
            }
            Some('f' | 'F' | 'd' | 'D') => {
                self.bump_char();
                float = true;
            }
            _ => {}
        }
        if float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.pos;
        let Some(ch) = self.bump_char() else {
            return Token::new(TokenKind::Eof, "", Span::new(start, start));
        };

        let kind = match ch {
            '/' if self.peek_char() == Some('/') => {
                self.lex_line_comment();
                TokenKind::LineComment
            }
            '/' if self.peek_char() == Some('*') => {
                self.bump_char();
                self.lex_block_comment();
                TokenKind::BlockComment
            }
            '"' if self.remaining().starts_with("\"\"") => {
                self.pos += 2;
                self.lex_text_block();
                TokenKind::TextBlock
            }
            '"' => {
                self.lex_quoted('"');
                TokenKind::StringLiteral
            }
            '\'' => {
                self.lex_quoted('\'');
                TokenKind::CharLiteral
            }
            c if c.is_ascii_digit() => self.lex_number(c),
            '.' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => self.lex_number('.'),
            c if is_ident_start(c) => {
                self.bump_while(is_ident_continue);
                if is_keyword(&self.text[start..self.pos]) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Ident
                }
            }
            c => {
                self.pos = start;
                if let Some(op) = OPERATORS.iter().find(|op| self.remaining().starts_with(**op)) {
                    self.pos += op.len();
                    TokenKind::Operator
                } else if SEPARATORS.contains(&c) {
                    self.pos += c.len_utf8();
                    TokenKind::Separator
                } else {
                    self.pos += c.len_utf8();
                    TokenKind::Unknown
                }
            }
        };

        Token::new(kind, &self.text[start..self.pos], Span::new(start, self.pos))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.done = true;
            return None;
        }
        Some(token)
    }
}

/// Tokenizes `text`, comments included, without the trailing end-of-file token.
pub fn lex(text: &str) -> Vec<Token> {
    Lexer::new(text).collect()
}

/// Re-lexes `text` and joins its tokens with single spaces, dropping comments.
///
/// With `replace_instanceof` set, the `instanceof` keyword is written as `<:`.
pub fn uniform_spacing(text: &str, replace_instanceof: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for token in Lexer::new(text).filter(|t| !t.kind.is_comment()) {
        if !out.is_empty() {
            out.push(' ');
        }
        if replace_instanceof && token.is("instanceof") {
            out.push_str("<:");
        } else {
            out.push_str(&token.text);
        }
    }
    out
}
