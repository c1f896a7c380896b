//! Event-based Java syntax recognition.
//!
//! This crate does not build a syntax tree. [`scan`] walks Java source and
//! reports what it recognizes to a [`SyntaxListener`], one event at a time,
//! with comments interleaved as they enter the lookahead window. Consumers
//! (such as the Stride converter) assemble whatever structure they need.
//!
//! The three scan contexts mirror the fragments a consumer may hand over:
//! a whole compilation unit, a run of class members, or a run of statements.

mod lexer;
mod listener;
mod scanner;

pub use lexer::{is_keyword, lex, uniform_spacing, Lexer, Span, Token, TokenKind, PRIMITIVE_TYPES};
pub use listener::{SyntaxListener, TypeDefKind};
pub use scanner::{scan, ScanContext, ScanError, ScanOptions, MAX_NESTING};
