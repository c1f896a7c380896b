//! Streaming conversion of Java source events into a Stride element tree.
//!
//! The converter never sees a syntax tree. It listens to the events a
//! [`stride_syntax::scan`] reports, in source order, and rebuilds nested
//! structure from them with a handful of stacks: one for statement blocks,
//! one for expressions being captured, and one per kind of multi-part
//! construct. Constructs Stride has no counterpart for are dropped or
//! rewritten and reported as [`ConversionWarning`]s, both in the returned
//! list and as marker comments in the tree.
//!
//! ```
//! use stride_convert::{convert_java, CodeElement, ConvertOptions};
//! use stride_syntax::ScanContext;
//!
//! let options = ConvertOptions::with_context(ScanContext::Statement);
//! let conversion = convert_java("x += 2;", &options).unwrap();
//! assert!(matches!(conversion.elements(), [CodeElement::Assign { .. }]));
//! assert!(conversion.warnings().is_empty());
//! ```

mod builder;
mod capture;
mod comment;
mod config;
mod converter;
mod element;
mod error;
mod expression;
mod handlers;
mod modifier;
mod render;
mod type_def;
mod warning;

pub use comment::{is_doc_comment, process_comment};
pub use config::{init_tracing, ConvertOptions, LoggingConfig, WarningStyle};
pub use converter::{Conversion, Converter};
pub use element::{
    AccessPermission, CaseElement, CatchArm, ClassElement, CodeElement, ConstructorElement,
    ElseIf, ExpressionSlot, IfElement, InterfaceElement, MethodElement, MethodProtoElement, Param,
    SlotKind, SuperThis, SwitchElement, TryElement, TypeSlot, VarElement,
};
pub use error::ConvertError;
pub use expression::Expression;
pub use render::render_java;
pub use warning::ConversionWarning;

/// Scans `source` and converts it in one pass.
///
/// A parse failure yields [`ConvertError::Parse`] and no partial output.
pub fn convert_java(source: &str, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    options.validate()?;
    let mut converter = Converter::new(source, options.warning_comments);
    stride_syntax::scan(source, options.scan_options(), &mut converter)?;
    converter.finish()
}
