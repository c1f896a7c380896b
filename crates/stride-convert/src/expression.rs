//! Captured expression text and its conversion into slots and statements.

use stride_syntax::{lex, uniform_spacing};

use crate::element::{CodeElement, ExpressionSlot, SlotKind};
use crate::warning::{ConversionWarning, WarningManager};

/// The outermost assignment of a captured expression, split at its operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub(crate) operator: String,
    pub(crate) target: (String, String),
    pub(crate) value: (String, String),
}

/// An immutable snapshot of one expression span in both renderings, plus the
/// operators spotted inside it that Stride cannot express in every position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    stride: String,
    java: String,
    inc_dec: usize,
    assignment: Option<Box<Assignment>>,
    nested_assignments: usize,
}

impl Expression {
    /// Normalizes raw Java expression text.
    pub fn new(text: &str) -> Self {
        Self {
            stride: uniform_spacing(text, true),
            java: uniform_spacing(text, false),
            inc_dec: 0,
            assignment: None,
            nested_assignments: 0,
        }
    }

    pub(crate) fn captured(
        text: &str,
        inc_dec: usize,
        assignment: Option<Assignment>,
        nested_assignments: usize,
    ) -> Self {
        Self {
            inc_dec,
            assignment: assignment.map(Box::new),
            nested_assignments,
            ..Self::new(text)
        }
    }

    pub fn stride(&self) -> &str {
        &self.stride
    }

    pub fn java(&self) -> &str {
        &self.java
    }

    /// Joins expressions with `separator`; any assignment in a part counts as
    /// nested in the result.
    pub fn join(items: Vec<Expression>, separator: &str) -> Expression {
        let stride = items
            .iter()
            .map(|e| e.stride.as_str())
            .collect::<Vec<_>>()
            .join(separator);
        let java = items
            .iter()
            .map(|e| e.java.as_str())
            .collect::<Vec<_>>()
            .join(separator);
        Expression {
            stride,
            java,
            inc_dec: items.iter().map(|e| e.inc_dec).sum(),
            assignment: None,
            nested_assignments: items
                .iter()
                .map(|e| e.nested_assignments + usize::from(e.assignment.is_some()))
                .sum(),
        }
    }

    fn warn_unsupported(&self, warnings: &mut WarningManager) {
        if self.inc_dec > 0 {
            warnings.add(ConversionWarning::feature("++/-- in expression"));
        }
        if self.nested_assignments > 0 || self.assignment.is_some() {
            warnings.add(ConversionWarning::feature("assignment in expression"));
        }
    }

    fn into_slot(self, kind: SlotKind, warnings: &mut WarningManager) -> ExpressionSlot {
        self.warn_unsupported(warnings);
        ExpressionSlot::new(kind, self.stride, self.java)
    }

    pub(crate) fn into_filled(self, warnings: &mut WarningManager) -> ExpressionSlot {
        self.into_slot(SlotKind::Filled, warnings)
    }

    pub(crate) fn into_optional(self, warnings: &mut WarningManager) -> ExpressionSlot {
        self.into_slot(SlotKind::Optional, warnings)
    }

    pub(crate) fn into_super_this_params(self, warnings: &mut WarningManager) -> ExpressionSlot {
        self.into_slot(SlotKind::SuperThisParams, warnings)
    }

    /// Converts an expression statement.
    ///
    /// The outermost assignment becomes an assignment element, a leading or
    /// trailing `++`/`--` becomes an explicit add-one or subtract-one
    /// assignment, and anything else is a call.
    pub(crate) fn into_statement(mut self, warnings: &mut WarningManager) -> CodeElement {
        if let Some(assignment) = self.assignment.take() {
            self.warn_unsupported(warnings);
            let Assignment {
                operator,
                target,
                value,
            } = *assignment;
            let rhs = match operator.strip_suffix('=') {
                Some(op) if !op.is_empty() => {
                    let wrap = |text: &str| {
                        if token_count(text) > 1 {
                            format!("( {text} )")
                        } else {
                            text.to_owned()
                        }
                    };
                    ExpressionSlot::new(
                        SlotKind::Filled,
                        format!("{} {op} {}", target.0, wrap(&value.0)),
                        format!("{} {op} {}", target.1, wrap(&value.1)),
                    )
                }
                _ => ExpressionSlot::new(SlotKind::Filled, value.0, value.1),
            };
            return CodeElement::Assign {
                lhs: ExpressionSlot::new(SlotKind::Filled, target.0, target.1),
                rhs,
            };
        }

        if self.inc_dec > 0 {
            if let Some((target, op)) = self.inc_dec_target() {
                self.inc_dec -= 1;
                self.warn_unsupported(warnings);
                let rhs = ExpressionSlot::new(
                    SlotKind::Filled,
                    format!("{} {op} 1", target.0),
                    format!("{} {op} 1", target.1),
                );
                return CodeElement::Assign {
                    lhs: ExpressionSlot::new(SlotKind::Filled, target.0, target.1),
                    rhs,
                };
            }
        }

        CodeElement::Call(self.into_slot(SlotKind::Call, warnings))
    }

    /// The operand of a leading or trailing increment/decrement, and the
    /// arithmetic operator it stands for.
    fn inc_dec_target(&self) -> Option<((String, String), char)> {
        for (marker, op) in [("++", '+'), ("--", '-')] {
            let prefix = format!("{marker} ");
            if let (Some(stride), Some(java)) = (
                self.stride.strip_prefix(&prefix),
                self.java.strip_prefix(&prefix),
            ) {
                return Some(((stride.to_owned(), java.to_owned()), op));
            }
            let suffix = format!(" {marker}");
            if let (Some(stride), Some(java)) = (
                self.stride.strip_suffix(&suffix),
                self.java.strip_suffix(&suffix),
            ) {
                return Some(((stride.to_owned(), java.to_owned()), op));
            }
        }
        None
    }
}

fn token_count(text: &str) -> usize {
    lex(text).iter().filter(|t| !t.kind.is_comment()).count()
}
