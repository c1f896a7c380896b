//! Outermost expression capture.
//!
//! A capture counts nested `begin_expression`/`end_expression` pairs and only
//! finishes when the count returns to zero. The captured text runs from the
//! first begin to the exclusive end reported with the last end, minus masked
//! byte ranges.

use stride_syntax::Span;

use crate::element::VarElement;
use crate::expression::{Assignment, Expression};

const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", ">>>=",
];

/// Where a finished expression goes.
#[derive(Debug)]
pub(crate) enum ExpressionConsumer {
    Statement,
    /// Balances the events of a construct whose text is not needed.
    Discard,
    WhileCondition,
    IfCondition,
    ElseIfCondition,
    ReturnValue,
    Throw,
    VarInit(VarElement),
    Argument,
    SwitchExpression,
    SwitchCase,
    ForEach,
    ForVarInit,
    ForTest,
    ForUpdate,
}

#[derive(Debug, Clone, Copy)]
struct Mask {
    start: usize,
    end: Option<usize>,
}

#[derive(Debug)]
struct AssignmentOp {
    operator: String,
    span: Span,
    depth: usize,
}

#[derive(Debug)]
pub(crate) struct ExpressionCapture {
    consumer: ExpressionConsumer,
    start: Option<usize>,
    outstanding: usize,
    masks: Vec<Mask>,
    inc_dec: usize,
    assignments: Vec<AssignmentOp>,
}

impl ExpressionCapture {
    pub(crate) fn new(consumer: ExpressionConsumer) -> Self {
        Self {
            consumer,
            start: None,
            outstanding: 0,
            masks: Vec::new(),
            inc_dec: 0,
            assignments: Vec::new(),
        }
    }

    pub(crate) fn consumer(&self) -> &ExpressionConsumer {
        &self.consumer
    }

    pub(crate) fn begin(&mut self, at: usize) {
        if self.outstanding == 0 {
            self.start = Some(at);
        }
        self.outstanding += 1;
    }

    /// Returns true once the outermost expression has ended.
    pub(crate) fn end(&mut self) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        self.outstanding -= 1;
        self.outstanding == 0
    }

    /// Records a unary, postfix or binary operator sighting.
    pub(crate) fn operator(&mut self, text: &str, span: Span) {
        if text == "++" || text == "--" {
            self.inc_dec += 1;
        } else if ASSIGNMENT_OPERATORS.contains(&text) {
            self.assignments.push(AssignmentOp {
                operator: text.to_owned(),
                span,
                depth: self.outstanding,
            });
        }
    }

    pub(crate) fn mask(&mut self, span: Span) {
        self.masks.push(Mask {
            start: span.start,
            end: Some(span.end),
        });
    }

    pub(crate) fn begin_mask(&mut self, start: usize) {
        self.masks.push(Mask { start, end: None });
    }

    /// Closes the most recently opened mask that is still open.
    pub(crate) fn end_mask(&mut self, end: usize) {
        if let Some(mask) = self.masks.iter_mut().rev().find(|m| m.end.is_none()) {
            mask.end = Some(end);
        }
    }

    pub(crate) fn finish(self, source: &str, end: usize) -> (ExpressionConsumer, Expression) {
        let start = self.start.unwrap_or(end);
        let mut masks: Vec<(usize, usize)> = self
            .masks
            .iter()
            .filter_map(|m| m.end.map(|e| (m.start, e)))
            .collect();
        masks.sort_unstable();

        let outermost = self.assignments.iter().position(|a| a.depth == 1);
        let nested = self.assignments.len() - usize::from(outermost.is_some());
        let assignment = outermost.map(|idx| {
            let op = &self.assignments[idx];
            let target = masked_text(source, start, op.span.start, &masks);
            let value = masked_text(source, op.span.end, end, &masks);
            let target = Expression::new(&target);
            let value = Expression::new(&value);
            Assignment {
                operator: op.operator.clone(),
                target: (target.stride().to_owned(), target.java().to_owned()),
                value: (value.stride().to_owned(), value.java().to_owned()),
            }
        });

        let text = masked_text(source, start, end, &masks);
        let expression = Expression::captured(&text, self.inc_dec, assignment, nested);
        (self.consumer, expression)
    }
}

/// `source[start..end]` without the masked ranges that lie wholly inside it.
fn masked_text(source: &str, start: usize, end: usize, masks: &[(usize, usize)]) -> String {
    let mut out = String::new();
    let mut prev = start;
    for &(mask_start, mask_end) in masks {
        if mask_start >= prev && mask_end <= end {
            out.push_str(source.get(prev..mask_start).unwrap_or_default());
            prev = mask_end;
        }
    }
    if prev < end {
        out.push_str(source.get(prev..end).unwrap_or_default());
    }
    out
}
