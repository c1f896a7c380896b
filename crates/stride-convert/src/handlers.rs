//! Statement collection and the smaller handler stacks of the converter.
//!
//! A [`StatementHandler`] collects the statements of one block, or the single
//! statement of a loop or branch body, together with the comments seen while
//! it was on top of the stack. Comments are held back until the scan position
//! has moved past them, so a comment reported early through lookahead still
//! lands after the statement that precedes it in the text.

use crate::comment::{is_doc_comment, process_comment};
use crate::element::{CodeElement, ExpressionSlot};
use crate::expression::Expression;

/// A comment waiting to be placed. Warning markers have no position and are
/// always behind the scan position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingComment {
    pub(crate) position: Option<usize>,
    pub(crate) text: String,
}

impl PendingComment {
    pub(crate) fn at(position: usize, text: impl Into<String>) -> Self {
        Self {
            position: Some(position),
            text: text.into(),
        }
    }

    pub(crate) fn marker(text: impl Into<String>) -> Self {
        Self {
            position: None,
            text: text.into(),
        }
    }

    fn is_behind(&self, current: usize) -> bool {
        self.position.map_or(true, |p| p < current)
    }
}

/// What happens to a handler's content once it is closed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BlockEnd {
    /// The converter's result list; never closed.
    Root,
    /// A nested `{ ... }`, spliced into the enclosing handler.
    Block,
    WhileBody(ExpressionSlot),
    IfBranch,
    MethodBody,
    TypeBody,
    SwitchSegment,
    ForBody,
    TryBody,
    CatchBody,
    FinallyBody,
    /// Content of an unsupported construct, dropped.
    Discard,
    /// The body of a `do`/`while`, dropped; the parent is still told a
    /// statement ended so a single-statement parent closes.
    DoWhileBody,
}

#[derive(Debug)]
pub(crate) struct StatementHandler {
    content: Vec<CodeElement>,
    comments: Vec<PendingComment>,
    single: bool,
    on_end: BlockEnd,
}

impl StatementHandler {
    /// A handler that closes after one statement (`single`) or stays open
    /// until closed explicitly.
    pub(crate) fn new(on_end: BlockEnd, single: bool) -> Self {
        Self {
            content: Vec::new(),
            comments: Vec::new(),
            single,
            on_end,
        }
    }

    pub(crate) fn root() -> Self {
        Self::new(BlockEnd::Root, false)
    }

    pub(crate) fn is_single(&self) -> bool {
        self.single
    }

    pub(crate) fn on_end(&self) -> &BlockEnd {
        &self.on_end
    }

    /// Takes over the parent's comments at or after `current`: they belong
    /// to the construct that is just starting.
    pub(crate) fn steal_comments(&mut self, parent: &mut StatementHandler, current: usize) {
        let (ahead, behind): (Vec<_>, Vec<_>) = parent
            .comments
            .drain(..)
            .partition(|c| c.position.is_some_and(|p| p >= current));
        parent.comments = behind;
        self.comments.extend(ahead);
    }

    pub(crate) fn add_comment(&mut self, comment: PendingComment) {
        self.comments.push(comment);
    }

    pub(crate) fn take_comments(&mut self) -> Vec<PendingComment> {
        std::mem::take(&mut self.comments)
    }

    /// Joins every comment behind `current` (all of them at `eof`) into one
    /// comment element.
    pub(crate) fn collate(&mut self, current: usize, eof: bool) -> Option<CodeElement> {
        let (behind, ahead): (Vec<_>, Vec<_>) = self
            .comments
            .drain(..)
            .partition(|c| eof || c.is_behind(current));
        self.comments = ahead;
        if behind.is_empty() {
            return None;
        }
        let text = behind
            .iter()
            .map(|c| process_comment(&c.text))
            .collect::<Vec<_>>()
            .join(" ");
        Some(CodeElement::Comment(text))
    }

    /// Records statements that just finished, preceded by the comments that
    /// came before them.
    pub(crate) fn found(&mut self, current: usize, elements: Vec<CodeElement>) {
        if let Some(comment) = self.collate(current, false) {
            self.content.push(comment);
        }
        self.content.extend(elements);
    }

    /// Closes the handler, returning its content and any comments still
    /// ahead of the scan position for the caller to hand on.
    pub(crate) fn close(
        mut self,
        current: usize,
        eof: bool,
    ) -> (BlockEnd, Vec<CodeElement>, Vec<PendingComment>) {
        if let Some(comment) = self.collate(current, eof) {
            self.content.push(comment);
        }
        (self.on_end, self.content, self.comments)
    }

    /// Removes and returns the last comment before `current` if it is
    /// documentation. Comments at or after `current` belong to whatever
    /// follows and are left for the next handler to steal.
    pub(crate) fn take_javadoc(&mut self, current: usize) -> Option<String> {
        let index = self.comments.iter().rposition(|c| c.is_behind(current))?;
        if !is_doc_comment(&self.comments[index].text) {
            return None;
        }
        let doc = self.comments.remove(index);
        Some(process_comment(&doc.text))
    }
}

/// Who receives a completed argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArgsTarget {
    /// `super(...)`/`this(...)` at the start of a constructor.
    ConstructorDelegate,
    /// The parameters of the most recent annotation.
    Annotation,
}

/// Collects the arguments of one list, ignoring lists nested inside them.
#[derive(Debug)]
pub(crate) struct ArgumentListHandler {
    pub(crate) args: Vec<Expression>,
    pub(crate) outstanding: usize,
    pub(crate) target: ArgsTarget,
}

impl ArgumentListHandler {
    pub(crate) fn new(target: ArgsTarget) -> Self {
        Self {
            args: Vec::new(),
            outstanding: 0,
            target,
        }
    }
}

/// A consumer registered for the next type reference. Without one, the type
/// is parked until a later event claims it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeExpectation {
    Extends,
    Implements,
    Throws,
}
