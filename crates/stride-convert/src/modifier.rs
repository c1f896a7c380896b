use std::fmt;

use stride_syntax::Span;

use crate::element::AccessPermission;
use crate::expression::Expression;
use crate::warning::{ConversionWarning, WarningManager};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Modifier {
    Keyword {
        keyword: String,
        span: Span,
    },
    Annotation {
        name: String,
        params: Option<Vec<Expression>>,
        span: Span,
    },
}

impl Modifier {
    pub(crate) fn span(&self) -> Span {
        match self {
            Modifier::Keyword { span, .. } | Modifier::Annotation { span, .. } => *span,
        }
    }

    fn is_keyword(&self, text: &str) -> bool {
        matches!(self, Modifier::Keyword { keyword, .. } if keyword == text)
    }

    fn is_annotation(&self, text: &str) -> bool {
        matches!(self, Modifier::Annotation { name, .. } if name == text)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Keyword { keyword, .. } => f.write_str(keyword),
            Modifier::Annotation { name, params, .. } => {
                write!(f, "@{name}")?;
                if let Some(params) = params {
                    let args = params
                        .iter()
                        .map(Expression::java)
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, "({args})")?;
                }
                Ok(())
            }
        }
    }
}

/// Removes every access keyword. When several are written the widest wins:
/// `public`, then `protected`, then `private`.
pub(crate) fn take_access(modifiers: &mut Vec<Modifier>) -> Option<AccessPermission> {
    fn rank(access: AccessPermission) -> u8 {
        match access {
            AccessPermission::Public => 2,
            AccessPermission::Protected => 1,
            AccessPermission::Private => 0,
        }
    }

    let mut access: Option<AccessPermission> = None;
    modifiers.retain(|m| match m {
        Modifier::Keyword { keyword, .. } => match AccessPermission::from_keyword(keyword) {
            Some(found) => {
                if access.map_or(true, |current| rank(found) > rank(current)) {
                    access = Some(found);
                }
                false
            }
            None => true,
        },
        Modifier::Annotation { .. } => true,
    });
    access
}

/// Removes every occurrence of `keyword`, reporting whether there was one.
pub(crate) fn take_keyword(modifiers: &mut Vec<Modifier>, keyword: &str) -> bool {
    let before = modifiers.len();
    modifiers.retain(|m| !m.is_keyword(keyword));
    modifiers.len() != before
}

pub(crate) fn take_annotation(modifiers: &mut Vec<Modifier>, name: &str) -> bool {
    let before = modifiers.len();
    modifiers.retain(|m| !m.is_annotation(name));
    modifiers.len() != before
}

/// One warning per modifier that survived the caller's removals.
pub(crate) fn warn_remaining(context: &str, modifiers: &[Modifier], warnings: &mut WarningManager) {
    for modifier in modifiers {
        warnings.add(ConversionWarning::modifier(context, modifier.to_string()));
    }
}
