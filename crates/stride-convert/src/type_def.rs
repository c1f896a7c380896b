//! Assembly of class and interface elements from routed members.

use crate::comment::process_comment;
use crate::element::{ClassElement, CodeElement, InterfaceElement, TypeSlot};
use crate::modifier::{take_keyword, warn_remaining, Modifier};
use crate::warning::{ConversionWarning, WarningManager};

/// One type declaration in progress.
///
/// `nested` counts inner type declarations currently open inside this one;
/// while it is non-zero, header and body events belong to an inner type and
/// are ignored.
#[derive(Debug)]
pub(crate) struct TypeDefHandler {
    pub(crate) delegate: Option<TypeDelegate>,
    pub(crate) nested: u32,
    /// Whether the finished element is delivered to the enclosing handler.
    pub(crate) emit: bool,
}

impl TypeDefHandler {
    pub(crate) fn top_level() -> Self {
        Self {
            delegate: None,
            nested: 0,
            emit: true,
        }
    }

    /// A placeholder for an inner type met with no enclosing declaration,
    /// for example in a run of class members.
    pub(crate) fn detached_inner() -> Self {
        Self {
            delegate: None,
            nested: 1,
            emit: false,
        }
    }

    pub(crate) fn is_interface(&self) -> bool {
        matches!(self.delegate, Some(TypeDelegate::Interface(_)))
    }
}

#[derive(Debug)]
pub(crate) enum TypeDelegate {
    Class(ClassBuilder),
    Interface(InterfaceBuilder),
}

impl TypeDelegate {
    pub(crate) fn class(modifiers: Vec<Modifier>, doc: Option<String>) -> Self {
        TypeDelegate::Class(ClassBuilder {
            modifiers,
            element: ClassElement {
                doc,
                ..ClassElement::default()
            },
            pending: Vec::new(),
        })
    }

    pub(crate) fn interface(modifiers: Vec<Modifier>, doc: Option<String>) -> Self {
        TypeDelegate::Interface(InterfaceBuilder {
            modifiers,
            element: InterfaceElement {
                doc,
                ..InterfaceElement::default()
            },
            pending: Vec::new(),
        })
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        match self {
            TypeDelegate::Class(b) => b.element.name = name.to_owned(),
            TypeDelegate::Interface(b) => b.element.name = name.to_owned(),
        }
    }

    /// A class extends at most one type; the last one seen is kept.
    pub(crate) fn add_extends(&mut self, ty: String) {
        match self {
            TypeDelegate::Class(b) => b.element.extends = Some(TypeSlot::new(ty)),
            TypeDelegate::Interface(b) => b.element.extends.push(TypeSlot::new(ty)),
        }
    }

    pub(crate) fn add_implements(&mut self, ty: String) {
        if let TypeDelegate::Class(b) = self {
            b.element.implements.push(TypeSlot::new(ty));
        }
    }

    /// Routes one member into the list it belongs to.
    ///
    /// Comments wait in `pending` and are placed immediately before the next
    /// member, in whichever list that member goes to.
    pub(crate) fn add_member(&mut self, member: CodeElement, warnings: &mut WarningManager) {
        let (pending, target) = match self {
            TypeDelegate::Class(b) => {
                let target = match member {
                    CodeElement::Var(_) => Some(&mut b.element.fields),
                    CodeElement::Constructor(_) => Some(&mut b.element.constructors),
                    CodeElement::Method(_) | CodeElement::MethodProto(_) => {
                        Some(&mut b.element.methods)
                    }
                    _ => None,
                };
                (&mut b.pending, target)
            }
            TypeDelegate::Interface(b) => {
                let target = match member {
                    CodeElement::Var(_) => Some(&mut b.element.fields),
                    CodeElement::MethodProto(_) => Some(&mut b.element.methods),
                    _ => None,
                };
                (&mut b.pending, target)
            }
        };
        match target {
            Some(list) => {
                list.append(pending);
                list.push(member);
            }
            None if member.is_comment() => pending.push(member),
            None => {
                let marker =
                    warnings.add_detached(ConversionWarning::feature(member.kind_name()));
                pending.push(CodeElement::Comment(process_comment(&marker)));
            }
        }
    }

    /// Finishes the element. Trailing comments go to the last non-empty of
    /// methods, constructors and fields.
    pub(crate) fn end(
        self,
        package: Option<String>,
        imports: Vec<String>,
        warnings: &mut WarningManager,
    ) -> CodeElement {
        match self {
            TypeDelegate::Class(mut b) => {
                let mut element = b.element;
                let trailing = std::mem::take(&mut b.pending);
                if !element.methods.is_empty() {
                    element.methods.extend(trailing);
                } else if !element.constructors.is_empty() {
                    element.constructors.extend(trailing);
                } else {
                    element.fields.extend(trailing);
                }
                element.is_abstract = take_keyword(&mut b.modifiers, "abstract");
                take_keyword(&mut b.modifiers, "public");
                warn_remaining("class", &b.modifiers, warnings);
                element.package = package;
                element.imports = imports;
                CodeElement::Class(element)
            }
            TypeDelegate::Interface(mut b) => {
                let mut element = b.element;
                let trailing = std::mem::take(&mut b.pending);
                if !element.methods.is_empty() {
                    element.methods.extend(trailing);
                } else {
                    element.fields.extend(trailing);
                }
                take_keyword(&mut b.modifiers, "public");
                take_keyword(&mut b.modifiers, "abstract");
                warn_remaining("interface", &b.modifiers, warnings);
                element.package = package;
                element.imports = imports;
                CodeElement::Interface(element)
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct ClassBuilder {
    modifiers: Vec<Modifier>,
    element: ClassElement,
    pending: Vec<CodeElement>,
}

#[derive(Debug)]
pub(crate) struct InterfaceBuilder {
    modifiers: Vec<Modifier>,
    element: InterfaceElement,
    pending: Vec<CodeElement>,
}
