//! The converted tree.
//!
//! Every element owns its nested bodies outright and never refers back to its
//! parent. Expression slots carry both the Stride rendering and the original
//! Java rendering of the same span.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessPermission {
    Private,
    Protected,
    Public,
}

impl AccessPermission {
    pub fn keyword(self) -> &'static str {
        match self {
            AccessPermission::Private => "private",
            AccessPermission::Protected => "protected",
            AccessPermission::Public => "public",
        }
    }

    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "private" => Some(AccessPermission::Private),
            "protected" => Some(AccessPermission::Protected),
            "public" => Some(AccessPermission::Public),
            _ => None,
        }
    }
}

/// The position an expression is used in, which decides how it may be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Filled,
    Optional,
    Call,
    SuperThisParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionSlot {
    pub kind: SlotKind,
    /// Native form, with `instanceof` written as `<:`.
    pub stride: String,
    pub java: String,
}

impl ExpressionSlot {
    pub fn new(kind: SlotKind, stride: impl Into<String>, java: impl Into<String>) -> Self {
        Self {
            kind,
            stride: stride.into(),
            java: java.into(),
        }
    }

    /// A filled slot whose two renderings coincide.
    pub fn filled(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(SlotKind::Filled, text.clone(), text)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeSlot(String);

impl TypeSlot {
    pub fn new(text: impl Into<String>) -> Self {
        TypeSlot(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TypeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeSlot({:?})", self.0)
    }
}

impl fmt::Display for TypeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: TypeSlot,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuperThis {
    Super,
    This,
}

impl SuperThis {
    pub fn keyword(self) -> &'static str {
        match self {
            SuperThis::Super => "super",
            SuperThis::This => "this",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarElement {
    /// `None` for local variables.
    pub access: Option<AccessPermission>,
    pub is_static: bool,
    pub is_final: bool,
    pub ty: TypeSlot,
    pub name: String,
    pub init: Option<ExpressionSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorElement {
    pub access: AccessPermission,
    pub params: Vec<Param>,
    pub throws: Vec<TypeSlot>,
    pub delegate: Option<SuperThis>,
    pub delegate_args: Option<ExpressionSlot>,
    pub body: Vec<CodeElement>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodElement {
    pub access: AccessPermission,
    pub is_static: bool,
    pub is_final: bool,
    pub return_type: TypeSlot,
    pub name: String,
    pub params: Vec<Param>,
    pub throws: Vec<TypeSlot>,
    pub body: Vec<CodeElement>,
    pub doc: Option<String>,
}

/// A method without a body: abstract in a class, or an interface member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodProtoElement {
    pub access: AccessPermission,
    pub return_type: TypeSlot,
    pub name: String,
    pub params: Vec<Param>,
    pub throws: Vec<TypeSlot>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassElement {
    pub is_abstract: bool,
    pub name: String,
    pub extends: Option<TypeSlot>,
    pub implements: Vec<TypeSlot>,
    pub fields: Vec<CodeElement>,
    pub constructors: Vec<CodeElement>,
    pub methods: Vec<CodeElement>,
    pub doc: Option<String>,
    pub package: Option<String>,
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceElement {
    pub name: String,
    pub extends: Vec<TypeSlot>,
    pub fields: Vec<CodeElement>,
    pub methods: Vec<CodeElement>,
    pub doc: Option<String>,
    pub package: Option<String>,
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseIf {
    pub condition: ExpressionSlot,
    pub body: Vec<CodeElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfElement {
    pub condition: ExpressionSlot,
    pub body: Vec<CodeElement>,
    pub else_ifs: Vec<ElseIf>,
    pub else_body: Option<Vec<CodeElement>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchArm {
    pub ty: TypeSlot,
    pub name: String,
    pub body: Vec<CodeElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryElement {
    pub body: Vec<CodeElement>,
    /// One arm per caught type; a multi-catch clause is repeated per type.
    pub catches: Vec<CatchArm>,
    pub finally: Option<Vec<CodeElement>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseElement {
    pub expression: ExpressionSlot,
    pub body: Vec<CodeElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchElement {
    pub expression: ExpressionSlot,
    pub cases: Vec<CaseElement>,
    pub default: Option<Vec<CodeElement>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeElement {
    Import(String),
    Package(String),
    Comment(String),
    Var(VarElement),
    Constructor(ConstructorElement),
    Method(MethodElement),
    MethodProto(MethodProtoElement),
    Class(ClassElement),
    Interface(InterfaceElement),
    If(IfElement),
    While {
        condition: ExpressionSlot,
        body: Vec<CodeElement>,
    },
    Foreach {
        ty: TypeSlot,
        var: String,
        iterable: ExpressionSlot,
        body: Vec<CodeElement>,
    },
    Break,
    Return(Option<ExpressionSlot>),
    Throw(ExpressionSlot),
    Try(TryElement),
    Switch(SwitchElement),
    /// An expression used as a statement.
    Call(ExpressionSlot),
    Assign {
        lhs: ExpressionSlot,
        rhs: ExpressionSlot,
    },
}

impl CodeElement {
    /// Short human readable name of the element kind, used in warnings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            CodeElement::Import(_) => "import",
            CodeElement::Package(_) => "package",
            CodeElement::Comment(_) => "comment",
            CodeElement::Var(_) => "variable",
            CodeElement::Constructor(_) => "constructor",
            CodeElement::Method(_) => "method",
            CodeElement::MethodProto(_) => "abstract method",
            CodeElement::Class(_) => "class",
            CodeElement::Interface(_) => "interface",
            CodeElement::If(_) => "if",
            CodeElement::While { .. } => "while",
            CodeElement::Foreach { .. } => "for-each",
            CodeElement::Break => "break",
            CodeElement::Return(_) => "return",
            CodeElement::Throw(_) => "throw",
            CodeElement::Try(_) => "try",
            CodeElement::Switch(_) => "switch",
            CodeElement::Call(_) => "method call",
            CodeElement::Assign { .. } => "assignment",
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, CodeElement::Comment(_))
    }
}
