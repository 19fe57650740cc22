//! Syntax tree types
//!
//! Every composite node owns its children. The one exception is
//! [`PointerNode::ty`], which is the same `Rc` handle as the type held by the
//! pointer's `variable.value`; building a [`PointerNode`] always takes the
//! handle from the variable so the two can never diverge.

use std::fmt;
use std::rc::Rc;

use crate::frontend::lexer::tokens::TokenKind;
use crate::util::span::{Position, Span};

/// Node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Start,
    End,
    Location,
    Range,
    Body,
    ProgramInit,
    Program,
    AllocationStatement,
    VariableDeclaration,
    InitializationStatement,
    Pointer,
    Memory,
    Allocation,
    PrimitiveType,
    UserDefinedType,
    Variable,
    Value,
    Literal,
    VariableRef,
}

// ---------------------------------------------------------------------------
// Location nodes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartNode {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndNode {
    pub line: usize,
    pub column: usize,
}

/// Start/end line-column pair attached to a node
///
/// `start <= end` in (line, column) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationNode {
    pub start: StartNode,
    pub end: EndNode,
}

impl LocationNode {
    pub fn new(
        start: StartNode,
        end: EndNode,
    ) -> Self {
        debug_assert!(
            (start.line, start.column) <= (end.line, end.column),
            "location start after end"
        );
        Self { start, end }
    }

    pub fn from_span(span: Span) -> Self {
        Self::from_positions(span.start, span.end)
    }

    pub fn from_positions(
        start: Position,
        end: Position,
    ) -> Self {
        Self::new(
            StartNode {
                line: start.line,
                column: start.column,
            },
            EndNode {
                line: end.line,
                column: end.column,
            },
        )
    }
}

impl fmt::Display for LocationNode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "[{}:{} - {}:{}]",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Byte range of source text covered by a program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeNode {
    pub start: usize,
    pub end: usize,
}

impl RangeNode {
    pub fn new(
        start: usize,
        end: usize,
    ) -> Self {
        Self { start, end }
    }
}

// ---------------------------------------------------------------------------
// Program structure
// ---------------------------------------------------------------------------

/// `:name` header that opens every program
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramInitNode {
    pub package_name: String,
    pub location: LocationNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyNode {
    pub program_init: ProgramInitNode,
    /// Statements in source order
    pub statements: Vec<Statement>,
}

/// Tree root
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramNode {
    pub body: BodyNode,
    pub location: LocationNode,
    pub range: RangeNode,
}

impl ProgramNode {
    pub fn package_name(&self) -> &str {
        &self.body.program_init.package_name
    }

    pub fn statements(&self) -> &[Statement] {
        &self.body.statements
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Allocation(AllocationStatementNode),
    VariableDeclaration(VariableDeclarationNode),
}

impl Statement {
    pub fn location(&self) -> &LocationNode {
        match self {
            Statement::Allocation(node) => &node.location,
            Statement::VariableDeclaration(node) => &node.location,
        }
    }

    /// Name of the variable the statement declares
    pub fn declared_name(&self) -> &str {
        match self {
            Statement::Allocation(node) => &node.allocation.pointer.variable.name,
            Statement::VariableDeclaration(node) => &node.variable.name,
        }
    }
}

/// `T! name = allot(U) [-> expr];`
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationStatementNode {
    pub location: LocationNode,
    pub allocation: AllocationNode,
    pub initialization: Option<InitializationStatementNode>,
}

/// `T! name = expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarationNode {
    pub location: LocationNode,
    pub variable: VariableNode,
}

/// `-> expr` tail of an allocation: stores a value through the new pointer
#[derive(Debug, Clone, PartialEq)]
pub struct InitializationStatementNode {
    pub location: LocationNode,
    pub value: Expression,
}

// ---------------------------------------------------------------------------
// Memory nodes
// ---------------------------------------------------------------------------

/// `allot(U)` bound to the declared pointer
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationNode {
    pub location: LocationNode,
    pub pointer: PointerNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerNode {
    pub location: LocationNode,
    /// Declared pointee type, shared with `variable.value.ty`
    pub ty: Rc<TypeNode>,
    pub memory: MemoryNode,
    pub variable: VariableNode,
}

impl PointerNode {
    pub fn new(
        location: LocationNode,
        memory: MemoryNode,
        variable: VariableNode,
    ) -> Self {
        let ty = Rc::clone(&variable.value.ty);
        Self {
            location,
            ty,
            memory,
            variable,
        }
    }

    /// Whether `ty` is still the very object held by the variable's value
    pub fn shares_type_with_variable(&self) -> bool {
        Rc::ptr_eq(&self.ty, &self.variable.value.ty)
    }
}

/// Storage request for one value of the allotted type
///
/// The node only describes the request; live storage is handed out by a
/// `runtime::Storage` when a later stage binds the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNode {
    pub location: LocationNode,
    pub allotted: TypeNode,
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Built-in primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Int,
    Char,
    Bool,
    Float,
    String,
}

impl PrimitiveType {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(PrimitiveType::Int),
            TokenKind::Char => Some(PrimitiveType::Char),
            TokenKind::Bool => Some(PrimitiveType::Bool),
            TokenKind::Float => Some(PrimitiveType::Float),
            TokenKind::String => Some(PrimitiveType::String),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Int => "int",
            PrimitiveType::Char => "char",
            PrimitiveType::Bool => "bool",
            PrimitiveType::Float => "float",
            PrimitiveType::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveTypeNode {
    pub primitive: PrimitiveType,
    pub location: LocationNode,
}

impl PrimitiveTypeNode {
    pub fn type_name(&self) -> &str {
        self.primitive.name()
    }

    pub fn is_primitive(&self) -> bool {
        true
    }
}

/// Class type referenced by name; resolution happens in semantic analysis
#[derive(Debug, Clone, PartialEq)]
pub struct UserDefinedTypeNode {
    pub name: String,
    pub location: LocationNode,
}

impl UserDefinedTypeNode {
    pub fn type_name(&self) -> &str {
        &self.name
    }

    pub fn is_primitive(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Primitive(PrimitiveTypeNode),
    UserDefined(UserDefinedTypeNode),
}

impl TypeNode {
    pub fn type_name(&self) -> &str {
        match self {
            TypeNode::Primitive(node) => node.type_name(),
            TypeNode::UserDefined(node) => node.type_name(),
        }
    }

    pub fn is_primitive(&self) -> bool {
        match self {
            TypeNode::Primitive(node) => node.is_primitive(),
            TypeNode::UserDefined(node) => node.is_primitive(),
        }
    }

    pub fn location(&self) -> &LocationNode {
        match self {
            TypeNode::Primitive(node) => &node.location,
            TypeNode::UserDefined(node) => &node.location,
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// ---------------------------------------------------------------------------
// Variables and values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct VariableNode {
    pub name: String,
    pub location: LocationNode,
    pub value: ValueNode,
}

/// Typed value held by a variable
///
/// `expression` is `None` for a pointer whose storage has only been allotted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    pub location: LocationNode,
    pub ty: Rc<TypeNode>,
    pub expression: Option<Expression>,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    Float,
    String,
    Char,
}

impl LiteralKind {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::NumberLiteral => Some(LiteralKind::Number),
            TokenKind::FloatLiteral => Some(LiteralKind::Float),
            TokenKind::StringLiteral => Some(LiteralKind::String),
            TokenKind::CharLiteral => Some(LiteralKind::Char),
            _ => None,
        }
    }
}

/// Literal with its exact (decoded) text
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    pub kind: LiteralKind,
    pub value: String,
    pub location: LocationNode,
}

/// Use of a variable by name
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRefNode {
    pub name: String,
    pub location: LocationNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(LiteralNode),
    VariableRef(VariableRefNode),
}

impl Expression {
    pub fn location(&self) -> &LocationNode {
        match self {
            Expression::Literal(node) => &node.location,
            Expression::VariableRef(node) => &node.location,
        }
    }

    /// Source text of the expression (decoded for string/char literals)
    pub fn text(&self) -> &str {
        match self {
            Expression::Literal(node) => &node.value,
            Expression::VariableRef(node) => &node.name,
        }
    }
}
