//! Tree traversal
//!
//! [`Node::accept`] routes to the [`Visitor`] handler for the node's concrete
//! kind. Every handler defaults to the matching `walk_*` function, which
//! visits the children in source order, so a pass only overrides the handlers
//! it needs.
//!
//! `walk_pointer` does not visit [`PointerNode::ty`]: it is the same object
//! reached through `variable.value.ty`, and walking it twice would report the
//! type twice.

use super::ast::*;

/// A syntax tree node that can be traversed
pub trait Node {
    fn kind(&self) -> NodeKind;

    fn accept<V: Visitor>(
        &self,
        visitor: &mut V,
    );
}

/// Per-kind handlers for a tree pass
pub trait Visitor: Sized {
    fn visit_start(
        &mut self,
        _node: &StartNode,
    ) {
    }

    fn visit_end(
        &mut self,
        _node: &EndNode,
    ) {
    }

    fn visit_location(
        &mut self,
        node: &LocationNode,
    ) {
        walk_location(self, node);
    }

    fn visit_range(
        &mut self,
        _node: &RangeNode,
    ) {
    }

    fn visit_program(
        &mut self,
        node: &ProgramNode,
    ) {
        walk_program(self, node);
    }

    fn visit_program_init(
        &mut self,
        node: &ProgramInitNode,
    ) {
        walk_program_init(self, node);
    }

    fn visit_body(
        &mut self,
        node: &BodyNode,
    ) {
        walk_body(self, node);
    }

    fn visit_allocation_statement(
        &mut self,
        node: &AllocationStatementNode,
    ) {
        walk_allocation_statement(self, node);
    }

    fn visit_variable_declaration(
        &mut self,
        node: &VariableDeclarationNode,
    ) {
        walk_variable_declaration(self, node);
    }

    fn visit_initialization_statement(
        &mut self,
        node: &InitializationStatementNode,
    ) {
        walk_initialization_statement(self, node);
    }

    fn visit_allocation(
        &mut self,
        node: &AllocationNode,
    ) {
        walk_allocation(self, node);
    }

    fn visit_pointer(
        &mut self,
        node: &PointerNode,
    ) {
        walk_pointer(self, node);
    }

    fn visit_memory(
        &mut self,
        node: &MemoryNode,
    ) {
        walk_memory(self, node);
    }

    fn visit_primitive_type(
        &mut self,
        node: &PrimitiveTypeNode,
    ) {
        self.visit_location(&node.location);
    }

    fn visit_user_defined_type(
        &mut self,
        node: &UserDefinedTypeNode,
    ) {
        self.visit_location(&node.location);
    }

    fn visit_variable(
        &mut self,
        node: &VariableNode,
    ) {
        walk_variable(self, node);
    }

    fn visit_value(
        &mut self,
        node: &ValueNode,
    ) {
        walk_value(self, node);
    }

    fn visit_literal(
        &mut self,
        node: &LiteralNode,
    ) {
        self.visit_location(&node.location);
    }

    fn visit_variable_ref(
        &mut self,
        node: &VariableRefNode,
    ) {
        self.visit_location(&node.location);
    }
}

pub fn walk_location<V: Visitor>(
    visitor: &mut V,
    node: &LocationNode,
) {
    visitor.visit_start(&node.start);
    visitor.visit_end(&node.end);
}

pub fn walk_program<V: Visitor>(
    visitor: &mut V,
    node: &ProgramNode,
) {
    visitor.visit_location(&node.location);
    visitor.visit_range(&node.range);
    visitor.visit_body(&node.body);
}

pub fn walk_program_init<V: Visitor>(
    visitor: &mut V,
    node: &ProgramInitNode,
) {
    visitor.visit_location(&node.location);
}

pub fn walk_body<V: Visitor>(
    visitor: &mut V,
    node: &BodyNode,
) {
    visitor.visit_program_init(&node.program_init);
    for statement in &node.statements {
        statement.accept(visitor);
    }
}

pub fn walk_allocation_statement<V: Visitor>(
    visitor: &mut V,
    node: &AllocationStatementNode,
) {
    visitor.visit_location(&node.location);
    visitor.visit_allocation(&node.allocation);
    if let Some(init) = &node.initialization {
        visitor.visit_initialization_statement(init);
    }
}

pub fn walk_variable_declaration<V: Visitor>(
    visitor: &mut V,
    node: &VariableDeclarationNode,
) {
    visitor.visit_location(&node.location);
    visitor.visit_variable(&node.variable);
}

pub fn walk_initialization_statement<V: Visitor>(
    visitor: &mut V,
    node: &InitializationStatementNode,
) {
    visitor.visit_location(&node.location);
    node.value.accept(visitor);
}

pub fn walk_allocation<V: Visitor>(
    visitor: &mut V,
    node: &AllocationNode,
) {
    visitor.visit_location(&node.location);
    visitor.visit_pointer(&node.pointer);
}

pub fn walk_pointer<V: Visitor>(
    visitor: &mut V,
    node: &PointerNode,
) {
    visitor.visit_location(&node.location);
    visitor.visit_memory(&node.memory);
    visitor.visit_variable(&node.variable);
}

pub fn walk_memory<V: Visitor>(
    visitor: &mut V,
    node: &MemoryNode,
) {
    visitor.visit_location(&node.location);
    node.allotted.accept(visitor);
}

pub fn walk_variable<V: Visitor>(
    visitor: &mut V,
    node: &VariableNode,
) {
    visitor.visit_location(&node.location);
    visitor.visit_value(&node.value);
}

pub fn walk_value<V: Visitor>(
    visitor: &mut V,
    node: &ValueNode,
) {
    visitor.visit_location(&node.location);
    node.ty.accept(visitor);
    if let Some(expression) = &node.expression {
        expression.accept(visitor);
    }
}

macro_rules! impl_node {
    ($($ty:ty => $kind:ident, $visit:ident;)*) => {
        $(
            impl Node for $ty {
                #[inline]
                fn kind(&self) -> NodeKind {
                    NodeKind::$kind
                }

                #[inline]
                fn accept<V: Visitor>(
                    &self,
                    visitor: &mut V,
                ) {
                    visitor.$visit(self);
                }
            }
        )*
    };
}

impl_node! {
    StartNode => Start, visit_start;
    EndNode => End, visit_end;
    LocationNode => Location, visit_location;
    RangeNode => Range, visit_range;
    ProgramNode => Program, visit_program;
    ProgramInitNode => ProgramInit, visit_program_init;
    BodyNode => Body, visit_body;
    AllocationStatementNode => AllocationStatement, visit_allocation_statement;
    VariableDeclarationNode => VariableDeclaration, visit_variable_declaration;
    InitializationStatementNode => InitializationStatement, visit_initialization_statement;
    AllocationNode => Allocation, visit_allocation;
    PointerNode => Pointer, visit_pointer;
    MemoryNode => Memory, visit_memory;
    PrimitiveTypeNode => PrimitiveType, visit_primitive_type;
    UserDefinedTypeNode => UserDefinedType, visit_user_defined_type;
    VariableNode => Variable, visit_variable;
    ValueNode => Value, visit_value;
    LiteralNode => Literal, visit_literal;
    VariableRefNode => VariableRef, visit_variable_ref;
}

impl Node for Statement {
    fn kind(&self) -> NodeKind {
        match self {
            Statement::Allocation(node) => node.kind(),
            Statement::VariableDeclaration(node) => node.kind(),
        }
    }

    fn accept<V: Visitor>(
        &self,
        visitor: &mut V,
    ) {
        match self {
            Statement::Allocation(node) => node.accept(visitor),
            Statement::VariableDeclaration(node) => node.accept(visitor),
        }
    }
}

impl Node for TypeNode {
    fn kind(&self) -> NodeKind {
        match self {
            TypeNode::Primitive(node) => node.kind(),
            TypeNode::UserDefined(node) => node.kind(),
        }
    }

    fn accept<V: Visitor>(
        &self,
        visitor: &mut V,
    ) {
        match self {
            TypeNode::Primitive(node) => node.accept(visitor),
            TypeNode::UserDefined(node) => node.accept(visitor),
        }
    }
}

impl Node for Expression {
    fn kind(&self) -> NodeKind {
        match self {
            Expression::Literal(node) => node.kind(),
            Expression::VariableRef(node) => node.kind(),
        }
    }

    fn accept<V: Visitor>(
        &self,
        visitor: &mut V,
    ) {
        match self {
            Expression::Literal(node) => node.accept(visitor),
            Expression::VariableRef(node) => node.accept(visitor),
        }
    }
}
