//! Indented syntax-tree dump

use std::fmt;

use super::parser::ast::*;
use super::parser::visit::{self, Node, Visitor};

/// Renders a tree one node per line, children indented by two spaces
///
/// Locations are printed inline, so Start/End/Location/Range nodes do not
/// get lines of their own.
#[derive(Debug, Default)]
pub struct TreePrinter {
    out: String,
    depth: usize,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render any node and everything below it
    pub fn print<N: Node>(node: &N) -> String {
        let mut printer = Self::new();
        node.accept(&mut printer);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(
        &mut self,
        text: fmt::Arguments<'_>,
    ) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        match text.as_str() {
            Some(literal) => self.out.push_str(literal),
            None => self.out.push_str(&text.to_string()),
        }
        self.out.push('\n');
    }

    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self),
    ) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }
}

impl Visitor for TreePrinter {
    fn visit_program(
        &mut self,
        node: &ProgramNode,
    ) {
        self.line(format_args!("Program {} {}", node.package_name(), node.location));
        self.nested(|p| visit::walk_program(p, node));
    }

    fn visit_body(
        &mut self,
        node: &BodyNode,
    ) {
        self.line(format_args!("Body"));
        self.nested(|p| visit::walk_body(p, node));
    }

    fn visit_program_init(
        &mut self,
        node: &ProgramInitNode,
    ) {
        self.line(format_args!(
            "ProgramInit {} {}",
            node.package_name, node.location
        ));
    }

    fn visit_variable_declaration(
        &mut self,
        node: &VariableDeclarationNode,
    ) {
        self.line(format_args!("VariableDeclaration {}", node.location));
        self.nested(|p| visit::walk_variable_declaration(p, node));
    }

    fn visit_allocation_statement(
        &mut self,
        node: &AllocationStatementNode,
    ) {
        self.line(format_args!("AllocationStatement {}", node.location));
        self.nested(|p| visit::walk_allocation_statement(p, node));
    }

    fn visit_initialization_statement(
        &mut self,
        node: &InitializationStatementNode,
    ) {
        self.line(format_args!("InitializationStatement {}", node.location));
        self.nested(|p| visit::walk_initialization_statement(p, node));
    }

    fn visit_allocation(
        &mut self,
        node: &AllocationNode,
    ) {
        self.line(format_args!("Allocation {}", node.location));
        self.nested(|p| visit::walk_allocation(p, node));
    }

    fn visit_pointer(
        &mut self,
        node: &PointerNode,
    ) {
        self.line(format_args!("Pointer {} {}", node.ty, node.location));
        self.nested(|p| visit::walk_pointer(p, node));
    }

    fn visit_memory(
        &mut self,
        node: &MemoryNode,
    ) {
        self.line(format_args!("Memory {}", node.location));
        self.nested(|p| visit::walk_memory(p, node));
    }

    fn visit_variable(
        &mut self,
        node: &VariableNode,
    ) {
        self.line(format_args!("Variable {} {}", node.name, node.location));
        self.nested(|p| visit::walk_variable(p, node));
    }

    fn visit_value(
        &mut self,
        node: &ValueNode,
    ) {
        self.line(format_args!("Value {}", node.location));
        self.nested(|p| visit::walk_value(p, node));
    }

    fn visit_primitive_type(
        &mut self,
        node: &PrimitiveTypeNode,
    ) {
        self.line(format_args!(
            "PrimitiveType {} {}",
            node.primitive.name(),
            node.location
        ));
    }

    fn visit_user_defined_type(
        &mut self,
        node: &UserDefinedTypeNode,
    ) {
        self.line(format_args!("UserDefinedType {} {}", node.name, node.location));
    }

    fn visit_literal(
        &mut self,
        node: &LiteralNode,
    ) {
        self.line(format_args!(
            "Literal {:?} {:?} {}",
            node.kind, node.value, node.location
        ));
    }

    fn visit_variable_ref(
        &mut self,
        node: &VariableRefNode,
    ) {
        self.line(format_args!("VariableRef {} {}", node.name, node.location));
    }
}
