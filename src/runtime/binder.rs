//! Storage binding pass
//!
//! Walks a parsed program and reserves one block per `allot(...)`, sized by
//! the allotted type. Nothing is allocated while the tree is built; this pass
//! is the only place storage is acquired.

use tracing::debug;

use super::memory::{Address, Layout, MemoryError, Storage};
use crate::frontend::parser::ast::{LocationNode, PointerNode, ProgramNode};
use crate::frontend::parser::visit::{Node, Visitor};

/// A variable bound to a block of storage
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub variable: String,
    pub type_name: String,
    pub address: Address,
    pub size: usize,
    pub location: LocationNode,
}

/// Allocates storage for every Memory node in a program
pub struct StorageBinder<S: Storage> {
    storage: S,
    layout: Layout,
    bindings: Vec<Binding>,
    error: Option<MemoryError>,
}

impl<S: Storage> StorageBinder<S> {
    pub fn new(
        storage: S,
        layout: Layout,
    ) -> Self {
        Self {
            storage,
            layout,
            bindings: Vec::new(),
            error: None,
        }
    }

    /// Bind every allocation in `program`, in source order
    ///
    /// Stops at the first failure. Blocks bound before the failure stay
    /// live; call [`StorageBinder::release_all`] to return them.
    pub fn bind(
        &mut self,
        program: &ProgramNode,
    ) -> Result<&[Binding], MemoryError> {
        let before = self.bindings.len();
        program.accept(self);
        if let Some(err) = self.error.take() {
            debug!("Storage binding failed: {}", err);
            return Err(err);
        }
        debug!(
            "Bound {} allocation(s), {} live bytes",
            self.bindings.len() - before,
            self.storage.live_bytes()
        );
        Ok(&self.bindings[before..])
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Release every binding, most recent first
    pub fn release_all(&mut self) -> Result<(), MemoryError> {
        while let Some(binding) = self.bindings.last() {
            self.storage.release(binding.address)?;
            self.bindings.pop();
        }
        Ok(())
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: Storage> Visitor for StorageBinder<S> {
    fn visit_pointer(
        &mut self,
        node: &PointerNode,
    ) {
        if self.error.is_some() {
            return;
        }

        let allotted = &node.memory.allotted;
        let bound = self.layout.size_of(allotted).and_then(|size| {
            let address = self.storage.allocate(size)?;
            Ok((address, size))
        });

        match bound {
            Ok((address, size)) => self.bindings.push(Binding {
                variable: node.variable.name.clone(),
                type_name: allotted.type_name().to_string(),
                address,
                size,
                location: node.memory.location,
            }),
            Err(err) => self.error = Some(err),
        }
    }
}
