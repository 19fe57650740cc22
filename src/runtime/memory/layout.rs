//! Byte sizes for allotted types

use indexmap::IndexMap;

use super::MemoryError;
use crate::frontend::parser::ast::{PrimitiveType, TypeNode};
use crate::util::config::TypeSizes;

/// Size table for primitive types
///
/// User-defined types have no declared size yet, so asking for one fails
/// with [`MemoryError::UnknownLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    sizes: IndexMap<PrimitiveType, usize>,
}

impl Layout {
    pub fn from_sizes(sizes: &TypeSizes) -> Self {
        let sizes = [
            (PrimitiveType::Int, sizes.int),
            (PrimitiveType::Char, sizes.char),
            (PrimitiveType::Bool, sizes.bool),
            (PrimitiveType::Float, sizes.float),
            (PrimitiveType::String, sizes.string),
        ]
        .into_iter()
        .collect();
        Self { sizes }
    }

    pub fn primitive_size(
        &self,
        primitive: PrimitiveType,
    ) -> usize {
        self.sizes.get(&primitive).copied().unwrap_or_default()
    }

    /// Bytes needed to hold one value of `ty`
    pub fn size_of(
        &self,
        ty: &TypeNode,
    ) -> Result<usize, MemoryError> {
        match ty {
            TypeNode::Primitive(node) => Ok(self.primitive_size(node.primitive)),
            TypeNode::UserDefined(node) => Err(MemoryError::UnknownLayout(node.name.clone())),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::from_sizes(&TypeSizes::default())
    }
}
