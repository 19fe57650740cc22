//! Runtime storage
//!
//! Heap memory behind the [`memory::Storage`] trait, and the binding pass
//! that materialises `allot(...)` requests from a parsed program.

pub mod binder;
pub mod memory;

pub use binder::{Binding, StorageBinder};
pub use memory::{Address, Heap, Layout, MemoryError, Storage};
