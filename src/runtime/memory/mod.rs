//! Storage for allotted memory
//!
//! The syntax tree only records *what* an `allot(...)` asks for. Storage is
//! materialised here, behind the [`Storage`] trait, when a later pass asks
//! for it (see [`crate::runtime::binder`]).
//!
//! Blocks are tracked by address. A released block stays in the map as a
//! tombstone so a second release is reported as a double free rather than an
//! unknown address.

mod layout;

pub use layout::Layout;

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::trace;

/// First address handed out by a [`Heap`]
pub const HEAP_BASE: u64 = 0x1000_0000;

/// Default byte limit for a [`Heap`] (64 KiB)
pub const DEFAULT_HEAP_LIMIT: usize = 64 * 1024;

/// Address of an allocated block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u64);

impl fmt::Display for Address {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("OutOfMemory: requested {requested} bytes with {live} live, limit is {limit}")]
    OutOfMemory {
        requested: usize,
        live: usize,
        limit: usize,
    },

    #[error("InvalidAddress: {0} was never allocated")]
    InvalidAddress(Address),

    #[error("DoubleFree: {0} has already been released")]
    DoubleFree(Address),

    #[error("UnknownLayout: no size known for type '{0}'")]
    UnknownLayout(String),
}

/// Backing store for allotted memory
pub trait Storage {
    /// Reserve `size` bytes and return the block's address
    fn allocate(
        &mut self,
        size: usize,
    ) -> Result<Address, MemoryError>;

    /// Release a block previously returned by [`Storage::allocate`]
    fn release(
        &mut self,
        address: Address,
    ) -> Result<(), MemoryError>;

    /// Bytes currently allocated and not yet released
    fn live_bytes(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Live,
    Released,
}

/// A block of heap memory
///
/// Releasing a block frees its buffer; the size is kept for reporting.
#[derive(Debug, Clone)]
pub struct HeapBlock {
    data: Vec<u8>,
    size: usize,
    state: BlockState,
}

impl HeapBlock {
    fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
            size,
            state: BlockState::Live,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_live(&self) -> bool {
        self.state == BlockState::Live
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn release(&mut self) {
        self.state = BlockState::Released;
        self.data = Vec::new();
    }
}

/// Byte-limited heap with double-free detection
#[derive(Debug, Clone)]
pub struct Heap {
    blocks: IndexMap<Address, HeapBlock>,
    next_address: u64,
    live_bytes: usize,
    limit: usize,
}

impl Heap {
    /// Create a heap that holds at most `limit` live bytes
    pub fn new(limit: usize) -> Self {
        Self {
            blocks: IndexMap::new(),
            next_address: HEAP_BASE,
            live_bytes: 0,
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Look up a live block
    pub fn block(
        &self,
        address: Address,
    ) -> Result<&HeapBlock, MemoryError> {
        match self.blocks.get(&address) {
            Some(block) if block.is_live() => Ok(block),
            Some(_) => Err(MemoryError::DoubleFree(address)),
            None => Err(MemoryError::InvalidAddress(address)),
        }
    }

    /// Bytes still held by block buffers, released blocks included
    pub fn retained_bytes(&self) -> usize {
        self.blocks.values().map(|block| block.data.capacity()).sum()
    }

    /// Live blocks in allocation order
    pub fn live_blocks(&self) -> impl Iterator<Item = (Address, &HeapBlock)> + '_ {
        self.blocks
            .iter()
            .filter(|(_, block)| block.is_live())
            .map(|(address, block)| (*address, block))
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new(DEFAULT_HEAP_LIMIT)
    }
}

impl Storage for Heap {
    fn allocate(
        &mut self,
        size: usize,
    ) -> Result<Address, MemoryError> {
        let out_of_memory = MemoryError::OutOfMemory {
            requested: size,
            live: self.live_bytes,
            limit: self.limit,
        };
        let live = self
            .live_bytes
            .checked_add(size)
            .filter(|total| *total <= self.limit)
            .ok_or_else(|| out_of_memory.clone())?;
        // Zero-sized blocks still get a distinct address
        let next_address = u64::try_from(size.max(1))
            .ok()
            .and_then(|step| self.next_address.checked_add(step))
            .ok_or(out_of_memory)?;

        let address = Address(self.next_address);
        self.next_address = next_address;
        self.blocks.insert(address, HeapBlock::new(size));
        self.live_bytes = live;
        trace!("Allocated {} bytes at {}", size, address);
        Ok(address)
    }

    fn release(
        &mut self,
        address: Address,
    ) -> Result<(), MemoryError> {
        let block = self
            .blocks
            .get_mut(&address)
            .ok_or(MemoryError::InvalidAddress(address))?;
        if !block.is_live() {
            return Err(MemoryError::DoubleFree(address));
        }
        block.release();
        self.live_bytes -= block.size();
        trace!("Released {} bytes at {}", block.size(), address);
        Ok(())
    }

    fn live_bytes(&self) -> usize {
        self.live_bytes
    }
}
