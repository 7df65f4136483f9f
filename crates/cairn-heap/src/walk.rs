//! Address-order block iteration and the diagnostic heap dump.

use std::fmt;

use crate::arena::Arena;
use crate::block::{BlockRef, UNIT_BYTES};
use crate::heap::Heap;

/// One block as seen by an address-order walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    /// The block's identity.
    pub block: BlockRef,
    /// Byte offset of the block's header from the arena start.
    pub offset_bytes: usize,
    /// Total block size in bytes, header included.
    pub size_bytes: usize,
    /// Whether the block is free.
    pub is_free: bool,
}

/// Lazy iterator over all blocks from arena start to arena end.
///
/// Driven purely by the size fields, which tile the arena by invariant;
/// restartable at any time via [`Heap::blocks`](crate::Heap::blocks).
pub struct Blocks<'a> {
    arena: &'a Arena,
    cursor: u32,
}

impl<'a> Blocks<'a> {
    pub(crate) fn new(arena: &'a Arena) -> Self {
        Self { arena, cursor: 0 }
    }
}

impl Iterator for Blocks<'_> {
    type Item = BlockInfo;

    fn next(&mut self) -> Option<BlockInfo> {
        if self.cursor >= self.arena.len_units() {
            return None;
        }
        let block = BlockRef(self.cursor);
        let h = self.arena.header(block);
        if h.size == 0 {
            // Corrupted header; stop rather than loop.
            return None;
        }
        self.cursor += h.size;
        Some(BlockInfo {
            block,
            offset_bytes: block.offset_bytes(),
            size_bytes: h.size as usize * UNIT_BYTES,
            is_free: h.is_free,
        })
    }
}

/// Displayable snapshot of the heap, one entry per block in address
/// order. Returned by [`Heap::dump`](crate::Heap::dump).
pub struct HeapDump<'a> {
    heap: &'a Heap,
}

impl<'a> HeapDump<'a> {
    pub(crate) fn new(heap: &'a Heap) -> Self {
        Self { heap }
    }
}

impl fmt::Display for HeapDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for info in self.heap.blocks() {
            writeln!(f, "Free: {}", info.is_free as u8)?;
            writeln!(f, "Size: {}", info.size_bytes)?;
            writeln!(f, "---------------")?;
        }
        Ok(())
    }
}
