//! The heap context object: allocation, release, split, and coalescing.
//!
//! A [`Heap`] owns the arena, the free list, the active strategy, and the
//! next-fit resume mark: the explicit-context replacement for the
//! process-wide globals of classic sbrk allocators. Construction and
//! teardown belong to the caller, which also makes independent heaps (and
//! tests) trivial.

use crate::arena::Arena;
use crate::block::{
    units_for, BlockRef, Header, Payload, HEADER_UNITS, MIN_REMAINDER_UNITS, UNIT_BYTES,
};
use crate::config::{HeapConfig, ListOrder, Strategy};
use crate::error::{AllocError, ConfigError};
use crate::freelist::FreeList;
use crate::placement;
use crate::walk::{BlockInfo, Blocks, HeapDump};

/// A single growable arena with free-list allocation.
///
/// Single-threaded by design: every operation takes `&mut self` and runs
/// to completion. Wrap the whole heap in a `Mutex` if you need sharing.
pub struct Heap {
    arena: Arena,
    free: FreeList,
    strategy: Strategy,
    /// Resume mark for next-fit: the block identity produced by the most
    /// recent release, after coalescing.
    last_freed: Option<BlockRef>,
}

impl Heap {
    /// Create a heap with the default configuration.
    pub fn new() -> Self {
        // Defaults are statically valid; see config tests.
        Self::with_config(HeapConfig::new()).expect("default config is valid")
    }

    /// Create a heap from `config`, validating its sizing parameters.
    ///
    /// No memory is reserved until the first allocation triggers growth.
    pub fn with_config(config: HeapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            arena: Arena::new(config.growth_bytes, config.max_heap_bytes),
            free: FreeList::new(config.list_order),
            strategy: config.strategy,
            last_freed: None,
        })
    }

    /// Allocate `size_bytes` of payload.
    ///
    /// The request is rounded up to 16-byte units and a 2-unit header is
    /// added; a free block is then chosen under the active strategy and
    /// split if the remainder would make a viable free block (3 units or
    /// more). If nothing fits, the arena grows by one increment and the
    /// scan reruns once; a request that still has no fitting block then
    /// fails with [`AllocError::OutOfMemory`].
    ///
    /// Growth regions are never merged with a free block at the old arena
    /// boundary, so a request larger than one increment fails even when
    /// total free space would suffice. Known limitation, kept on purpose.
    pub fn allocate(&mut self, size_bytes: usize) -> Result<Payload, AllocError> {
        if size_bytes == 0 {
            return Err(AllocError::ZeroSized);
        }
        let required = units_for(size_bytes).saturating_add(HEADER_UNITS);

        let mut chosen =
            placement::choose(&self.arena, &self.free, self.strategy, self.last_freed, required);
        if chosen.is_none() && self.grow() {
            chosen =
                placement::choose(&self.arena, &self.free, self.strategy, self.last_freed, required);
        }
        let Some(block) = chosen else {
            return Err(AllocError::OutOfMemory {
                requested: size_bytes,
                heap_bytes: self.arena.len_bytes(),
            });
        };

        self.free.remove(&mut self.arena, block);
        let block = self.split(block, required);
        self.arena.set_free(block, false);
        Ok(block.payload())
    }

    /// Return an allocation to the heap.
    ///
    /// The block is marked free, reinserted into the free list, coalesced
    /// with its left then right address neighbor, and the result becomes
    /// the next-fit resume mark. A handle freed between two free neighbors
    /// therefore merges with both in one call.
    ///
    /// Releasing a handle that is not a live allocation (stale copy,
    /// double release) is unchecked misuse: it can scramble the heap's
    /// bookkeeping or panic on a bounds check, though never touch memory
    /// outside the arena.
    pub fn release(&mut self, payload: Payload) {
        let block = payload.block();
        self.free.insert(&mut self.arena, block);
        let block = self.coalesce_left(block);
        let block = self.coalesce_right(block);
        self.last_freed = Some(block);
    }

    /// Extend the arena by one increment and hand the new region to the
    /// free list as a single block. False once the ceiling is reached.
    fn grow(&mut self) -> bool {
        let Some(block) = self.arena.grow() else {
            return false;
        };
        self.arena
            .write_header(block, Header::free(self.arena.growth_units()));
        self.free.insert(&mut self.arena, block);
        true
    }

    /// Shrink `block` to `required` units, giving the remainder its own
    /// free header and list entry. Returns `block` unchanged when the
    /// remainder would be under [`MIN_REMAINDER_UNITS`]; the slack stays
    /// inside the block as internal waste.
    fn split(&mut self, block: BlockRef, required: u32) -> BlockRef {
        let original = self.arena.size_of(block);
        if original < required + MIN_REMAINDER_UNITS {
            return block;
        }
        self.arena.set_size(block, required);
        let rest = BlockRef(block.0 + required);
        self.arena
            .write_header(rest, Header::free(original - required));
        self.free.insert(&mut self.arena, rest);
        block
    }

    /// Merge `block` into its address predecessor if that one is free.
    /// Returns the merged block's identity (the predecessor on a merge).
    fn coalesce_left(&mut self, block: BlockRef) -> BlockRef {
        let Some(prev) = self.arena.prev_by_addr(block) else {
            return block;
        };
        if !self.arena.is_free(prev) {
            return block;
        }
        self.free.remove(&mut self.arena, prev);
        self.free.remove(&mut self.arena, block);
        let merged = self.arena.size_of(prev) + self.arena.size_of(block);
        self.arena.set_size(prev, merged);
        self.free.insert(&mut self.arena, prev);
        prev
    }

    /// Merge the address successor into `block` if that one is free.
    fn coalesce_right(&mut self, block: BlockRef) -> BlockRef {
        let Some(next) = self.arena.next_by_addr(block) else {
            return block;
        };
        if !self.arena.is_free(next) {
            return block;
        }
        self.free.remove(&mut self.arena, block);
        self.free.remove(&mut self.arena, next);
        let merged = self.arena.size_of(block) + self.arena.size_of(next);
        self.arena.set_size(block, merged);
        self.free.insert(&mut self.arena, block);
        block
    }

    // ─── Introspection ──────────────────────────────────────────────

    /// Iterate all blocks in address order.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks::new(&self.arena)
    }

    /// Diagnostic view of the heap; `Display` prints one entry per block.
    pub fn dump(&self) -> HeapDump<'_> {
        HeapDump::new(self)
    }

    /// Describe `block`, or `None` if the offset lies outside the arena.
    pub fn block_info(&self, block: BlockRef) -> Option<BlockInfo> {
        if block.0 >= self.arena.len_units() {
            return None;
        }
        let h = self.arena.header(block);
        Some(BlockInfo {
            block,
            offset_bytes: block.offset_bytes(),
            size_bytes: h.size as usize * UNIT_BYTES,
            is_free: h.is_free,
        })
    }

    /// Head of the free list.
    pub fn first_free(&self) -> Option<BlockRef> {
        self.free.head()
    }

    /// Free-list successor of `block`.
    pub fn next_free(&self, block: BlockRef) -> Option<BlockRef> {
        self.arena.header(block).next
    }

    /// Free-list predecessor of `block`.
    pub fn prev_free(&self, block: BlockRef) -> Option<BlockRef> {
        self.arena.header(block).prev
    }

    /// Address successor of `block`.
    pub fn next_by_addr(&self, block: BlockRef) -> Option<BlockRef> {
        self.arena.next_by_addr(block)
    }

    /// Address predecessor of `block` (linear scan from the arena start).
    pub fn prev_by_addr(&self, block: BlockRef) -> Option<BlockRef> {
        self.arena.prev_by_addr(block)
    }

    /// Aggregate counts and byte totals, computed by one address walk.
    pub fn stats(&self) -> HeapStats {
        let mut stats = HeapStats {
            heap_bytes: self.arena.len_bytes(),
            ..HeapStats::default()
        };
        for info in self.blocks() {
            stats.block_count += 1;
            if info.is_free {
                stats.free_block_count += 1;
                stats.free_bytes += info.size_bytes;
            } else {
                stats.used_bytes += info.size_bytes;
            }
        }
        stats
    }

    /// Shared view of an allocation's payload bytes.
    ///
    /// The slice covers the block's full rounded-up capacity, which may
    /// exceed the originally requested length.
    pub fn payload_bytes(&self, payload: Payload) -> &[u8] {
        let len = self.payload_len(payload);
        self.arena.bytes(payload.offset_bytes(), len)
    }

    /// Mutable view of an allocation's payload bytes.
    pub fn payload_bytes_mut(&mut self, payload: Payload) -> &mut [u8] {
        let len = self.payload_len(payload);
        self.arena.bytes_mut(payload.offset_bytes(), len)
    }

    fn payload_len(&self, payload: Payload) -> usize {
        let size = self.arena.size_of(payload.block());
        (size - HEADER_UNITS) as usize * UNIT_BYTES
    }

    // ─── Configuration ──────────────────────────────────────────────

    /// The active placement strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Switch the placement strategy; effective on the next allocation.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// The active free-list insertion order.
    pub fn list_order(&self) -> ListOrder {
        self.free.order()
    }

    /// Switch the insertion order for subsequent inserts; blocks already
    /// in the list keep their positions.
    pub fn set_list_order(&mut self, order: ListOrder) {
        self.free.set_order(order);
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate heap counters returned by [`Heap::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Total arena size in bytes.
    pub heap_bytes: usize,
    /// Bytes in live blocks, headers included.
    pub used_bytes: usize,
    /// Bytes in free blocks, headers included.
    pub free_bytes: usize,
    /// Number of blocks tiling the arena.
    pub block_count: usize,
    /// Number of free blocks.
    pub free_block_count: usize,
}
