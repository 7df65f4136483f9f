//! The backing byte arena and its fixed-increment growth.
//!
//! An owned `Vec<u8>` stands in for the `sbrk`-managed address range of the
//! original design: growth appends one zeroed increment, and the configured
//! byte ceiling plays the role of `sbrk` failure. All header reads and
//! writes go through here, bounds-checked by slice indexing.

use crate::block::{BlockRef, Header, HEADER_BYTES, UNIT_BYTES};

/// Growable contiguous storage for blocks.
pub(crate) struct Arena {
    data: Vec<u8>,
    growth_bytes: usize,
    max_bytes: usize,
}

impl Arena {
    /// Create an empty arena. No memory is reserved until the first
    /// [`grow`](Self::grow).
    pub fn new(growth_bytes: usize, max_bytes: usize) -> Self {
        Self {
            data: Vec::new(),
            growth_bytes,
            max_bytes,
        }
    }

    /// Append one zeroed growth increment and return the offset of the new
    /// region, or `None` if that would exceed the configured ceiling.
    ///
    /// The new region is returned raw: the caller writes its header and
    /// links it into the free list. It is deliberately NOT merged with a
    /// free block ending at the old boundary, preserving the documented
    /// limitation that no single free block ever spans a growth seam.
    pub fn grow(&mut self) -> Option<BlockRef> {
        let old_len = self.data.len();
        if old_len + self.growth_bytes > self.max_bytes {
            return None;
        }
        self.data.resize(old_len + self.growth_bytes, 0);
        Some(BlockRef((old_len / UNIT_BYTES) as u32))
    }

    /// Growth increment in units.
    pub fn growth_units(&self) -> u32 {
        (self.growth_bytes / UNIT_BYTES) as u32
    }

    /// Current arena size in bytes.
    pub fn len_bytes(&self) -> usize {
        self.data.len()
    }

    /// Current arena size in units.
    pub fn len_units(&self) -> u32 {
        (self.data.len() / UNIT_BYTES) as u32
    }

    /// Whether the arena has never grown.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode the header at `block`.
    pub fn header(&self, block: BlockRef) -> Header {
        let at = block.offset_bytes();
        Header::decode(&self.data[at..at + HEADER_BYTES])
    }

    /// Encode `header` at `block`.
    pub fn write_header(&mut self, block: BlockRef, header: Header) {
        let at = block.offset_bytes();
        self.data[at..at + HEADER_BYTES].copy_from_slice(&header.encode());
    }

    /// Block size in units.
    pub fn size_of(&self, block: BlockRef) -> u32 {
        self.header(block).size
    }

    /// Free flag.
    pub fn is_free(&self, block: BlockRef) -> bool {
        self.header(block).is_free
    }

    /// Set the free flag.
    pub fn set_free(&mut self, block: BlockRef, is_free: bool) {
        let mut h = self.header(block);
        h.is_free = is_free;
        self.write_header(block, h);
    }

    /// Rewrite the size field.
    pub fn set_size(&mut self, block: BlockRef, size: u32) {
        let mut h = self.header(block);
        h.size = size;
        self.write_header(block, h);
    }

    /// Rewrite the free-list successor link.
    pub fn set_next(&mut self, block: BlockRef, next: Option<BlockRef>) {
        let mut h = self.header(block);
        h.next = next;
        self.write_header(block, h);
    }

    /// Rewrite the free-list predecessor link.
    pub fn set_prev(&mut self, block: BlockRef, prev: Option<BlockRef>) {
        let mut h = self.header(block);
        h.prev = prev;
        self.write_header(block, h);
    }

    /// Rewrite both links at once.
    pub fn set_links(&mut self, block: BlockRef, prev: Option<BlockRef>, next: Option<BlockRef>) {
        let mut h = self.header(block);
        h.prev = prev;
        h.next = next;
        self.write_header(block, h);
    }

    /// The block physically following `block`, or `None` at the arena end.
    pub fn next_by_addr(&self, block: BlockRef) -> Option<BlockRef> {
        let next = block.0 as u64 + self.size_of(block) as u64;
        if next >= self.len_units() as u64 {
            None
        } else {
            Some(BlockRef(next as u32))
        }
    }

    /// The block physically preceding `block`, or `None` at the arena
    /// start. Linear walk from the start, as in classic left-coalescing.
    pub fn prev_by_addr(&self, block: BlockRef) -> Option<BlockRef> {
        if self.is_empty() || block.0 == 0 {
            return None;
        }
        let mut prev = None;
        let mut cur = BlockRef(0);
        while cur < block {
            prev = Some(cur);
            let size = self.size_of(cur);
            if size == 0 {
                // Corrupted header; stop rather than loop.
                return None;
            }
            cur = BlockRef(cur.0 + size);
        }
        prev
    }

    /// Shared view of `len` bytes starting at byte offset `at`.
    pub fn bytes(&self, at: usize, len: usize) -> &[u8] {
        &self.data[at..at + len]
    }

    /// Mutable view of `len` bytes starting at byte offset `at`.
    pub fn bytes_mut(&mut self, at: usize, len: usize) -> &mut [u8] {
        &mut self.data[at..at + len]
    }
}
