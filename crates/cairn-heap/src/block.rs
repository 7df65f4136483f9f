//! Block identities, payload handles, and the on-arena header codec.
//!
//! Every block, live or free, is prefixed by a 2-unit (32-byte) header
//! encoded little-endian directly in the arena bytes:
//!
//! ```text
//! bytes  0..8   next   free-list successor (unit offset, u64::MAX = none)
//! bytes  8..16  prev   free-list predecessor (same encoding)
//! bytes 16..24  size   total block size in units, header included
//! bytes 24..28  free   1 = free, 0 = live
//! bytes 28..32  pad    reserved, zero
//! ```
//!
//! The link fields are meaningful only while the block is free and are
//! cleared when it becomes live.

use std::fmt;

/// The fixed allocation granularity: every size in the heap is a multiple
/// of this many bytes.
pub const UNIT_BYTES: usize = 16;

/// Header overhead per block, in units (2 units = 32 bytes).
pub const HEADER_UNITS: u32 = 2;

/// Smallest free block worth creating by a split: one header plus one
/// payload unit. A split that would leave less than this keeps the slack
/// inside the allocated block as internal waste.
pub const MIN_REMAINDER_UNITS: u32 = 3;

/// Header size in bytes.
pub(crate) const HEADER_BYTES: usize = HEADER_UNITS as usize * UNIT_BYTES;

/// Encoding of "no link" in the header's next/prev fields.
const LINK_NONE: u64 = u64::MAX;

/// Identity of a block: its offset from the arena start, in units.
///
/// The safe-Rust replacement for the raw `Block*` of classic free-list
/// allocators. Ordered by address, so `a < b` means `a` sits lower in
/// the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockRef(pub(crate) u32);

impl BlockRef {
    /// Byte offset of this block's header from the arena start.
    pub fn offset_bytes(self) -> usize {
        self.0 as usize * UNIT_BYTES
    }

    /// Handle to this block's payload region.
    pub(crate) fn payload(self) -> Payload {
        Payload((self.0 + HEADER_UNITS) * UNIT_BYTES as u32)
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block@{}", self.offset_bytes())
    }
}

/// Handle to an allocation's payload, as returned by
/// [`Heap::allocate`](crate::Heap::allocate).
///
/// Internally a byte offset into the arena, immediately past the owning
/// block's header. Copyable; the heap does not track outstanding copies,
/// so releasing the same handle twice is caller misuse (see
/// [`Heap::release`](crate::Heap::release)).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Payload(pub(crate) u32);

impl Payload {
    /// Byte offset of the payload from the arena start.
    pub fn offset_bytes(self) -> usize {
        self.0 as usize
    }

    /// The block owning this payload.
    pub(crate) fn block(self) -> BlockRef {
        BlockRef(self.0 / UNIT_BYTES as u32 - HEADER_UNITS)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payload@{}", self.0)
    }
}

/// Decoded block header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Header {
    /// Total block size in units, header included. Never zero.
    pub size: u32,
    /// Whether the block is on the free list.
    pub is_free: bool,
    /// Free-list predecessor.
    pub prev: Option<BlockRef>,
    /// Free-list successor.
    pub next: Option<BlockRef>,
}

impl Header {
    /// A free, unlinked header of the given size.
    pub fn free(size: u32) -> Self {
        Self {
            size,
            is_free: true,
            prev: None,
            next: None,
        }
    }

    /// Encode into the on-arena byte layout.
    pub fn encode(&self) -> [u8; HEADER_BYTES] {
        let mut buf = [0u8; HEADER_BYTES];
        buf[0..8].copy_from_slice(&encode_link(self.next).to_le_bytes());
        buf[8..16].copy_from_slice(&encode_link(self.prev).to_le_bytes());
        buf[16..24].copy_from_slice(&(self.size as u64).to_le_bytes());
        buf[24..28].copy_from_slice(&(self.is_free as u32).to_le_bytes());
        buf
    }

    /// Decode from the on-arena byte layout.
    pub fn decode(buf: &[u8]) -> Self {
        let word = |range: std::ops::Range<usize>| {
            u64::from_le_bytes(buf[range].try_into().expect("8-byte header field"))
        };
        Self {
            next: decode_link(word(0..8)),
            prev: decode_link(word(8..16)),
            size: word(16..24) as u32,
            is_free: u32::from_le_bytes(buf[24..28].try_into().expect("4-byte flag")) != 0,
        }
    }
}

fn encode_link(link: Option<BlockRef>) -> u64 {
    match link {
        Some(b) => b.0 as u64,
        None => LINK_NONE,
    }
}

fn decode_link(raw: u64) -> Option<BlockRef> {
    if raw == LINK_NONE {
        None
    } else {
        Some(BlockRef(raw as u32))
    }
}

/// Units needed to hold `size_bytes` payload bytes, rounded up.
///
/// Saturates on absurd requests so the result simply never fits and the
/// allocation fails with out-of-memory instead of wrapping.
pub(crate) fn units_for(size_bytes: usize) -> u32 {
    let units = size_bytes.saturating_add(UNIT_BYTES - 1) / UNIT_BYTES;
    units.try_into().unwrap_or(u32::MAX)
}
