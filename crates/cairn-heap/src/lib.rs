//! Cairn: a free-list heap allocator over a single growable arena.
//!
//! The classic sbrk-and-free-list malloc design, rebuilt on safe Rust:
//! the arena is an owned byte buffer grown in fixed 1024-byte increments,
//! blocks are identified by unit offsets instead of raw pointers, and all
//! allocator state lives in one caller-owned [`Heap`] value.
//!
//! # Architecture
//!
//! ```text
//! Heap (context object)
//! ├── Arena            growable Vec<u8>, header codec, growth ceiling
//! ├── FreeList         doubly-linked through header link fields
//! ├── placement        best/first/worst/next-fit scans
//! └── split + coalesce carving on allocate, left/right merge on release
//! ```
//!
//! Every block, live or free, carries a 2-unit (32-byte) header encoded
//! in the arena itself; block sizes tile the arena exactly, which is what
//! drives the address-order [`Blocks`] walk and left/right coalescing.
//!
//! # Quick start
//!
//! ```rust
//! use cairn_heap::{Heap, Strategy};
//!
//! let mut heap = Heap::new();
//! heap.set_strategy(Strategy::FirstFit);
//!
//! let p = heap.allocate(100).unwrap();
//! heap.payload_bytes_mut(p).fill(0x2A);
//! assert_eq!(heap.payload_bytes(p)[0], 0x2A);
//!
//! heap.release(p);
//! assert_eq!(heap.stats().used_bytes, 0);
//! ```
//!
//! Single-threaded by design: every operation takes `&mut Heap`. There is
//! no double-release detection; a stale [`Payload`] handle is caller
//! misuse (see [`Heap::release`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod arena;
pub mod block;
pub mod config;
pub mod error;
mod freelist;
pub mod heap;
mod placement;
pub mod walk;

pub use block::{BlockRef, Payload, HEADER_UNITS, MIN_REMAINDER_UNITS, UNIT_BYTES};
pub use config::{HeapConfig, ListOrder, Strategy};
pub use error::{AllocError, ConfigError};
pub use heap::{Heap, HeapStats};
pub use walk::{BlockInfo, Blocks, HeapDump};
