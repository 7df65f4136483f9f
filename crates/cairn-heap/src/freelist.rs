//! The doubly-linked free list, threaded through block header links.
//!
//! [`insert`](FreeList::insert) and [`remove`](FreeList::remove) are the
//! only code paths in the crate that mutate link fields; everything else
//! (placement, split, coalesce) goes through them. Both are O(n) in the
//! list length under address ordering.

use crate::arena::Arena;
use crate::block::BlockRef;
use crate::config::ListOrder;

/// Set of currently-free blocks, linked through their headers.
///
/// Invariant: a block is linked here iff its header's free flag is set.
/// `insert` establishes the flag; callers that allocate a block clear the
/// flag themselves after `remove`.
pub(crate) struct FreeList {
    head: Option<BlockRef>,
    order: ListOrder,
}

impl FreeList {
    pub fn new(order: ListOrder) -> Self {
        Self { head: None, order }
    }

    pub fn head(&self) -> Option<BlockRef> {
        self.head
    }

    pub fn order(&self) -> ListOrder {
        self.order
    }

    /// Change the insertion order for subsequent inserts. Blocks already
    /// linked are left where they are.
    pub fn set_order(&mut self, order: ListOrder) {
        self.order = order;
    }

    /// Mark `block` free and link it in.
    ///
    /// Under [`ListOrder::AddressOrdered`] the block lands at its address
    /// position (a block below every entry becomes the new head); under
    /// [`ListOrder::Unordered`] it is pushed at the head.
    pub fn insert(&mut self, arena: &mut Arena, block: BlockRef) {
        arena.set_free(block, true);
        match self.order {
            ListOrder::Unordered => {
                arena.set_links(block, None, self.head);
                if let Some(old) = self.head {
                    arena.set_prev(old, Some(block));
                }
                self.head = Some(block);
            }
            ListOrder::AddressOrdered => {
                let mut prev = None;
                let mut cur = self.head;
                while let Some(c) = cur {
                    if c > block {
                        break;
                    }
                    prev = Some(c);
                    cur = arena.header(c).next;
                }
                arena.set_links(block, prev, cur);
                if let Some(c) = cur {
                    arena.set_prev(c, Some(block));
                }
                match prev {
                    Some(p) => arena.set_next(p, Some(block)),
                    None => self.head = Some(block),
                }
            }
        }
    }

    /// Unlink `block`, clearing both its links. The free flag is left as
    /// is; the caller decides whether the block stays free (coalescing)
    /// or becomes live (allocation).
    pub fn remove(&mut self, arena: &mut Arena, block: BlockRef) {
        let h = arena.header(block);
        match h.prev {
            Some(p) => arena.set_next(p, h.next),
            None => self.head = h.next,
        }
        if let Some(n) = h.next {
            arena.set_prev(n, h.prev);
        }
        arena.set_links(block, None, None);
    }

    /// Walk the list in link order.
    pub fn iter<'a>(&self, arena: &'a Arena) -> FreeIter<'a> {
        FreeIter {
            arena,
            cur: self.head,
        }
    }
}

/// Iterator over free-list entries in link order.
pub(crate) struct FreeIter<'a> {
    arena: &'a Arena,
    cur: Option<BlockRef>,
}

impl Iterator for FreeIter<'_> {
    type Item = BlockRef;

    fn next(&mut self) -> Option<BlockRef> {
        let block = self.cur?;
        self.cur = self.arena.header(block).next;
        Some(block)
    }
}
