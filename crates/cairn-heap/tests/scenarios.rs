//! End-to-end allocation scenarios through the public API.

use cairn_heap::{AllocError, Heap, HeapConfig, Strategy};

fn layout(heap: &Heap) -> Vec<(bool, usize)> {
    heap.blocks().map(|b| (b.is_free, b.size_bytes)).collect()
}

#[test]
fn empty_heap_first_allocation_leaves_two_blocks() {
    let mut heap = Heap::new();
    let p = heap.allocate(16).unwrap();
    assert_eq!(p.offset_bytes(), 32);
    // One used block (16 payload bytes + 32 header = 48) and one free
    // block covering the rest of the 1024-byte growth increment.
    assert_eq!(layout(&heap), vec![(false, 48), (true, 976)]);
}

#[test]
fn released_block_stays_distinct_from_live_neighbor() {
    let mut heap = Heap::new();
    let p1 = heap.allocate(16).unwrap();
    let _p2 = heap.allocate(32).unwrap();
    heap.release(p1);
    // The first region is free at its original rounded size; the live
    // second block is untouched; no merge across the used block.
    assert_eq!(layout(&heap), vec![(true, 48), (false, 64), (true, 912)]);
}

#[test]
fn best_fit_chooses_smallest_sufficient_block() {
    let mut heap = Heap::new();
    assert_eq!(heap.strategy(), Strategy::BestFit);

    // Carve free blocks of 10, 4, and 7 units, separated by live guards
    // so coalescing cannot touch them. Block units = payload/16 + 2.
    let ten = heap.allocate(128).unwrap();
    let _g1 = heap.allocate(16).unwrap();
    let four = heap.allocate(32).unwrap();
    let _g2 = heap.allocate(16).unwrap();
    let seven = heap.allocate(80).unwrap();
    let _g3 = heap.allocate(16).unwrap();
    heap.release(ten);
    heap.release(four);
    heap.release(seven);

    // A request needing 5 units must land in the 7-unit block, the
    // smallest that fits, not in the 10-unit one or the large tail.
    let p = heap.allocate(48).unwrap();
    assert_eq!(p.offset_bytes(), seven.offset_bytes());
}

#[test]
fn request_beyond_one_increment_fails_despite_growth() {
    let mut heap = Heap::with_config(HeapConfig {
        growth_bytes: 1024,
        max_heap_bytes: 8192,
        ..HeapConfig::new()
    })
    .unwrap();

    let err = heap.allocate(2000).unwrap_err();
    assert!(matches!(err, AllocError::OutOfMemory { .. }));
    // The one permitted growth happened and sits free, but increments
    // never merge, so no single block can ever satisfy the request.
    assert_eq!(layout(&heap), vec![(true, 1024)]);
}

#[test]
fn release_then_allocate_returns_same_region() {
    for strategy in [Strategy::FirstFit, Strategy::BestFit] {
        let mut heap = Heap::with_config(HeapConfig {
            strategy,
            ..HeapConfig::new()
        })
        .unwrap();
        let p = heap.allocate(40).unwrap();
        heap.release(p);
        let q = heap.allocate(40).unwrap();
        assert_eq!(q, p, "strategy {strategy:?} did not reuse the region");
    }
}

#[test]
fn interleaved_churn_settles_back_to_one_free_block() {
    let mut heap = Heap::new();
    let mut live = Vec::new();
    for round in 0..8 {
        for size in [8, 24, 100, 3] {
            live.push(heap.allocate(size + round).unwrap());
        }
        // Release every other allocation from this round.
        let base = live.len() - 4;
        heap.release(live.remove(base + 2));
        heap.release(live.remove(base));
    }
    for p in live.drain(..) {
        heap.release(p);
    }
    let stats = heap.stats();
    assert_eq!(stats.used_bytes, 0);
    assert_eq!(stats.free_bytes, stats.heap_bytes);
    // Adjacent free blocks can only survive at growth seams, where fresh
    // increments were appended without merging.
    let infos: Vec<_> = heap.blocks().collect();
    for pair in infos.windows(2) {
        if pair[0].is_free && pair[1].is_free {
            assert_eq!(pair[1].offset_bytes % 1024, 0);
        }
    }
}
