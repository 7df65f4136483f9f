//! Benchmark workloads for the cairn heap allocator.
//!
//! Provides deterministic allocation/release traces so strategy
//! comparisons measure placement cost, not workload noise.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cairn_heap::{Heap, HeapConfig, Strategy};

/// A heap sized for churn benchmarks: 4 KiB increments up to 4 MiB.
pub fn bench_heap(strategy: Strategy) -> Heap {
    Heap::with_config(HeapConfig {
        growth_bytes: 4096,
        max_heap_bytes: 4 * 1024 * 1024,
        strategy,
        ..HeapConfig::new()
    })
    .expect("bench config is valid")
}

/// Deterministic pseudo-random payload sizes in `8..=256` bytes.
///
/// Plain xorshift so every strategy sees the identical trace.
pub fn size_trace(seed: u64, len: usize) -> Vec<usize> {
    let mut state = seed | 1;
    let mut sizes = Vec::with_capacity(len);
    for _ in 0..len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        sizes.push(8 + (state % 249) as usize);
    }
    sizes
}

/// Run one churn round: allocate every size, then release every other
/// allocation, then release the rest. Leaves the heap fully free.
pub fn churn_round(heap: &mut Heap, sizes: &[usize]) {
    let mut live = Vec::with_capacity(sizes.len());
    for &size in sizes {
        if let Ok(p) = heap.allocate(size) {
            live.push(p);
        }
    }
    let mut rest = Vec::with_capacity(live.len() / 2 + 1);
    for (i, p) in live.drain(..).enumerate() {
        if i % 2 == 0 {
            heap.release(p);
        } else {
            rest.push(p);
        }
    }
    for p in rest {
        heap.release(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_trace_is_deterministic() {
        assert_eq!(size_trace(42, 100), size_trace(42, 100));
    }

    #[test]
    fn size_trace_stays_in_range() {
        assert!(size_trace(7, 1000).iter().all(|&s| (8..=256).contains(&s)));
    }

    #[test]
    fn churn_round_leaves_no_live_blocks() {
        let mut heap = bench_heap(Strategy::BestFit);
        churn_round(&mut heap, &size_trace(42, 64));
        assert_eq!(heap.stats().used_bytes, 0);
    }
}
