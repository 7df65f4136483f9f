//! Cairn demo: the smallest useful driver.
//!
//! Demonstrates:
//!   1. Allocating two payloads of different sizes
//!   2. Dumping the heap layout after each operation
//!   3. Releasing a payload and observing the hole it leaves
//!
//! Run with:
//!   cargo run --example demo

use cairn_heap::Heap;

fn main() {
    let mut heap = Heap::new();

    let p1 = heap.allocate(16).expect("first allocation failed");
    println!("heap after allocate(16):");
    print!("{}", heap.dump());

    let _p2 = heap.allocate(32).expect("second allocation failed");
    println!("\nheap after allocate(32):");
    print!("{}", heap.dump());

    heap.release(p1);
    println!("\nheap after releasing the first payload:");
    print!("{}", heap.dump());

    let stats = heap.stats();
    println!(
        "\n{} blocks, {} bytes used, {} bytes free of {}",
        stats.block_count, stats.used_bytes, stats.free_bytes, stats.heap_bytes
    );
}
