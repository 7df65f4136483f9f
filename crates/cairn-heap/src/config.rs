//! Heap configuration and placement policy types.

use crate::block::{HEADER_UNITS, UNIT_BYTES};
use crate::error::ConfigError;

/// Policy for choosing a free block to satisfy an allocation.
///
/// Selectable at any time via [`Heap::set_strategy`](crate::Heap::set_strategy);
/// takes effect on the next allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Smallest free block that fits; ties go to the lower address
    /// (first encountered during the scan).
    BestFit,
    /// First free block in list order that fits.
    FirstFit,
    /// Largest free block that fits.
    WorstFit,
    /// First fitting block at an address above the most recently
    /// released block, wrapping to the list start if none is found.
    NextFit,
}

/// Free-list insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOrder {
    /// Keep the free list sorted by ascending block address. O(n)
    /// insertion.
    AddressOrdered,
    /// Push freed blocks at the list head. O(1) insertion; list order
    /// then reflects release order, newest first.
    Unordered,
}

/// Configuration for a [`Heap`](crate::Heap).
///
/// Validated by [`Heap::with_config`](crate::Heap::with_config). The growth
/// increment and arena limit are fixed for the heap's lifetime; strategy and
/// list order remain mutable afterwards.
#[derive(Clone, Debug)]
pub struct HeapConfig {
    /// Bytes added to the arena per growth, the stand-in for one `sbrk`
    /// call. Must be a multiple of 16 and at least 48 (header plus one
    /// payload unit). Default: 1024.
    pub growth_bytes: usize,

    /// Arena size ceiling in bytes. Growth beyond this fails, which is how
    /// out-of-memory is modelled. Default: 1 MiB.
    pub max_heap_bytes: usize,

    /// Initial placement strategy. Default: [`Strategy::BestFit`].
    pub strategy: Strategy,

    /// Initial free-list insertion order. Default: [`ListOrder::AddressOrdered`].
    pub list_order: ListOrder,
}

impl HeapConfig {
    /// Default growth increment: 1024 bytes (64 units).
    pub const DEFAULT_GROWTH_BYTES: usize = 1024;

    /// Default arena ceiling: 1 MiB.
    pub const DEFAULT_MAX_HEAP_BYTES: usize = 1024 * 1024;

    /// Create a config with all defaults.
    pub fn new() -> Self {
        Self {
            growth_bytes: Self::DEFAULT_GROWTH_BYTES,
            max_heap_bytes: Self::DEFAULT_MAX_HEAP_BYTES,
            strategy: Strategy::BestFit,
            list_order: ListOrder::AddressOrdered,
        }
    }

    /// Growth increment in 16-byte units.
    pub fn growth_units(&self) -> u32 {
        (self.growth_bytes / UNIT_BYTES) as u32
    }

    /// Check the sizing parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_bytes = (HEADER_UNITS as usize + 1) * UNIT_BYTES;
        if self.growth_bytes % UNIT_BYTES != 0 {
            return Err(ConfigError::GrowthNotUnitAligned {
                growth_bytes: self.growth_bytes,
            });
        }
        if self.growth_bytes < min_bytes {
            return Err(ConfigError::GrowthTooSmall {
                growth_bytes: self.growth_bytes,
                min_bytes,
            });
        }
        if self.max_heap_bytes < self.growth_bytes {
            return Err(ConfigError::LimitBelowGrowth {
                max_heap_bytes: self.max_heap_bytes,
                growth_bytes: self.growth_bytes,
            });
        }
        Ok(())
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::new()
    }
}
