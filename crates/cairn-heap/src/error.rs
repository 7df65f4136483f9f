//! Error types for heap construction and allocation.

use std::error::Error;
use std::fmt;

/// Errors returned by [`Heap::allocate`](crate::Heap::allocate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// A zero-byte request. Rejected before any state changes.
    ZeroSized,
    /// No free block fits and the arena refused to grow further
    /// (or the one permitted growth still left no fitting block).
    OutOfMemory {
        /// Number of payload bytes requested.
        requested: usize,
        /// Current arena size in bytes at the time of failure.
        heap_bytes: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSized => write!(f, "zero-sized allocation request"),
            Self::OutOfMemory {
                requested,
                heap_bytes,
            } => {
                write!(
                    f,
                    "out of memory: requested {requested} bytes, arena is {heap_bytes} bytes"
                )
            }
        }
    }
}

impl Error for AllocError {}

/// Errors from [`HeapConfig`](crate::HeapConfig) validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The growth increment is not a multiple of the 16-byte unit.
    GrowthNotUnitAligned {
        /// The offending increment.
        growth_bytes: usize,
    },
    /// The growth increment is too small to hold one header plus one
    /// payload unit.
    GrowthTooSmall {
        /// The offending increment.
        growth_bytes: usize,
        /// Smallest acceptable increment in bytes.
        min_bytes: usize,
    },
    /// The arena byte limit is smaller than a single growth increment,
    /// so the heap could never grow even once.
    LimitBelowGrowth {
        /// The configured limit.
        max_heap_bytes: usize,
        /// The configured increment.
        growth_bytes: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrowthNotUnitAligned { growth_bytes } => {
                write!(
                    f,
                    "growth increment {growth_bytes} is not a multiple of 16 bytes"
                )
            }
            Self::GrowthTooSmall {
                growth_bytes,
                min_bytes,
            } => {
                write!(
                    f,
                    "growth increment {growth_bytes} is below the minimum of {min_bytes} bytes"
                )
            }
            Self::LimitBelowGrowth {
                max_heap_bytes,
                growth_bytes,
            } => {
                write!(
                    f,
                    "arena limit {max_heap_bytes} is below the growth increment {growth_bytes}"
                )
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_error_display() {
        let e = AllocError::OutOfMemory {
            requested: 2000,
            heap_bytes: 1024,
        };
        let msg = e.to_string();
        assert!(msg.contains("2000"));
        assert!(msg.contains("1024"));
    }

    #[test]
    fn config_error_display() {
        let e = ConfigError::GrowthNotUnitAligned { growth_bytes: 1000 };
        assert!(e.to_string().contains("1000"));
    }
}
