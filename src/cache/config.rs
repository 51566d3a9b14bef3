//! Static configuration for one cache instance.

/// Line/block replacement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementPolicy {
    /// Per-row cursor, incremented mod associativity on every fill.
    RoundRobin,
    /// A single LCG seed shared across all rows (see `DESIGN.md`).
    Random,
}

/// Whether a store that misses allocates a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocatePolicy {
    WriteAllocate,
    NoWriteAllocate,
}

/// Size/associativity/line-size triple plus policy selection for one cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Total capacity in bytes. Must be a power of two.
    pub size: usize,
    /// Ways per row. Must be a power of two.
    pub associativity: usize,
    /// Bytes per line. Must be a power of two.
    pub block_size: usize,
    pub replacement: ReplacementPolicy,
    pub allocate: AllocatePolicy,
}

impl CacheConfig {
    pub const fn new(
        size: usize,
        associativity: usize,
        block_size: usize,
        replacement: ReplacementPolicy,
        allocate: AllocatePolicy,
    ) -> Self {
        Self {
            size,
            associativity,
            block_size,
            replacement,
            allocate,
        }
    }

    /// Default 32 KiB, 4-way, 32-byte line, RANDOM, NO_WRITE_ALLOCATE — shared by
    /// the I-cache and D-cache defaults.
    pub const fn l1_default() -> Self {
        Self::new(
            32 * 1024,
            4,
            32,
            ReplacementPolicy::Random,
            AllocatePolicy::NoWriteAllocate,
        )
    }

    /// Default 512 KiB, 8-way, 32-byte line, ROUND_ROBIN, WRITE_ALLOCATE.
    pub const fn l2_default() -> Self {
        Self::new(
            512 * 1024,
            8,
            32,
            ReplacementPolicy::RoundRobin,
            AllocatePolicy::WriteAllocate,
        )
    }
}
