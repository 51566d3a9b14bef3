//! Crate-level error type.
//!
//! Only genuinely exceptional conditions live here (see `DESIGN.md`). Cache
//! hit/miss, injector arming state, and range-check outcomes are plain
//! enums elsewhere — they are expected results, not errors.

use thiserror::Error;

/// A cache parameter failed one of the invariants required by [`crate::cache::Cache::new`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cache size {0} is not a power of two")]
    SizeNotPowerOfTwo(usize),
    #[error("associativity {0} is not a power of two")]
    AssociativityNotPowerOfTwo(usize),
    #[error("block size {0} is not a power of two")]
    BlockSizeNotPowerOfTwo(usize),
    #[error("block_size ({block_size}) * associativity ({associativity}) does not divide size ({size})")]
    Inconsistent {
        size: usize,
        associativity: usize,
        block_size: usize,
    },
}

/// The instruction classifier was handed a word of the wrong width.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected a 4-byte ARM v7-A instruction word, got {0} bytes")]
    SizeMismatch(usize),
}

/// Top-level error type for fallible constructors across the crate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
