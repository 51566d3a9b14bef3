//! Generic set-associative cache engine (C1).
//!
//! One [`Cache`] models one level: a row-major table of `(tag, valid)`
//! entries, tag/index/offset arithmetic derived once at construction, and
//! a policy-selected victim chooser. Index wrappers (I-cache/D-cache/L2)
//! compose these with miss forwarding in [`crate::hierarchy`].

use log::{trace, warn};

use crate::error::ConfigError;

use super::config::{AllocatePolicy, CacheConfig, ReplacementPolicy};
use super::replacement::ReplacementState;
use super::stats::CacheCounters;

/// One cache-line slot: a tag and its validity bit.
#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    tag: u32,
    valid: bool,
}

/// Outcome of a single load or store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessResult {
    Hit,
    Miss,
}

impl AccessResult {
    pub fn is_hit(self) -> bool {
        matches!(self, AccessResult::Hit)
    }
}

/// Outcome of [`Cache::validate_injection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionValidation {
    Ok,
    RangeError,
}

/// A set-associative cache: storage, derived mask info, replacement state
/// and counters, guarded by a validity flag for post-teardown safety.
#[derive(Debug, Clone)]
pub struct Cache {
    config: CacheConfig,
    rows: usize,
    block_offset_bits: u32,
    row_bits: u32,
    entries: Vec<Entry>,
    replacement: ReplacementState,
    counters: CacheCounters,
    alive: bool,
}

impl Cache {
    /// Builds a cache from `config`. Fails if size/associativity/block_size
    /// are not each a power of two, or if `associativity * block_size`
    /// does not evenly divide `size`.
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        let CacheConfig {
            size,
            associativity,
            block_size,
            ..
        } = config;

        if !is_power_of_two(size) {
            warn!("cache config rejected: size {size} is not a power of two");
            return Err(ConfigError::SizeNotPowerOfTwo(size));
        }
        if !is_power_of_two(associativity) {
            warn!("cache config rejected: associativity {associativity} is not a power of two");
            return Err(ConfigError::AssociativityNotPowerOfTwo(associativity));
        }
        if !is_power_of_two(block_size) {
            warn!("cache config rejected: block_size {block_size} is not a power of two");
            return Err(ConfigError::BlockSizeNotPowerOfTwo(block_size));
        }
        let set_bytes = associativity * block_size;
        if set_bytes == 0 || size % set_bytes != 0 {
            warn!(
                "cache config rejected: block_size ({block_size}) * associativity \
                 ({associativity}) does not divide size ({size})"
            );
            return Err(ConfigError::Inconsistent {
                size,
                associativity,
                block_size,
            });
        }

        let rows = size / set_bytes;
        let block_offset_bits = block_size.trailing_zeros();
        let row_bits = rows.trailing_zeros();

        Ok(Self {
            rows,
            block_offset_bits,
            row_bits,
            entries: vec![Entry::default(); rows * associativity],
            replacement: ReplacementState::new(config.replacement, rows),
            counters: CacheCounters::default(),
            alive: true,
            config,
        })
    }

    pub fn associativity(&self) -> usize {
        self.config.associativity
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    pub fn stats(&self) -> CacheCounters {
        self.counters
    }

    fn decompose(&self, addr: u32) -> (u32, u32) {
        let row_mask = (1u32 << self.row_bits) - 1;
        let row = (addr >> self.block_offset_bits) & row_mask;
        let tag = addr >> (self.block_offset_bits + self.row_bits);
        (row, tag)
    }

    fn row_slice(&self, row: usize) -> &[Entry] {
        let assoc = self.config.associativity;
        &self.entries[row * assoc..row * assoc + assoc]
    }

    fn row_slice_mut(&mut self, row: usize) -> &mut [Entry] {
        let assoc = self.config.associativity;
        &mut self.entries[row * assoc..row * assoc + assoc]
    }

    /// Scans `row` for a valid entry matching `tag`.
    fn find_hit(&self, row: usize, tag: u32) -> bool {
        self.row_slice(row)
            .iter()
            .any(|e| e.valid && e.tag == tag)
    }

    /// Installs `tag` into `row`, preferring an invalid slot, falling back
    /// to the replacement policy. Returns whether the fill was compulsory
    /// (prior slot invalid) or an eviction.
    fn install(&mut self, row: usize, tag: u32) -> bool {
        if let Some(way) = self
            .row_slice(row)
            .iter()
            .position(|e| !e.valid)
        {
            self.row_slice_mut(row)[way] = Entry { tag, valid: true };
            trace!("cache fill: row={row} way={way} tag={tag:#x} compulsory");
            return true;
        }

        let assoc = self.config.associativity;
        let way = self.replacement.select_victim(row, assoc);
        self.row_slice_mut(row)[way] = Entry { tag, valid: true };
        trace!("cache fill: row={row} way={way} tag={tag:#x} eviction");
        false
    }

    pub fn load(&mut self, addr: u32) -> AccessResult {
        if !self.alive {
            return AccessResult::Miss;
        }
        let (row, tag) = self.decompose(addr);
        if self.find_hit(row as usize, tag) {
            self.counters.load_hits += 1;
            return AccessResult::Hit;
        }
        self.counters.load_misses += 1;
        if self.install(row as usize, tag) {
            self.counters.compulsory_misses += 1;
        } else {
            self.counters.evictions += 1;
        }
        AccessResult::Miss
    }

    pub fn store(&mut self, addr: u32) -> AccessResult {
        if !self.alive {
            return AccessResult::Miss;
        }
        let (row, tag) = self.decompose(addr);
        if self.find_hit(row as usize, tag) {
            self.counters.store_hits += 1;
            return AccessResult::Hit;
        }
        self.counters.store_misses += 1;
        if self.config.allocate == AllocatePolicy::WriteAllocate {
            if self.install(row as usize, tag) {
                self.counters.compulsory_misses += 1;
            } else {
                self.counters.evictions += 1;
            }
        }
        AccessResult::Miss
    }

    /// Clears validity of one entry. Out-of-range `(row, way)` is a no-op.
    pub fn invalidate_block(&mut self, row: usize, way: usize) {
        if !self.alive || row >= self.rows || way >= self.config.associativity {
            return;
        }
        self.row_slice_mut(row)[way].valid = false;
    }

    /// Clears every entry's validity, preserving counters.
    pub fn invalidate_all(&mut self) {
        if !self.alive {
            return;
        }
        for e in &mut self.entries {
            e.valid = false;
        }
    }

    pub fn is_block_valid(&self, row: usize, way: usize) -> bool {
        if !self.alive || row >= self.rows || way >= self.config.associativity {
            return false;
        }
        self.row_slice(row)[way].valid
    }

    /// Reconstructs the effective address cached at `(row, way)`: the
    /// offset bits are always zero. Returns 0 if the cache is torn down or
    /// the slot is not valid.
    pub fn get_addr(&self, row: usize, way: usize) -> u32 {
        if !self.is_block_valid(row, way) {
            return 0;
        }
        let tag = self.row_slice(row)[way].tag;
        (tag << (self.block_offset_bits + self.row_bits)) | ((row as u32) << self.block_offset_bits)
    }

    /// Checks `row < rows`, `way < associativity`, `word_in_block < block_size / 4`.
    pub fn validate_injection(&self, row: usize, way: usize, word_in_block: usize) -> InjectionValidation {
        let words_per_block = self.config.block_size / std::mem::size_of::<u32>();
        if row < self.rows && way < self.config.associativity && word_in_block < words_per_block {
            InjectionValidation::Ok
        } else {
            InjectionValidation::RangeError
        }
    }

    /// Clears the validity flag and frees storage. Idempotent; subsequent
    /// operations become harmless no-ops.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        for e in &mut self.entries {
            e.valid = false;
        }
        self.alive = false;
        self.entries = Vec::new();
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}
