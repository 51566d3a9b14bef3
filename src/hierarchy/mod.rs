//! Cache-level wrappers (C2): the I-cache, D-cache, and L2 instances bound
//! together as one owning context, with first-level misses forwarded to L2.

use crate::cache::{AccessResult, Cache, CacheConfig, CacheCounters, InjectionValidation};
use crate::decode::{Coprocessor, CoprocForm};
use crate::error::ConfigError;

/// Identifies which wrapped cache a fault-injection plan or invalidation
/// targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLevel {
    Instruction,
    Data,
    L2,
}

/// The three-level hierarchy the access driver and fault injector operate
/// against. Replaces the teacher's global state with an explicit owned
/// context (see `DESIGN.md`).
pub struct CacheHierarchy {
    icache: Cache,
    dcache: Cache,
    l2: Cache,
}

impl CacheHierarchy {
    pub fn new(icache: CacheConfig, dcache: CacheConfig, l2: CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            icache: Cache::new(icache)?,
            dcache: Cache::new(dcache)?,
            l2: Cache::new(l2)?,
        })
    }

    /// Builds a hierarchy using the I-cache/D-cache/L2 architectural
    /// defaults (§4.2).
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::l1_default(), CacheConfig::l1_default(), CacheConfig::l2_default())
            .expect("architectural defaults satisfy the power-of-two invariants")
    }

    pub fn level(&self, level: CacheLevel) -> &Cache {
        match level {
            CacheLevel::Instruction => &self.icache,
            CacheLevel::Data => &self.dcache,
            CacheLevel::L2 => &self.l2,
        }
    }

    pub fn icache_load(&mut self, addr: u32) -> AccessResult {
        let first = self.icache.load(addr);
        if first.is_hit() {
            first
        } else {
            self.l2.load(addr)
        }
    }

    pub fn dcache_load(&mut self, addr: u32) -> AccessResult {
        let first = self.dcache.load(addr);
        if first.is_hit() {
            first
        } else {
            self.l2.load(addr)
        }
    }

    pub fn dcache_store(&mut self, addr: u32) -> AccessResult {
        let first = self.dcache.store(addr);
        if first.is_hit() {
            first
        } else {
            self.l2.store(addr)
        }
    }

    pub fn icache_invalidate_all(&mut self) {
        self.icache.invalidate_all();
    }

    pub fn dcache_invalidate_block(&mut self, row: usize, way: usize) {
        self.dcache.invalidate_block(row, way);
    }

    /// Returns true iff `instr` is the control sequence this level recognizes.
    /// I-cache recognizes ICIALLU, D-cache recognizes DCISW; L2 has no
    /// modeled control sequence and never matches.
    pub fn is_cache_inst(&self, level: CacheLevel, instr: &Coprocessor) -> bool {
        if instr.form != CoprocForm::MoveToCoproc || instr.coproc != 0xE || instr.opc1 != 0 || instr.crn != 7 {
            return false;
        }
        match level {
            CacheLevel::Instruction => instr.crm == 5 && instr.opc2 == 0,
            CacheLevel::Data => instr.crm == 6 && instr.opc2 == 2,
            CacheLevel::L2 => false,
        }
    }

    pub fn get_addr(&self, level: CacheLevel, row: usize, way: usize) -> u32 {
        self.level(level).get_addr(row, way)
    }

    pub fn validate_injection(&self, level: CacheLevel, row: usize, way: usize, word_in_block: usize) -> InjectionValidation {
        self.level(level).validate_injection(row, way, word_in_block)
    }

    pub fn is_block_valid(&self, level: CacheLevel, row: usize, way: usize) -> bool {
        self.level(level).is_block_valid(row, way)
    }

    pub fn stats(&self, level: CacheLevel) -> CacheCounters {
        self.level(level).stats()
    }

    /// Clears every cache's validity flags. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.icache.teardown();
        self.dcache.teardown();
        self.l2.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_level_miss_forwards_to_l2() {
        let mut h = CacheHierarchy::with_defaults();
        assert_eq!(h.dcache_load(0x1000), AccessResult::Miss);
        // Second access at the same address hits the D-cache directly.
        assert_eq!(h.dcache_load(0x1000), AccessResult::Hit);
    }

    #[test]
    fn icache_inst_recognized_only_at_instruction_level() {
        let instr = Coprocessor {
            cond: 0xE,
            coproc: 0xE,
            opc1: 0,
            crn: 7,
            crm: 5,
            opc2: 0,
            rt: 0,
            form: CoprocForm::MoveToCoproc,
            direction: crate::decode::Direction::Store,
        };
        let h = CacheHierarchy::with_defaults();
        assert!(h.is_cache_inst(CacheLevel::Instruction, &instr));
        assert!(!h.is_cache_inst(CacheLevel::Data, &instr));
        assert!(!h.is_cache_inst(CacheLevel::L2, &instr));
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut h = CacheHierarchy::with_defaults();
        h.teardown();
        h.teardown();
    }
}
