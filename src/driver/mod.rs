//! Access driver (C4, §4.4): binds decoded instructions to cache-hierarchy
//! events as the host steps through a guest instruction stream.

use log::{debug, trace};

use crate::decode::{
    classify_cache_maintenance, decode_instruction, CacheMaintenanceOp, DecodedInstruction,
    Direction,
};
use crate::config::SimulatorConfig;
use crate::error::{ConfigError, DecodeError};
use crate::hierarchy::{CacheHierarchy, CacheLevel};
use crate::injector::{InjectionOutcome, Injector};

/// Inclusive-start, exclusive-end `.text` address range. Accesses inside
/// this range are instruction fetches; the driver accounts them through the
/// I-cache and never double-counts them as data accesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.start && addr < self.end
    }
}

/// Host abstraction for reading guest general-purpose register state,
/// needed only to resolve the DCISW set/way payload out of `Rt` (§9 design
/// notes: this keeps the core independent of any particular host's
/// register file layout).
pub trait RegisterReader {
    fn read_gpr(&self, index: u8) -> u32;
}

/// Bundles what an instruction-fetch callback produced, for a host or test
/// harness that wants to inspect both the decode result and whether the
/// fault injector fired on this retirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOutcome {
    pub decoded: DecodedInstruction,
    pub injection: Option<InjectionOutcome>,
}

/// Owns the cache hierarchy, instruction/access counters and (optionally)
/// an armed fault injector. Replaces the teacher's free-function driver
/// with a single owned context threaded through by the host (§9).
pub struct AccessDriver {
    hierarchy: CacheHierarchy,
    text_range: TextRange,
    arm_target: bool,
    insn_count: u64,
    load_count: u64,
    store_count: u64,
    injector: Option<Injector>,
}

impl AccessDriver {
    pub fn new(hierarchy: CacheHierarchy, text_range: TextRange, arm_target: bool) -> Self {
        Self {
            hierarchy,
            text_range,
            arm_target,
            insn_count: 0,
            load_count: 0,
            store_count: 0,
            injector: None,
        }
    }

    /// Builds the hierarchy from a [`SimulatorConfig`] and wires up the
    /// driver in one step, mirroring the teacher's `Driver` centralizing
    /// its own run configuration ahead of a compile.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self, ConfigError> {
        let hierarchy = CacheHierarchy::new(config.icache, config.dcache, config.l2)?;
        Ok(Self::new(hierarchy, config.text_range, config.is_arm_target()))
    }

    pub fn arm_injector(&mut self, injector: Injector) {
        self.injector = Some(injector);
    }

    pub fn hierarchy(&self) -> &CacheHierarchy {
        &self.hierarchy
    }

    pub fn hierarchy_mut(&mut self) -> &mut CacheHierarchy {
        &mut self.hierarchy
    }

    pub fn insn_count(&self) -> u64 {
        self.insn_count
    }

    pub fn load_count(&self) -> u64 {
        self.load_count
    }

    pub fn store_count(&self) -> u64 {
        self.store_count
    }

    /// Steps 1-3, 5-6: processes one fetched instruction word at `vaddr`.
    pub fn on_instruction_fetch(
        &mut self,
        vaddr: u32,
        bytes: &[u8],
        regs: &dyn RegisterReader,
    ) -> Result<FetchOutcome, DecodeError> {
        let decoded = decode_instruction(bytes)?;

        if !self.text_range.contains(vaddr) {
            trace!("fetch outside .text at 0x{vaddr:08X}, skipping instruction accounting");
            return Ok(FetchOutcome {
                decoded,
                injection: None,
            });
        }

        self.insn_count += 1;
        self.hierarchy.icache_load(vaddr);

        if self.arm_target {
            self.dispatch_cache_maintenance(&decoded, regs);
        }

        let injection = self
            .injector
            .as_mut()
            .map(|inj| inj.on_instruction_retired(self.insn_count, &self.hierarchy));

        debug!("insn_count={} vaddr=0x{vaddr:08X}", self.insn_count);
        Ok(FetchOutcome { decoded, injection })
    }

    fn dispatch_cache_maintenance(&mut self, decoded: &DecodedInstruction, regs: &dyn RegisterReader) {
        let DecodedInstruction::Coprocessor(instr) = *decoded else {
            return;
        };

        if self.hierarchy.is_cache_inst(CacheLevel::Data, &instr) {
            let payload = regs.read_gpr(instr.rt);
            if let Some(CacheMaintenanceOp::DcIsw { set, way }) =
                classify_cache_maintenance(&instr, payload)
            {
                self.hierarchy.dcache_invalidate_block(set as usize, way as usize);
            }
        } else if self.hierarchy.is_cache_inst(CacheLevel::Instruction, &instr) {
            self.hierarchy.icache_invalidate_all();
        }
    }

    /// Step 4: unconditional memory-access callback. Addresses inside
    /// `.text` are skipped — they were already accounted as fetches.
    pub fn on_memory_access(&mut self, vaddr: u32, direction: Direction) {
        if self.text_range.contains(vaddr) {
            return;
        }
        match direction {
            Direction::Load => {
                self.load_count += 1;
                self.hierarchy.dcache_load(vaddr);
            }
            Direction::Store => {
                self.store_count += 1;
                self.hierarchy.dcache_store(vaddr);
            }
            Direction::LoadStore => {
                self.load_count += 1;
                self.hierarchy.dcache_load(vaddr);
                self.store_count += 1;
                self.hierarchy.dcache_store(vaddr);
            }
        }
    }

    pub fn teardown(&mut self) {
        self.hierarchy.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRegs(u32);
    impl RegisterReader for FixedRegs {
        fn read_gpr(&self, _index: u8) -> u32 {
            self.0
        }
    }

    fn driver() -> AccessDriver {
        let h = CacheHierarchy::with_defaults();
        AccessDriver::new(h, TextRange::new(0x1000, 0x2000), true)
    }

    #[test]
    fn builds_from_default_simulator_config() {
        let config = SimulatorConfig {
            text_range: TextRange::new(0x1000, 0x2000),
            ..SimulatorConfig::default()
        };
        let d = AccessDriver::from_config(&config).unwrap();
        assert_eq!(d.insn_count(), 0);
    }

    #[test]
    fn in_text_range_fetch_increments_insn_count_and_feeds_icache() {
        let mut d = driver();
        let word = 0xE320_F000u32; // NOP-ish data-processing word, not a memory op
        let outcome = d.on_instruction_fetch(0x1000, &word.to_le_bytes(), &FixedRegs(0)).unwrap();
        assert!(!outcome.decoded.is_memory_op());
        assert_eq!(d.insn_count(), 1);
    }

    #[test]
    fn out_of_text_range_fetch_does_not_count() {
        let mut d = driver();
        let word = 0xE320_F000u32;
        d.on_instruction_fetch(0x9000, &word.to_le_bytes(), &FixedRegs(0)).unwrap();
        assert_eq!(d.insn_count(), 0);
    }

    #[test]
    fn memory_access_inside_text_range_is_skipped() {
        let mut d = driver();
        d.on_memory_access(0x1500, Direction::Load);
        assert_eq!(d.load_count(), 0);
    }

    #[test]
    fn memory_access_outside_text_range_is_counted() {
        let mut d = driver();
        d.on_memory_access(0x9000, Direction::Store);
        assert_eq!(d.store_count(), 1);
    }

    #[test]
    fn dcisw_fetch_invalidates_targeted_line() {
        let mut d = driver();
        d.on_memory_access(0x3000, Direction::Store); // populate dcache row
        // MCR p14,0,r0,c7,c6,2 with Rt=r0 carrying a set/way payload of 0,0
        let word = 0xEE07_0E56u32;
        d.on_instruction_fetch(0x1000, &word.to_le_bytes(), &FixedRegs(0)).unwrap();
        // Asserting the precise invalidated line requires re-deriving the
        // row/tag math here; this just checks the path runs without panicking
        // and that the instruction was counted.
        assert_eq!(d.insn_count(), 1);
    }
}
