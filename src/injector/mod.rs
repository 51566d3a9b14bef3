//! Single-shot fault injector (C5, §4.5).

use log::info;

use crate::cache::InjectionValidation;
use crate::hierarchy::{CacheHierarchy, CacheLevel};

/// A parsed injection request: fire once, at a given instruction count,
/// corrupting one word of one cache line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionPlan {
    pub sleep_cycles: u64,
    pub cache_target: CacheLevel,
    pub row: usize,
    pub way: usize,
    pub word_in_block: usize,
}

/// The injector's own state, separate from the crate-level error type since
/// it is an expected, non-exceptional progression (§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectorState {
    Armed,
    Fired,
}

/// Everything a firing emits to the external collaborator (§6): the
/// instruction count observed at fire time and the corrupted byte address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireEvent {
    pub insn_count: u64,
    pub addr: u32,
}

/// Result of offering one instruction-retirement tick to the injector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionOutcome {
    /// Threshold not yet reached, or already fired: nothing happened.
    Pending,
    /// Fired this tick; carries the emitted event.
    Fired(FireEvent),
    /// Threshold reached but row/way/word_in_block is out of range for the
    /// targeted cache. The injector stays `ARMED` for a possible retry.
    RangeError,
    /// Threshold reached, slot in range, but the targeted line was never
    /// filled (or was since invalidated). Reported; state stays `ARMED`.
    InvalidSlot,
}

const BYTES_PER_WORD: u32 = std::mem::size_of::<u32>() as u32;

pub struct Injector {
    plan: InjectionPlan,
    state: InjectorState,
}

impl Injector {
    pub fn new(plan: InjectionPlan) -> Self {
        Self {
            plan,
            state: InjectorState::Armed,
        }
    }

    pub fn state(&self) -> InjectorState {
        self.state
    }

    pub fn plan(&self) -> InjectionPlan {
        self.plan
    }

    /// Offers one instruction-retirement event to the injector. Only
    /// transitions `ARMED -> FIRED`; a `FIRED` injector is inert forever.
    pub fn on_instruction_retired(
        &mut self,
        insn_count: u64,
        hierarchy: &CacheHierarchy,
    ) -> InjectionOutcome {
        if self.state == InjectorState::Fired {
            return InjectionOutcome::Pending;
        }
        if insn_count < self.plan.sleep_cycles {
            return InjectionOutcome::Pending;
        }

        match hierarchy.validate_injection(
            self.plan.cache_target,
            self.plan.row,
            self.plan.way,
            self.plan.word_in_block,
        ) {
            InjectionValidation::RangeError => {
                info!("injection range error: {:?}", self.plan);
                InjectionOutcome::RangeError
            }
            InjectionValidation::Ok => {
                if !hierarchy.is_block_valid(self.plan.cache_target, self.plan.row, self.plan.way) {
                    InjectionOutcome::InvalidSlot
                } else {
                    let base = hierarchy.get_addr(self.plan.cache_target, self.plan.row, self.plan.way);
                    let addr = base.wrapping_add(self.plan.word_in_block as u32 * BYTES_PER_WORD);
                    self.state = InjectorState::Fired;
                    info!("fault injected at insn_count={insn_count} addr=0x{addr:08X}");
                    InjectionOutcome::Fired(FireEvent { insn_count, addr })
                }
            }
        }
    }
}

/// Frames a fire event the way the collaborator expects it (§6): two
/// `0x%08X` tokens, instruction count then address.
pub fn frame_fire_event(event: FireEvent) -> String {
    format!("0x{:08X} 0x{:08X}", event.insn_count, event.addr)
}
