//! Simulator-wide configuration (§10), centralizing what the teacher's own
//! `Driver` struct centralizes for a compilation run: the knobs needed
//! before a simulation starts.

use crate::cache::CacheConfig;
use crate::driver::TextRange;

/// Everything needed to build a [`crate::hierarchy::CacheHierarchy`] and
/// [`crate::driver::AccessDriver`] for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub icache: CacheConfig,
    pub dcache: CacheConfig,
    pub l2: CacheConfig,
    pub text_range: TextRange,
    /// Non-empty iff the guest target is ARM v7-A; gates cache-control
    /// (DCISW/ICIALLU) decoding.
    pub arm_identification: &'static str,
}

impl SimulatorConfig {
    pub fn is_arm_target(&self) -> bool {
        !self.arm_identification.is_empty()
    }
}

impl Default for SimulatorConfig {
    /// Reproduces the §4.2 architectural defaults with an empty `.text`
    /// range; callers building a real run supply their own `text_range`.
    fn default() -> Self {
        Self {
            icache: CacheConfig::l1_default(),
            dcache: CacheConfig::l1_default(),
            l2: CacheConfig::l2_default(),
            text_range: TextRange::new(0, 0),
            arm_identification: "armv7a-cortex_a9",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_identifies_as_arm_target() {
        assert!(SimulatorConfig::default().is_arm_target());
    }

    #[test]
    fn empty_identification_disables_arm_target() {
        let cfg = SimulatorConfig {
            arm_identification: "",
            ..SimulatorConfig::default()
        };
        assert!(!cfg.is_arm_target());
    }
}
