//! Recognition of the two cache-maintenance coprocessor operations the
//! simulator cares about: DCISW (clean/invalidate data cache line by
//! set/way) and ICIALLU (invalidate instruction cache, all).

use super::fields::bits;
use super::types::Coprocessor;

/// A cache-maintenance operation recognized out of an MCR to coprocessor 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMaintenanceOp {
    /// DCISW: invalidate a data cache line by set/way. `set` and `way` are
    /// extracted from the payload register per the default D-cache geometry.
    DcIsw { set: u32, way: u32 },
    /// ICIALLU: invalidate the entire instruction cache.
    IcIallu,
}

/// Checks whether a decoded MCR matches one of the two recognized
/// maintenance ops, given the payload value that was (or would be) moved
/// from `Rt` into the coprocessor register.
pub fn classify(instr: &Coprocessor, payload: u32) -> Option<CacheMaintenanceOp> {
    if instr.coproc != 0xE || instr.opc1 != 0 || instr.crn != 7 {
        return None;
    }
    match (instr.crm, instr.opc2) {
        (6, 2) => {
            let set = bits(payload, 13, 4);
            let way = bits(payload, 31, 30);
            Some(CacheMaintenanceOp::DcIsw { set, way })
        }
        (5, 0) => Some(CacheMaintenanceOp::IcIallu),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::types::{CoprocForm, Direction};

    fn mcr(crn: u8, crm: u8, opc2: u8) -> Coprocessor {
        Coprocessor {
            cond: 0xE,
            coproc: 0xE,
            opc1: 0,
            crn,
            crm,
            opc2,
            rt: 0,
            form: CoprocForm::MoveToCoproc,
            direction: Direction::Store,
        }
    }

    #[test]
    fn recognizes_dcisw_and_extracts_set_way() {
        let instr = mcr(7, 6, 2);
        let payload = (0b01u32 << 30) | (0x123 << 4);
        let op = classify(&instr, payload).unwrap();
        assert_eq!(op, CacheMaintenanceOp::DcIsw { set: 0x123, way: 1 });
    }

    #[test]
    fn recognizes_iciallu() {
        let instr = mcr(7, 5, 0);
        assert_eq!(classify(&instr, 0), Some(CacheMaintenanceOp::IcIallu));
    }

    #[test]
    fn rejects_unrelated_coprocessor_ops() {
        let instr = mcr(2, 0, 0);
        assert_eq!(classify(&instr, 0), None);
    }
}
