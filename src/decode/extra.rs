//! Extra (halfword/dual/signed) load/store decoding (ARM ARM A5-10, A5-11).
//!
//! Entry condition, resolved from the top-level dispatcher: bit7 == 1 and
//! bit4 == 1 within the data-processing/misc extension space, with
//! `op2 = bits[6:5]` discriminating the sub-form and bit20 (L) selecting
//! load vs store.

use super::fields::{bit, bits, cond, rm, rn, rt};
use super::types::{Direction, ExtraForm, ExtraLoadStore};

pub(super) fn decode(word: u32) -> ExtraLoadStore {
    let p = bit(word, 24) != 0;
    let u = bit(word, 23) != 0;
    let imm = bit(word, 22) != 0;
    let w = bit(word, 21) != 0;
    let l = bit(word, 20) != 0;
    let op2 = bits(word, 6, 5);

    let index = p;
    let wback = !index || w;
    // Unprivileged iff P == 0 and W == 1, mirroring the regular (A5-15) rule.
    let unprivileged = !p && w;

    let register_indexed = !imm;
    let imm32 = if imm {
        (bits(word, 11, 8) << 4) | bits(word, 3, 0)
    } else {
        0
    };

    // op2 == 0b10 is LDRD/LDRSB, always a load regardless of L. op2 == 0b11
    // is STRD (L=0) or LDRSH (L=1), so L selects the direction there.
    let (form, direction) = match (op2, l) {
        (0b01, true) => (ExtraForm::Halfword, Direction::Load),
        (0b01, false) => (ExtraForm::Halfword, Direction::Store),
        (0b10, _) => (ExtraForm::DualOrSignedByte, Direction::Load),
        (0b11, true) => (ExtraForm::SignedHalfwordOrStoreDual, Direction::Load),
        (0b11, false) => (ExtraForm::SignedHalfwordOrStoreDual, Direction::Store),
        _ => (ExtraForm::Halfword, Direction::Store),
    };

    ExtraLoadStore {
        cond: cond(word),
        rn: rn(word),
        rt: rt(word),
        rt2: rt(word).wrapping_add(1),
        add: u,
        index,
        wback,
        unprivileged,
        direction,
        form,
        rm: rm(word),
        imm32,
        register_indexed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ldrh_immediate() {
        // P=1 U=1 imm=1 W=0 L=1, op2=01 (halfword)
        let word = 0b1110_000_1_1_1_0_1_0001_0000_0000_1_01_1_0000u32;
        let d = decode(word);
        assert_eq!(d.form, ExtraForm::Halfword);
        assert_eq!(d.direction, Direction::Load);
        assert!(d.index);
    }

    #[test]
    fn decodes_strd() {
        // op2 = 11, L = 0 => store dual
        let word = 0b1110_000_1_1_1_0_0_0001_0000_0000_1_11_1_0000u32;
        let d = decode(word);
        assert_eq!(d.form, ExtraForm::SignedHalfwordOrStoreDual);
        assert_eq!(d.direction, Direction::Store);
        assert_eq!(d.rt2, d.rt.wrapping_add(1));
    }

    #[test]
    fn decodes_ldrd() {
        // op2 = 10 is LDRD/LDRSB, always a load even with L = 0.
        let word = 0b1110_000_1_1_1_0_0_0001_0000_0000_1_10_1_0000u32;
        let d = decode(word);
        assert_eq!(d.form, ExtraForm::DualOrSignedByte);
        assert_eq!(d.direction, Direction::Load);
        assert_eq!(d.rt2, d.rt.wrapping_add(1));
    }
}
