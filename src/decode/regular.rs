//! Regular load/store word/byte decoding (ARM ARM A5-15).

use super::fields::{bit, bits, cond, rm, rn, rt, zero_extend};
use super::types::{Direction, RegularForm, RegularLoadStore};

/// Decodes a word already known to match the A5-15 top-level class
/// (`op1 == 010`, or `op1 == 011` with `op == 0`).
pub(super) fn decode(word: u32) -> RegularLoadStore {
    // `op1` here is the 5-bit A5-15 field at [24:20], distinct from the
    // 3-bit top-level discriminator of the same name.
    let op1 = bits(word, 24, 20);
    let a = bit(word, 25) != 0;

    let load = (op1 & 0x01) != 0;
    let byte = (op1 & 0x04) != 0;
    let p = (op1 & 0x10) != 0; // bit 4 of op1 == instruction bit 24
    let w = (op1 & 0x02) != 0; // bit 1 of op1 == instruction bit 21
    // Unprivileged iff P == 0 and W == 1 (bit1, bit4 read in that order: "1_0").
    let unprivileged = !p && w;

    let index = p;
    let wback = !index || w;
    let add = bit(word, 23) != 0;

    let direction = if load { Direction::Load } else { Direction::Store };
    let register_indexed = a;
    let rn_val = rn(word);
    let literal = load && !register_indexed && rn_val == 0xF;

    let form = pick_form(load, byte, unprivileged, register_indexed, literal);

    RegularLoadStore {
        cond: cond(word),
        rn: rn_val,
        rt: rt(word),
        add,
        index,
        wback,
        byte,
        direction,
        form,
        rm: rm(word),
        shift_type: bits(word, 6, 5) as u8,
        imm5: bits(word, 11, 7) as u8,
        imm12: zero_extend(bits(word, 11, 0)) as u16,
    }
}

fn pick_form(
    load: bool,
    byte: bool,
    unprivileged: bool,
    register_indexed: bool,
    literal: bool,
) -> RegularForm {
    use RegularForm::*;
    match (load, byte, unprivileged, literal) {
        (true, false, _, true) => LdrLit,
        (true, true, _, true) => LdrbLit,
        (true, false, true, false) => {
            if register_indexed {
                LdrtReg
            } else {
                LdrtImm
            }
        }
        (true, true, true, false) => {
            if register_indexed {
                LdrbtReg
            } else {
                LdrbtImm
            }
        }
        (true, false, false, false) => {
            if register_indexed {
                LdrReg
            } else {
                LdrImm
            }
        }
        (true, true, false, false) => {
            if register_indexed {
                LdrbReg
            } else {
                LdrbImm
            }
        }
        (false, false, _, _) => {
            if register_indexed {
                StrReg
            } else {
                StrImm
            }
        }
        (false, true, _, _) => {
            if register_indexed {
                StrbReg
            } else {
                StrbImm
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `LDR r0, [r1]` : cond=AL(1110) 0101 1001 0001 0000 000000000000
    /// op1 bits [24:20] = 11001 -> load=1,byte=0, P=1,W=0 -> unprivileged=false
    #[test]
    fn decodes_ldr_immediate_offset() {
        let word = 0b1110_01_0_1_1_0_0_1_0001_0000_000000000000u32;
        let d = decode(word);
        assert_eq!(d.direction, Direction::Load);
        assert!(!d.byte);
        assert_eq!(d.form, RegularForm::LdrImm);
        assert_eq!(d.rn, 1);
        assert_eq!(d.rt, 0);
        assert!(d.index);
    }

    #[test]
    fn literal_form_when_load_immediate_base_is_pc() {
        // Rn = 0xF (1111), load, immediate (A=0)
        let word = 0b1110_01_0_1_1_0_0_1_1111_0000_000000000000u32;
        let d = decode(word);
        assert_eq!(d.form, RegularForm::LdrLit);
        assert_eq!(d.rn, 0xF);
    }

    #[test]
    fn store_register_offset() {
        // A=1 (register), P=1, byte=0, load=0 => STR (register)
        let word = 0b1110_01_1_1_1_0_0_0_0001_0000_00000_00_0_0010u32;
        let d = decode(word);
        assert_eq!(d.direction, Direction::Store);
        assert_eq!(d.form, RegularForm::StrReg);
        assert_eq!(d.rm, 0b0010);
    }
}
