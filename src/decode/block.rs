//! Block (multiple-register) load/store decoding (ARM ARM A5-21), including
//! the POP/PUSH/LDM-user-registers/LDM-exception-return special cases.

use super::fields::{bit, bits, cond, rn};
use super::types::{BlockForm, BlockLoadStore, Direction};

pub(super) fn decode(word: u32) -> BlockLoadStore {
    let p = bit(word, 24) != 0;
    let u = bit(word, 23) != 0;
    let s = bit(word, 22) != 0;
    let w = bit(word, 21) != 0;
    let l = bit(word, 20) != 0;
    let rn_val = rn(word);
    let register_list = bits(word, 15, 0) as u16;

    let direction = if l { Direction::Load } else { Direction::Store };

    let form = if l && !p && u && w && rn_val == 13 {
        BlockForm::PopMult
    } else if !l && p && !u && w && rn_val == 13 {
        BlockForm::PushMult
    } else if l && s && (register_list & 0x8000) != 0 {
        BlockForm::LdmExceptionReturn
    } else if s {
        BlockForm::LdmUserRegisters
    } else {
        BlockForm::Generic
    };

    BlockLoadStore {
        cond: cond(word),
        rn: rn_val,
        direction,
        form,
        add: u,
        index: p,
        wback: w,
        register_list,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pop_multiple() {
        let word = 0xE8BD_000Fu32;
        let d = decode(word);
        assert_eq!(d.form, BlockForm::PopMult);
        assert_eq!(d.rn, 0xD);
        assert_eq!(d.register_list, 0x000F);
        assert_eq!(d.direction, Direction::Load);
    }

    #[test]
    fn decodes_push_multiple() {
        // STMDB SP!, {r4-r7}: P=1 U=0 S=0 W=1 L=0, Rn=13
        let word = 0b1110_100_1_0_0_1_0_1101_0000_1111_0000_0000u32;
        let d = decode(word);
        assert_eq!(d.form, BlockForm::PushMult);
        assert_eq!(d.direction, Direction::Store);
    }

    #[test]
    fn decodes_generic_ldm() {
        // LDM r5, {r0-r3}: P=0 U=1 S=0 W=0 L=1, Rn=5
        let word = 0b1110_100_0_1_0_1_1_0101_0000_0000_0000_1111u32;
        let d = decode(word);
        assert_eq!(d.form, BlockForm::Generic);
        assert_eq!(d.rn, 5);
    }
}
