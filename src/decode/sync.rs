//! Synchronization primitive decoding: SWP/SWPB and the LDREX/STREX family.
//!
//! Entry condition: bits[24:20] & 0x10 == 0x10 and bits[7:4] == 0x9, i.e.
//! the same "extension space" opcode byte as extra load/store but with the
//! top `op1` bit set, per ARM ARM A5-2.

use super::fields::{bits, cond, rn, rt};
use super::types::{Direction, SyncForm, Synchronization};

pub(super) fn decode(word: u32) -> Synchronization {
    let op1 = bits(word, 24, 20);
    let b = (op1 & 0x04) != 0;

    let (form, direction) = if op1 & 0x0F == 0x00 || op1 & 0x0F == 0x04 {
        // SWP / SWPB: bits[23:20] == 0x0/0x4.
        if b {
            (SyncForm::SwapByte, Direction::LoadStore)
        } else {
            (SyncForm::SwapWord, Direction::LoadStore)
        }
    } else {
        // Exclusive load/store family, bits[23:21] select width and L/S.
        let kind = bits(word, 22, 21) as u8;
        let load = op1 & 0x01 != 0;
        let direction = if load { Direction::Load } else { Direction::Store };
        (SyncForm::ExclusiveLoadStore(kind), direction)
    };

    Synchronization {
        cond: cond(word),
        rn: rn(word),
        rt: rt(word),
        rt2: rt(word).wrapping_add(1),
        direction,
        form,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_swp_word() {
        let word = 0b1110_0001_0000_0001_0010_0000_1001_0011u32;
        let d = decode(word);
        assert_eq!(d.form, SyncForm::SwapWord);
        assert_eq!(d.direction, Direction::LoadStore);
    }

    #[test]
    fn decodes_ldrex() {
        // bits[24:20] = 11001 => exclusive, load.
        let word = 0b1110_0001_1001_0001_0010_1111_1001_1111u32;
        let d = decode(word);
        assert!(matches!(d.form, SyncForm::ExclusiveLoadStore(_)));
        assert_eq!(d.direction, Direction::Load);
    }
}
